//! Tests for node navigation and node-level mutation

use rstest::{fixture, rstest};

use pathtree::util::testing::init_test_setup;
use pathtree::{NodePath, Tree, TreeError};

#[fixture]
fn sample() -> Tree<&'static str> {
    init_test_setup();
    let mut tree = Tree::with_value("root");
    tree.add("leaf1");
    tree.add("leaf2");
    tree.add_at("leaf1-a", &[0]).unwrap();
    tree.add_at("leaf1-b", &[0]).unwrap();
    tree
}

fn values(nodes: &[pathtree::NodeRef<'_, &'static str>]) -> Vec<&'static str> {
    nodes.iter().map(|node| *node.value()).collect()
}

// ============================================================
// Root / leaf predicates
// ============================================================

#[test]
fn given_fresh_tree_when_getting_root_siblings_then_only_root() {
    let tree: Tree<String> = Tree::new();

    let siblings = tree.root().siblings();

    assert_eq!(siblings.len(), 1);
    assert_eq!(siblings[0], tree.root());
    assert!(siblings[0].is_root());
}

#[rstest]
#[case(vec![])]
#[case(vec![0])]
#[case(vec![0, 1])]
#[case(vec![1])]
fn given_any_node_when_walking_to_root_then_only_root_is_root(
    sample: Tree<&'static str>,
    #[case] path: Vec<usize>,
) {
    let node = sample.find(&path).unwrap();

    let root = node.root();

    assert!(root.is_root());
    assert_eq!(root, sample.root());
    assert_eq!(node.is_root(), path.is_empty());
    assert_eq!(node.parent().is_none(), node.is_root());
}

#[rstest]
fn given_sample_tree_when_checking_leaves_then_only_childless(sample: Tree<&'static str>) {
    assert!(!sample.root().is_leaf());
    assert!(!sample.find(&[0]).unwrap().is_leaf());
    assert!(sample.find(&[0, 0]).unwrap().is_leaf());
    assert!(sample.find(&[1]).unwrap().is_leaf());
}

// ============================================================
// Children / siblings / parent
// ============================================================

#[rstest]
fn given_inner_node_when_getting_children_then_in_index_order(sample: Tree<&'static str>) {
    let children = sample.find(&[0]).unwrap().children();

    assert_eq!(values(&children), vec!["leaf1-a", "leaf1-b"]);
}

#[rstest]
fn given_leaf_when_getting_children_then_empty(sample: Tree<&'static str>) {
    let leaf = sample.find(&[1]).unwrap();

    assert!(leaf.children().is_empty());
    assert_eq!(leaf.child_count(), 0);
}

#[rstest]
fn given_child_when_getting_siblings_then_includes_itself(sample: Tree<&'static str>) {
    let node = sample.find(&[0, 1]).unwrap();

    let siblings = node.siblings();

    assert_eq!(values(&siblings), vec!["leaf1-a", "leaf1-b"]);
    assert!(siblings.contains(&node));
}

#[rstest]
fn given_grandchild_when_getting_parent_then_returns_owner(sample: Tree<&'static str>) {
    let node = sample.find(&[0, 1]).unwrap();

    let parent = node.parent().unwrap();

    assert_eq!(*parent.value(), "leaf1");
    assert_eq!(parent.path(), NodePath::from([0]));
}

#[rstest]
fn given_node_when_querying_position_then_matches_path(sample: Tree<&'static str>) {
    let node = sample.find(&[0, 1]).unwrap();

    assert_eq!(node.position(), Some(1));
    assert_eq!(node.depth(), 2);
    assert_eq!(node.path(), NodePath::from([0, 1]));
    assert_eq!(sample.root().position(), None);
    assert_eq!(sample.root().path(), NodePath::root());
}

// ============================================================
// Child lookup errors
// ============================================================

#[rstest]
fn given_out_of_range_index_when_getting_child_then_invalid_path(sample: Tree<&'static str>) {
    let node = sample.find(&[0]).unwrap();

    let result = node.child(2);

    assert_eq!(
        result.err(),
        Some(TreeError::InvalidPath {
            path: NodePath::from([0, 2]),
            depth: 1,
            index: 2,
            len: 2,
        })
    );
}

#[rstest]
fn given_leaf_when_getting_child_then_path_too_deep(sample: Tree<&'static str>) {
    let leaf = sample.find(&[1]).unwrap();

    let result = leaf.child(0);

    assert_eq!(
        result.err(),
        Some(TreeError::PathTooDeepOnLeaf {
            path: NodePath::from([1, 0]),
            depth: 1,
        })
    );
}

// ============================================================
// NodeMut
// ============================================================

#[rstest]
fn given_node_mut_when_adding_child_then_appended(mut sample: Tree<&'static str>) {
    // Act
    let id = {
        let mut leaf2 = sample.find_mut(&[1]).unwrap();
        leaf2.add_child("leaf2-a").unwrap()
    };

    // Assert
    assert_eq!(sample.path_of(id).unwrap(), NodePath::from([1, 0]));
    assert_eq!(sample.node(id).unwrap().parent().unwrap().value(), &"leaf2");
}

#[rstest]
fn given_node_mut_when_removing_child_then_later_children_shift(mut sample: Tree<&'static str>) {
    let removed = sample.root_mut().remove_child(0).unwrap();

    assert_eq!(removed, "leaf1");
    assert_eq!(sample.get(&[0]), Ok(&"leaf2"));
    assert_eq!(sample.len(), 2);
}

#[rstest]
fn given_node_mut_when_removing_missing_child_then_errors(mut sample: Tree<&'static str>) {
    let mut root = sample.root_mut();

    let result = root.remove_child(7);

    assert!(matches!(result, Err(TreeError::InvalidPath { index: 7, len: 2, .. })));
    assert_eq!(sample.len(), 5);
}

#[rstest]
fn given_node_mut_when_setting_value_then_previous_returned(mut sample: Tree<&'static str>) {
    let previous = {
        let mut root = sample.root_mut();
        let mut leaf1 = root.child_mut(0).unwrap();
        leaf1.set_value("first")
    };

    assert_eq!(previous, "leaf1");
    assert_eq!(sample.get(&[0]), Ok(&"first"));
}

#[rstest]
fn given_removed_node_handle_when_resolving_then_stale(mut sample: Tree<&'static str>) {
    let id = sample.find(&[1]).unwrap().id();
    sample.remove(&[1]).unwrap();

    assert_eq!(sample.node_mut(id).err(), Some(TreeError::StaleNode(id)));
    assert_eq!(sample.path_of(id), Err(TreeError::StaleNode(id)));
}

// ============================================================
// Arena
// ============================================================

#[test]
fn given_standalone_arena_when_inserting_then_links_readable_through_accessors() {
    use pathtree::domain::TreeArena;

    let mut arena = TreeArena::new("root");
    let root = arena.root();
    let child = arena.insert_child(root, "child").unwrap();

    let root_node = arena.get_node(root).unwrap();
    let child_node = arena.get_node(child).unwrap();

    assert_eq!(root_node.children(), &[child]);
    assert_eq!(root_node.parent(), None);
    assert_eq!(child_node.parent(), Some(root));
    assert_eq!(child_node.value, "child");
}
