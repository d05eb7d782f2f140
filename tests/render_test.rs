//! Tests for text rendering of trees

use rstest::{fixture, rstest};

use pathtree::util::testing::init_test_setup;
use pathtree::{RenderSettings, Tree, TreeNodeConvert};

#[fixture]
fn sample() -> Tree<String> {
    init_test_setup();
    let mut tree = Tree::with_value("root".to_string());
    tree.add("leaf1".to_string());
    tree.add("leaf2".to_string());
    tree.add_at("leaf1-a".to_string(), &[0]).unwrap();
    tree.add_at("leaf1-b".to_string(), &[0]).unwrap();
    tree
}

#[rstest]
fn given_sample_tree_when_displaying_then_prints_hierarchy(sample: Tree<String>) {
    let expected = "root
├── leaf1
│   ├── leaf1-a
│   └── leaf1-b
└── leaf2\n";

    assert_eq!(sample.to_string(), expected);
}

#[rstest]
fn given_show_paths_when_rendering_then_labels_are_prefixed(sample: Tree<String>) {
    let settings = RenderSettings {
        show_paths: true,
        ..Default::default()
    };
    let expected = "/ root
├── /0 leaf1
│   ├── /0/0 leaf1-a
│   └── /0/1 leaf1-b
└── /1 leaf2\n";

    let rendered = sample.render(&settings).to_string();

    assert_eq!(rendered, expected);
}

#[rstest]
fn given_max_depth_when_rendering_then_deeper_levels_elided(sample: Tree<String>) {
    let settings = RenderSettings {
        max_depth: Some(1),
        ..Default::default()
    };
    let expected = "root
├── leaf1
│   └── …
└── leaf2\n";

    let rendered = sample.render(&settings).to_string();

    assert_eq!(rendered, expected);
}

#[test]
fn given_empty_values_when_rendering_then_uses_empty_label() {
    let mut tree: Tree<String> = Tree::new();
    tree.add("child".to_string());
    let settings = RenderSettings {
        empty_label: "(none)".into(),
        ..Default::default()
    };

    let rendered = tree.render(&settings).to_string();

    assert_eq!(rendered, "(none)\n└── child\n");
}

#[rstest]
fn given_subtree_node_when_converting_then_renders_from_that_node(sample: Tree<String>) {
    let node = sample.find(&[0]).unwrap();

    let rendered = node.to_tree_string().to_string();

    assert_eq!(rendered, "leaf1\n├── leaf1-a\n└── leaf1-b\n");
}
