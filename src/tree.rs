//! Path-addressed tree container.
//!
//! A [`Tree`] owns a root node and any number of descendants. Nodes are
//! addressed by their position: the path `[1, 0]` is the first child of the
//! root's second child, `[]` is the root itself.
//!
//! ```text
//!        root            Tree::with_value("root")
//!       /    \           add("leaf1"), add("leaf2")
//!   leaf1    leaf2       add_at("leaf1-a", &[0]), add_at("leaf1-b", &[0])
//!   /    \
//! leaf1-a leaf1-b        get(&[0, 1]) == "leaf1-b"
//! ```
//!
//! Removing a node shifts its later siblings down by one, so paths taken
//! before a removal may address a different node afterwards. [`NodeId`]
//! handles do not shift; they go stale when their node is removed.

use tracing::{debug, instrument};

use crate::config::Settings;
use crate::domain::{NodeId, NodeMut, NodePath, NodeRef, TreeArena, TreeError, TreeResult};

/// Generic ordered n-ary tree with positional addressing.
#[derive(Debug, Clone)]
pub struct Tree<V> {
    arena: TreeArena<V>,
}

impl<V: Default> Default for Tree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Default> Tree<V> {
    /// Tree whose root holds `V::default()`.
    ///
    /// Use `Tree<Option<T>>` when the root needs an explicit "no value" state.
    pub fn new() -> Self {
        Self::with_value(V::default())
    }
}

impl<V> Tree<V> {
    pub fn with_value(value: V) -> Self {
        Self {
            arena: TreeArena::new(value),
        }
    }

    /// Tree whose storage is pre-sized from `settings.initial_capacity`.
    pub fn with_settings(value: V, settings: &Settings) -> Self {
        Self {
            arena: TreeArena::with_capacity(value, settings.initial_capacity),
        }
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Number of levels; a lone root has depth 1.
    pub fn depth(&self) -> usize {
        self.arena.depth()
    }

    /// Paths of all leaves in pre-order.
    pub fn leaf_paths(&self) -> Vec<NodePath> {
        self.arena
            .leaf_nodes()
            .into_iter()
            .filter_map(|id| self.arena.path_of(id).ok())
            .collect()
    }

    pub fn root(&self) -> NodeRef<'_, V> {
        self.node_ref(self.arena.root())
    }

    pub fn root_mut(&mut self) -> NodeMut<'_, V> {
        let root = self.arena.root();
        self.node_mut_unchecked(root)
    }

    pub fn root_value(&self) -> &V {
        self.root().value()
    }

    /// Node behind a handle, failing with `StaleNode` once it was removed.
    pub fn node(&self, id: NodeId) -> TreeResult<NodeRef<'_, V>> {
        NodeRef::new(&self.arena, id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> TreeResult<NodeMut<'_, V>> {
        NodeMut::new(&mut self.arena, id)
    }

    /// Current path of the node behind `id`.
    pub fn path_of(&self, id: NodeId) -> TreeResult<NodePath> {
        self.arena.path_of(id)
    }

    /// Walks `path` down from the root, validating every index on the way.
    #[instrument(level = "trace", skip(self))]
    fn resolve(&self, path: &[usize]) -> TreeResult<NodeId> {
        let mut current = self.root();
        for (depth, &index) in path.iter().enumerate() {
            let len = current.child_count();
            if index >= len {
                let err = if len == 0 {
                    TreeError::PathTooDeepOnLeaf {
                        path: NodePath::from(path),
                        depth,
                    }
                } else {
                    TreeError::InvalidPath {
                        path: NodePath::from(path),
                        depth,
                        index,
                        len,
                    }
                };
                debug!("Path resolution failed: {}", err);
                return Err(err);
            }
            current = current.child(index)?;
        }
        Ok(current.id())
    }

    /// Node addressed by `path`.
    pub fn find(&self, path: &[usize]) -> TreeResult<NodeRef<'_, V>> {
        let id = self.resolve(path)?;
        Ok(self.node_ref(id))
    }

    pub fn find_mut(&mut self, path: &[usize]) -> TreeResult<NodeMut<'_, V>> {
        let id = self.resolve(path)?;
        Ok(self.node_mut_unchecked(id))
    }

    /// Value of the node addressed by `path`.
    pub fn get(&self, path: &[usize]) -> TreeResult<&V> {
        self.find(path).map(|node| node.value())
    }

    pub fn get_mut(&mut self, path: &[usize]) -> TreeResult<&mut V> {
        self.find_mut(path).map(NodeMut::into_value_mut)
    }

    /// Appends a child holding `value` to the root.
    pub fn add(&mut self, value: V) -> NodeId {
        let root = self.arena.root();
        let child = self.insert(root, value);
        debug!("Added child {:?} to root", child);
        child
    }

    /// Appends a child holding `value` to the node addressed by `path`.
    ///
    /// The new child's index is the node's child count before the insert.
    #[instrument(level = "debug", skip(self, value))]
    pub fn add_at(&mut self, value: V, path: &[usize]) -> TreeResult<NodeId> {
        let parent = self.resolve(path)?;
        let child = self.insert(parent, value);
        debug!("Added child {:?} at {}", child, NodePath::from(path));
        Ok(child)
    }

    /// Overwrites the value at `path` and returns the previous one.
    #[instrument(level = "debug", skip(self, value))]
    pub fn change_value(&mut self, value: V, path: &[usize]) -> TreeResult<V> {
        let mut node = self.find_mut(path)?;
        Ok(node.set_value(value))
    }

    /// Removes the node at `path` together with its subtree.
    ///
    /// The node is taken out of its parent's children at its own position,
    /// the last element of `path`; later siblings shift down by one.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, path: &[usize]) -> TreeResult<V> {
        if path.is_empty() {
            debug!("Rejected removal of root");
            return Err(TreeError::RemoveOnRoot);
        }
        let id = self.resolve(path)?;
        let value = self.arena.remove_subtree(id)?;
        debug!("Removed node at {}", NodePath::from(path));
        Ok(value)
    }

    /// Moves the subtree at `from` to become the last child of the node at `to`.
    ///
    /// Both paths are resolved before anything moves. Returns the new path of
    /// the moved node.
    #[instrument(level = "debug", skip(self))]
    pub fn move_node(&mut self, from: &[usize], to: &[usize]) -> TreeResult<NodePath> {
        let node = self.resolve(from)?;
        let target = self.resolve(to)?;
        if self.arena.is_ancestor_or_self(node, target) {
            let err = TreeError::MoveIntoOwnSubtree {
                from: NodePath::from(from),
                to: NodePath::from(to),
            };
            debug!("Rejected move: {}", err);
            return Err(err);
        }

        self.arena.detach(node)?;
        self.arena.attach(target, node)?;
        let new_path = self.arena.path_of(node)?;
        debug!("Moved {} to {}", NodePath::from(from), new_path);
        Ok(new_path)
    }

    fn insert(&mut self, parent: NodeId, value: V) -> NodeId {
        let mut node = self.node_mut_unchecked(parent);
        match node.add_child(value) {
            Ok(child) => child,
            Err(err) => unreachable!("resolved parent vanished: {}", err),
        }
    }

    /// Only for handles that were just resolved against this tree.
    fn node_ref(&self, id: NodeId) -> NodeRef<'_, V> {
        match NodeRef::new(&self.arena, id) {
            Ok(node) => node,
            Err(err) => unreachable!("resolved node vanished: {}", err),
        }
    }

    fn node_mut_unchecked(&mut self, id: NodeId) -> NodeMut<'_, V> {
        match NodeMut::new(&mut self.arena, id) {
            Ok(node) => node,
            Err(err) => unreachable!("resolved node vanished: {}", err),
        }
    }
}
