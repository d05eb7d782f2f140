//! Borrowed views onto single nodes for navigation and local mutation.

use std::fmt;

use tracing::debug;

use crate::domain::arena::{NodeId, TreeArena, TreeNode};
use crate::domain::error::{TreeError, TreeResult};
use crate::domain::path::NodePath;

/// Read-only view of one node.
///
/// Holding a `NodeRef` borrows the whole tree, so the node it points at can
/// not disappear underneath it.
pub struct NodeRef<'a, V> {
    arena: &'a TreeArena<V>,
    id: NodeId,
    node: &'a TreeNode<V>,
}

// Manual impls: a derive would demand `V: Clone`.
impl<V> Clone for NodeRef<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for NodeRef<'_, V> {}

impl<'a, V> NodeRef<'a, V> {
    pub(crate) fn new(arena: &'a TreeArena<V>, id: NodeId) -> TreeResult<Self> {
        let node = arena.node(id)?;
        Ok(Self { arena, id, node })
    }

    /// Only for handles taken from live links inside the same arena.
    fn linked(&self, id: NodeId) -> Option<Self> {
        Self::new(self.arena, id).ok()
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn value(&self) -> &'a V {
        &self.node.value
    }

    pub fn is_leaf(&self) -> bool {
        self.node.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.node.parent.is_none()
    }

    pub fn child_count(&self) -> usize {
        self.node.children.len()
    }

    pub fn parent(&self) -> Option<NodeRef<'a, V>> {
        self.node.parent.and_then(|parent| self.linked(parent))
    }

    /// Child at `index`.
    ///
    /// Fails with `PathTooDeepOnLeaf` on a leaf and `InvalidPath` when out of range.
    pub fn child(&self, index: usize) -> TreeResult<NodeRef<'a, V>> {
        match self.node.children.get(index) {
            Some(&child) => Self::new(self.arena, child),
            None => Err(self.child_error(index)),
        }
    }

    pub(crate) fn child_error(&self, index: usize) -> TreeError {
        let path = self.path().child(index);
        let depth = path.len() - 1;
        if self.is_leaf() {
            TreeError::PathTooDeepOnLeaf { path, depth }
        } else {
            TreeError::InvalidPath {
                path,
                depth,
                index,
                len: self.child_count(),
            }
        }
    }

    /// All children in index order; empty for a leaf.
    pub fn children(&self) -> Vec<NodeRef<'a, V>> {
        self.node
            .children
            .iter()
            .filter_map(|&child| self.linked(child))
            .collect()
    }

    /// The parent's children, this node included. A root is its own sole sibling.
    pub fn siblings(&self) -> Vec<NodeRef<'a, V>> {
        match self.parent() {
            Some(parent) => parent.children(),
            None => vec![*self],
        }
    }

    /// Walks parent links up to the node without a parent.
    pub fn root(&self) -> NodeRef<'a, V> {
        let mut current = *self;
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Index within the parent's children, None for the root.
    pub fn position(&self) -> Option<usize> {
        self.arena.position(self.id)
    }

    /// Number of edges from the root.
    pub fn depth(&self) -> usize {
        // the borrow keeps every ancestor alive, so the walk can not fail
        self.arena.depth_of(self.id).unwrap_or_default()
    }

    /// Current positional path of this node.
    pub fn path(&self) -> NodePath {
        self.arena.path_of(self.id).unwrap_or_default()
    }
}

impl<V> PartialEq for NodeRef<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.id == other.id
    }
}

impl<V> Eq for NodeRef<'_, V> {}

impl<V: fmt::Debug> fmt::Debug for NodeRef<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("value", &self.node.value)
            .field("children", &self.node.children.len())
            .finish()
    }
}

/// Mutable view of one node.
pub struct NodeMut<'a, V> {
    arena: &'a mut TreeArena<V>,
    id: NodeId,
}

impl<'a, V> NodeMut<'a, V> {
    pub(crate) fn new(arena: &'a mut TreeArena<V>, id: NodeId) -> TreeResult<Self> {
        if !arena.contains(id) {
            return Err(TreeError::StaleNode(id));
        }
        Ok(Self { arena, id })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn as_ref(&self) -> NodeRef<'_, V> {
        NodeRef {
            arena: &*self.arena,
            id: self.id,
            node: self.node(),
        }
    }

    fn node(&self) -> &TreeNode<V> {
        self.arena
            .get_node(self.id)
            .unwrap_or_else(|| unreachable!("NodeMut always points at a live node"))
    }

    fn node_mut(&mut self) -> &mut TreeNode<V> {
        self.arena
            .get_node_mut(self.id)
            .unwrap_or_else(|| unreachable!("NodeMut always points at a live node"))
    }

    pub fn value(&self) -> &V {
        &self.node().value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.node_mut().value
    }

    /// Overwrites the stored value, returning the previous one.
    pub fn set_value(&mut self, value: V) -> V {
        std::mem::replace(self.value_mut(), value)
    }

    /// Appends a new child holding `value`; its index is the previous child count.
    pub fn add_child(&mut self, value: V) -> TreeResult<NodeId> {
        let child = self.arena.insert_child(self.id, value)?;
        debug!("Added child {:?} below {:?}", child, self.id);
        Ok(child)
    }

    /// Mutable view of the child at `index`.
    pub fn child_mut(&mut self, index: usize) -> TreeResult<NodeMut<'_, V>> {
        let child = self
            .arena
            .child_at(self.id, index)
            .ok_or_else(|| self.as_ref().child_error(index))?;
        NodeMut::new(&mut *self.arena, child)
    }

    /// Removes the child at `index` with its whole subtree; later children shift down.
    pub fn remove_child(&mut self, index: usize) -> TreeResult<V> {
        let child = self
            .arena
            .child_at(self.id, index)
            .ok_or_else(|| self.as_ref().child_error(index))?;
        self.arena.remove_subtree(child)
    }

    /// Consumes the view, keeping the borrow of the value.
    pub fn into_value_mut(self) -> &'a mut V {
        let Self { arena, id } = self;
        &mut arena
            .get_node_mut(id)
            .unwrap_or_else(|| unreachable!("NodeMut always points at a live node"))
            .value
    }
}
