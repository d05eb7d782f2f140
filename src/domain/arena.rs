use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::error::{TreeError, TreeResult};
use crate::domain::path::NodePath;

/// Opaque handle to a node stored in a [`TreeArena`].
///
/// Handles are generational: once the node is removed, lookups through the
/// handle fail even if the arena slot gets reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug, Clone)]
pub struct TreeNode<V> {
    /// Payload stored at this node
    pub value: V,
    /// Handle of the parent node, None for the root
    pub(crate) parent: Option<NodeId>,
    /// Handles of child nodes in insertion order
    pub(crate) children: Vec<NodeId>,
}

impl<V> TreeNode<V> {
    fn new(value: V, parent: Option<NodeId>) -> Self {
        Self {
            value,
            parent,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena-based storage for one tree.
///
/// The arena owns every node; parent and child links are handles into it, so
/// the parent back-reference never keeps a node alive. The root is created
/// with the arena and can not be removed.
#[derive(Debug, Clone)]
pub struct TreeArena<V> {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode<V>>,
    /// Handle of the root node
    root: NodeId,
}

impl<V> TreeArena<V> {
    pub fn new(root_value: V) -> Self {
        Self::with_capacity(root_value, 1)
    }

    pub fn with_capacity(root_value: V, capacity: usize) -> Self {
        let mut arena = Arena::with_capacity(capacity.max(1));
        let root = NodeId(arena.insert(TreeNode::new(root_value, None)));
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Always false: the root is never removed.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    pub fn get_node(&self, id: NodeId) -> Option<&TreeNode<V>> {
        self.arena.get(id.0)
    }

    pub(crate) fn get_node_mut(&mut self, id: NodeId) -> Option<&mut TreeNode<V>> {
        self.arena.get_mut(id.0)
    }

    pub(crate) fn node(&self, id: NodeId) -> TreeResult<&TreeNode<V>> {
        self.get_node(id).ok_or(TreeError::StaleNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> TreeResult<&mut TreeNode<V>> {
        self.get_node_mut(id).ok_or(TreeError::StaleNode(id))
    }

    /// Child of `id` at `index`, None when out of range or `id` is stale.
    pub fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.get_node(id)
            .and_then(|node| node.children.get(index).copied())
    }

    /// Creates a node holding `value` and appends it to `parent`'s children.
    #[instrument(level = "trace", skip(self, value))]
    pub fn insert_child(&mut self, parent: NodeId, value: V) -> TreeResult<NodeId> {
        if !self.contains(parent) {
            return Err(TreeError::StaleNode(parent));
        }
        let child = NodeId(self.arena.insert(TreeNode::new(value, Some(parent))));
        self.node_mut(parent)?.children.push(child);
        Ok(child)
    }

    /// Index of `id` in its parent's child list, None for the root.
    pub fn position(&self, id: NodeId) -> Option<usize> {
        let parent = self.get_node(id)?.parent?;
        self.get_node(parent)?
            .children
            .iter()
            .position(|&child| child == id)
    }

    /// Unlinks `id` from its parent. The subtree stays in the arena.
    ///
    /// Returns the former parent and the position `id` occupied there.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn detach(&mut self, id: NodeId) -> TreeResult<(NodeId, usize)> {
        let parent = self.node(id)?.parent.ok_or(TreeError::RemoveOnRoot)?;
        let position = self
            .position(id)
            .ok_or_else(|| TreeError::StaleNode(id))?;
        self.node_mut(parent)?.children.remove(position);
        self.node_mut(id)?.parent = None;
        Ok((parent, position))
    }

    /// Appends a detached node (and its subtree) to `parent`.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn attach(&mut self, parent: NodeId, id: NodeId) -> TreeResult<()> {
        if !self.contains(id) {
            return Err(TreeError::StaleNode(id));
        }
        self.node_mut(parent)?.children.push(id);
        self.node_mut(id)?.parent = Some(parent);
        Ok(())
    }

    /// Unlinks `id` and releases it together with every descendant.
    ///
    /// Later siblings shift down by one. Returns the value of `id`.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_subtree(&mut self, id: NodeId) -> TreeResult<V> {
        let (parent, position) = self.detach(id)?;
        let doomed = self.preorder(id);
        debug!(
            "Removing {} node(s) at position {} below {:?}",
            doomed.len(),
            position,
            parent
        );

        let mut removed_value = None;
        for idx in doomed {
            if let Some(node) = self.arena.remove(idx.0) {
                if idx == id {
                    removed_value = Some(node.value);
                }
            }
        }
        removed_value.ok_or(TreeError::StaleNode(id))
    }

    /// Handles of the subtree rooted at `start` in pre-order, `start` first.
    pub(crate) fn preorder(&self, start: NodeId) -> Vec<NodeId> {
        let mut visited = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.get_node(current) {
                visited.push(current);
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    stack.push(child);
                }
            }
        }
        visited
    }

    /// Number of edges between `id` and the root.
    pub fn depth_of(&self, id: NodeId) -> TreeResult<usize> {
        let mut depth = 0;
        let mut current = self.node(id)?;
        while let Some(parent) = current.parent {
            depth += 1;
            current = self.node(parent)?;
        }
        Ok(depth)
    }

    /// Positional path from the root to `id`.
    #[instrument(level = "trace", skip(self))]
    pub fn path_of(&self, id: NodeId) -> TreeResult<NodePath> {
        let mut segments = Vec::new();
        let mut current = id;
        while let Some(parent) = self.node(current)?.parent {
            let position = self
                .position(current)
                .ok_or(TreeError::StaleNode(current))?;
            segments.push(position);
            current = parent;
        }
        segments.reverse();
        Ok(NodePath::from(segments))
    }

    /// True if `ancestor` is `id` or lies on the way from `id` to the root.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(idx) = current {
            if idx == ancestor {
                return true;
            }
            current = self.get_node(idx).and_then(|node| node.parent);
        }
        false
    }

    /// Number of levels; a lone root has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, node_idx: NodeId) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects all leaf nodes (nodes with no children) in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        self.collect_leaves(self.root, &mut leaves);
        leaves
    }

    fn collect_leaves(&self, node_idx: NodeId, leaves: &mut Vec<NodeId>) {
        if let Some(node) = self.get_node(node_idx) {
            if node.children.is_empty() {
                leaves.push(node_idx);
            } else {
                for &child in &node.children {
                    self.collect_leaves(child, leaves);
                }
            }
        }
    }
}
