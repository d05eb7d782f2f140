//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::arena::NodeId;
use crate::domain::path::NodePath;

/// Errors raised by path resolution and structural mutation.
///
/// Every operation that returns one of these has left the tree untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("invalid path {path}: index {index} at depth {depth} out of range ({len} children)")]
    InvalidPath {
        path: NodePath,
        depth: usize,
        index: usize,
        len: usize,
    },

    #[error("invalid path {path}: node at depth {depth} is a leaf")]
    PathTooDeepOnLeaf { path: NodePath, depth: usize },

    #[error("cannot remove the root node")]
    RemoveOnRoot,

    #[error("node handle no longer refers to a node in this tree: {0:?}")]
    StaleNode(NodeId),

    #[error("cannot move {from} into its own subtree at {to}")]
    MoveIntoOwnSubtree { from: NodePath, to: NodePath },

    #[error("cannot parse path '{input}': {reason}")]
    PathParse { input: String, reason: String },

    #[error("configuration error: {message}")]
    Config { message: String },
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
