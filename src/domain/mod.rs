//! Domain layer: node storage, node views and positional paths
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod arena;
pub mod error;
pub mod node;
pub mod path;

pub use arena::{NodeId, TreeArena, TreeNode};
pub use error::{TreeError, TreeResult};
pub use node::{NodeMut, NodeRef};
pub use path::NodePath;
