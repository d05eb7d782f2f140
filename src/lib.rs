//! Ordered n-ary tree container with positional path addressing.
//!
//! ```
//! use pathtree::Tree;
//!
//! let mut tree = Tree::with_value("root");
//! tree.add("leaf1");
//! tree.add("leaf2");
//! tree.add_at("leaf1-a", &[0]).unwrap();
//! tree.add_at("leaf1-b", &[0]).unwrap();
//!
//! assert_eq!(tree.get(&[0, 1]).unwrap(), &"leaf1-b");
//! tree.remove(&[0, 0]).unwrap();
//! assert_eq!(tree.get(&[0, 0]).unwrap(), &"leaf1-b");
//! ```

pub mod config;
pub mod domain;
pub mod tree;
pub mod tree_traits;
pub mod util;

pub use config::{RenderSettings, Settings};
pub use domain::{NodeId, NodeMut, NodePath, NodeRef, TreeError, TreeResult};
pub use tree::Tree;
pub use tree_traits::TreeNodeConvert;
