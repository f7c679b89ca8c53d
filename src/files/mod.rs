//! A toy node tree that builds full paths out of [`Name`](crate::Name)s.
//!
//! The tree only clones a parent's full name, appends one masked base name
//! and renders the result.

mod node;
mod tree;

pub use node::{FileState, NodeId, NodeKind};
pub use tree::{FileSystem, PATH_DELIMITER};
