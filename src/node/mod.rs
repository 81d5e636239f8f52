//! Node model for the mock filesystem tree.
//!
//! A node is either a file (opaque text contents plus a derived byte size)
//! or a directory (exclusively owned children). Both kinds carry the same
//! set of POSIX-like attributes.

mod attributes;
mod tree;

pub use attributes::{AttrValue, AttrWrite, Attribute, NodeAttributes};
pub use tree::{Node, NodeKind};
