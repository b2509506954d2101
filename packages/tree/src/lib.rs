//! # Pagecraft Tree
//!
//! The node model shared by every stage of the compiler, and the allocator
//! that keeps node keys unique across copy/paste and structural edits.

pub mod allocator;
pub mod key;
pub mod node;
pub mod visitor;

pub use allocator::KeyAllocator;
pub use key::Key;
pub use node::{Attribute, Node, NodeError, NodeType, Position, Props, StyleMap, StyleValue};
pub use visitor::{walk_forest, walk_forest_mut, walk_node, walk_node_mut, Visitor, VisitorMut};
