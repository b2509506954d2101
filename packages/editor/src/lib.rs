//! # Pagecraft Editor
//!
//! Keeps the authoritative node tree in sync with what the user does on the
//! canvas.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ canvas / layer panel (external)             │
//! └─────────────────────────────────────────────┘
//!                     ↓ commands, edited copies
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - create / copy / paste / delete nodes     │
//! │  - reconcile edited copies by key           │
//! │  - explicit child-list edits                │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: Node tree → markup           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use pagecraft_editor::EditSession;
//!
//! let mut session = EditSession::new();
//! let root = session.new_container(None, "div").unwrap();
//! session.new_text(Some(&root), "Hello").unwrap();
//!
//! let mut edited = session.get(&root).unwrap().clone();
//! edited.tag = "section".to_string();
//! assert!(session.edit(&edited).unwrap());
//! ```

mod child_edit;
mod errors;
pub mod reconciler;
mod session;

pub use child_edit::ChildEdit;
pub use errors::{EditorError, EditorResult};
pub use reconciler::{find_node, find_node_mut, find_parent, patch, patch_children, patch_props, reconcile};
pub use session::{EditSession, SessionOptions};

// Re-export tree types for convenience
pub use pagecraft_tree::{Key, KeyAllocator, Node, NodeType};
