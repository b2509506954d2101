//! Error types for the editor

use pagecraft_tree::Key;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Node not found: {0}")]
    NodeNotFound(Key),

    #[error("Parent not found: {0}")]
    ParentNotFound(Key),

    #[error("Node {0} cannot have children")]
    CannotHaveChildren(Key),

    #[error("Index {index} out of bounds for {len} children")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Key {0} is already used in this tree")]
    DuplicateKey(Key),

    #[error("Nothing has been copied")]
    EmptyClipboard,
}

pub type EditorResult<T> = Result<T, EditorError>;
