//! # Child Edits
//!
//! Explicit structural operations on a node's child list.
//!
//! The editor decides which operation the user performed and records it
//! here, instead of having the reconciler infer it from list lengths. This
//! covers same-length changes (a replaced child) that a length comparison
//! cannot see.

use crate::errors::{EditorError, EditorResult};
use pagecraft_tree::{Key, Node};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ChildEdit {
    /// Insert a node before `index` (`index == len` appends)
    Insert { index: usize, node: Node },

    /// Remove the child with `key`
    Remove { key: Key },

    /// Swap the child with `key` for another node at the same position
    Replace { key: Key, node: Node },

    /// Append several nodes at the end
    AppendRange { nodes: Vec<Node> },

    /// Remove every child
    ClearAll,
}

impl ChildEdit {
    /// Nodes this edit adds to the tree
    pub fn added(&self) -> Vec<&Node> {
        match self {
            ChildEdit::Insert { node, .. } | ChildEdit::Replace { node, .. } => vec![node],
            ChildEdit::AppendRange { nodes } => nodes.iter().collect(),
            ChildEdit::Remove { .. } | ChildEdit::ClearAll => vec![],
        }
    }

    /// Apply to a child list, returning the nodes that were taken out.
    pub fn apply(self, children: &mut Vec<Node>) -> EditorResult<Vec<Node>> {
        match self {
            ChildEdit::Insert { index, node } => {
                if index > children.len() {
                    return Err(EditorError::IndexOutOfBounds {
                        index,
                        len: children.len(),
                    });
                }
                children.insert(index, node);
                Ok(vec![])
            }

            ChildEdit::Remove { key } => {
                let index = position_of(children, &key)?;
                Ok(vec![children.remove(index)])
            }

            ChildEdit::Replace { key, node } => {
                let index = position_of(children, &key)?;
                Ok(vec![std::mem::replace(&mut children[index], node)])
            }

            ChildEdit::AppendRange { nodes } => {
                children.extend(nodes);
                Ok(vec![])
            }

            ChildEdit::ClearAll => Ok(std::mem::take(children)),
        }
    }
}

fn position_of(children: &[Node], key: &Key) -> EditorResult<usize> {
    children
        .iter()
        .position(|child| &child.key == key)
        .ok_or_else(|| EditorError::NodeNotFound(key.clone()))
}
