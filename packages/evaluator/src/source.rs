use pagecraft_tree::Key;
use serde::{Deserialize, Serialize};

/// Node of the editor's layer tree, as produced by the tree widget
///
/// This is not a render node: it only knows a title and whether the widget
/// shows it as a leaf. [`Transformer`](crate::Transformer) turns it into a
/// [`Node`](pagecraft_tree::Node).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceNode {
    pub title: String,
    pub key: Key,
    #[serde(default, alias = "leaf")]
    pub is_leaf: bool,
    #[serde(default)]
    pub children: Vec<SourceNode>,
}

impl SourceNode {
    pub fn leaf(title: impl Into<String>, key: impl Into<Key>) -> Self {
        Self {
            title: title.into(),
            key: key.into(),
            is_leaf: true,
            children: Vec::new(),
        }
    }

    pub fn branch(title: impl Into<String>, key: impl Into<Key>, children: Vec<SourceNode>) -> Self {
        Self {
            title: title.into(),
            key: key.into(),
            is_leaf: false,
            children,
        }
    }
}
