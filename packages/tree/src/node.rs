use crate::key::Key;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inline style declarations in the order they were set
pub type StyleMap = IndexMap<String, StyleValue>;

/// Kind of node in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeType {
    /// Element that may own children (div, section, ...)
    Container,
    /// Self-closing element (img, input, ...)
    Single,
    /// Literal text
    Text,
}

/// A single style value as set by the styling form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// Cleared or never set
    Unset,
    Number(f64),
    Text(String),
}

impl StyleValue {
    /// Unset, non-finite, and whitespace-only values are never emitted.
    pub fn is_valid(&self) -> bool {
        match self {
            StyleValue::Unset => false,
            StyleValue::Number(value) => value.is_finite(),
            StyleValue::Text(value) => !value.trim().is_empty(),
        }
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(value as f64)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

/// Free-form attribute (`name="value"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Resolved screen position in pixels, filled in by the canvas before emission
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Element properties edited through the styling forms
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Props {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub style: StyleMap,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Structural problems a caller must not hand to the compiler
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeError {
    #[error("Element node {key} has no tag")]
    MissingTag { key: Key },

    #[error("Text node {key} cannot own children")]
    TextWithChildren { key: Key },
}

/// Node of the authoritative tree
///
/// Construction does not validate shape: an element without a tag or a text
/// node with children is a caller error. Use [`Node::validate`] to check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub key: Key,
    #[serde(default)]
    pub tag: String,
    /// Display name shown in the layer panel instead of the tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Props>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Node {
    pub fn new(
        node_type: NodeType,
        tag: impl Into<String>,
        props: Option<Props>,
        children: Vec<Node>,
        key: impl Into<Key>,
    ) -> Self {
        Self {
            node_type,
            key: key.into(),
            tag: tag.into(),
            alias: None,
            children,
            props,
            content: None,
        }
    }

    pub fn container(tag: impl Into<String>, key: impl Into<Key>) -> Self {
        Self::new(NodeType::Container, tag, Some(Props::default()), Vec::new(), key)
    }

    pub fn single(tag: impl Into<String>, key: impl Into<Key>) -> Self {
        Self::new(NodeType::Single, tag, Some(Props::default()), Vec::new(), key)
    }

    pub fn text(content: impl Into<String>, key: impl Into<Key>) -> Self {
        Self {
            node_type: NodeType::Text,
            key: key.into(),
            tag: String::new(),
            alias: None,
            children: Vec::new(),
            props: None,
            content: Some(content.into()),
        }
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    pub fn is_single(&self) -> bool {
        self.node_type == NodeType::Single
    }

    pub fn can_have_children(&self) -> bool {
        self.node_type == NodeType::Container
    }

    /// Props of an element node, created on first access. `None` for text.
    pub fn props_mut(&mut self) -> Option<&mut Props> {
        if self.is_text() {
            return None;
        }
        Some(self.props.get_or_insert_with(Props::default))
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        if let Some(props) = self.props_mut() {
            props.id = Some(id.into());
        }
        self
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        if let Some(props) = self.props_mut() {
            props.class_name = Some(class_name.into());
        }
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        if let Some(props) = self.props_mut() {
            props.style.insert(property.into(), value.into());
        }
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Some(props) = self.props_mut() {
            props.attributes.push(Attribute::new(name, value));
        }
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        if let Some(props) = self.props_mut() {
            props.position = Some(Position { x, y });
        }
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Check the shape contract for this node and all descendants that get
    /// emitted (SINGLE nodes are not descended into).
    pub fn validate(&self) -> Result<(), NodeError> {
        match self.node_type {
            NodeType::Text if !self.children.is_empty() => {
                return Err(NodeError::TextWithChildren {
                    key: self.key.clone(),
                })
            }
            NodeType::Container | NodeType::Single if self.tag.trim().is_empty() => {
                return Err(NodeError::MissingTag {
                    key: self.key.clone(),
                })
            }
            _ => {}
        }

        // children of self-closing nodes are never emitted
        if self.is_single() {
            return Ok(());
        }
        self.children.iter().try_for_each(Node::validate)
    }

    /// Keys of this node and all descendants, pre-order
    pub fn keys(&self) -> Vec<Key> {
        let mut keys = Vec::with_capacity(self.count());
        collect_keys(self, &mut keys);
        keys
    }

    /// Number of nodes in this subtree, including self
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }
}

fn collect_keys(node: &Node, keys: &mut Vec<Key>) {
    keys.push(node.key.clone());
    for child in &node.children {
        collect_keys(child, keys);
    }
}
