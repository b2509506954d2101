//! # Edit Session
//!
//! Owns the authoritative tree for one editing surface, together with the
//! key allocator and clipboard that every structural command goes through.
//!
//! All commands take `&mut self`, so each one completes before the next can
//! start.

use crate::child_edit::ChildEdit;
use crate::errors::{EditorError, EditorResult};
use crate::reconciler::{find_node, find_node_mut, find_parent, patch};
use pagecraft_tree::{Key, KeyAllocator, Node};
use std::collections::HashSet;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Return the keys of deleted nodes to the allocator for reuse.
    ///
    /// When off, a key is never issued twice within the session.
    pub reclaim_deleted_keys: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            reclaim_deleted_keys: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct EditSession {
    nodes: Vec<Node>,
    keys: KeyAllocator,
    clipboard: Option<Node>,
    options: SessionOptions,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SessionOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Start a session from an existing tree, reserving all of its keys.
    pub fn from_nodes(nodes: Vec<Node>, options: SessionOptions) -> EditorResult<Self> {
        check_new_keys(&HashSet::new(), nodes.iter().flat_map(Node::keys))?;

        Ok(Self {
            keys: KeyAllocator::from_nodes(&nodes),
            nodes,
            clipboard: None,
            options,
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn keys(&self) -> &KeyAllocator {
        &self.keys
    }

    pub fn clipboard(&self) -> Option<&Node> {
        self.clipboard.as_ref()
    }

    pub fn get(&self, key: &Key) -> Option<&Node> {
        find_node(&self.nodes, key)
    }

    pub fn parent_of(&self, key: &Key) -> Option<&Node> {
        find_parent(&self.nodes, key)
    }

    /// Append a new container under `parent` (or at the root)
    pub fn new_container(&mut self, parent: Option<&Key>, tag: &str) -> EditorResult<Key> {
        self.insert(parent, |key| Node::container(tag, key))
    }

    /// Append a new self-closing element under `parent` (or at the root)
    pub fn new_single(&mut self, parent: Option<&Key>, tag: &str) -> EditorResult<Key> {
        self.insert(parent, |key| Node::single(tag, key))
    }

    /// Append a new text node under `parent` (or at the root)
    pub fn new_text(&mut self, parent: Option<&Key>, content: &str) -> EditorResult<Key> {
        self.insert(parent, |key| Node::text(content, key))
    }

    fn insert(&mut self, parent: Option<&Key>, build: impl FnOnce(Key) -> Node) -> EditorResult<Key> {
        let children = children_of_mut(&mut self.nodes, parent)?;
        let key = self.keys.allocate();
        children.push(build(key.clone()));
        debug!(key = %key, "Inserted node");
        Ok(key)
    }

    /// Deep-copy a subtree into the clipboard
    pub fn copy(&mut self, key: &Key) -> EditorResult<()> {
        let node = find_node(&self.nodes, key).ok_or_else(|| EditorError::NodeNotFound(key.clone()))?;
        self.clipboard = Some(node.clone());
        Ok(())
    }

    /// Append a fresh-keyed copy of the clipboard under `parent`
    pub fn paste(&mut self, parent: Option<&Key>) -> EditorResult<Key> {
        let mut node = self.clipboard.clone().ok_or(EditorError::EmptyClipboard)?;
        let children = children_of_mut(&mut self.nodes, parent)?;

        self.keys.resolve_conflicts(&mut node);
        let key = node.key.clone();
        debug!(key = %key, nodes = node.count(), "Pasted subtree");
        children.push(node);
        Ok(key)
    }

    /// Remove a node and its descendants, returning the removed subtree.
    pub fn delete(&mut self, key: &Key) -> EditorResult<Node> {
        let removed = remove_node(&mut self.nodes, key).ok_or_else(|| EditorError::NodeNotFound(key.clone()))?;
        if self.options.reclaim_deleted_keys {
            self.keys.release_tree(&removed);
        }
        debug!(key = %key, nodes = removed.count(), "Deleted subtree");
        Ok(removed)
    }

    /// Merge an edited copy of a node back into the tree.
    ///
    /// Returns `Ok(false)` if the node is no longer in the tree. Keys the copy
    /// introduces must not already be used elsewhere in the tree; otherwise
    /// nothing changes and `DuplicateKey` is returned.
    pub fn edit(&mut self, edited: &Node) -> EditorResult<bool> {
        let Some(current) = find_node(&self.nodes, &edited.key) else {
            warn!(key = %edited.key, "Edited node no longer in tree, skipping reconcile");
            return Ok(false);
        };

        let own = key_names(std::slice::from_ref(current));
        let taken = &key_names(&self.nodes) - &own;
        check_new_keys(&taken, edited.keys())?;

        let Some(node) = find_node_mut(&mut self.nodes, &edited.key) else {
            return Ok(false);
        };
        let before = node.keys();
        patch(node, edited);
        let after = node.keys();

        self.sync_keys(&before, &after);
        Ok(true)
    }

    /// Apply a structural edit to the children of `parent` (or the root list)
    pub fn edit_children(&mut self, parent: Option<&Key>, edit: ChildEdit) -> EditorResult<()> {
        // the replaced subtree leaves, so its keys may come back
        let replaced = match &edit {
            ChildEdit::Replace { key, .. } => find_node(&self.nodes, key)
                .map(|node| key_names(std::slice::from_ref(node)))
                .unwrap_or_default(),
            _ => HashSet::new(),
        };

        let added: Vec<Key> = edit.added().into_iter().flat_map(Node::keys).collect();
        let taken = &key_names(&self.nodes) - &replaced;
        check_new_keys(&taken, added.iter().cloned())?;

        let children = children_of_mut(&mut self.nodes, parent)?;
        let removed = edit.apply(children)?;

        if self.options.reclaim_deleted_keys {
            for node in &removed {
                self.keys.release_tree(node);
            }
        }
        for key in &added {
            self.keys.reserve(key);
        }
        Ok(())
    }

    fn sync_keys(&mut self, before: &[Key], after: &[Key]) {
        let after_set: HashSet<&Key> = after.iter().collect();
        let before_set: HashSet<&Key> = before.iter().collect();

        if self.options.reclaim_deleted_keys {
            for key in before.iter().filter(|key| !after_set.contains(key)) {
                self.keys.release(key);
            }
        }
        for key in after.iter().filter(|key| !before_set.contains(key)) {
            self.keys.reserve(key);
        }
    }
}

/// Class names of every key in `nodes`.
///
/// Keys that would clash (equal, or sharing an allocator slot like `7` and
/// `"n7"`) have the same class name, so sets of these catch both.
fn key_names(nodes: &[Node]) -> HashSet<String> {
    nodes
        .iter()
        .flat_map(Node::keys)
        .map(|key| key.class_name())
        .collect()
}

/// Fail on the first key that is already taken or repeats an earlier one
fn check_new_keys(taken: &HashSet<String>, keys: impl IntoIterator<Item = Key>) -> EditorResult<()> {
    let mut seen = HashSet::new();
    for key in keys {
        let name = key.class_name();
        if taken.contains(&name) || !seen.insert(name) {
            return Err(EditorError::DuplicateKey(key));
        }
    }
    Ok(())
}

fn children_of_mut<'a>(nodes: &'a mut Vec<Node>, parent: Option<&Key>) -> EditorResult<&'a mut Vec<Node>> {
    let Some(key) = parent else {
        return Ok(nodes);
    };

    let node = find_node_mut(nodes, key).ok_or_else(|| EditorError::ParentNotFound(key.clone()))?;
    if !node.can_have_children() {
        return Err(EditorError::CannotHaveChildren(key.clone()));
    }
    Ok(&mut node.children)
}

fn remove_node(nodes: &mut Vec<Node>, key: &Key) -> Option<Node> {
    if let Some(index) = nodes.iter().position(|node| &node.key == key) {
        return Some(nodes.remove(index));
    }
    nodes
        .iter_mut()
        .find_map(|node| remove_node(&mut node.children, key))
}
