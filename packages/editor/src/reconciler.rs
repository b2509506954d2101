//! # Reconciler
//!
//! Merges an edited, detached copy of a node back into the authoritative
//! tree. The copy is matched to its original by key.
//!
//! ## Child lists
//!
//! Children are compared by length and key membership first (bulk fill,
//! bulk clear, tail append, removal), then the aligned lists are re-diffed
//! position by position. The result always equals the edited list, so
//! patching twice with the same copy changes nothing the second time.

use pagecraft_tree::{Key, Node, Props};
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Find the node with `key`, checking every sibling of a level before
/// descending into their children.
pub fn find_node<'a>(nodes: &'a [Node], key: &Key) -> Option<&'a Node> {
    if let Some(node) = nodes.iter().find(|node| &node.key == key) {
        return Some(node);
    }
    nodes.iter().find_map(|node| find_node(&node.children, key))
}

pub fn find_node_mut<'a>(nodes: &'a mut [Node], key: &Key) -> Option<&'a mut Node> {
    match nodes.iter().position(|node| &node.key == key) {
        Some(index) => Some(&mut nodes[index]),
        None => nodes
            .iter_mut()
            .find_map(|node| find_node_mut(&mut node.children, key)),
    }
}

/// Parent of the node with `key`. `None` for root-level nodes and unknown keys.
pub fn find_parent<'a>(nodes: &'a [Node], key: &Key) -> Option<&'a Node> {
    for node in nodes {
        if node.children.iter().any(|child| &child.key == key) {
            return Some(node);
        }
    }
    nodes.iter().find_map(|node| find_parent(&node.children, key))
}

/// Patch the node matching `edited.key` in place.
///
/// Returns `false` without touching the tree when the key is gone, e.g. the
/// node was deleted while the edit form was still open.
pub fn reconcile(tree: &mut [Node], edited: &Node) -> bool {
    match find_node_mut(tree, &edited.key) {
        Some(node) => {
            patch(node, edited);
            true
        }
        None => {
            warn!(key = %edited.key, "Edited node no longer in tree, skipping reconcile");
            false
        }
    }
}

/// Apply the field-level differences of `new` onto `old`
pub fn patch(old: &mut Node, new: &Node) {
    if old.node_type != new.node_type {
        old.node_type = new.node_type;
    }

    if old.tag != new.tag {
        debug!(key = %old.key, from = %old.tag, to = %new.tag, "Patching tag");
        old.tag = new.tag.clone();
    }

    if old.alias != new.alias {
        old.alias = new.alias.clone();
    }

    if old.props != new.props {
        patch_props(&mut old.props, &new.props);
    }

    if old.content != new.content {
        old.content = new.content.clone();
    }

    patch_children(&mut old.children, &new.children);
}

/// Bring `old` in line with `new` under a single structural change.
pub fn patch_children(old: &mut Vec<Node>, new: &[Node]) {
    if old.is_empty() {
        if !new.is_empty() {
            debug!(count = new.len(), "Filling empty child list");
            *old = new.to_vec();
        }
        return;
    }

    if new.is_empty() {
        debug!(count = old.len(), "Clearing child list");
        old.clear();
        return;
    }

    match old.len().cmp(&new.len()) {
        Ordering::Less => {
            let start = old.len();
            debug!(added = new.len() - start, "Appending children");
            old.extend_from_slice(&new[start..]);
        }
        Ordering::Greater => {
            let before = old.len();
            old.retain(|child| new.iter().any(|candidate| candidate.key == child.key));
            debug!(removed = before - old.len(), "Removed children");

            if old.len() != new.len() {
                warn!(
                    old = old.len(),
                    new = new.len(),
                    "Child list changed by more than one edit, replacing it"
                );
                *old = new.to_vec();
                return;
            }
        }
        Ordering::Equal => {}
    }

    for (old_child, new_child) in old.iter_mut().zip(new) {
        if old_child.key == new_child.key {
            patch(old_child, new_child);
        } else {
            debug!(from = %old_child.key, to = %new_child.key, "Replacing child at position");
            *old_child = new_child.clone();
        }
    }
}

/// Overwrite every prop of `old` with the value from `new`.
///
/// Attribute lists and style maps are replaced wholesale, not diffed.
pub fn patch_props(old: &mut Option<Props>, new: &Option<Props>) {
    let Some(new) = new else {
        *old = None;
        return;
    };

    let old = old.get_or_insert_with(Props::default);
    old.id = new.id.clone();
    old.class_name = new.class_name.clone();
    old.style = new.style.clone();
    old.attributes = new.attributes.clone();
    old.position = new.position;
}
