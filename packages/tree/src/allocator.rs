use crate::key::Key;
use crate::node::Node;
use crate::visitor::{walk_node_mut, VisitorMut};
use std::collections::BTreeSet;

/// Hands out node keys for one editing session
///
/// Always issues the smallest integer not currently in use, so keys vacated
/// by [`release`](KeyAllocator::release) are reused before larger ones.
#[derive(Debug, Clone, Default)]
pub struct KeyAllocator {
    used: BTreeSet<u64>,
}

impl KeyAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator that already considers every key in `nodes` taken
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let mut allocator = Self::new();
        allocator.reserve_tree(nodes);
        allocator
    }

    /// Issue the smallest free key
    pub fn allocate(&mut self) -> Key {
        let mut candidate = 0;
        for &used in &self.used {
            if used != candidate {
                break;
            }
            candidate += 1;
        }

        let inserted = self.used.insert(candidate);
        debug_assert!(inserted, "key {} issued twice", candidate);
        Key::Int(candidate)
    }

    /// Mark a key as taken. Returns `false` if its slot already was.
    ///
    /// Only keys with a [`slot`](Key::slot) are tracked; other string keys
    /// never collide with allocated ones.
    pub fn reserve(&mut self, key: &Key) -> bool {
        match key.slot() {
            Some(value) => self.used.insert(value),
            None => true,
        }
    }

    /// Reserve every key in a forest
    pub fn reserve_tree(&mut self, nodes: &[Node]) {
        for node in nodes {
            for key in node.keys() {
                self.reserve(&key);
            }
        }
    }

    /// Make a key available again
    pub fn release(&mut self, key: &Key) -> bool {
        match key.slot() {
            Some(value) => self.used.remove(&value),
            None => false,
        }
    }

    /// Release the keys of a node and all its descendants
    pub fn release_tree(&mut self, node: &Node) {
        for key in node.keys() {
            self.release(&key);
        }
    }

    /// Give every node in the subtree a fresh key, parents before children.
    ///
    /// Call this right after deep-cloning a subtree so the copy can be
    /// inserted next to the original.
    pub fn resolve_conflicts(&mut self, node: &mut Node) {
        let mut rekey = Rekey { allocator: self };
        rekey.visit_node_mut(node);
    }

    pub fn contains(&self, key: &Key) -> bool {
        key.slot()
            .map(|value| self.used.contains(&value))
            .unwrap_or(false)
    }

    /// Used keys in ascending order
    pub fn used(&self) -> impl Iterator<Item = u64> + '_ {
        self.used.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

struct Rekey<'a> {
    allocator: &'a mut KeyAllocator,
}

impl VisitorMut for Rekey<'_> {
    fn visit_node_mut(&mut self, node: &mut Node) {
        node.key = self.allocator.allocate();
        walk_node_mut(self, node);
    }
}
