use crate::source::SourceNode;
use std::collections::HashMap;

/// Structural identity of a layer subtree
///
/// Built from titles, leaf flags and child structure. Keys are left out so
/// identical subtrees in different places share one fingerprint. Children of
/// a leaf are left out too, since they are never transformed.
///
/// Fingerprints are interned ids handed out by a [`Fingerprints`] table and
/// only compare meaningfully within that table. Interning compares full
/// shapes, so two different structures never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(usize);

/// Fingerprint of a subtree together with those of its transformed children
#[derive(Debug, Clone, PartialEq)]
pub struct FingerprintTree {
    pub fingerprint: Fingerprint,
    pub children: Vec<FingerprintTree>,
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct Shape {
    title: String,
    is_leaf: bool,
    children: Vec<Fingerprint>,
}

/// Interning table for [`Fingerprint`]s
///
/// A node's shape refers to its children by id, so every subtree is encoded
/// exactly once, bottom-up.
#[derive(Debug, Default)]
pub struct Fingerprints {
    shapes: HashMap<Shape, Fingerprint>,
    encoded: usize,
}

impl Fingerprints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fingerprint `node` and every transformed subtree below it
    pub fn tree(&mut self, node: &SourceNode) -> FingerprintTree {
        let children: Vec<FingerprintTree> = if node.is_leaf {
            Vec::new()
        } else {
            node.children.iter().map(|child| self.tree(child)).collect()
        };

        let shape = Shape {
            title: node.title.clone(),
            is_leaf: node.is_leaf,
            children: children.iter().map(|child| child.fingerprint).collect(),
        };
        self.encoded += 1;

        let next = Fingerprint(self.shapes.len());
        let fingerprint = *self.shapes.entry(shape).or_insert(next);
        FingerprintTree {
            fingerprint,
            children,
        }
    }

    pub fn of(&mut self, node: &SourceNode) -> Fingerprint {
        self.tree(node).fingerprint
    }

    /// Number of distinct shapes seen
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Number of subtrees encoded since the table was created or cleared
    pub fn encoded(&self) -> usize {
        self.encoded
    }

    /// Forget every shape. Fingerprints handed out earlier become meaningless.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.encoded = 0;
    }
}
