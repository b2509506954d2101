use crate::fingerprint::{Fingerprint, FingerprintTree, Fingerprints};
use crate::source::SourceNode;
use pagecraft_tree::{Node, NodeType, Props};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Check if a tag is an HTML void element
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

/// Converts layer trees into render-ready nodes
///
/// Child lists of non-leaf nodes are cached by [`Fingerprint`]. Each root
/// is fingerprinted once, bottom-up, before it is transformed. A cache hit
/// reuses the stored children, including the keys of the subtree that was
/// transformed first.
///
/// The cache is never invalidated on its own. After an edit that changes
/// what a fingerprint should produce, build a new transformer or call
/// [`clear`](Transformer::clear); otherwise stale children are returned.
#[derive(Debug, Default)]
pub struct Transformer {
    fingerprints: Fingerprints,
    cache: HashMap<Fingerprint, Vec<Node>>,
    stats: CacheStats,
}

impl Transformer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform a whole forest, in order
    #[instrument(skip(self, forest), fields(roots = forest.len()))]
    pub fn transform(&mut self, forest: &[SourceNode]) -> Vec<Node> {
        let nodes: Vec<Node> = forest.iter().map(|source| self.transform_node(source)).collect();
        debug!(
            hits = self.stats.hits,
            misses = self.stats.misses,
            cached = self.cache.len(),
            "Transform complete"
        );
        nodes
    }

    pub fn transform_node(&mut self, source: &SourceNode) -> Node {
        let shape = self.fingerprints.tree(source);
        self.build(source, &shape)
    }

    fn build(&mut self, source: &SourceNode, shape: &FingerprintTree) -> Node {
        let mut node = Node::new(
            node_type_for(source),
            source.title.clone(),
            Some(Props::default()),
            Vec::new(),
            source.key.clone(),
        );

        if source.is_leaf {
            return node;
        }

        if let Some(children) = self.cache.get(&shape.fingerprint) {
            self.stats.hits += 1;
            debug!(key = %source.key, "Reusing cached children");
            node.children = children.clone();
            return node;
        }

        self.stats.misses += 1;
        let children: Vec<Node> = source
            .children
            .iter()
            .zip(&shape.children)
            .map(|(child, child_shape)| self.build(child, child_shape))
            .collect();
        self.cache.insert(shape.fingerprint, children.clone());
        node.children = children;
        node
    }

    /// Drop every cached child list
    pub fn clear(&mut self) {
        self.cache.clear();
        self.fingerprints.clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    pub fn fingerprints(&self) -> &Fingerprints {
        &self.fingerprints
    }
}

fn node_type_for(source: &SourceNode) -> NodeType {
    if source.is_leaf && is_void_element(&source.title) {
        NodeType::Single
    } else {
        NodeType::Container
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_tree::Key;

    fn card(key: u64) -> SourceNode {
        SourceNode::branch(
            "div",
            key,
            vec![
                SourceNode::leaf("img", key + 1),
                SourceNode::branch("p", key + 2, vec![SourceNode::leaf("span", key + 3)]),
            ],
        )
    }

    #[test]
    fn test_leaf_becomes_childless_node() {
        let mut transformer = Transformer::new();
        let node = transformer.transform_node(&SourceNode::leaf("span", 4u64));

        assert_eq!(node.tag, "span");
        assert_eq!(node.key, Key::Int(4));
        assert_eq!(node.node_type, NodeType::Container);
        assert!(node.children.is_empty());
        assert_eq!(node.props, Some(Props::default()));
        assert_eq!(transformer.cached_entries(), 0);
    }

    #[test]
    fn test_void_leaf_becomes_single() {
        let mut transformer = Transformer::new();
        assert_eq!(
            transformer.transform_node(&SourceNode::leaf("img", 0u64)).node_type,
            NodeType::Single
        );
        // only leaves are self-closing
        assert_eq!(
            transformer
                .transform_node(&SourceNode::branch("img", 1u64, vec![]))
                .node_type,
            NodeType::Container
        );
    }

    #[test]
    fn test_transform_preserves_structure_and_order() {
        let mut transformer = Transformer::new();
        let nodes = transformer.transform(&[card(0), SourceNode::leaf("hr", 10u64)]);

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].children[0].tag, "img");
        assert!(nodes[0].children[0].is_single());
        assert_eq!(nodes[0].children[1].children[0].tag, "span");
        assert_eq!(nodes[0].children[1].children[0].key, Key::Int(3));
        assert!(nodes[1].is_single());
    }

    #[test]
    fn test_identical_subtrees_hit_cache() {
        let mut transformer = Transformer::new();
        let forest = vec![card(0), card(10)];
        let nodes = transformer.transform(&forest);

        // card(0): div + p miss; card(10): div hits and skips p entirely
        assert_eq!(transformer.stats(), CacheStats { hits: 1, misses: 2 });
        assert_eq!(nodes[1].key, Key::Int(10));
        assert_eq!(nodes[1].children, nodes[0].children);
    }

    #[test]
    fn test_cache_is_reused_across_calls() {
        let mut transformer = Transformer::new();
        let first = transformer.transform(&[card(0)]);
        let second = transformer.transform(&[card(0)]);

        assert_eq!(first, second);
        assert_eq!(transformer.stats().hits, 1);
    }

    #[test]
    fn test_clear_forces_rebuild() {
        let mut transformer = Transformer::new();
        transformer.transform(&[card(0)]);
        transformer.clear();
        assert_eq!(transformer.cached_entries(), 0);

        let nodes = transformer.transform(&[card(20)]);
        assert_eq!(nodes[0].children[0].key, Key::Int(21));
        assert_eq!(transformer.stats().hits, 0);
    }

    #[test]
    fn test_deep_tree_fingerprinted_once_per_node() {
        let mut source = SourceNode::leaf("span", 0u64);
        for depth in 1..=40u64 {
            source = SourceNode::branch("div", depth, vec![source]);
        }

        let mut transformer = Transformer::new();
        let node = transformer.transform_node(&source);

        assert_eq!(node.count(), 41);
        assert_eq!(transformer.fingerprints().encoded(), 41);
        assert_eq!(transformer.stats(), CacheStats { hits: 0, misses: 40 });
    }

    #[test]
    fn test_deserialize_forest() {
        let json = r#"[{"title":"div","key":0,"leaf":false,"children":[
            {"title":"span","key":1,"leaf":true,"children":[]}
        ]}]"#;

        let forest: Vec<SourceNode> = serde_json::from_str(json).unwrap();
        let nodes = Transformer::new().transform(&forest);
        assert_eq!(nodes[0].children[0].tag, "span");
    }
}
