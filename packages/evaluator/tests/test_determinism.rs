/// Determinism tests - transforming the same forest is reproducible
///
/// These tests validate that:
/// - Fresh transformers produce identical nodes for the same forest
/// - A warm cache produces the same nodes as a cold one
/// - Sibling order survives the cache

use pagecraft_evaluator::{SourceNode, Transformer};
use pagecraft_tree::{Key, Node};

fn page() -> Vec<SourceNode> {
    let card = |key: u64| {
        SourceNode::branch(
            "article",
            key,
            vec![
                SourceNode::leaf("img", key + 1),
                SourceNode::branch("p", key + 2, vec![SourceNode::leaf("span", key + 3)]),
                SourceNode::leaf("br", key + 4),
            ],
        )
    };

    vec![
        SourceNode::leaf("header", 0u64),
        SourceNode::branch("main", 1u64, (0..5).map(|i| card(10 + i * 10)).collect()),
        SourceNode::leaf("footer", 2u64),
    ]
}

#[test]
fn test_transform_determinism() {
    let results: Vec<Vec<Node>> = (0..10).map(|_| Transformer::new().transform(&page())).collect();

    for i in 1..results.len() {
        assert_eq!(results[0], results[i], "Transform {} differs from transform 0", i);
    }
}

#[test]
fn test_warm_cache_matches_cold() {
    let mut transformer = Transformer::new();
    let cold = transformer.transform(&page());
    let warm = transformer.transform(&page());

    assert_eq!(cold, warm);
    assert!(transformer.stats().hits > 0);
}

#[test]
fn test_sibling_order_preserved() {
    let nodes = Transformer::new().transform(&page());

    let roots: Vec<&str> = nodes.iter().map(|node| node.tag.as_str()).collect();
    assert_eq!(roots, vec!["header", "main", "footer"]);

    let card = &nodes[1].children[0];
    let tags: Vec<&str> = card.children.iter().map(|node| node.tag.as_str()).collect();
    assert_eq!(tags, vec!["img", "p", "br"]);
    assert_eq!(card.children[1].children[0].key, Key::Int(13));
}
