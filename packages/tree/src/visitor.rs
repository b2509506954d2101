use crate::node::Node;

/// Visitor pattern for traversing node trees immutably
///
/// The default implementations walk the entire tree in pre-order.
/// Override `visit_node` to act on each node and call [`walk_node`] to
/// continue into its children.
pub trait Visitor: Sized {
    fn visit_forest(&mut self, nodes: &[Node]) {
        walk_forest(self, nodes);
    }

    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }
}

/// Mutable visitor pattern for transforming node trees
///
/// Similar to Visitor, but provides mutable access to nodes.
pub trait VisitorMut: Sized {
    fn visit_forest_mut(&mut self, nodes: &mut [Node]) {
        walk_forest_mut(self, nodes);
    }

    fn visit_node_mut(&mut self, node: &mut Node) {
        walk_node_mut(self, node);
    }
}

pub fn walk_forest<V: Visitor>(visitor: &mut V, nodes: &[Node]) {
    for node in nodes {
        visitor.visit_node(node);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node) {
    for child in &node.children {
        visitor.visit_node(child);
    }
}

pub fn walk_forest_mut<V: VisitorMut>(visitor: &mut V, nodes: &mut [Node]) {
    for node in nodes {
        visitor.visit_node_mut(node);
    }
}

pub fn walk_node_mut<V: VisitorMut>(visitor: &mut V, node: &mut Node) {
    for child in &mut node.children {
        visitor.visit_node_mut(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TagCollector {
        tags: Vec<String>,
    }

    impl Visitor for TagCollector {
        fn visit_node(&mut self, node: &Node) {
            self.tags.push(node.tag.clone());
            walk_node(self, node);
        }
    }

    struct Uppercase;

    impl VisitorMut for Uppercase {
        fn visit_node_mut(&mut self, node: &mut Node) {
            node.tag = node.tag.to_uppercase();
            walk_node_mut(self, node);
        }
    }

    fn sample() -> Vec<Node> {
        vec![
            Node::container("section", 0u64)
                .with_child(Node::container("div", 1u64).with_child(Node::single("img", 2u64)))
                .with_child(Node::single("hr", 3u64)),
            Node::container("footer", 4u64),
        ]
    }

    #[test]
    fn test_visitor_is_pre_order() {
        let mut collector = TagCollector { tags: vec![] };
        collector.visit_forest(&sample());
        assert_eq!(collector.tags, vec!["section", "div", "img", "hr", "footer"]);
    }

    #[test]
    fn test_visitor_mut() {
        let mut nodes = sample();
        Uppercase.visit_forest_mut(&mut nodes);
        assert_eq!(nodes[0].children[0].children[0].tag, "IMG");
        assert_eq!(nodes[1].tag, "FOOTER");
    }
}
