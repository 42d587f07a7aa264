//! Read-only lookups over a page tree. All traversals are pre-order
//! depth-first, so results come back in document order.

use std::collections::HashSet;

use crate::node::Node;
use crate::visitor::{walk_node, Visitor};

/// Find the node with `id`
pub fn find_by_id<'a>(tree: &'a Node, id: &str) -> Option<&'a Node> {
    if tree.id == id {
        return Some(tree);
    }
    tree.children()
        .iter()
        .find_map(|child| find_by_id(child, id))
}

/// Find the container whose direct children include `child_id`
pub fn find_parent_of<'a>(tree: &'a Node, child_id: &str) -> Option<&'a Node> {
    if tree.children().iter().any(|c| c.id == child_id) {
        return Some(tree);
    }
    tree.children()
        .iter()
        .find_map(|child| find_parent_of(child, child_id))
}

pub fn contains_id(tree: &Node, id: &str) -> bool {
    find_by_id(tree, id).is_some()
}

/// Every node, root included
pub fn flatten_tree(tree: &Node) -> Vec<&Node> {
    // Borrowed output, so this one walks by hand instead of via Visitor
    fn collect<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
        out.push(node);
        for child in node.children() {
            collect(child, out);
        }
    }

    let mut nodes = Vec::new();
    collect(tree, &mut nodes);
    nodes
}

/// Every component reference, duplicates included
pub fn collect_component_refs(tree: &Node) -> Vec<String> {
    struct Refs(Vec<String>);

    impl Visitor for Refs {
        fn visit_node(&mut self, node: &Node) {
            if let Some(component_ref) = &node.component_ref {
                self.0.push(component_ref.clone());
            }
            walk_node(self, node);
        }
    }

    let mut refs = Refs(Vec::new());
    refs.visit_node(tree);
    refs.0
}

pub fn count_nodes(tree: &Node) -> usize {
    struct Count(usize);

    impl Visitor for Count {
        fn visit_node(&mut self, node: &Node) {
            self.0 += 1;
            walk_node(self, node);
        }
    }

    let mut count = Count(0);
    count.visit_node(tree);
    count.0
}

/// Set of every id in the tree
pub fn collect_ids(tree: &Node) -> HashSet<&str> {
    flatten_tree(tree).into_iter().map(|n| n.id.as_str()).collect()
}
