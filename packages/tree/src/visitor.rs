use crate::node::Node;

/// Visitor pattern for traversing a page tree immutably
///
/// The default implementation walks the whole tree pre-order. Override
/// `visit_node` to act on each node, calling [`walk_node`] to keep descending.
pub trait Visitor: Sized {
    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }
}

/// Mutable visitor pattern for transforming a page tree in place
///
/// Only ever run on a tree the caller already owns (typically a fresh clone),
/// so the public algorithms stay pure.
pub trait VisitorMut: Sized {
    fn visit_node_mut(&mut self, node: &mut Node) {
        walk_node_mut(self, node);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node) {
    for child in node.children() {
        visitor.visit_node(child);
    }
}

pub fn walk_node_mut<V: VisitorMut>(visitor: &mut V, node: &mut Node) {
    if let Some(children) = node.children_mut() {
        for child in children {
            visitor.visit_node_mut(child);
        }
    }
}
