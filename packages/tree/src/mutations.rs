//! # Tree Mutations
//!
//! Structural edits over a page tree.
//!
//! ## Semantics
//!
//! Every function takes the current tree by reference and returns a new
//! tree; the input is never touched. An id that does not resolve, or an
//! edit that makes no sense in context (moving a node into its own subtree,
//! reordering nodes that are not siblings), yields a tree equal to the
//! input. Callers that care whether anything happened compare the result
//! with the input.
//!
//! ### Move
//! - Extract the subtree, then insert it under the new parent
//! - Index is counted after the extraction and clamped to the children length
//! - The root cannot move, and nothing moves into its own subtree
//!
//! ### Reorder
//! - Both ids must share the same direct parent
//! - The target index is captured *before* the active node is removed, so
//!   `[A,B,C,D]` with A over C becomes `[B,C,A,D]`, not a swap
//!
//! ### Delete
//! - Removes the node and all descendants wherever it sits in the tree
//! - The root cannot be deleted

use crate::id_generator::{IdSource, RandomIds};
use crate::node::{Node, NodeKind, NodePatch};
use crate::query::{collect_ids, contains_id, find_by_id, find_parent_of, flatten_tree};
use crate::visitor::{walk_node_mut, VisitorMut};

/// Shallow-merge `patch` into the node with `id`
pub fn update_by_id(tree: &Node, id: &str, patch: &NodePatch) -> Node {
    let mut next = tree.clone();
    if let Some(node) = find_mut(&mut next, id) {
        patch.merge_into(node);
    }
    next
}

/// Remove the node with `id` (and its subtree) from wherever it sits
pub fn delete_by_id(tree: &Node, id: &str) -> Node {
    let mut next = tree.clone();
    if next.id != id {
        remove_everywhere(&mut next, id);
    }
    next
}

/// Append `node` as the last child of `parent_id`
///
/// No-op when the parent is missing or a Component, when `node` is a
/// Document, or when `node` would bring in an id the tree already has.
pub fn add_child(tree: &Node, parent_id: &str, node: Node) -> Node {
    if node.kind == NodeKind::Document {
        return tree.clone();
    }

    match find_by_id(tree, parent_id) {
        Some(parent) if parent.is_container() => {}
        _ => return tree.clone(),
    }

    let existing = collect_ids(tree);
    if flatten_tree(&node).iter().any(|n| existing.contains(n.id.as_str())) {
        return tree.clone();
    }

    let mut next = tree.clone();
    if let Some(children) = find_mut(&mut next, parent_id).and_then(Node::children_mut) {
        children.push(node);
    }
    next
}

/// Move `node_id` under `new_parent_id` at `index`
pub fn move_node(tree: &Node, node_id: &str, new_parent_id: &str, index: usize) -> Node {
    if tree.id == node_id {
        return tree.clone();
    }

    let Some(subject) = find_by_id(tree, node_id) else {
        return tree.clone();
    };

    // Covers moving into itself as well as into a descendant
    if contains_id(subject, new_parent_id) {
        return tree.clone();
    }

    match find_by_id(tree, new_parent_id) {
        Some(parent) if parent.is_container() => {}
        _ => return tree.clone(),
    }

    let mut next = tree.clone();
    let Some(moved) = take_first(&mut next, node_id) else {
        return tree.clone();
    };

    match find_mut(&mut next, new_parent_id).and_then(Node::children_mut) {
        Some(children) => {
            let at = index.min(children.len());
            children.insert(at, moved);
            next
        }
        None => tree.clone(),
    }
}

/// Drop `active_id` onto the slot currently held by `over_id`
pub fn reorder_siblings(tree: &Node, active_id: &str, over_id: &str) -> Node {
    let Some(parent) = find_parent_of(tree, active_id) else {
        return tree.clone();
    };

    if !parent.children().iter().any(|c| c.id == over_id) {
        return tree.clone();
    }

    let parent_id = parent.id.clone();
    let mut next = tree.clone();

    if let Some(children) = find_mut(&mut next, &parent_id).and_then(Node::children_mut) {
        let over_index = children.iter().position(|c| c.id == over_id);
        let active_index = children.iter().position(|c| c.id == active_id);

        if let (Some(over_index), Some(active_index)) = (over_index, active_index) {
            let moved = children.remove(active_index);
            children.insert(over_index, moved);
        }
    }

    next
}

/// Deep copy with a fresh id on every node, root included
pub fn clone_with_new_ids(node: &Node) -> Node {
    clone_with_ids_from(node, &mut RandomIds)
}

/// [`clone_with_new_ids`] drawing ids from `ids`
pub fn clone_with_ids_from<S: IdSource>(node: &Node, ids: &mut S) -> Node {
    struct Reassign<'s, S: IdSource> {
        ids: &'s mut S,
    }

    impl<S: IdSource> VisitorMut for Reassign<'_, S> {
        fn visit_node_mut(&mut self, node: &mut Node) {
            node.id = self.ids.next_id();
            walk_node_mut(self, node);
        }
    }

    let mut copy = node.clone();
    Reassign { ids }.visit_node_mut(&mut copy);
    copy
}

/// Clone the subtree at `id` with new ids and place it right after the original
pub fn duplicate_node(tree: &Node, id: &str) -> Node {
    let Some(parent) = find_parent_of(tree, id) else {
        return tree.clone();
    };
    let Some(original) = parent.children().iter().find(|c| c.id == id) else {
        return tree.clone();
    };

    let copy = clone_with_new_ids(original);
    let parent_id = parent.id.clone();
    let mut next = tree.clone();

    if let Some(children) = find_mut(&mut next, &parent_id).and_then(Node::children_mut) {
        if let Some(pos) = children.iter().position(|c| c.id == id) {
            children.insert(pos + 1, copy);
        }
    }

    next
}

fn find_mut<'a>(node: &'a mut Node, id: &str) -> Option<&'a mut Node> {
    if node.id == id {
        return Some(node);
    }
    node.children_mut()?
        .iter_mut()
        .find_map(|child| find_mut(child, id))
}

fn remove_everywhere(node: &mut Node, id: &str) {
    if let Some(children) = node.children_mut() {
        children.retain(|c| c.id != id);
        for child in children {
            remove_everywhere(child, id);
        }
    }
}

/// Remove the first node with `id` from its parent and return it
fn take_first(node: &mut Node, id: &str) -> Option<Node> {
    let children = node.children_mut()?;

    if let Some(pos) = children.iter().position(|c| c.id == id) {
        return Some(children.remove(pos));
    }

    children.iter_mut().find_map(|child| take_first(child, id))
}
