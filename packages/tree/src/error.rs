//! Tree invariant violations

use thiserror::Error;

use crate::node::{Node, NodeKind};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Root node {0} is not a document node")]
    RootNotDocument(String),

    #[error("Document node {0} is nested below the root")]
    NestedDocument(String),

    #[error("Component node {0} has children")]
    ComponentWithChildren(String),

    #[error("Container node {0} has no children list")]
    MissingChildren(String),

    #[error("Duplicate node id: {0}")]
    DuplicateId(String),
}

/// Check the page tree invariants: a single document root, leaf-only
/// components, containers with a children list, and unique ids.
pub fn validate_tree(tree: &Node) -> Result<(), TreeError> {
    if tree.kind != NodeKind::Document {
        return Err(TreeError::RootNotDocument(tree.id.clone()));
    }

    let mut seen = std::collections::HashSet::new();
    validate_node(tree, true, &mut seen)
}

fn validate_node<'a>(
    node: &'a Node,
    is_root: bool,
    seen: &mut std::collections::HashSet<&'a str>,
) -> Result<(), TreeError> {
    if !seen.insert(node.id.as_str()) {
        return Err(TreeError::DuplicateId(node.id.clone()));
    }

    match node.kind {
        NodeKind::Document if !is_root => {
            return Err(TreeError::NestedDocument(node.id.clone()));
        }
        NodeKind::Component if node.children.is_some() => {
            return Err(TreeError::ComponentWithChildren(node.id.clone()));
        }
        NodeKind::Document | NodeKind::Section if node.children.is_none() => {
            return Err(TreeError::MissingChildren(node.id.clone()));
        }
        _ => {}
    }

    for child in node.children() {
        validate_node(child, false, seen)?;
    }

    Ok(())
}
