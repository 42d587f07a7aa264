//! # Node Model
//!
//! The recursive shape of a page. Every page is a tree rooted at a
//! [`NodeKind::Document`] node; [`NodeKind::Section`] nodes are ordered
//! containers and [`NodeKind::Component`] nodes are leaves that point at a
//! widget in an external registry.
//!
//! Containers own their children outright and no node keeps a reference to
//! its parent, so a tree can never contain a cycle. Parent lookups are done
//! by searching (see [`crate::find_parent_of`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id_generator::generate_id;

/// Opaque node identifier, unique within one page tree
pub type NodeId = String;

/// Widget properties. Passed through to the renderer untouched.
pub type Props = serde_json::Map<String, serde_json::Value>;

/// What a node is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Tree root (exactly one per page)
    Document,
    /// Ordered container
    Section,
    /// Leaf referencing a widget
    Component,
}

impl NodeKind {
    /// Whether nodes of this kind carry a children list
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Document | NodeKind::Section)
    }
}

/// Presentation and ordering hints. None of the tree algorithms read these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetadata {
    #[serde(default)]
    pub order: i64,

    #[serde(default)]
    pub locked: bool,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One entry in a page hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Widget reference (Component nodes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_ref: Option<String>,

    #[serde(default)]
    pub props: Props,

    /// `Some` for Document/Section, `None` for Component
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,

    #[serde(default)]
    pub metadata: NodeMetadata,
}

impl Node {
    /// Create an empty node of `kind` with a fresh id
    pub fn new(kind: NodeKind) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            kind,
            component_ref: None,
            props: Props::new(),
            children: kind.is_container().then(Vec::new),
            metadata: NodeMetadata {
                created_at: Some(now),
                updated_at: Some(now),
                ..NodeMetadata::default()
            },
        }
    }

    /// Empty page root
    pub fn document() -> Self {
        Self::new(NodeKind::Document)
    }

    /// Empty section
    pub fn section() -> Self {
        Self::new(NodeKind::Section)
    }

    /// Component leaf pointing at `component_ref`
    pub fn component(component_ref: impl Into<String>) -> Self {
        let mut node = Self::new(NodeKind::Component);
        node.component_ref = Some(component_ref.into());
        node
    }

    /// Replace the generated id (fixtures, hydration helpers)
    pub fn with_id(mut self, id: impl Into<NodeId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    /// Append a child. Ignored on Component nodes.
    pub fn with_child(mut self, child: Node) -> Self {
        if let Some(children) = self.children.as_mut() {
            children.push(child);
        }
        self
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Children in order (empty for Component nodes)
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        self.children.as_mut()
    }

    /// Ids of the direct children, in order
    pub fn child_ids(&self) -> Vec<&str> {
        self.children().iter().map(|c| c.id.as_str()).collect()
    }
}

/// Build a fresh node: Document/Section get an empty children list,
/// Component gets `component_ref` and no children list.
pub fn create_node(kind: NodeKind, component_ref: Option<&str>, props: Option<Props>) -> Node {
    let mut node = Node::new(kind);
    if kind == NodeKind::Component {
        node.component_ref = component_ref.map(str::to_string);
    }
    if let Some(props) = props {
        node.props = props;
    }
    node
}

/// Partial fields merged into a node by [`crate::update_by_id`].
///
/// Identity, kind and children are deliberately absent: a patch can never
/// break the tree invariants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePatch {
    /// Only applied to Component nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_ref: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Props>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NodeMetadata>,
}

impl NodePatch {
    pub fn props(props: Props) -> Self {
        Self {
            props: Some(props),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.component_ref.is_none() && self.props.is_none() && self.metadata.is_none()
    }

    /// Shallow merge into `node`
    pub(crate) fn merge_into(&self, node: &mut Node) {
        if let Some(component_ref) = &self.component_ref {
            if node.kind == NodeKind::Component {
                node.component_ref = Some(component_ref.clone());
            }
        }
        if let Some(props) = &self.props {
            node.props = props.clone();
        }
        if let Some(metadata) = &self.metadata {
            node.metadata = metadata.clone();
        }
    }
}
