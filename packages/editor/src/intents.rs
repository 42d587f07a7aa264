//! # Editing Intents
//!
//! Discrete requests a UI sends to an [`crate::EditSession`]. Each one is
//! processed to completion before the next; the session reports what
//! happened with an [`IntentResult`].
//!
//! Drag and drop arrives here already settled: a `ReorderSiblings` or
//! `MoveNode` per completed gesture, nothing while the pointer is moving.
//!
//! Intents are serde types so a sequence can be recorded and replayed:
//!
//! ```json
//! [
//!   { "type": "create_page", "title": "About" },
//!   { "type": "add_node", "kind": "component", "componentRef": "hero" },
//!   { "type": "undo" }
//! ]
//! ```

use pagecraft_tree::{NodeId, NodeKind, NodePatch, Props};
use serde::{Deserialize, Serialize};

use crate::document::DocumentId;

/// A single request against the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Intent {
    /// Append a new node to `parent_id` (default: the page's first section)
    AddNode {
        #[serde(default)]
        parent_id: Option<NodeId>,
        kind: NodeKind,
        #[serde(default)]
        component_ref: Option<String>,
        #[serde(default)]
        props: Option<Props>,
    },

    UpdateNode {
        node_id: NodeId,
        patch: NodePatch,
    },

    DeleteNode {
        node_id: NodeId,
    },

    MoveNode {
        node_id: NodeId,
        new_parent_id: NodeId,
        index: usize,
    },

    /// Drop `active_id` onto the slot of sibling `over_id`
    ReorderSiblings {
        active_id: NodeId,
        over_id: NodeId,
    },

    DuplicateNode {
        node_id: NodeId,
    },

    Select {
        #[serde(default)]
        node_id: Option<NodeId>,
    },

    Hover {
        #[serde(default)]
        node_id: Option<NodeId>,
    },

    Undo,

    Redo,

    CreatePage {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        slug: Option<String>,
    },

    DuplicatePage {
        page_id: DocumentId,
    },

    DeletePage {
        page_id: DocumentId,
    },

    SwitchPage {
        page_id: DocumentId,
    },

    RenamePage {
        page_id: DocumentId,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        slug: Option<String>,
    },
}

impl Intent {
    /// Debug name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Intent::AddNode { .. } => "add_node",
            Intent::UpdateNode { .. } => "update_node",
            Intent::DeleteNode { .. } => "delete_node",
            Intent::MoveNode { .. } => "move_node",
            Intent::ReorderSiblings { .. } => "reorder_siblings",
            Intent::DuplicateNode { .. } => "duplicate_node",
            Intent::Select { .. } => "select",
            Intent::Hover { .. } => "hover",
            Intent::Undo => "undo",
            Intent::Redo => "redo",
            Intent::CreatePage { .. } => "create_page",
            Intent::DuplicatePage { .. } => "duplicate_page",
            Intent::DeletePage { .. } => "delete_page",
            Intent::SwitchPage { .. } => "switch_page",
            Intent::RenamePage { .. } => "rename_page",
        }
    }
}

/// Outcome of one intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IntentResult {
    /// State changed
    Applied,

    /// A page was created and is now current
    Created { id: DocumentId },

    /// Nothing to do (unknown id, invalid context, already in that state)
    Noop { reason: &'static str },

    /// Refused to protect an invariant; session untouched
    Refused { reason: &'static str },
}

impl IntentResult {
    pub(crate) fn noop(reason: &'static str) -> Self {
        IntentResult::Noop { reason }
    }

    pub(crate) fn refused(reason: &'static str) -> Self {
        IntentResult::Refused { reason }
    }

    /// Whether the session state changed
    pub fn changed(&self) -> bool {
        matches!(self, IntentResult::Applied | IntentResult::Created { .. })
    }

    pub fn created_id(&self) -> Option<&str> {
        match self {
            IntentResult::Created { id } => Some(id),
            _ => None,
        }
    }
}
