//! # Session Persistence Shapes
//!
//! The editor never touches storage itself. It hands out a
//! [`PersistedSession`] and accepts a [`StoredSession`] back, which is either
//! that shape or an older single-page export holding just a tree.
//!
//! Selection, hover and history are never part of the stored value.

use pagecraft_tree::Node;
use serde::{Deserialize, Serialize};

use crate::document::{Document, DocumentId};
use crate::EditorError;

/// Title given to a page migrated from a single-tree export
pub const LEGACY_PAGE_TITLE: &str = "Home";

/// Slug given to a page migrated from a single-tree export
pub const LEGACY_PAGE_SLUG: &str = "home";

/// Serializable session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub documents: Vec<Document>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_document_id: Option<DocumentId>,
}

impl PersistedSession {
    pub fn empty() -> Self {
        Self {
            documents: Vec::new(),
            current_document_id: None,
        }
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Any session shape the editor can start from
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StoredSession {
    /// Multi-page state
    Current(PersistedSession),

    /// Single-page export: `{ "tree": { ... } }`
    LegacyWrapped { tree: Node },

    /// Single-page export holding the bare root node
    LegacyTree(Node),
}

impl StoredSession {
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_legacy(&self) -> bool {
        !matches!(self, StoredSession::Current(_))
    }

    /// Normalize to the multi-page shape. A legacy tree becomes one page
    /// titled "Home" with slug "home".
    pub fn into_persisted(self) -> PersistedSession {
        match self {
            StoredSession::Current(session) => session,
            StoredSession::LegacyWrapped { tree } | StoredSession::LegacyTree(tree) => {
                let page = migrate_legacy_tree(tree);
                PersistedSession {
                    current_document_id: Some(page.id.clone()),
                    documents: vec![page],
                }
            }
        }
    }
}

impl From<PersistedSession> for StoredSession {
    fn from(session: PersistedSession) -> Self {
        StoredSession::Current(session)
    }
}

fn migrate_legacy_tree(tree: Node) -> Document {
    Document::new(LEGACY_PAGE_TITLE, LEGACY_PAGE_SLUG, tree)
}
