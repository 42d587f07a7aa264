//! # Pages
//!
//! A [`Document`] is one page of the site: a title, a unique slug and the
//! page tree. Pages start either blank, as a duplicate of another page, or
//! from saved session state (see [`crate::persistence`]).
//!
//! ## Lifecycle
//!
//! ```text
//! blank ──┐
//! copy  ──┼──→ edit (tree replaced per intent) ──→ delete
//! saved ──┘
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pagecraft_tree::{clone_with_new_ids, Node};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Page identifier
pub type DocumentId = String;

/// One page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub slug: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Current page tree (shared with the page's history)
    pub tree: Arc<Node>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Page with the given tree and a fresh id
    pub fn new(title: impl Into<String>, slug: impl Into<String>, tree: Node) -> Self {
        let now = Utc::now();
        Self {
            id: new_document_id(),
            title: title.into(),
            slug: slug.into(),
            description: None,
            tree: Arc::new(tree),
            created_at: now,
            updated_at: now,
        }
    }

    /// Page holding [`blank_tree`]
    pub fn blank(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self::new(title, slug, blank_tree())
    }

    /// Copy of this page under a new id, with every node id regenerated.
    /// Title gets a " Copy" suffix; the caller supplies the final slug.
    pub fn duplicate(&self, slug: impl Into<String>) -> Self {
        let mut copy = Self::new(
            format!("{} Copy", self.title),
            slug,
            clone_with_new_ids(&self.tree),
        );
        copy.description = self.description.clone();
        copy
    }

    /// Root node id of the current tree
    pub fn root_id(&self) -> &str {
        &self.tree.id
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Document root with one empty section
pub fn blank_tree() -> Node {
    Node::document().with_child(Node::section())
}

fn new_document_id() -> DocumentId {
    format!("page-{}", Uuid::new_v4().simple())
}
