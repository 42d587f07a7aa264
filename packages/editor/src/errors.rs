//! Error types for the editor
//!
//! Editing intents never fail: they report an [`crate::IntentResult`].
//! These errors only come out of loading external session data.

use pagecraft_tree::TreeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid tree in page {page}: {source}")]
    InvalidTree {
        page: String,
        #[source]
        source: TreeError,
    },

    #[error("Duplicate page id: {0}")]
    DuplicatePage(String),
}
