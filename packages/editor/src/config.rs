use serde::{Deserialize, Serialize};

use crate::undo_stack::DEFAULT_HISTORY_LIMIT;

/// Editing session options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Snapshots kept per page (current state included)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// When set, deleting the only page empties the session instead of
    /// being refused
    #[serde(default)]
    pub allow_deleting_last_page: bool,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            allow_deleting_last_page: false,
        }
    }
}
