//! # Undo/Redo Stack
//!
//! Bounded, linear snapshot history for one page.
//!
//! ## Design
//!
//! - Every recorded edit appends the whole resulting tree
//! - `index` points at the snapshot currently shown
//! - Undo/redo only move `index`; snapshots are never rewritten
//! - Recording after an undo drops everything past `index` (the undone
//!   future cannot come back)
//! - Past `max_levels` snapshots the oldest are evicted from the front
//!
//! Snapshots are `Arc`s, so the page, published session snapshots and the
//! history all share the same tree values.
//!
//! ## Example
//!
//! ```rust
//! use pagecraft_editor::UndoStack;
//! use pagecraft_tree::Node;
//! use std::sync::Arc;
//!
//! let mut stack = UndoStack::seeded(Arc::new(Node::document()), 50);
//! stack.record(Arc::new(Node::document()));
//!
//! assert!(stack.undo().is_some());
//! assert!(stack.redo().is_some());
//! assert!(!stack.can_redo());
//! ```

use std::sync::Arc;

use pagecraft_tree::Node;

/// Snapshots kept per page when nothing else is configured
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Undo/redo history for one page
#[derive(Debug, Clone)]
pub struct UndoStack {
    /// Oldest first
    snapshots: Vec<Arc<Node>>,

    /// Current snapshot (`None` only while empty)
    index: Option<usize>,

    /// Maximum number of snapshots kept (at least 1)
    max_levels: usize,
}

impl UndoStack {
    /// Empty stack with the default limit
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            index: None,
            max_levels: max_levels.max(1),
        }
    }

    /// Single-entry history holding `tree`
    pub fn seeded(tree: Arc<Node>, max_levels: usize) -> Self {
        let mut stack = Self::with_max_levels(max_levels);
        stack.seed(tree);
        stack
    }

    /// Replace the whole history with `tree` without making it undoable.
    /// Used when loading saved state.
    pub fn seed(&mut self, tree: Arc<Node>) {
        self.snapshots = vec![tree];
        self.index = Some(0);
    }

    /// Record an edit and return the new index
    pub fn record(&mut self, tree: Arc<Node>) -> usize {
        let keep = self.index.map_or(0, |i| i + 1);
        self.snapshots.truncate(keep);
        self.snapshots.push(tree);

        if self.snapshots.len() > self.max_levels {
            let overflow = self.snapshots.len() - self.max_levels;
            self.snapshots.drain(..overflow);
        }

        let index = self.snapshots.len() - 1;
        self.index = Some(index);
        index
    }

    /// Step back one snapshot and return it
    pub fn undo(&mut self) -> Option<Arc<Node>> {
        match self.index {
            Some(i) if i > 0 => {
                self.index = Some(i - 1);
                Some(Arc::clone(&self.snapshots[i - 1]))
            }
            _ => None,
        }
    }

    /// Step forward one snapshot and return it
    pub fn redo(&mut self) -> Option<Arc<Node>> {
        match self.index {
            Some(i) if i + 1 < self.snapshots.len() => {
                self.index = Some(i + 1);
                Some(Arc::clone(&self.snapshots[i + 1]))
            }
            _ => None,
        }
    }

    pub fn current(&self) -> Option<&Arc<Node>> {
        self.index.map(|i| &self.snapshots[i])
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.index, Some(i) if i > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.index, Some(i) if i + 1 < self.snapshots.len())
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.index = None;
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
