//! # Pagecraft Editor
//!
//! Multi-page editing session for the page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ UI: gestures → Intent                       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - Pages (title, slug, tree)                │
//! │  - Per-page undo/redo snapshots             │
//! │  - Selection and hover cursors              │
//! │  - Hydrate / export, legacy migration       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ tree: pure structural edits on Node         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Trees are values**: every edit produces a new tree; history keeps
//!    shared snapshots, never diffs
//! 2. **Intents never fail**: an edit that cannot apply is a no-op, reported
//!    through [`IntentResult`]
//! 3. **History per page**: switching pages never mixes undo stacks
//! 4. **Storage is someone else's job**: the session exports and hydrates a
//!    [`PersistedSession`] value
//!
//! ## Usage
//!
//! ```rust
//! use pagecraft_editor::{EditSession, Intent};
//! use pagecraft_tree::NodeKind;
//!
//! let mut session = EditSession::default();
//! session.dispatch(Intent::CreatePage { title: Some("Home".into()), slug: None });
//! session.dispatch(Intent::AddNode {
//!     parent_id: None,
//!     kind: NodeKind::Component,
//!     component_ref: Some("hero".into()),
//!     props: None,
//! });
//!
//! assert_eq!(session.current_document().unwrap().slug, "home");
//! assert!(session.can_undo());
//!
//! session.dispatch(Intent::Undo);
//! assert!(!session.can_undo());
//! ```

mod config;
mod document;
mod errors;
mod intents;
mod persistence;
mod registry;
mod session;
mod slug;
mod undo_stack;

pub use config::EditorConfig;
pub use document::{blank_tree, Document, DocumentId};
pub use errors::EditorError;
pub use intents::{Intent, IntentResult};
pub use persistence::{PersistedSession, StoredSession, LEGACY_PAGE_SLUG, LEGACY_PAGE_TITLE};
pub use registry::{unresolved_refs, StaticRegistry, WidgetDescriptor, WidgetRegistry};
pub use session::{EditSession, PageUpdate, SessionSnapshot};
pub use slug::{disambiguate, slugify, DEFAULT_SLUG};
pub use undo_stack::{UndoStack, DEFAULT_HISTORY_LIMIT};
