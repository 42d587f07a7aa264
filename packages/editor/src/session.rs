//! # Edit Session Management
//!
//! One editing session over a set of pages.
//!
//! The session owns every page, the id of the current page, each page's
//! undo stack and remembered selection, and the hover cursor. Intents are
//! handled one at a time and run to completion: the new tree, history entry
//! and cursors are worked out first and only then written back, so
//! [`EditSession::snapshot`] never shows a half-applied edit. Snapshots share
//! trees with the session through `Arc`, so a snapshot taken earlier stays
//! valid after later edits.
//!
//! ## Cursors
//!
//! - Selection is remembered per page; hover belongs to the session
//! - Undo, redo, page create/duplicate and falling back after a page delete
//!   select the root
//! - After any edit a selection pointing at a removed node moves to the
//!   root and a dangling hover is cleared
//! - Switching pages clears hover

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use pagecraft_tree::{contains_id, create_node, validate_tree, Node, NodeId, NodeKind, NodePatch};
use tracing::{debug, info, instrument, warn};

use crate::config::EditorConfig;
use crate::document::{Document, DocumentId};
use crate::intents::{Intent, IntentResult};
use crate::persistence::{PersistedSession, StoredSession};
use crate::slug::{disambiguate, slugify};
use crate::undo_stack::UndoStack;
use crate::EditorError;

/// Per-page editing state
#[derive(Debug, Clone)]
struct PageState {
    undo: UndoStack,
    selection: Option<NodeId>,
}

impl PageState {
    fn new(tree: Arc<Node>, history_limit: usize) -> Self {
        let selection = Some(tree.id.clone());
        Self {
            undo: UndoStack::seeded(tree, history_limit),
            selection,
        }
    }
}

/// Title/slug change for [`EditSession::update_page_metadata`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
}

/// Consistent read-only view of the session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub documents: Vec<Document>,
    pub current_document_id: Option<DocumentId>,
    pub active_tree: Option<Arc<Node>>,
    pub selected_node_id: Option<NodeId>,
    pub hovered_node_id: Option<NodeId>,
    pub history_index: Option<usize>,
    pub history_len: usize,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Multi-page edit session
#[derive(Debug)]
pub struct EditSession {
    config: EditorConfig,

    /// Pages in creation order
    documents: Vec<Document>,

    /// Undo stack and selection, keyed by page id
    pages: HashMap<DocumentId, PageState>,

    current: Option<DocumentId>,

    hovered: Option<NodeId>,
}

impl EditSession {
    /// Empty session (no pages)
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            documents: Vec::new(),
            pages: HashMap::new(),
            current: None,
            hovered: None,
        }
    }

    /// Session loaded from stored state
    pub fn from_stored(stored: StoredSession, config: EditorConfig) -> Result<Self, EditorError> {
        let mut session = Self::new(config);
        session.hydrate(stored)?;
        Ok(session)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn current_document_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current_document(&self) -> Option<&Document> {
        self.current_position().map(|pos| &self.documents[pos])
    }

    pub fn active_tree(&self) -> Option<&Node> {
        self.current_document().map(|d| d.tree.as_ref())
    }

    pub fn selected_node_id(&self) -> Option<&str> {
        let page = self.current_page_state()?;
        page.selection.as_deref()
    }

    pub fn hovered_node_id(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn can_undo(&self) -> bool {
        self.current_page_state().is_some_and(|p| p.undo.can_undo())
    }

    pub fn can_redo(&self) -> bool {
        self.current_page_state().is_some_and(|p| p.undo.can_redo())
    }

    /// History pointer of the current page
    pub fn history_index(&self) -> Option<usize> {
        self.current_page_state().and_then(|p| p.undo.index())
    }

    pub fn history_len(&self) -> usize {
        self.current_page_state().map_or(0, |p| p.undo.len())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            documents: self.documents.clone(),
            current_document_id: self.current.clone(),
            active_tree: self.current_document().map(|d| Arc::clone(&d.tree)),
            selected_node_id: self.selected_node_id().map(str::to_string),
            hovered_node_id: self.hovered.clone(),
            history_index: self.history_index(),
            history_len: self.history_len(),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    /// Serializable state (no history, selection or hover)
    pub fn export(&self) -> PersistedSession {
        PersistedSession {
            documents: self.documents.clone(),
            current_document_id: self.current.clone(),
        }
    }

    // ── Intent routing ──────────────────────────────────────────────────

    /// Handle one intent
    #[instrument(skip_all, fields(intent = intent.name()))]
    pub fn dispatch(&mut self, intent: Intent) -> IntentResult {
        let result = match intent {
            Intent::AddNode {
                parent_id,
                kind,
                component_ref,
                props,
            } => {
                let node = create_node(kind, component_ref.as_deref(), props);
                self.add_node(parent_id.as_deref(), node)
            }
            Intent::UpdateNode { node_id, patch } => self.update_node(&node_id, &patch),
            Intent::DeleteNode { node_id } => self.delete_node(&node_id),
            Intent::MoveNode {
                node_id,
                new_parent_id,
                index,
            } => self.move_node(&node_id, &new_parent_id, index),
            Intent::ReorderSiblings { active_id, over_id } => {
                self.reorder_siblings(&active_id, &over_id)
            }
            Intent::DuplicateNode { node_id } => self.duplicate_node(&node_id),
            Intent::Select { node_id } => self.select(node_id.as_deref()),
            Intent::Hover { node_id } => self.hover(node_id.as_deref()),
            Intent::Undo => self.undo(),
            Intent::Redo => self.redo(),
            Intent::CreatePage { title, slug } => IntentResult::Created {
                id: self.create_document(title.as_deref(), slug.as_deref()),
            },
            Intent::DuplicatePage { page_id } => match self.duplicate_document(&page_id) {
                Some(id) => IntentResult::Created { id },
                None => IntentResult::noop("unknown page"),
            },
            Intent::DeletePage { page_id } => self.delete_document(&page_id),
            Intent::SwitchPage { page_id } => self.switch_to_document(&page_id),
            Intent::RenamePage {
                page_id,
                title,
                slug,
            } => self.update_page_metadata(&page_id, PageUpdate { title, slug }),
        };

        debug!(result = ?result, "Intent handled");
        result
    }

    // ── Node editing ────────────────────────────────────────────────────

    /// Append `node` to `parent_id`, or to the page's first section when no
    /// parent is given. The new node becomes the selection.
    pub fn add_node(&mut self, parent_id: Option<&str>, node: Node) -> IntentResult {
        let Some(tree) = self.active_tree() else {
            return IntentResult::noop("no active page");
        };
        let parent = match parent_id {
            Some(id) => id.to_string(),
            None => default_parent(tree),
        };
        let node_id = node.id.clone();

        let result = self.apply_edit("add_node", |t| pagecraft_tree::add_child(t, &parent, node));
        if result.changed() {
            if let Some(page) = self.current_page_state_mut() {
                page.selection = Some(node_id);
            }
        }
        result
    }

    pub fn update_node(&mut self, node_id: &str, patch: &NodePatch) -> IntentResult {
        self.apply_edit("update_node", |t| pagecraft_tree::update_by_id(t, node_id, patch))
    }

    pub fn delete_node(&mut self, node_id: &str) -> IntentResult {
        self.apply_edit("delete_node", |t| pagecraft_tree::delete_by_id(t, node_id))
    }

    pub fn move_node(&mut self, node_id: &str, new_parent_id: &str, index: usize) -> IntentResult {
        self.apply_edit("move_node", |t| {
            pagecraft_tree::move_node(t, node_id, new_parent_id, index)
        })
    }

    pub fn reorder_siblings(&mut self, active_id: &str, over_id: &str) -> IntentResult {
        self.apply_edit("reorder_siblings", |t| {
            pagecraft_tree::reorder_siblings(t, active_id, over_id)
        })
    }

    pub fn duplicate_node(&mut self, node_id: &str) -> IntentResult {
        self.apply_edit("duplicate_node", |t| pagecraft_tree::duplicate_node(t, node_id))
    }

    /// Select a node on the current page (`None` clears the selection)
    pub fn select(&mut self, node_id: Option<&str>) -> IntentResult {
        let Some(tree) = self.active_tree() else {
            return IntentResult::noop("no active page");
        };
        if node_id.is_some_and(|id| !contains_id(tree, id)) {
            return IntentResult::noop("unknown node");
        }
        if self.selected_node_id() == node_id {
            return IntentResult::noop("already selected");
        }

        let selection = node_id.map(str::to_string);
        if let Some(page) = self.current_page_state_mut() {
            page.selection = selection;
        }
        IntentResult::Applied
    }

    /// Hover a node on the current page (`None` clears hover)
    pub fn hover(&mut self, node_id: Option<&str>) -> IntentResult {
        let Some(tree) = self.active_tree() else {
            return IntentResult::noop("no active page");
        };
        if node_id.is_some_and(|id| !contains_id(tree, id)) {
            return IntentResult::noop("unknown node");
        }
        if self.hovered.as_deref() == node_id {
            return IntentResult::noop("already hovered");
        }

        self.hovered = node_id.map(str::to_string);
        IntentResult::Applied
    }

    pub fn undo(&mut self) -> IntentResult {
        let Some(pos) = self.current_position() else {
            return IntentResult::noop("no active page");
        };
        let Some(tree) = self.page_state_mut(pos).undo.undo() else {
            return IntentResult::noop("nothing to undo");
        };

        self.show_snapshot(pos, tree);
        debug!(history_index = ?self.history_index(), "Undo");
        IntentResult::Applied
    }

    pub fn redo(&mut self) -> IntentResult {
        let Some(pos) = self.current_position() else {
            return IntentResult::noop("no active page");
        };
        let Some(tree) = self.page_state_mut(pos).undo.redo() else {
            return IntentResult::noop("nothing to redo");
        };

        self.show_snapshot(pos, tree);
        debug!(history_index = ?self.history_index(), "Redo");
        IntentResult::Applied
    }

    // ── Page lifecycle ──────────────────────────────────────────────────

    /// Create a blank page and make it current.
    ///
    /// Title defaults to "Page {n+1}". The slug comes from `slug` or the
    /// title and is made unique within the session.
    pub fn create_document(&mut self, title: Option<&str>, slug: Option<&str>) -> DocumentId {
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Page {}", self.documents.len() + 1));
        let candidate = slugify(slug.unwrap_or(title.as_str()));
        let slug = disambiguate(&candidate, &self.used_slugs(None));

        let page = Document::blank(title, slug);
        let id = page.id.clone();
        info!(page = %id, title = %page.title, slug = %page.slug, "Created page");

        self.activate_new_page(page);
        id
    }

    /// Copy a page with fresh node ids and make the copy current
    pub fn duplicate_document(&mut self, id: &str) -> Option<DocumentId> {
        let source = self.document(id)?;
        let candidate = format!("{}-copy", source.slug);
        let slug = disambiguate(&candidate, &self.used_slugs(None));
        let copy = source.duplicate(slug);

        let copy_id = copy.id.clone();
        info!(source = %id, page = %copy_id, slug = %copy.slug, "Duplicated page");

        self.activate_new_page(copy);
        Some(copy_id)
    }

    /// Delete a page. The last page is only deleted (emptying the session)
    /// when [`EditorConfig::allow_deleting_last_page`] is set.
    pub fn delete_document(&mut self, id: &str) -> IntentResult {
        let Some(pos) = self.position_of(id) else {
            return IntentResult::noop("unknown page");
        };

        if self.documents.len() == 1 {
            if !self.config.allow_deleting_last_page {
                warn!(page = %id, "Refusing to delete the last page");
                return IntentResult::refused("cannot delete the last page");
            }
            self.reset();
            return IntentResult::Applied;
        }

        let removed = self.documents.remove(pos);
        self.pages.remove(&removed.id);

        if self.current.as_deref() == Some(removed.id.as_str()) {
            let root = self.documents[0].tree.id.clone();
            self.current = Some(self.documents[0].id.clone());
            self.page_state_mut(0).selection = Some(root);
            self.hovered = None;
        }

        info!(page = %removed.id, current = ?self.current, "Deleted page");
        IntentResult::Applied
    }

    /// Make another page current, restoring its own history and selection
    pub fn switch_to_document(&mut self, id: &str) -> IntentResult {
        let Some(pos) = self.position_of(id) else {
            return IntentResult::noop("unknown page");
        };
        if self.current.as_deref() == Some(id) {
            return IntentResult::noop("already current");
        }

        self.current = Some(id.to_string());
        self.hovered = None;

        let tree = Arc::clone(&self.documents[pos].tree);
        let page = self.page_state_mut(pos);
        if !page.selection.as_deref().is_some_and(|s| contains_id(&tree, s)) {
            page.selection = Some(tree.id.clone());
        }

        info!(page = %id, "Switched page");
        IntentResult::Applied
    }

    /// Rename a page. Leaves the tree and history alone.
    pub fn update_page_metadata(&mut self, id: &str, update: PageUpdate) -> IntentResult {
        let Some(pos) = self.position_of(id) else {
            return IntentResult::noop("unknown page");
        };

        let title = update
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        let candidate = match (&update.slug, &title) {
            (Some(slug), _) => Some(slugify(slug)),
            (None, Some(title)) => Some(slugify(title)),
            (None, None) => None,
        };
        let slug = candidate.map(|c| disambiguate(&c, &self.used_slugs(Some(id))));

        let page = &self.documents[pos];
        let title = title.unwrap_or_else(|| page.title.clone());
        let slug = slug.unwrap_or_else(|| page.slug.clone());
        if title == page.title && slug == page.slug {
            return IntentResult::noop("metadata unchanged");
        }

        let page = &mut self.documents[pos];
        page.title = title;
        page.slug = slug;
        page.touch();

        info!(page = %id, title = %page.title, slug = %page.slug, "Renamed page");
        IntentResult::Applied
    }

    /// Drop every page, history and cursor
    pub fn reset(&mut self) {
        self.documents.clear();
        self.pages.clear();
        self.current = None;
        self.hovered = None;
        info!("Session reset");
    }

    /// Replace the whole session with stored state.
    ///
    /// Not undoable: each page starts with a single-entry history. Trees are
    /// validated first; on error the session is left as it was.
    #[instrument(skip_all)]
    pub fn hydrate(&mut self, stored: StoredSession) -> Result<(), EditorError> {
        let legacy = stored.is_legacy();
        let persisted = stored.into_persisted();

        let mut ids = HashSet::new();
        let mut slugs: Vec<String> = Vec::new();
        let mut documents = Vec::with_capacity(persisted.documents.len());

        for mut page in persisted.documents {
            validate_tree(&page.tree).map_err(|source| {
                warn!(page = %page.id, error = %source, "Rejecting stored session");
                EditorError::InvalidTree {
                    page: page.id.clone(),
                    source,
                }
            })?;
            if !ids.insert(page.id.clone()) {
                warn!(page = %page.id, "Rejecting stored session with duplicate page id");
                return Err(EditorError::DuplicatePage(page.id));
            }

            let used: HashSet<&str> = slugs.iter().map(String::as_str).collect();
            page.slug = disambiguate(&slugify(&page.slug), &used);
            slugs.push(page.slug.clone());
            documents.push(page);
        }

        let current = persisted
            .current_document_id
            .filter(|id| ids.contains(id))
            .or_else(|| documents.first().map(|d| d.id.clone()));

        let limit = self.config.history_limit;
        let pages = documents
            .iter()
            .map(|d| (d.id.clone(), PageState::new(Arc::clone(&d.tree), limit)))
            .collect();

        self.documents = documents;
        self.pages = pages;
        self.current = current;
        self.hovered = None;

        info!(pages = self.documents.len(), legacy, "Hydrated session");
        Ok(())
    }

    // ── Internals ───────────────────────────────────────────────────────

    /// Run a tree edit against the current page and record it if the tree
    /// changed
    fn apply_edit<F>(&mut self, label: &'static str, edit: F) -> IntentResult
    where
        F: FnOnce(&Node) -> Node,
    {
        let Some(pos) = self.current_position() else {
            return IntentResult::noop("no active page");
        };

        let current = Arc::clone(&self.documents[pos].tree);
        let next = edit(&current);
        if next == *current {
            debug!(edit = label, "Edit left the tree unchanged");
            return IntentResult::noop("tree unchanged");
        }

        let next = Arc::new(next);
        let index = self.page_state_mut(pos).undo.record(Arc::clone(&next));

        let page = &mut self.documents[pos];
        page.tree = next;
        page.touch();

        self.repair_cursors(pos);
        debug!(edit = label, history_index = index, "Recorded edit");
        IntentResult::Applied
    }

    /// Show a history snapshot on page `pos`, selecting its root
    fn show_snapshot(&mut self, pos: usize, tree: Arc<Node>) {
        let root = tree.id.clone();
        let page = &mut self.documents[pos];
        page.tree = tree;
        page.touch();

        self.page_state_mut(pos).selection = Some(root);
        self.hovered = None;
    }

    fn repair_cursors(&mut self, pos: usize) {
        let tree = Arc::clone(&self.documents[pos].tree);

        let page = self.page_state_mut(pos);
        if page.selection.as_deref().is_some_and(|id| !contains_id(&tree, id)) {
            page.selection = Some(tree.id.clone());
        }

        if self.hovered.as_deref().is_some_and(|id| !contains_id(&tree, id)) {
            self.hovered = None;
        }
    }

    fn activate_new_page(&mut self, page: Document) {
        let state = PageState::new(Arc::clone(&page.tree), self.config.history_limit);
        self.pages.insert(page.id.clone(), state);
        self.current = Some(page.id.clone());
        self.documents.push(page);
        self.hovered = None;
    }

    fn used_slugs(&self, except: Option<&str>) -> HashSet<&str> {
        self.documents
            .iter()
            .filter(|d| Some(d.id.as_str()) != except)
            .map(|d| d.slug.as_str())
            .collect()
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.documents.iter().position(|d| d.id == id)
    }

    fn current_position(&self) -> Option<usize> {
        self.position_of(self.current.as_deref()?)
    }

    fn current_page_state(&self) -> Option<&PageState> {
        self.pages.get(self.current.as_deref()?)
    }

    fn current_page_state_mut(&mut self) -> Option<&mut PageState> {
        let pos = self.current_position()?;
        Some(self.page_state_mut(pos))
    }

    /// Page state for the page at `pos`, created on first use
    fn page_state_mut(&mut self, pos: usize) -> &mut PageState {
        let page = &self.documents[pos];
        let limit = self.config.history_limit;
        self.pages
            .entry(page.id.clone())
            .or_insert_with(|| PageState::new(Arc::clone(&page.tree), limit))
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

/// Where a node goes when no parent is named: the first section under the
/// root, or the root itself
fn default_parent(tree: &Node) -> NodeId {
    tree.children()
        .iter()
        .find(|c| c.kind == NodeKind::Section)
        .map_or_else(|| tree.id.clone(), |s| s.id.clone())
}
