//! Integration tests for the editor crate

use pagecraft_editor::{
    EditSession, EditorConfig, EditorError, Intent, IntentResult, PageUpdate, StoredSession,
};
use pagecraft_tree::{collect_ids, find_by_id, Node, NodeKind, NodePatch, Props};
use serde_json::json;

fn section_children(session: &EditSession) -> Vec<String> {
    let tree = session.active_tree().unwrap();
    tree.children()[0]
        .child_ids()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn first_section_id(session: &EditSession) -> String {
    session.active_tree().unwrap().children()[0].id.clone()
}

fn home_session() -> EditSession {
    let mut session = EditSession::default();
    session.create_document(Some("Home"), None);
    session
}

#[test]
fn test_end_to_end_scenario() {
    let mut session = home_session();
    let section = first_section_id(&session);

    session.add_node(Some(&section), Node::component("text").with_id("A"));
    session.add_node(Some(&section), Node::component("text").with_id("B"));
    assert_eq!(section_children(&session), vec!["A", "B"]);

    session.reorder_siblings("B", "A");
    assert_eq!(section_children(&session), vec!["B", "A"]);
    let final_tree = session.active_tree().unwrap().clone();

    session.undo();
    assert_eq!(section_children(&session), vec!["A", "B"]);
    session.undo();
    assert_eq!(section_children(&session), vec!["A"]);
    session.undo();
    assert!(section_children(&session).is_empty());
    assert!(!session.can_undo());

    for _ in 0..3 {
        assert_eq!(session.redo(), IntentResult::Applied);
    }
    assert_eq!(session.active_tree().unwrap(), &final_tree);
    assert!(!session.can_redo());
}

#[test]
fn test_undo_redo_round_trip() {
    let mut session = home_session();
    let t0 = session.active_tree().unwrap().clone();

    for i in 0..10 {
        session.add_node(None, Node::component(format!("widget-{}", i)));
    }
    let tn = session.active_tree().unwrap().clone();

    for _ in 0..10 {
        session.undo();
    }
    assert_eq!(session.active_tree().unwrap(), &t0);

    for _ in 0..10 {
        session.redo();
    }
    assert_eq!(session.active_tree().unwrap(), &tn);
}

#[test]
fn test_redo_invalidated_by_new_edit() {
    let mut session = home_session();

    session.add_node(None, Node::component("a").with_id("a"));
    session.add_node(None, Node::component("b").with_id("b"));
    session.undo();
    assert!(session.can_redo());

    session.add_node(None, Node::component("c").with_id("c"));
    assert!(!session.can_redo());
    assert_eq!(session.redo(), IntentResult::Noop { reason: "nothing to redo" });
    assert_eq!(section_children(&session), vec!["a", "c"]);
}

#[test]
fn test_history_cap() {
    let mut session = home_session();

    for i in 0..55 {
        session.add_node(None, Node::component("text").with_id(format!("n{}", i)));
    }
    assert_eq!(session.history_len(), 50);
    assert_eq!(session.history_index(), Some(49));

    let mut undos = 0;
    while session.undo().changed() {
        undos += 1;
    }
    assert_eq!(undos, 49);

    // Oldest retained snapshot: the blank page and the first five edits are gone
    let children = section_children(&session);
    assert_eq!(children.len(), 6);
    assert_eq!(children.first().map(String::as_str), Some("n0"));
    assert_eq!(children.last().map(String::as_str), Some("n5"));
}

#[test]
fn test_history_limit_from_config() {
    let config = EditorConfig {
        history_limit: 3,
        ..EditorConfig::default()
    };
    let mut session = EditSession::new(config);
    session.create_document(None, None);

    for i in 0..5 {
        session.add_node(None, Node::component("text").with_id(format!("n{}", i)));
    }
    assert_eq!(session.history_len(), 3);
}

#[test]
fn test_slug_disambiguation() {
    let mut session = EditSession::default();

    let first = session.create_document(Some("About"), None);
    let second = session.create_document(Some("About"), None);

    assert_eq!(session.document(&first).unwrap().slug, "about");
    assert_eq!(session.document(&second).unwrap().slug, "about-2");
    assert_eq!(session.current_document_id(), Some(second.as_str()));
}

#[test]
fn test_default_page_titles() {
    let mut session = EditSession::default();

    let first = session.create_document(None, None);
    let second = session.create_document(Some("   "), None);

    assert_eq!(session.document(&first).unwrap().title, "Page 1");
    assert_eq!(session.document(&first).unwrap().slug, "page-1");
    assert_eq!(session.document(&second).unwrap().title, "Page 2");
}

#[test]
fn test_last_page_guard() {
    let mut session = home_session();
    let id = session.current_document_id().unwrap().to_string();

    let result = session.delete_document(&id);

    assert!(matches!(result, IntentResult::Refused { .. }));
    assert_eq!(session.documents().len(), 1);
    assert_eq!(session.current_document_id(), Some(id.as_str()));
}

#[test]
fn test_last_page_delete_resets_when_allowed() {
    let config = EditorConfig {
        allow_deleting_last_page: true,
        ..EditorConfig::default()
    };
    let mut session = EditSession::new(config);
    let id = session.create_document(Some("Home"), None);

    assert_eq!(session.delete_document(&id), IntentResult::Applied);
    assert!(session.documents().is_empty());
    assert!(session.current_document_id().is_none());
    assert!(session.selected_node_id().is_none());
}

#[test]
fn test_delete_current_page_falls_back_to_first() {
    let mut session = EditSession::default();
    let home = session.create_document(Some("Home"), None);
    let about = session.create_document(Some("About"), None);

    assert_eq!(session.delete_document(&about), IntentResult::Applied);

    let page = session.current_document().unwrap();
    assert_eq!(page.id, home);
    assert_eq!(session.selected_node_id(), Some(page.root_id()));
}

#[test]
fn test_switch_keeps_history_per_page() {
    let mut session = EditSession::default();
    let home = session.create_document(Some("Home"), None);
    session.add_node(None, Node::component("hero").with_id("h1"));
    session.add_node(None, Node::component("hero").with_id("h2"));

    let about = session.create_document(Some("About"), None);
    session.add_node(None, Node::component("text").with_id("t1"));
    session.undo();
    assert!(section_children(&session).is_empty());

    session.switch_to_document(&home);
    assert_eq!(section_children(&session), vec!["h1", "h2"]);
    assert_eq!(session.history_len(), 3);
    assert!(session.can_undo());
    assert!(!session.can_redo());

    session.switch_to_document(&about);
    assert!(session.can_redo());
    session.redo();
    assert_eq!(section_children(&session), vec!["t1"]);
}

#[test]
fn test_switch_restores_selection_and_clears_hover() {
    let mut session = EditSession::default();
    let home = session.create_document(Some("Home"), None);
    session.add_node(None, Node::component("hero").with_id("h1"));
    assert_eq!(session.selected_node_id(), Some("h1"));

    session.create_document(Some("About"), None);
    session.add_node(None, Node::component("text").with_id("t1"));
    session.hover(Some("t1"));

    session.switch_to_document(&home);
    assert_eq!(session.selected_node_id(), Some("h1"));
    assert!(session.hovered_node_id().is_none());

    assert_eq!(
        session.switch_to_document(&home),
        IntentResult::Noop { reason: "already current" }
    );
    assert_eq!(
        session.switch_to_document("page-missing"),
        IntentResult::Noop { reason: "unknown page" }
    );
}

#[test]
fn test_duplicate_page() {
    let mut session = home_session();
    session.add_node(None, Node::component("hero"));
    let home = session.current_document().unwrap().clone();

    let copy_id = session.duplicate_document(&home.id).unwrap();
    let copy = session.current_document().unwrap();

    assert_eq!(copy.id, copy_id);
    assert_eq!(copy.title, "Home Copy");
    assert_eq!(copy.slug, "home-copy");
    assert!(collect_ids(&copy.tree).is_disjoint(&collect_ids(&home.tree)));
    assert_eq!(session.selected_node_id(), Some(copy.root_id()));
    assert_eq!(session.history_len(), 1);

    let again = session.duplicate_document(&home.id).unwrap();
    assert_eq!(session.document(&again).unwrap().slug, "home-copy-2");
    assert!(session.duplicate_document("page-missing").is_none());
}

#[test]
fn test_rename_page() {
    let mut session = EditSession::default();
    let home = session.create_document(Some("Home"), None);
    let about = session.create_document(Some("About"), None);

    let result = session.update_page_metadata(
        &about,
        PageUpdate {
            title: Some("Our Team".into()),
            slug: None,
        },
    );
    assert_eq!(result, IntentResult::Applied);
    assert_eq!(session.document(&about).unwrap().slug, "our-team");

    // Explicit slug is slugified and kept unique
    session.update_page_metadata(
        &about,
        PageUpdate {
            title: None,
            slug: Some("Home".into()),
        },
    );
    let page = session.document(&about).unwrap();
    assert_eq!(page.title, "Our Team");
    assert_eq!(page.slug, "home-2");

    // Blank title keeps the old one; renaming onto itself keeps its own slug
    let result = session.update_page_metadata(
        &home,
        PageUpdate {
            title: Some("  ".into()),
            slug: Some("home".into()),
        },
    );
    assert_eq!(result, IntentResult::Noop { reason: "metadata unchanged" });
    assert_eq!(session.document(&home).unwrap().title, "Home");
}

#[test]
fn test_rename_does_not_touch_history() {
    let mut session = home_session();
    let id = session.current_document_id().unwrap().to_string();
    session.add_node(None, Node::component("hero"));

    session.update_page_metadata(
        &id,
        PageUpdate {
            title: Some("Start".into()),
            slug: None,
        },
    );

    assert_eq!(session.history_len(), 2);
    assert_eq!(session.history_index(), Some(1));
}

#[test]
fn test_selection_repaired_after_delete() {
    let mut session = home_session();
    session.add_node(None, Node::component("hero").with_id("hero"));
    session.hover(Some("hero"));
    assert_eq!(session.selected_node_id(), Some("hero"));

    let section = first_section_id(&session);
    session.delete_node(&section);

    let root = session.active_tree().unwrap().id.clone();
    assert_eq!(session.selected_node_id(), Some(root.as_str()));
    assert!(session.hovered_node_id().is_none());
}

#[test]
fn test_select_unknown_node_is_noop() {
    let mut session = home_session();
    let root = session.active_tree().unwrap().id.clone();

    assert_eq!(
        session.select(Some("ghost")),
        IntentResult::Noop { reason: "unknown node" }
    );
    assert_eq!(session.selected_node_id(), Some(root.as_str()));

    assert_eq!(session.select(None), IntentResult::Applied);
    assert!(session.selected_node_id().is_none());
}

#[test]
fn test_invalid_edits_are_not_recorded() {
    let mut session = home_session();
    let root = session.active_tree().unwrap().id.clone();
    let section = first_section_id(&session);
    session.add_node(None, Node::component("hero").with_id("hero"));

    // Into a component, into its own subtree, root delete, unknown id
    assert!(!session.add_node(Some("hero"), Node::section()).changed());
    assert!(!session.move_node(&section, &section, 0).changed());
    assert!(!session.delete_node(&root).changed());
    assert!(!session.update_node("ghost", &NodePatch::props(Props::new())).changed());
    assert!(!session.reorder_siblings("hero", &section).changed());

    assert_eq!(session.history_len(), 2);
}

#[test]
fn test_update_and_duplicate_node() {
    let mut session = home_session();
    session.add_node(None, Node::component("text").with_id("t"));

    let mut props = Props::new();
    props.insert("content".into(), json!("Hello"));
    assert_eq!(session.update_node("t", &NodePatch::props(props)), IntentResult::Applied);

    session.duplicate_node("t");
    let tree = session.active_tree().unwrap();
    let section = &tree.children()[0];
    assert_eq!(section.children().len(), 2);
    assert_eq!(section.children()[0].id, "t");
    assert_ne!(section.children()[1].id, "t");
    assert_eq!(section.children()[1].props["content"], json!("Hello"));
}

#[test]
fn test_move_across_sections() {
    let mut session = home_session();
    let root = session.active_tree().unwrap().id.clone();
    session.add_node(Some(&root), Node::section().with_id("s2"));
    session.add_node(None, Node::component("a").with_id("a"));

    assert_eq!(session.move_node("a", "s2", 10), IntentResult::Applied);

    let tree = session.active_tree().unwrap();
    assert!(find_by_id(tree, "s2").unwrap().child_ids().contains(&"a"));
    assert!(tree.children()[0].children().is_empty());
}

#[test]
fn test_dispatch_intent_script() -> anyhow::Result<()> {
    let script = json!([
        { "type": "create_page", "title": "Home" },
        { "type": "create_page", "title": "About" },
        { "type": "add_node", "kind": "component", "componentRef": "hero" },
        { "type": "add_node", "kind": "document" },
        { "type": "undo" },
        { "type": "redo" }
    ]);
    let intents: Vec<Intent> = serde_json::from_value(script)?;

    let mut session = EditSession::default();
    let results: Vec<IntentResult> = intents.into_iter().map(|i| session.dispatch(i)).collect();

    assert!(results[0].created_id().is_some());
    assert!(results[1].created_id().is_some());
    assert_eq!(results[2], IntentResult::Applied);
    assert!(!results[3].changed());
    assert_eq!(results[4], IntentResult::Applied);
    assert_eq!(results[5], IntentResult::Applied);

    let page = session.current_document().unwrap();
    assert_eq!(page.slug, "about");
    assert_eq!(page.tree.children()[0].children()[0].kind, NodeKind::Component);
    Ok(())
}

#[test]
fn test_export_and_hydrate() -> anyhow::Result<()> {
    let mut session = EditSession::default();
    session.create_document(Some("Home"), None);
    session.add_node(None, Node::component("hero"));
    let about = session.create_document(Some("About"), None);

    let json = session.export().to_json()?;
    let restored = EditSession::from_stored(StoredSession::from_json(&json)?, EditorConfig::default())?;

    assert_eq!(restored.documents(), session.documents());
    assert_eq!(restored.current_document_id(), Some(about.as_str()));
    assert!(!restored.can_undo());
    assert_eq!(restored.history_len(), 1);
    Ok(())
}

#[test]
fn test_hydrate_legacy_tree() -> anyhow::Result<()> {
    let json = json!({
        "tree": {
            "id": "root",
            "type": "document",
            "children": [
                { "id": "s", "type": "section", "children": [
                    { "id": "c", "type": "component", "componentRef": "hero" }
                ]}
            ]
        }
    })
    .to_string();

    let mut session = EditSession::default();
    session.hydrate(StoredSession::from_json(&json)?)?;

    let page = session.current_document().unwrap();
    assert_eq!(page.title, "Home");
    assert_eq!(page.slug, "home");
    assert_eq!(session.selected_node_id(), Some("root"));
    assert!(!session.can_undo());
    Ok(())
}

#[test]
fn test_hydrate_repairs_slugs_and_current() -> anyhow::Result<()> {
    let tree = json!({ "id": "r", "type": "document", "children": [] });
    let json = json!({
        "documents": [
            { "id": "p1", "title": "A", "slug": "Same Slug", "tree": tree.clone(),
              "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z" },
            { "id": "p2", "title": "B", "slug": "same-slug", "tree": tree,
              "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z" }
        ],
        "currentDocumentId": "gone"
    })
    .to_string();

    let session = EditSession::from_stored(StoredSession::from_json(&json)?, EditorConfig::default())?;

    assert_eq!(session.documents()[0].slug, "same-slug");
    assert_eq!(session.documents()[1].slug, "same-slug-2");
    assert_eq!(session.current_document_id(), Some("p1"));
    Ok(())
}

#[test]
fn test_hydrate_rejects_invalid_tree() -> anyhow::Result<()> {
    let mut session = home_session();
    let before = session.export();

    // Component with children
    let json = json!({
        "id": "root",
        "type": "document",
        "children": [
            { "id": "c", "type": "component", "componentRef": "x", "children": [] }
        ]
    })
    .to_string();

    let err = session.hydrate(StoredSession::from_json(&json)?).unwrap_err();
    assert!(matches!(err, EditorError::InvalidTree { .. }));
    assert_eq!(session.export(), before);
    Ok(())
}

#[test]
fn test_hydrate_rejects_duplicate_page_ids() -> anyhow::Result<()> {
    let tree = json!({ "id": "r", "type": "document", "children": [] });
    let page = json!({ "id": "p1", "title": "A", "slug": "a", "tree": tree,
        "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z" });
    let json = json!({ "documents": [page.clone(), page] }).to_string();

    let mut session = EditSession::default();
    let err = session.hydrate(StoredSession::from_json(&json)?).unwrap_err();
    assert!(matches!(err, EditorError::DuplicatePage(id) if id == "p1"));
    assert!(session.documents().is_empty());
    Ok(())
}

#[test]
fn test_snapshot_is_stable() {
    let mut session = home_session();
    session.add_node(None, Node::component("hero").with_id("hero"));
    let snapshot = session.snapshot();

    session.delete_node("hero");

    let tree = snapshot.active_tree.as_ref().unwrap();
    assert!(find_by_id(tree, "hero").is_some());
    assert_eq!(snapshot.selected_node_id.as_deref(), Some("hero"));
    assert_eq!(snapshot.history_index, Some(1));
    assert!(snapshot.can_undo);
    assert!(!snapshot.can_redo);
}
