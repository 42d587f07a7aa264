//! # Pagecraft Tree
//!
//! Node model and pure structural algorithms for page hierarchies.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ tree: Node model + pure algorithms          │
//! │  - find / flatten / collect refs            │
//! │  - insert / update / delete / move          │
//! │  - sibling reorder, clone with new ids      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: pages, undo/redo, edit session      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Owned tree**: containers own their children, no parent pointers
//! 2. **Pure edits**: every mutation returns a new tree
//! 3. **Miss is a no-op**: unknown ids hand back an equal tree, never an error
//!
//! ## Usage
//!
//! ```rust
//! use pagecraft_tree::{add_child, reorder_siblings, Node};
//!
//! let page = Node::document()
//!     .with_id("root")
//!     .with_child(Node::section().with_id("main"));
//!
//! let page = add_child(&page, "main", Node::component("hero").with_id("a"));
//! let page = add_child(&page, "main", Node::component("text").with_id("b"));
//! let page = reorder_siblings(&page, "b", "a");
//!
//! assert_eq!(page.children()[0].child_ids(), vec!["b", "a"]);
//! ```

mod error;
mod id_generator;
mod mutations;
mod node;
mod query;
mod visitor;

pub use error::{validate_tree, TreeError};
pub use id_generator::{generate_id, IdSource, RandomIds, SequentialIds};
pub use mutations::{
    add_child, clone_with_ids_from, clone_with_new_ids, delete_by_id, duplicate_node, move_node,
    reorder_siblings, update_by_id,
};
pub use node::{create_node, Node, NodeId, NodeKind, NodeMetadata, NodePatch, Props};
pub use query::{
    collect_component_refs, collect_ids, contains_id, count_nodes, find_by_id, find_parent_of,
    flatten_tree,
};
pub use visitor::{walk_node, walk_node_mut, Visitor, VisitorMut};
