//! Widget registry seam
//!
//! Component nodes only carry a `component_ref` and props. Resolving the ref
//! to an actual widget belongs to whoever renders the page; the editor just
//! needs a way to ask and to report refs nobody can resolve.

use std::collections::{HashMap, HashSet};

use pagecraft_tree::{collect_component_refs, Node, Props};

/// What a registry knows about one widget
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetDescriptor {
    pub component_ref: String,
    pub display_name: String,
    pub default_props: Props,
    pub category: Option<String>,
}

impl WidgetDescriptor {
    pub fn new(component_ref: impl Into<String>) -> Self {
        let component_ref = component_ref.into();
        Self {
            display_name: component_ref.clone(),
            component_ref,
            default_props: Props::new(),
            category: None,
        }
    }
}

/// Lookup from component ref to widget
pub trait WidgetRegistry {
    fn resolve(&self, component_ref: &str) -> Option<&WidgetDescriptor>;
}

/// In-memory registry
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    widgets: HashMap<String, WidgetDescriptor>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a bare descriptor for each ref
    pub fn from_refs<I, S>(refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for component_ref in refs {
            registry.register(WidgetDescriptor::new(component_ref));
        }
        registry
    }

    pub fn register(&mut self, widget: WidgetDescriptor) {
        self.widgets.insert(widget.component_ref.clone(), widget);
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

impl WidgetRegistry for StaticRegistry {
    fn resolve(&self, component_ref: &str) -> Option<&WidgetDescriptor> {
        self.widgets.get(component_ref)
    }
}

/// Component refs in `tree` the registry cannot resolve, first occurrence
/// order, each reported once
pub fn unresolved_refs<R: WidgetRegistry + ?Sized>(tree: &Node, registry: &R) -> Vec<String> {
    let mut seen = HashSet::new();
    collect_component_refs(tree)
        .into_iter()
        .filter(|r| registry.resolve(r).is_none())
        .filter(|r| seen.insert(r.clone()))
        .collect()
}
