//! Mounted element lookup for scroll targets.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::ContentRef;
use crate::render::View;

/// One of the two linked panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pane {
    /// Positioned elements over the page image
    Overlay,
    /// Reading-order list
    List,
}

impl Pane {
    /// The other pane.
    pub fn opposite(&self) -> Pane {
        match self {
            Pane::Overlay => Pane::List,
            Pane::List => Pane::Overlay,
        }
    }

    fn id_prefix(&self) -> &'static str {
        match self {
            Pane::Overlay => "overlay",
            Pane::List => "item",
        }
    }
}

/// Identifies the element standing for a node in one pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementKey {
    /// Pane the element lives in
    pub pane: Pane,
    /// Node the element stands for
    pub id: ContentRef,
}

impl ElementKey {
    /// Create a key.
    pub fn new(pane: Pane, id: ContentRef) -> Self {
        Self { pane, id }
    }

    /// DOM element id, e.g. `overlay-texts-4` or `item-pictures-0`.
    pub fn element_id(&self) -> String {
        format!("{}-{}", self.pane.id_prefix(), self.id.dom_id())
    }
}

/// Elements currently mounted in either pane.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    elements: HashMap<ElementKey, String>,
}

impl ElementRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element.
    pub fn mount(&mut self, key: ElementKey) {
        self.elements.insert(key, key.element_id());
    }

    /// Remove an element.
    pub fn unmount(&mut self, key: &ElementKey) {
        self.elements.remove(key);
    }

    /// Register every overlay item and list entry of a view.
    pub fn mount_view(&mut self, view: &View) {
        for item in &view.overlay.items {
            self.mount(ElementKey::new(Pane::Overlay, item.id));
        }
        for entry in view.entries() {
            self.mount(ElementKey::new(Pane::List, entry.id()));
        }
        log::debug!("Mounted {} elements", self.elements.len());
    }

    /// Remove every element.
    pub fn unmount_all(&mut self) {
        self.elements.clear();
    }

    /// DOM id of a mounted element.
    pub fn get(&self, key: &ElementKey) -> Option<&str> {
        self.elements.get(key).map(String::as_str)
    }

    /// Whether an element is mounted.
    pub fn is_mounted(&self, key: &ElementKey) -> bool {
        self.elements.contains_key(key)
    }

    /// Number of mounted elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing is mounted.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_ids() {
        let text = ContentRef::text(4);
        assert_eq!(ElementKey::new(Pane::Overlay, text).element_id(), "overlay-texts-4");
        assert_eq!(
            ElementKey::new(Pane::List, ContentRef::picture(0)).element_id(),
            "item-pictures-0"
        );
    }

    #[test]
    fn test_mount_and_unmount() {
        let mut registry = ElementRegistry::new();
        let key = ElementKey::new(Pane::List, ContentRef::table(1));
        assert!(!registry.is_mounted(&key));

        registry.mount(key);
        assert_eq!(registry.get(&key), Some("item-tables-1"));
        assert!(!registry.is_mounted(&ElementKey::new(Pane::Overlay, ContentRef::table(1))));

        registry.unmount(&key);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_opposite_pane() {
        assert_eq!(Pane::Overlay.opposite(), Pane::List);
        assert_eq!(Pane::List.opposite(), Pane::Overlay);
    }
}
