//! Selection and highlight coordination between the two panes.
//!
//! One coordinator owns the selected node. Hover on either pane selects;
//! leaving clears only the selection the leaving element made, so a late
//! leave event can't wipe a newer hover. Activation scrolls the opposite
//! pane to the element standing for the same (or paired) node.

use serde::{Deserialize, Serialize};

use crate::model::ContentRef;
use crate::render::View;

use super::{ElementKey, ElementRegistry, PairingMap, Pane};

/// Scroll animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    /// Animated scroll
    Smooth,
    /// Jump
    Instant,
}

/// Where the target ends up in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBlock {
    /// Top edge
    Start,
    /// Centre
    Center,
    /// Bottom edge
    End,
    /// Minimal movement
    Nearest,
}

/// Request to bring an element into view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollRequest {
    /// DOM id of the target element
    pub element_id: String,
    /// Scroll animation
    pub behavior: ScrollBehavior,
    /// Vertical alignment
    pub block: ScrollBlock,
}

impl ScrollRequest {
    /// Smooth, centred scroll to an element.
    pub fn centered(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            behavior: ScrollBehavior::Smooth,
            block: ScrollBlock::Center,
        }
    }
}

/// Single owner of the selection state.
#[derive(Debug, Clone, Default)]
pub struct SelectionCoordinator {
    selected: Option<ContentRef>,
    pairings: PairingMap,
    registry: ElementRegistry,
}

impl SelectionCoordinator {
    /// Create a coordinator with the given pairings and nothing mounted.
    pub fn new(pairings: PairingMap) -> Self {
        Self {
            selected: None,
            pairings,
            registry: ElementRegistry::new(),
        }
    }

    /// Create a coordinator with every element of a view mounted.
    pub fn from_view(view: &View) -> Self {
        let mut coordinator = Self::new(view.pairings.clone());
        coordinator.registry.mount_view(view);
        coordinator
    }

    /// Replace the mounted view; the selection is cleared.
    pub fn remount(&mut self, view: &View) {
        self.selected = None;
        self.pairings = view.pairings.clone();
        self.registry.unmount_all();
        self.registry.mount_view(view);
    }

    /// Pointer entered an element standing for `id`.
    pub fn on_hover_enter(&mut self, id: &ContentRef) {
        let target = self.pairings.resolve(id);
        log::trace!("hover enter {} -> {}", id, target);
        self.selected = Some(target);
    }

    /// Pointer left an element standing for `id`.
    ///
    /// Clears the selection only if it is still the one this element made.
    pub fn on_hover_leave(&mut self, id: &ContentRef) {
        let target = self.pairings.resolve(id);
        if self.selected == Some(target) {
            log::trace!("hover leave {}", id);
            self.selected = None;
        }
    }

    /// An element standing for `id` in `pane` was activated.
    ///
    /// Returns the scroll to perform in the opposite pane, or `None` when the
    /// target is not mounted there.
    pub fn on_activate(&self, pane: Pane, id: &ContentRef) -> Option<ScrollRequest> {
        let target = self.pairings.resolve(id);
        let key = ElementKey::new(pane.opposite(), target);
        match self.registry.get(&key) {
            Some(element_id) => Some(ScrollRequest::centered(element_id)),
            None => {
                log::debug!("No {:?} element for {}; nothing to scroll to", key.pane, target);
                None
            }
        }
    }

    /// Whether elements standing for `id` are highlighted.
    pub fn is_active(&self, id: &ContentRef) -> bool {
        self.selected == Some(*id)
    }

    /// The selected node.
    pub fn selected(&self) -> Option<ContentRef> {
        self.selected
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Mounted elements.
    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    /// Mutable access to the mounted elements.
    pub fn registry_mut(&mut self) -> &mut ElementRegistry {
        &mut self.registry
    }

    /// Pairing overrides in effect.
    pub fn pairings(&self) -> &PairingMap {
        &self.pairings
    }
}
