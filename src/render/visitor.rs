//! Visitor pattern for customizing view rendering.
//!
//! The visitor pattern allows users to customize how list entries and
//! overlay items are rendered without modifying the core rendering logic.
//!
//! # Example
//!
//! ```
//! use docpair::render::visitor::{ViewVisitor, VisitorAction};
//! use docpair::render::TableEntry;
//!
//! struct CustomTableVisitor;
//!
//! impl ViewVisitor for CustomTableVisitor {
//!     fn visit_table(&mut self, _table: &TableEntry) -> VisitorAction {
//!         VisitorAction::Replace("<!-- table omitted -->".to_string())
//!     }
//! }
//! ```

use super::compose::{GroupEntry, OverlayItem, PictureEntry, TableEntry, TextEntry};

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the element (and its nested entries) with custom output.
    Replace(String),

    /// Skip this element and its nested entries entirely.
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the element should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement content.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting view elements during rendering.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait ViewVisitor: Send + Sync {
    /// Called before rendering a group entry.
    fn visit_group(&mut self, group: &GroupEntry) -> VisitorAction {
        let _ = group;
        VisitorAction::Continue
    }

    /// Called before rendering a text entry.
    fn visit_text(&mut self, text: &TextEntry) -> VisitorAction {
        let _ = text;
        VisitorAction::Continue
    }

    /// Called before rendering a picture entry.
    fn visit_picture(&mut self, picture: &PictureEntry) -> VisitorAction {
        let _ = picture;
        VisitorAction::Continue
    }

    /// Called before rendering a table entry.
    fn visit_table(&mut self, table: &TableEntry) -> VisitorAction {
        let _ = table;
        VisitorAction::Continue
    }

    /// Called before rendering an overlay item (HTML only).
    fn visit_overlay_item(&mut self, item: &OverlayItem) -> VisitorAction {
        let _ = item;
        VisitorAction::Continue
    }
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl ViewVisitor for DefaultVisitor {}

/// Visitor that skips all pictures, including their clustered entries.
#[derive(Debug, Clone, Default)]
pub struct SkipPicturesVisitor;

impl ViewVisitor for SkipPicturesVisitor {
    fn visit_picture(&mut self, _picture: &PictureEntry) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Visitor that drops running page headers and footers from both panes.
#[derive(Debug, Clone, Default)]
pub struct SkipFurnitureVisitor;

impl ViewVisitor for SkipFurnitureVisitor {
    fn visit_text(&mut self, text: &TextEntry) -> VisitorAction {
        if text.label.is_furniture() {
            VisitorAction::Skip
        } else {
            VisitorAction::Continue
        }
    }

    fn visit_overlay_item(&mut self, item: &OverlayItem) -> VisitorAction {
        if item.label.is_furniture() {
            VisitorAction::Skip
        } else {
            VisitorAction::Continue
        }
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn ViewVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: ViewVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    fn first_action(
        &mut self,
        mut visit: impl FnMut(&mut dyn ViewVisitor) -> VisitorAction,
    ) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visit(visitor.as_mut());
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewVisitor for CompositeVisitor {
    fn visit_group(&mut self, group: &GroupEntry) -> VisitorAction {
        self.first_action(|v| v.visit_group(group))
    }

    fn visit_text(&mut self, text: &TextEntry) -> VisitorAction {
        self.first_action(|v| v.visit_text(text))
    }

    fn visit_picture(&mut self, picture: &PictureEntry) -> VisitorAction {
        self.first_action(|v| v.visit_picture(picture))
    }

    fn visit_table(&mut self, table: &TableEntry) -> VisitorAction {
        self.first_action(|v| v.visit_table(table))
    }

    fn visit_overlay_item(&mut self, item: &OverlayItem) -> VisitorAction {
        self.first_action(|v| v.visit_overlay_item(item))
    }
}
