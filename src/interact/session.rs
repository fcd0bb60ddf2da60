//! A viewing session: one loaded document, its memoised view and the
//! selection state over it.

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::layout::ViewRules;
use crate::model::Document;
use crate::render::{RenderOptions, View, ViewCache};

use super::SelectionCoordinator;

/// Whether a document is available.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    /// Nothing loaded yet
    #[default]
    Loading,
    /// Document loaded and transformed
    Ready(Arc<Document>),
}

/// Owns the document for as long as it is shown.
///
/// # Example
/// ```no_run
/// use docpair::interact::{Pane, Session};
/// use docpair::model::ContentRef;
/// use docpair::render::RenderOptions;
///
/// let mut session = Session::new(RenderOptions::default());
/// if session.load_file("report.json") {
///     session.coordinator_mut().on_hover_enter(&ContentRef::text(0));
///     let scroll = session.coordinator().on_activate(Pane::Overlay, &ContentRef::text(0));
///     println!("{:?}", scroll);
/// }
/// ```
#[derive(Debug, Default)]
pub struct Session {
    state: LoadState,
    options: RenderOptions,
    rules: ViewRules,
    cache: ViewCache,
    coordinator: SelectionCoordinator,
}

impl Session {
    /// Create a session in the loading state.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Set the rules applied to every loaded document and return self.
    pub fn with_rules(mut self, rules: ViewRules) -> Self {
        self.rules = rules;
        self
    }

    /// Accept the outcome of a load.
    ///
    /// A failure is logged and leaves the state unchanged; there is no
    /// retry. A success replaces the document, remounts every element and
    /// clears the selection. Returns whether a document was accepted.
    pub fn load(&mut self, result: Result<Document>) -> bool {
        let doc = match result {
            Ok(doc) => doc,
            Err(e) => {
                log::error!("Failed to load document: {}", e);
                return false;
            }
        };

        let doc = Arc::new(self.rules.apply(&doc));
        let view = self.cache.get_or_compose(&doc, &self.options);
        self.coordinator = SelectionCoordinator::from_view(&view);
        self.state = LoadState::Ready(doc);
        true
    }

    /// Load a document file.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> bool {
        self.load(crate::load_file(path))
    }

    /// Load a document file without blocking the runtime.
    #[cfg(feature = "async")]
    pub async fn load_file_async<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let result = crate::load_file_async(path).await;
        self.load(result)
    }

    /// Current load state.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Whether no document has been accepted yet.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    /// The loaded document, after rules.
    pub fn document(&self) -> Option<&Arc<Document>> {
        match &self.state {
            LoadState::Ready(doc) => Some(doc),
            LoadState::Loading => None,
        }
    }

    /// The view of the loaded document; recomposed only when the document
    /// or options changed.
    pub fn view(&mut self) -> Option<Arc<View>> {
        match &self.state {
            LoadState::Ready(doc) => Some(self.cache.get_or_compose(doc, &self.options)),
            LoadState::Loading => None,
        }
    }

    /// Current render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Change render options and remount the resulting view.
    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
        if let Some(view) = self.view() {
            self.coordinator.remount(&view);
        }
    }

    /// Selection state.
    pub fn coordinator(&self) -> &SelectionCoordinator {
        &self.coordinator
    }

    /// Mutable selection state, for feeding pointer events.
    pub fn coordinator_mut(&mut self) -> &mut SelectionCoordinator {
        &mut self.coordinator
    }
}
