//! # docpair
//!
//! Linked two-pane views of structured documents.
//!
//! This library reads a Docling-style document tree (JSON) and projects it
//! into two synchronised panes: invisible elements positioned over the
//! rendered page, and a nested reading-order list. Hovering either pane
//! highlights the counterpart; activating one scrolls the other.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docpair::{load_file, render};
//!
//! fn main() -> docpair::Result<()> {
//!     let doc = load_file("report.json")?;
//!
//!     let options = render::RenderOptions::default();
//!     let view = render::compose(&doc, &options);
//!     let html = render::to_html(&view, &options)?;
//!     std::fs::write("report.html", html)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Overlay geometry**: top-left and bottom-left page boxes
//! - **Reading order**: grouped or declared child ordering, picture clusters
//! - **Merged tables**: row and column spans resolved from sparse grids
//! - **Linked selection**: pairing overrides, scroll requests
//! - **Multiple output formats**: HTML viewer, Markdown, plain text, JSON

pub mod detect;
pub mod error;
pub mod interact;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_document, DocFormat};
pub use error::{Error, Result};
pub use interact::{Pane, PairingMap, ScrollRequest, SelectionCoordinator, Session};
pub use layout::{ChildOrder, ViewRules};
pub use model::{ContentNode, ContentRef, Document, TableCell, TextLabel};
pub use parser::{DocumentLoader, ErrorMode, LoadOptions};
pub use render::{JsonFormat, ListEntry, OutputFormat, RenderOptions, TableFallback, View};

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Load a document file.
///
/// # Example
///
/// ```no_run
/// use docpair::load_file;
///
/// let doc = load_file("report.json").unwrap();
/// println!("Texts: {}", doc.texts.len());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let loader = DocumentLoader::open(path)?;
    loader.parse()
}

/// Load a document file with custom options.
///
/// # Example
///
/// ```no_run
/// use docpair::{load_file_with_options, LoadOptions};
///
/// let options = LoadOptions::new().strict();
/// let doc = load_file_with_options("report.json", options).unwrap();
/// ```
pub fn load_file_with_options<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<Document> {
    let loader = DocumentLoader::open_with_options(path, options)?;
    loader.parse()
}

/// Load a document from bytes.
pub fn load_bytes(data: &[u8]) -> Result<Document> {
    let loader = DocumentLoader::from_bytes(data)?;
    loader.parse()
}

/// Load a document from bytes with custom options.
pub fn load_bytes_with_options(data: &[u8], options: LoadOptions) -> Result<Document> {
    let loader = DocumentLoader::from_bytes_with_options(data, options)?;
    loader.parse()
}

/// Load a document from a reader.
///
/// # Example
///
/// ```no_run
/// use docpair::load_reader;
/// use std::fs::File;
///
/// let file = File::open("report.json").unwrap();
/// let doc = load_reader(file).unwrap();
/// ```
pub fn load_reader<R: Read>(reader: R) -> Result<Document> {
    let loader = DocumentLoader::from_reader(reader)?;
    loader.parse()
}

/// Load a document from a reader with custom options.
pub fn load_reader_with_options<R: Read>(reader: R, options: LoadOptions) -> Result<Document> {
    let loader = DocumentLoader::from_reader_with_options(reader, options)?;
    loader.parse()
}

/// Load a document file without blocking the async runtime.
#[cfg(feature = "async")]
pub async fn load_file_async<P: AsRef<Path>>(path: P) -> Result<Document> {
    let data = tokio::fs::read(path).await?;
    load_bytes(&data)
}

/// Convert a document file to a standalone HTML viewer.
///
/// # Example
///
/// ```no_run
/// let html = docpair::to_html("report.json").unwrap();
/// std::fs::write("report.html", html).unwrap();
/// ```
pub fn to_html<P: AsRef<Path>>(path: P) -> Result<String> {
    Docpair::new().load(path)?.to_html()
}

/// Convert a document file to Markdown.
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    Docpair::new().load(path)?.to_markdown()
}

/// Convert a document file to Markdown with custom options.
pub fn to_markdown_with_options<P: AsRef<Path>>(
    path: P,
    options: &RenderOptions,
) -> Result<String> {
    let doc = load_file(path)?;
    let view = render::compose(&doc, options);
    render::to_markdown(&view, options)
}

/// Convert a document file to plain text.
pub fn to_text<P: AsRef<Path>>(path: P) -> Result<String> {
    Docpair::new().load(path)?.to_text()
}

/// Convert a document file to the view model as JSON.
///
/// # Example
///
/// ```no_run
/// use docpair::{to_json, JsonFormat};
///
/// let json = to_json("report.json", JsonFormat::Pretty).unwrap();
/// std::fs::write("view.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    Docpair::new().load(path)?.to_json(format)
}

/// Builder for loading and rendering documents.
///
/// # Example
///
/// ```no_run
/// use docpair::{ChildOrder, Docpair, ViewRules};
///
/// let rules = ViewRules::from_file("rules.json")?;
/// let html = Docpair::new()
///     .with_rules(rules)
///     .with_page(2)
///     .with_order(ChildOrder::Document)
///     .with_page_image("page-2.png")
///     .load("report.json")?
///     .to_html()?;
/// # Ok::<(), docpair::Error>(())
/// ```
pub struct Docpair {
    load_options: LoadOptions,
    render_options: RenderOptions,
    rules: ViewRules,
}

impl Docpair {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            load_options: LoadOptions::default(),
            render_options: RenderOptions::default(),
            rules: ViewRules::default(),
        }
    }

    /// Reject duplicate or misplaced references while loading.
    pub fn strict(mut self) -> Self {
        self.load_options = self.load_options.strict();
        self
    }

    /// Log duplicate or misplaced references and keep going (the default).
    pub fn lenient(mut self) -> Self {
        self.load_options = self.load_options.lenient();
        self
    }

    /// Keep text exactly as stored (no NFC normalization).
    pub fn raw_text(mut self) -> Self {
        self.load_options = self.load_options.with_normalize_text(false);
        self
    }

    /// Apply relocation and pairing rules after loading.
    pub fn with_rules(mut self, rules: ViewRules) -> Self {
        self.rules = rules;
        self
    }

    /// Set the overlay page.
    pub fn with_page(mut self, page_no: u32) -> Self {
        self.render_options = self.render_options.with_page(page_no);
        self
    }

    /// Set the child order.
    pub fn with_order(mut self, order: ChildOrder) -> Self {
        self.render_options = self.render_options.with_child_order(order);
        self
    }

    /// Set the overlay scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.render_options = self.render_options.with_scale(scale);
        self
    }

    /// Set the page image URI.
    pub fn with_page_image(mut self, uri: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_page_image(uri);
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_title(title);
        self
    }

    /// Set table fallback mode.
    pub fn with_table_fallback(mut self, fallback: TableFallback) -> Self {
        self.render_options = self.render_options.with_table_fallback(fallback);
        self
    }

    /// Replace the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Load a document file and compose its view.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<DocpairResult> {
        let loader = DocumentLoader::open_with_options(path, self.load_options.clone())?;
        let document = loader.parse()?;
        self.finish(document)
    }

    /// Load a document from bytes and compose its view.
    pub fn load_bytes(self, data: &[u8]) -> Result<DocpairResult> {
        let loader = DocumentLoader::from_bytes_with_options(data, self.load_options.clone())?;
        let document = loader.parse()?;
        self.finish(document)
    }

    /// Compose the view of an already loaded document.
    pub fn finish(self, document: Document) -> Result<DocpairResult> {
        let page_no = self.render_options.page_no;
        if document.page_count() > 0 && document.page(page_no).is_none() {
            return Err(Error::PageOutOfRange(page_no, document.page_count()));
        }

        let document = self.rules.apply(&document);
        let view = Arc::new(render::compose(&document, &self.render_options));
        Ok(DocpairResult {
            document,
            view,
            render_options: self.render_options,
        })
    }
}

impl Default for Docpair {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded document together with its composed view.
pub struct DocpairResult {
    /// The document, after rules
    pub document: Document,
    view: Arc<View>,
    render_options: RenderOptions,
}

impl DocpairResult {
    /// Render as a standalone HTML viewer.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.view, &self.render_options)
    }

    /// Render the reading order as Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.view, &self.render_options)
    }

    /// Render the reading order as plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.view)
    }

    /// Serialise the view model.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.view, format)
    }

    /// Render in any output format.
    pub fn render(&self, format: OutputFormat) -> Result<render::RenderResult> {
        render::render(&self.view, format, &self.render_options)
    }

    /// The composed view.
    pub fn view(&self) -> &Arc<View> {
        &self.view
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// A selection coordinator with every element of the view mounted.
    pub fn coordinator(&self) -> SelectionCoordinator {
        SelectionCoordinator::from_view(&self.view)
    }
}
