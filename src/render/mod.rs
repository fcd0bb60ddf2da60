//! Rendering: composing the view and writing it out in various formats.

mod compose;
mod html;
mod json;
mod markdown;
mod options;
mod result;
mod text;
pub mod visitor;

pub use compose::{
    compose, fingerprint, Entries, GroupEntry, ListEntry, OverlayItem, OverlayPane, PictureEntry,
    TableEntry, TextEntry, View, ViewCache,
};
pub use html::{escape_html, to_html, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use options::{RenderOptions, TableFallback};
pub use result::{RenderResult, ViewStats};
pub use text::to_text;
pub use visitor::{CompositeVisitor, DefaultVisitor, ViewVisitor, VisitorAction};

use crate::error::Result;

/// Output format for rendering a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Two-pane HTML viewer
    #[default]
    Html,
    /// Reading-order Markdown
    Markdown,
    /// Reading-order plain text
    Text,
    /// View model as JSON
    Json,
}

impl OutputFormat {
    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Markdown => "md",
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

/// Render a view in the given format.
pub fn render(view: &View, format: OutputFormat, options: &RenderOptions) -> Result<RenderResult> {
    let content = match format {
        OutputFormat::Html => to_html(view, options)?,
        OutputFormat::Markdown => to_markdown(view, options)?,
        OutputFormat::Text => to_text(view)?,
        OutputFormat::Json => to_json(view, JsonFormat::Pretty)?,
    };
    Ok(RenderResult::new(content, view.title.clone(), view.stats.clone()))
}
