//! Rendering options and configuration.

use serde::Serialize;

use crate::layout::ChildOrder;

/// Options for composing and rendering a view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderOptions {
    /// Page shown in the overlay pane (1-indexed)
    pub page_no: u32,

    /// Order of children drawn from different collections
    pub child_order: ChildOrder,

    /// Surface pixels per page unit
    pub scale: f64,

    /// Page image URI; overrides the document's own page image
    pub page_image: Option<String>,

    /// Title; defaults to the document name
    pub title: Option<String>,

    /// How to render merged-cell tables in Markdown
    pub table_fallback: TableFallback,

    /// Maximum heading level (1-6)
    pub max_heading_level: u8,

    /// Character to use for list markers
    pub list_marker: char,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overlay page.
    pub fn with_page(mut self, page_no: u32) -> Self {
        self.page_no = page_no.max(1);
        self
    }

    /// Set the child order.
    pub fn with_child_order(mut self, order: ChildOrder) -> Self {
        self.child_order = order;
        self
    }

    /// Set the overlay scale. Non-positive or non-finite values are ignored.
    pub fn with_scale(mut self, scale: f64) -> Self {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        }
        self
    }

    /// Set the page image URI.
    pub fn with_page_image(mut self, uri: impl Into<String>) -> Self {
        self.page_image = Some(uri.into());
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the table fallback mode.
    pub fn with_table_fallback(mut self, fallback: TableFallback) -> Self {
        self.table_fallback = fallback;
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_no: 1,
            child_order: ChildOrder::Grouped,
            scale: 1.0,
            page_image: None,
            title: None,
            table_fallback: TableFallback::Markdown,
            max_heading_level: 6,
            list_marker: '-',
            escape_special_chars: true,
        }
    }
}

/// How to render tables that can't be expressed in simple Markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableFallback {
    /// Use standard Markdown table syntax; spans are flattened
    #[default]
    Markdown,
    /// Use HTML table tags for tables with merged cells
    Html,
}

impl TableFallback {
    /// Parse a fallback name (`markdown` or `html`).
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(TableFallback::Markdown),
            "html" => Ok(TableFallback::Html),
            other => Err(format!("unknown table mode '{}'", other)),
        }
    }
}
