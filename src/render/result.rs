//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

/// Result of rendering a view, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (HTML, Markdown, text or JSON)
    pub content: String,

    /// View title
    pub title: String,

    /// Statistics of the composed view
    pub stats: ViewStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, title: String, stats: ViewStats) -> Self {
        Self {
            content,
            title,
            stats,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected while composing a view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewStats {
    /// Text entries listed
    pub text_count: u32,

    /// Headings among the text entries
    pub heading_count: u32,

    /// Picture entries listed
    pub picture_count: u32,

    /// Table entries listed
    pub table_count: u32,

    /// Group entries listed
    pub group_count: u32,

    /// Overlay items placed on the page
    pub overlay_count: u32,

    /// Texts on the page without a bounding box
    pub overlay_skipped: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ViewStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment text count, and heading count when `heading` is set.
    pub fn add_text(&mut self, heading: bool) {
        self.text_count += 1;
        if heading {
            self.heading_count += 1;
        }
    }

    /// Increment picture count.
    pub fn add_picture(&mut self) {
        self.picture_count += 1;
    }

    /// Increment table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Increment group count.
    pub fn add_group(&mut self) {
        self.group_count += 1;
    }

    /// Increment overlay count.
    pub fn add_overlay(&mut self) {
        self.overlay_count += 1;
    }

    /// Increment skipped overlay count.
    pub fn skip_overlay(&mut self) {
        self.overlay_skipped += 1;
    }

    /// Total number of list entries.
    pub fn entry_count(&self) -> u32 {
        self.text_count + self.picture_count + self.table_count + self.group_count
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ViewStats) {
        self.text_count += other.text_count;
        self.heading_count += other.heading_count;
        self.picture_count += other.picture_count;
        self.table_count += other.table_count;
        self.group_count += other.group_count;
        self.overlay_count += other.overlay_count;
        self.overlay_skipped += other.overlay_skipped;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
