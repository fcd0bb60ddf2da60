//! Text items.

use super::{ContentRef, NodeHeader, Provenance};
use serde::{Deserialize, Serialize};

/// Semantic role of a text item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextLabel {
    /// Document title
    Title,
    /// Section heading
    SectionHeader,
    /// Body paragraph
    #[default]
    Text,
    /// Paragraph (older producers)
    Paragraph,
    /// List entry
    ListItem,
    /// Caption of a picture or table
    Caption,
    /// Footnote
    Footnote,
    /// Running page header
    PageHeader,
    /// Running page footer
    PageFooter,
    /// Formula
    Formula,
    /// Code block
    Code,
    /// Reference list entry
    Reference,
    /// Anything this crate does not distinguish
    #[serde(other)]
    Other,
}

impl TextLabel {
    /// Label name as it appears in the document JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextLabel::Title => "title",
            TextLabel::SectionHeader => "section_header",
            TextLabel::Text => "text",
            TextLabel::Paragraph => "paragraph",
            TextLabel::ListItem => "list_item",
            TextLabel::Caption => "caption",
            TextLabel::Footnote => "footnote",
            TextLabel::PageHeader => "page_header",
            TextLabel::PageFooter => "page_footer",
            TextLabel::Formula => "formula",
            TextLabel::Code => "code",
            TextLabel::Reference => "reference",
            TextLabel::Other => "other",
        }
    }

    /// Whether the label denotes a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, TextLabel::Title | TextLabel::SectionHeader)
    }

    /// Whether the label denotes page furniture.
    pub fn is_furniture(&self) -> bool {
        matches!(self, TextLabel::PageHeader | TextLabel::PageFooter)
    }
}

/// A text item (`texts[i]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    /// Identity and links
    #[serde(flatten)]
    pub header: NodeHeader,

    /// Semantic role
    #[serde(default)]
    pub label: TextLabel,

    /// Source locations
    #[serde(default)]
    pub prov: Vec<Provenance>,

    /// Text as found in the source
    #[serde(default)]
    pub orig: String,

    /// Display text
    #[serde(default)]
    pub text: String,

    /// Heading level for section headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

impl TextNode {
    /// Create a body text item.
    pub fn new(self_ref: ContentRef, parent: ContentRef, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            header: NodeHeader::new(self_ref, Some(parent)),
            label: TextLabel::Text,
            prov: Vec::new(),
            orig: text.clone(),
            text,
            level: None,
        }
    }

    /// Set the label and return self.
    pub fn with_label(mut self, label: TextLabel) -> Self {
        self.label = label;
        self
    }

    /// Add a provenance entry and return self.
    pub fn with_prov(mut self, prov: Provenance) -> Self {
        self.prov.push(prov);
        self
    }

    /// First provenance entry located on `page_no`.
    pub fn prov_on_page(&self, page_no: u32) -> Option<&Provenance> {
        self.prov.iter().find(|p| p.page_no == page_no)
    }
}
