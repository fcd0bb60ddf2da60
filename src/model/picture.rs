//! Picture items.

use super::{ContentRef, NodeHeader, Provenance, RefItem, Size};
use serde::{Deserialize, Serialize};

/// An image attached to a picture or page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Location of the image (path, URL or data URI)
    pub uri: String,

    /// MIME type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,

    /// Resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpi: Option<u32>,

    /// Pixel size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

impl ImageRef {
    /// Create an image reference from a URI.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            mimetype: None,
            dpi: None,
            size: None,
        }
    }
}

/// A picture item (`pictures[i]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PictureNode {
    /// Identity and links
    #[serde(flatten)]
    pub header: NodeHeader,

    /// Label (`picture`, `chart`, ...)
    #[serde(default)]
    pub label: String,

    /// Source locations
    #[serde(default)]
    pub prov: Vec<Provenance>,

    /// Caption text items
    #[serde(default)]
    pub captions: Vec<RefItem>,

    /// Embedded or linked image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

impl PictureNode {
    /// Create a picture item.
    pub fn new(self_ref: ContentRef, parent: ContentRef) -> Self {
        Self {
            header: NodeHeader::new(self_ref, Some(parent)),
            label: "picture".to_string(),
            prov: Vec::new(),
            captions: Vec::new(),
            image: None,
        }
    }

    /// Set the image and return self.
    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image = Some(image);
        self
    }

    /// Image URI, if any.
    pub fn uri(&self) -> Option<&str> {
        self.image.as_ref().map(|i| i.uri.as_str())
    }
}
