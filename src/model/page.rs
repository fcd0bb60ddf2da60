//! Page-level types.

use super::{ImageRef, Size};
use serde::{Deserialize, Serialize};

/// A page entry of the document's `pages` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    /// 1-indexed page number
    pub page_no: u32,

    /// Page size in page units (points)
    #[serde(default)]
    pub size: Size,

    /// Pre-rendered page image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

impl PageInfo {
    /// Create a page with the given size.
    pub fn new(page_no: u32, width: f64, height: f64) -> Self {
        Self {
            page_no,
            size: Size { width, height },
            image: None,
        }
    }

    /// A4 portrait in points.
    pub fn a4(page_no: u32) -> Self {
        Self::new(page_no, 595.0, 842.0)
    }

    /// Image URI, if any.
    pub fn image_uri(&self) -> Option<&str> {
        self.image.as_ref().map(|i| i.uri.as_str())
    }
}
