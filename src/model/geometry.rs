//! Page-space geometry and provenance.

use serde::{Deserialize, Serialize};

/// Which corner of the page bounding box coordinates are measured from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordOrigin {
    /// y grows downwards from the top edge
    #[serde(rename = "TOPLEFT")]
    TopLeft,
    /// y grows upwards from the bottom edge (native PDF space)
    #[default]
    #[serde(rename = "BOTTOMLEFT")]
    BottomLeft,
}

/// A page-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left
    pub l: f64,
    /// Top
    pub t: f64,
    /// Right
    pub r: f64,
    /// Bottom
    pub b: f64,
    /// Origin convention for `t` and `b`
    #[serde(default)]
    pub coord_origin: CoordOrigin,
}

impl BoundingBox {
    /// Create a bounding box.
    pub fn new(l: f64, t: f64, r: f64, b: f64, coord_origin: CoordOrigin) -> Self {
        Self {
            l,
            t,
            r,
            b,
            coord_origin,
        }
    }

    /// Horizontal extent, independent of axis direction.
    pub fn width(&self) -> f64 {
        (self.r - self.l).abs()
    }

    /// Vertical extent, independent of origin convention.
    pub fn height(&self) -> f64 {
        (self.t - self.b).abs()
    }
}

/// Width and height of a page or image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

/// Where on which page a node came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    /// 1-indexed page number
    pub page_no: u32,

    /// Bounding box on that page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,

    /// Character span in the node's text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charspan: Option<(usize, usize)>,
}
