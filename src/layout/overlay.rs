//! Overlay geometry: page bounding boxes to positioned rectangles.

use serde::{Deserialize, Serialize};

use crate::model::{BoundingBox, CoordOrigin, TextNode};

/// Edge of the surface the vertical offset is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAnchor {
    /// `y` is the distance from the top edge
    Top,
    /// `y` is the distance from the bottom edge
    Bottom,
}

/// A rectangle positioned on the page surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayRect {
    /// Offset from the left edge
    pub x: f64,
    /// Offset from the edge named by `anchor`
    pub y: f64,
    /// Width (never negative)
    pub width: f64,
    /// Height (never negative)
    pub height: f64,
    /// Edge `y` is measured from
    pub anchor: VerticalAnchor,
}

impl OverlayRect {
    /// Distance of the rectangle's top edge from the top of a surface of
    /// the given height.
    pub fn top_in(&self, surface_height: f64) -> f64 {
        match self.anchor {
            VerticalAnchor::Top => self.y,
            VerticalAnchor::Bottom => surface_height - self.y - self.height,
        }
    }

    /// Whether a point (top-left surface coordinates) lies inside.
    pub fn contains(&self, px: f64, py: f64, surface_height: f64) -> bool {
        let top = self.top_in(surface_height);
        px >= self.x && px <= self.x + self.width && py >= top && py <= top + self.height
    }
}

/// Map a bounding box onto the surface.
///
/// Top-left boxes anchor at `t`; bottom-left boxes anchor at `b` from the
/// bottom edge so no page height is needed.
pub fn to_overlay_rect(bbox: &BoundingBox, scale: f64) -> OverlayRect {
    let (y, anchor) = match bbox.coord_origin {
        CoordOrigin::TopLeft => (bbox.t, VerticalAnchor::Top),
        CoordOrigin::BottomLeft => (bbox.b, VerticalAnchor::Bottom),
    };

    OverlayRect {
        x: bbox.l * scale,
        y: y * scale,
        width: bbox.width() * scale,
        height: bbox.height() * scale,
        anchor,
    }
}

/// Overlay rectangle of a text item on `page_no`, if it has a located
/// provenance entry there.
pub fn text_overlay(text: &TextNode, page_no: u32, scale: f64) -> Option<OverlayRect> {
    text.prov
        .iter()
        .filter(|p| p.page_no == page_no)
        .find_map(|p| p.bbox.as_ref())
        .map(|bbox| to_overlay_rect(bbox, scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentRef, Provenance};

    #[test]
    fn test_top_left_box() {
        let bbox = BoundingBox::new(10.0, 20.0, 110.0, 60.0, CoordOrigin::TopLeft);
        let rect = to_overlay_rect(&bbox, 1.0);
        assert_eq!(
            rect,
            OverlayRect {
                x: 10.0,
                y: 20.0,
                width: 100.0,
                height: 40.0,
                anchor: VerticalAnchor::Top,
            }
        );
    }

    #[test]
    fn test_bottom_left_box() {
        let bbox = BoundingBox::new(10.0, 60.0, 110.0, 20.0, CoordOrigin::BottomLeft);
        let rect = to_overlay_rect(&bbox, 1.0);
        assert_eq!(rect.x, 10.0);
        assert_eq!(rect.y, 20.0);
        assert_eq!(rect.width, 100.0);
        assert_eq!(rect.height, 40.0);
        assert_eq!(rect.anchor, VerticalAnchor::Bottom);
    }

    #[test]
    fn test_extent_never_negative() {
        // t below b in top-left space is malformed but must not flip sign
        let bbox = BoundingBox::new(50.0, 80.0, 10.0, 20.0, CoordOrigin::TopLeft);
        let rect = to_overlay_rect(&bbox, 1.0);
        assert_eq!(rect.width, 40.0);
        assert_eq!(rect.height, 60.0);
    }

    #[test]
    fn test_scale() {
        let bbox = BoundingBox::new(10.0, 20.0, 110.0, 60.0, CoordOrigin::TopLeft);
        let rect = to_overlay_rect(&bbox, 2.0);
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (20.0, 40.0, 200.0, 80.0));
    }

    #[test]
    fn test_top_in_both_anchors_agree() {
        let height = 842.0;
        let top_left = BoundingBox::new(10.0, 100.0, 110.0, 140.0, CoordOrigin::TopLeft);
        let bottom_left =
            BoundingBox::new(10.0, height - 100.0, 110.0, height - 140.0, CoordOrigin::BottomLeft);

        let a = to_overlay_rect(&top_left, 1.0);
        let b = to_overlay_rect(&bottom_left, 1.0);
        assert_eq!(a.top_in(height), 100.0);
        assert_eq!(b.top_in(height), 100.0);
        assert!(b.contains(50.0, 120.0, height));
        assert!(!b.contains(50.0, 150.0, height));
    }

    #[test]
    fn test_text_overlay_requires_bbox_on_page() {
        let bbox = BoundingBox::new(0.0, 10.0, 5.0, 0.0, CoordOrigin::BottomLeft);
        let text = TextNode::new(ContentRef::text(0), ContentRef::BODY, "x")
            .with_prov(Provenance {
                page_no: 1,
                bbox: None,
                charspan: None,
            })
            .with_prov(Provenance {
                page_no: 2,
                bbox: Some(bbox),
                charspan: None,
            });

        assert!(text_overlay(&text, 1, 1.0).is_none());
        assert!(text_overlay(&text, 2, 1.0).is_some());
        assert!(text_overlay(&text, 3, 1.0).is_none());
    }
}
