//! Layout: the pure projections from the content tree to what gets drawn.
//!
//! - [`resolve`]: parent/child resolution and ordering
//! - [`grid`]: table span resolution
//! - [`overlay`]: bounding box to surface rectangle mapping
//! - [`rules`]: post-load relocation and pairing

pub mod grid;
pub mod overlay;
pub mod resolve;
pub mod rules;

pub use grid::{resolve_body, resolve_header, resolve_table, ResolvedCell, ResolvedTable};
pub use overlay::{text_overlay, to_overlay_rect, OverlayRect, VerticalAnchor};
pub use resolve::{children_of, ChildIndex, ChildOrder};
pub use rules::{PairingRule, RelocationRule, ViewRules};
