//! Content model types for structured document extraction results.
//!
//! These types mirror the Docling JSON layout: a `body` root, `groups`, and
//! the `texts`, `pictures` and `tables` leaf collections, linked through
//! `self_ref` / `parent` / `children` references. The model is read-only
//! once loaded; everything the viewer shows is derived from it.

mod document;
mod geometry;
mod node;
mod page;
mod picture;
mod reference;
mod table;
mod text;

pub use document::{Document, DocumentOrigin};
pub use geometry::{BoundingBox, CoordOrigin, Provenance, Size};
pub use node::{ContentNode, GroupNode, NodeHeader};
pub use page::PageInfo;
pub use picture::{ImageRef, PictureNode};
pub use reference::{Collection, ContentRef, RefItem};
pub use table::{TableCell, TableData, TableNode};
pub use text::{TextLabel, TextNode};
