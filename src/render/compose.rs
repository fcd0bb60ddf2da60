//! View composition.
//!
//! A [`View`] holds both projections of a document: the overlay items placed
//! over the page image and the nested reading-order list. Composition is a
//! pure function of the document and the options; [`ViewCache`] memoises it.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::Serialize;

use crate::interact::{ElementKey, PairingMap, Pane};
use crate::layout::{
    resolve_table, text_overlay, ChildIndex, OverlayRect, ResolvedTable, VerticalAnchor,
};
use crate::model::{ContentNode, ContentRef, Document, TextLabel};

use super::{RenderOptions, ViewStats};

/// A positioned, invisible element over the page image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayItem {
    /// Text item this overlay stands for
    pub id: ContentRef,
    /// Label of the text item
    pub label: TextLabel,
    /// Text, used as the element's tooltip
    pub text: String,
    /// Placement on the surface
    pub rect: OverlayRect,
}

impl OverlayItem {
    /// DOM element id of this overlay.
    pub fn element_id(&self) -> String {
        ElementKey::new(Pane::Overlay, self.id).element_id()
    }
}

/// The overlay pane of one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayPane {
    /// Page shown
    pub page_no: u32,
    /// Surface width, when the page size is known
    pub width: Option<f64>,
    /// Surface height, when the page size is known
    pub height: Option<f64>,
    /// Page image URI
    pub image: Option<String>,
    /// Overlay items in document order
    pub items: Vec<OverlayItem>,
}

impl OverlayPane {
    /// Topmost item under a point given in top-left surface coordinates.
    ///
    /// Bottom-anchored items can only be hit when the surface height is known.
    pub fn hit_test(&self, px: f64, py: f64) -> Option<ContentRef> {
        self.items
            .iter()
            .rev()
            .find(|item| match (item.rect.anchor, self.height) {
                (VerticalAnchor::Top, height) => item.rect.contains(px, py, height.unwrap_or(0.0)),
                (VerticalAnchor::Bottom, Some(height)) => item.rect.contains(px, py, height),
                (VerticalAnchor::Bottom, None) => false,
            })
            .map(|item| item.id)
    }
}

/// A structural group in the list pane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupEntry {
    /// Group reference
    pub id: ContentRef,
    /// Group name
    pub name: String,
    /// Group label
    pub label: String,
    /// Nested entries
    pub children: Vec<ListEntry>,
}

/// A text item in the list pane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextEntry {
    /// Text reference
    pub id: ContentRef,
    /// Semantic role
    pub label: TextLabel,
    /// Display text
    pub text: String,
    /// Heading level for section headers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// Nested entries
    pub children: Vec<ListEntry>,
}

/// A picture in the list pane, with its clustered children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PictureEntry {
    /// Picture reference
    pub id: ContentRef,
    /// Picture label
    pub label: String,
    /// Image URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Nested entries (captions, clustered texts)
    pub children: Vec<ListEntry>,
}

/// A table in the list pane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableEntry {
    /// Table reference
    pub id: ContentRef,
    /// Table label
    pub label: String,
    /// Span-resolved cells
    pub table: ResolvedTable,
    /// Nested entries (captions, footnotes)
    pub children: Vec<ListEntry>,
}

/// An entry of the reading-order list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListEntry {
    /// Structural group
    Group(GroupEntry),
    /// Text item
    Text(TextEntry),
    /// Picture
    Picture(PictureEntry),
    /// Table
    Table(TableEntry),
}

impl ListEntry {
    /// Reference of the underlying node.
    pub fn id(&self) -> ContentRef {
        match self {
            ListEntry::Group(e) => e.id,
            ListEntry::Text(e) => e.id,
            ListEntry::Picture(e) => e.id,
            ListEntry::Table(e) => e.id,
        }
    }

    /// Nested entries.
    pub fn children(&self) -> &[ListEntry] {
        match self {
            ListEntry::Group(e) => &e.children,
            ListEntry::Text(e) => &e.children,
            ListEntry::Picture(e) => &e.children,
            ListEntry::Table(e) => &e.children,
        }
    }

    /// DOM element id of this entry.
    pub fn element_id(&self) -> String {
        ElementKey::new(Pane::List, self.id()).element_id()
    }
}

/// Depth-first, pre-order iterator over list entries.
pub struct Entries<'a> {
    stack: Vec<&'a ListEntry>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = &'a ListEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.stack.pop()?;
        self.stack.extend(entry.children().iter().rev());
        Some(entry)
    }
}

/// Both projections of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    /// Title
    pub title: String,
    /// Overlay pane
    pub overlay: OverlayPane,
    /// Reading-order list
    pub list: Vec<ListEntry>,
    /// Pairing overrides declared by the document
    pub pairings: PairingMap,
    /// Composition statistics
    pub stats: ViewStats,
}

impl View {
    /// Iterate over every list entry, depth first.
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            stack: self.list.iter().rev().collect(),
        }
    }

    /// Find a list entry by reference.
    pub fn find(&self, id: &ContentRef) -> Option<&ListEntry> {
        self.entries().find(|e| e.id() == *id)
    }

    /// Find an overlay item by reference.
    pub fn overlay_item(&self, id: &ContentRef) -> Option<&OverlayItem> {
        self.overlay.items.iter().find(|item| item.id == *id)
    }
}

/// Compose the view of a document.
pub fn compose(doc: &Document, options: &RenderOptions) -> View {
    let mut stats = ViewStats::new();

    let overlay = compose_overlay(doc, options, &mut stats);

    let index = ChildIndex::build(doc, options.child_order);
    let mut builder = ListBuilder {
        index: &index,
        visited: HashSet::from([ContentRef::BODY]),
        stats: &mut stats,
    };
    let list = builder.children(&ContentRef::BODY);

    log::debug!(
        "Composed view: {} entries, {} overlay items ({} without bbox)",
        stats.entry_count(),
        stats.overlay_count,
        stats.overlay_skipped
    );

    View {
        title: view_title(doc, options),
        overlay,
        list,
        pairings: PairingMap::from_document(doc),
        stats,
    }
}

fn view_title(doc: &Document, options: &RenderOptions) -> String {
    if let Some(ref title) = options.title {
        return title.clone();
    }
    if !doc.name.is_empty() {
        return doc.name.clone();
    }
    doc.origin
        .as_ref()
        .map(|o| o.filename.clone())
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| "Document".to_string())
}

fn compose_overlay(doc: &Document, options: &RenderOptions, stats: &mut ViewStats) -> OverlayPane {
    let page_no = options.page_no;
    let mut items = Vec::new();

    for text in &doc.texts {
        if !text.prov.iter().any(|p| p.page_no == page_no) {
            continue;
        }
        match text_overlay(text, page_no, options.scale) {
            Some(rect) => {
                stats.add_overlay();
                items.push(OverlayItem {
                    id: text.header.self_ref,
                    label: text.label,
                    text: text.text.clone(),
                    rect,
                });
            }
            None => {
                stats.skip_overlay();
                log::debug!(
                    "{} has no bounding box on page {}; listed only",
                    text.header.self_ref,
                    page_no
                );
            }
        }
    }

    let page = doc.page(page_no);
    let image = options
        .page_image
        .clone()
        .or_else(|| page.and_then(|p| p.image_uri()).map(str::to_string));

    OverlayPane {
        page_no,
        width: page.map(|p| p.size.width * options.scale),
        height: page.map(|p| p.size.height * options.scale),
        image,
        items,
    }
}

struct ListBuilder<'a, 'd> {
    index: &'a ChildIndex<'d>,
    visited: HashSet<ContentRef>,
    stats: &'a mut ViewStats,
}

impl<'a, 'd> ListBuilder<'a, 'd> {
    fn children(&mut self, parent: &ContentRef) -> Vec<ListEntry> {
        let index = self.index;
        index
            .children(parent)
            .iter()
            .filter_map(|node| self.entry(*node))
            .collect()
    }

    fn entry(&mut self, node: ContentNode<'d>) -> Option<ListEntry> {
        let id = node.self_ref();
        if !self.visited.insert(id) {
            log::debug!("{} reached more than once; listed at its first position", id);
            return None;
        }

        let children = self.children(&id);

        let entry = match node {
            ContentNode::Body(_) => return None,
            ContentNode::Group(group) => {
                self.stats.add_group();
                ListEntry::Group(GroupEntry {
                    id,
                    name: group.name.clone(),
                    label: group.label.clone(),
                    children,
                })
            }
            ContentNode::Text(text) => {
                self.stats.add_text(text.label.is_heading());
                self.stats.count_text(&text.text);
                ListEntry::Text(TextEntry {
                    id,
                    label: text.label,
                    text: text.text.clone(),
                    level: text.level,
                    children,
                })
            }
            ContentNode::Picture(picture) => {
                self.stats.add_picture();
                ListEntry::Picture(PictureEntry {
                    id,
                    label: picture.label.clone(),
                    uri: picture.uri().map(str::to_string),
                    children,
                })
            }
            ContentNode::Table(table) => {
                self.stats.add_table();
                ListEntry::Table(TableEntry {
                    id,
                    label: table.label.clone(),
                    table: resolve_table(&table.data.grid),
                    children,
                })
            }
        };

        Some(entry)
    }
}

/// Content fingerprint of a document together with render options.
///
/// Returns `None` when either cannot be serialised.
pub fn fingerprint(doc: &Document, options: &RenderOptions) -> Option<u64> {
    let doc_bytes = serde_json::to_vec(doc).ok()?;
    let option_bytes = serde_json::to_vec(options).ok()?;

    let mut hasher = DefaultHasher::new();
    doc_bytes.hash(&mut hasher);
    option_bytes.hash(&mut hasher);
    Some(hasher.finish())
}

/// Inputs of the cached view. The digest is checked first; equal digests
/// still require equal inputs.
#[derive(Debug)]
struct CacheKey {
    digest: u64,
    document: Document,
    options: RenderOptions,
}

impl CacheKey {
    fn matches(&self, digest: u64, doc: &Document, options: &RenderOptions) -> bool {
        self.digest == digest && self.options == *options && self.document == *doc
    }
}

/// Memoises the most recently composed view.
///
/// The same document content and options yield the same `Arc<View>`.
#[derive(Debug, Default)]
pub struct ViewCache {
    entry: Option<(CacheKey, Arc<View>)>,
    hits: u64,
    misses: u64,
}

impl ViewCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached view when document and options are unchanged,
    /// composing otherwise.
    pub fn get_or_compose(&mut self, doc: &Document, options: &RenderOptions) -> Arc<View> {
        let digest = fingerprint(doc, options);

        if let (Some(digest), Some((key, view))) = (digest, &self.entry) {
            if key.matches(digest, doc, options) {
                self.hits += 1;
                log::debug!("View cache hit");
                return Arc::clone(view);
            }
        }

        self.misses += 1;
        let view = Arc::new(compose(doc, options));
        self.entry = digest.map(|digest| {
            let key = CacheKey {
                digest,
                document: doc.clone(),
                options: options.clone(),
            };
            (key, Arc::clone(&view))
        });
        view
    }

    /// Drop the cached view.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Number of lookups served from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that composed a new view.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
