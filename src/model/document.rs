//! Document-level types.

use super::{
    ContentNode, ContentRef, Collection, GroupNode, NodeHeader, PageInfo, PictureNode, TableNode,
    TextNode,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_schema_name() -> String {
    "DoclingDocument".to_string()
}

/// Where the document was extracted from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentOrigin {
    /// Source file name
    #[serde(default)]
    pub filename: String,

    /// Source MIME type
    #[serde(default)]
    pub mimetype: String,
}

/// A structured document: the root container of the content model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Schema identifier
    #[serde(default = "default_schema_name")]
    pub schema_name: String,

    /// Schema version
    #[serde(default)]
    pub version: String,

    /// Document name
    #[serde(default)]
    pub name: String,

    /// Source information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<DocumentOrigin>,

    /// Root of the reading-order tree
    pub body: GroupNode,

    /// Root of page furniture (headers, footers)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub furniture: Option<GroupNode>,

    /// Structural groups
    pub groups: Vec<GroupNode>,

    /// Text items
    pub texts: Vec<TextNode>,

    /// Picture items
    pub pictures: Vec<PictureNode>,

    /// Table items
    pub tables: Vec<TableNode>,

    /// Pages keyed by page number
    #[serde(default)]
    pub pages: BTreeMap<String, PageInfo>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            schema_name: default_schema_name(),
            version: String::new(),
            name: String::new(),
            origin: None,
            body: GroupNode::body(),
            furniture: None,
            groups: Vec::new(),
            texts: Vec::new(),
            pictures: Vec::new(),
            tables: Vec::new(),
            pages: BTreeMap::new(),
        }
    }

    /// Look up a node by reference.
    ///
    /// References normally index straight into their collection; documents
    /// whose arrays are out of order fall back to a linear scan.
    pub fn node(&self, cref: &ContentRef) -> Option<ContentNode<'_>> {
        fn find<'a, T>(
            items: &'a [T],
            cref: &ContentRef,
            header: impl Fn(&T) -> &NodeHeader,
        ) -> Option<&'a T> {
            items
                .get(cref.index)
                .filter(|item| header(item).self_ref == *cref)
                .or_else(|| items.iter().find(|item| header(item).self_ref == *cref))
        }

        match cref.collection {
            Collection::Body => Some(ContentNode::Body(&self.body)),
            Collection::Furniture => self.furniture.as_ref().map(ContentNode::Group),
            Collection::Groups => find(&self.groups, cref, |g| &g.header).map(ContentNode::Group),
            Collection::Texts => find(&self.texts, cref, |t| &t.header).map(ContentNode::Text),
            Collection::Pictures => {
                find(&self.pictures, cref, |p| &p.header).map(ContentNode::Picture)
            }
            Collection::Tables => find(&self.tables, cref, |t| &t.header).map(ContentNode::Table),
            Collection::KeyValueItems | Collection::FormItems => None,
        }
    }

    /// Check whether a reference resolves to a node.
    pub fn contains(&self, cref: &ContentRef) -> bool {
        self.node(cref).is_some()
    }

    /// Mutable access to a node's header.
    pub fn header_mut(&mut self, cref: &ContentRef) -> Option<&mut NodeHeader> {
        fn find<'a, T>(
            items: &'a mut [T],
            cref: &ContentRef,
            header: impl Fn(&mut T) -> &mut NodeHeader,
        ) -> Option<&'a mut NodeHeader> {
            items
                .iter_mut()
                .map(header)
                .find(|h| h.self_ref == *cref)
        }

        match cref.collection {
            Collection::Body => Some(&mut self.body.header),
            Collection::Furniture => self.furniture.as_mut().map(|f| &mut f.header),
            Collection::Groups => find(&mut self.groups, cref, |g| &mut g.header),
            Collection::Texts => find(&mut self.texts, cref, |t| &mut t.header),
            Collection::Pictures => find(&mut self.pictures, cref, |p| &mut p.header),
            Collection::Tables => find(&mut self.tables, cref, |t| &mut t.header),
            Collection::KeyValueItems | Collection::FormItems => None,
        }
    }

    /// Iterate over every node: roots, then groups, texts, pictures, tables.
    pub fn nodes(&self) -> impl Iterator<Item = ContentNode<'_>> {
        std::iter::once(ContentNode::Body(&self.body))
            .chain(self.furniture.iter().map(ContentNode::Group))
            .chain(self.groups.iter().map(ContentNode::Group))
            .chain(self.texts.iter().map(ContentNode::Text))
            .chain(self.pictures.iter().map(ContentNode::Picture))
            .chain(self.tables.iter().map(ContentNode::Table))
    }

    /// Nodes whose parent reference does not resolve.
    pub fn orphans(&self) -> Vec<ContentRef> {
        self.nodes()
            .filter(|n| match n.parent_ref() {
                Some(parent) => !self.contains(&parent),
                None => !n.self_ref().collection.is_root(),
            })
            .map(|n| n.self_ref())
            .collect()
    }

    /// Get a page by number (1-indexed).
    pub fn page(&self, page_no: u32) -> Option<&PageInfo> {
        self.pages
            .get(&page_no.to_string())
            .or_else(|| self.pages.values().find(|p| p.page_no == page_no))
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Add a page.
    pub fn add_page(&mut self, page: PageInfo) {
        self.pages.insert(page.page_no.to_string(), page);
    }

    /// Check if the document has no content items.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty() && self.pictures.is_empty() && self.tables.is_empty()
    }

    /// Append a text item under `parent` and return its reference.
    pub fn add_text(
        &mut self,
        parent: ContentRef,
        node: impl FnOnce(ContentRef) -> TextNode,
    ) -> ContentRef {
        let cref = ContentRef::text(self.texts.len());
        let mut text = node(cref);
        text.header.self_ref = cref;
        text.header.parent = Some(parent.into());
        self.texts.push(text);
        self.link_child(parent, cref);
        cref
    }

    /// Append a picture item under `parent` and return its reference.
    pub fn add_picture(
        &mut self,
        parent: ContentRef,
        node: impl FnOnce(ContentRef) -> PictureNode,
    ) -> ContentRef {
        let cref = ContentRef::picture(self.pictures.len());
        let mut picture = node(cref);
        picture.header.self_ref = cref;
        picture.header.parent = Some(parent.into());
        self.pictures.push(picture);
        self.link_child(parent, cref);
        cref
    }

    /// Append a table item under `parent` and return its reference.
    pub fn add_table(
        &mut self,
        parent: ContentRef,
        node: impl FnOnce(ContentRef) -> TableNode,
    ) -> ContentRef {
        let cref = ContentRef::table(self.tables.len());
        let mut table = node(cref);
        table.header.self_ref = cref;
        table.header.parent = Some(parent.into());
        self.tables.push(table);
        self.link_child(parent, cref);
        cref
    }

    /// Append a group under `parent` and return its reference.
    pub fn add_group(&mut self, parent: ContentRef, name: impl Into<String>) -> ContentRef {
        let cref = ContentRef::group(self.groups.len());
        let mut group = GroupNode::new(cref, Some(parent));
        group.name = name.into();
        group.label = "unspecified".to_string();
        self.groups.push(group);
        self.link_child(parent, cref);
        cref
    }

    fn link_child(&mut self, parent: ContentRef, child: ContentRef) {
        if let Some(header) = self.header_mut(&parent) {
            header.children.push(child.into());
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableCell;

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.add_text(ContentRef::BODY, |r| TextNode::new(r, ContentRef::BODY, "Title"));
        let pic = doc.add_picture(ContentRef::BODY, |r| PictureNode::new(r, ContentRef::BODY));
        doc.add_text(pic, |r| TextNode::new(r, pic, "inside"));
        doc.add_table(ContentRef::BODY, |r| {
            TableNode::new(r, ContentRef::BODY, vec![vec![Some(TableCell::text("A"))]])
        });
        doc
    }

    #[test]
    fn test_builders_link_children() {
        let doc = sample();
        assert_eq!(doc.body.header.children.len(), 3);
        assert_eq!(doc.pictures[0].header.children.len(), 1);
        assert_eq!(
            doc.texts[1].header.parent_ref(),
            Some(ContentRef::picture(0))
        );
    }

    #[test]
    fn test_node_lookup() {
        let doc = sample();
        assert!(matches!(
            doc.node(&ContentRef::text(1)),
            Some(ContentNode::Text(t)) if t.text == "inside"
        ));
        assert!(matches!(
            doc.node(&ContentRef::BODY),
            Some(ContentNode::Body(_))
        ));
        assert!(doc.node(&ContentRef::text(9)).is_none());
        assert!(doc.node(&ContentRef::group(0)).is_none());
    }

    #[test]
    fn test_node_lookup_out_of_order() {
        let mut doc = sample();
        doc.texts.swap(0, 1);
        assert!(matches!(
            doc.node(&ContentRef::text(1)),
            Some(ContentNode::Text(t)) if t.text == "inside"
        ));
    }

    #[test]
    fn test_orphans() {
        let mut doc = sample();
        assert!(doc.orphans().is_empty());

        doc.texts[0].header.parent = Some(ContentRef::group(7).into());
        assert_eq!(doc.orphans(), vec![ContentRef::text(0)]);

        // A leaf without any parent is orphaned too
        doc.texts[0].header.parent = None;
        assert_eq!(doc.orphans(), vec![ContentRef::text(0)]);
    }

    #[test]
    fn test_page_lookup() {
        let mut doc = Document::new();
        doc.add_page(PageInfo::a4(1));
        assert_eq!(doc.page_count(), 1);
        assert!(doc.page(1).is_some());
        assert!(doc.page(2).is_none());
    }

    #[test]
    fn test_missing_required_field() {
        let json = r##"{"body": {"self_ref": "#/body"}, "groups": [], "texts": [], "pictures": []}"##;
        let err = serde_json::from_str::<Document>(json).unwrap_err();
        assert!(err.to_string().contains("tables"));
    }
}
