//! Fields shared by every content node, and the borrowed polymorphic view.

use super::reference::{lenient_ref, lenient_refs};
use super::{ContentRef, PictureNode, Provenance, RefItem, TableNode, TextNode};
use serde::{Deserialize, Serialize};

/// Identity and tree links carried by every node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeHeader {
    /// Unique reference of this node
    pub self_ref: ContentRef,

    /// Owning node (absent for the roots)
    #[serde(
        default,
        deserialize_with = "lenient_ref",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent: Option<RefItem>,

    /// Declared children, in the producer's reading order
    #[serde(default, deserialize_with = "lenient_refs")]
    pub children: Vec<RefItem>,

    /// `body` or `furniture`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_layer: Option<String>,

    /// Node this one should be displayed under instead of its parent
    #[serde(
        default,
        deserialize_with = "lenient_ref",
        skip_serializing_if = "Option::is_none"
    )]
    pub visual_group: Option<RefItem>,

    /// Node that hover/activate on this one should drive instead of itself
    #[serde(
        default,
        deserialize_with = "lenient_ref",
        skip_serializing_if = "Option::is_none"
    )]
    pub partner: Option<RefItem>,
}

impl NodeHeader {
    /// Header for a node with the given reference and parent.
    pub fn new(self_ref: ContentRef, parent: Option<ContentRef>) -> Self {
        Self {
            self_ref,
            parent: parent.map(RefItem::from),
            children: Vec::new(),
            content_layer: None,
            visual_group: None,
            partner: None,
        }
    }

    /// Parent reference, if any.
    pub fn parent_ref(&self) -> Option<ContentRef> {
        self.parent.map(|p| p.cref)
    }

    /// Position of `child` in the declared children, if listed.
    pub fn child_position(&self, child: &ContentRef) -> Option<usize> {
        self.children.iter().position(|c| c.cref == *child)
    }
}

/// A structural node: the body, the furniture root or an entry of `groups`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupNode {
    /// Identity and links
    #[serde(flatten)]
    pub header: NodeHeader,

    /// Group name (e.g. `_root_`, `list`)
    #[serde(default)]
    pub name: String,

    /// Group label (e.g. `unspecified`, `list`, `key_value_area`)
    #[serde(default)]
    pub label: String,
}

impl GroupNode {
    /// Create a group.
    pub fn new(self_ref: ContentRef, parent: Option<ContentRef>) -> Self {
        Self {
            header: NodeHeader::new(self_ref, parent),
            name: String::new(),
            label: String::new(),
        }
    }

    /// Create an empty document body.
    pub fn body() -> Self {
        Self {
            name: "_root_".to_string(),
            label: "unspecified".to_string(),
            ..Self::new(ContentRef::BODY, None)
        }
    }
}

/// Borrowed view over any node variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContentNode<'a> {
    /// The body root
    Body(&'a GroupNode),
    /// A group (or the furniture root)
    Group(&'a GroupNode),
    /// A text item
    Text(&'a TextNode),
    /// A picture item
    Picture(&'a PictureNode),
    /// A table item
    Table(&'a TableNode),
}

impl<'a> ContentNode<'a> {
    /// Shared header.
    pub fn header(&self) -> &'a NodeHeader {
        match self {
            ContentNode::Body(g) | ContentNode::Group(g) => &g.header,
            ContentNode::Text(t) => &t.header,
            ContentNode::Picture(p) => &p.header,
            ContentNode::Table(t) => &t.header,
        }
    }

    /// This node's reference.
    pub fn self_ref(&self) -> ContentRef {
        self.header().self_ref
    }

    /// The owning node's reference.
    pub fn parent_ref(&self) -> Option<ContentRef> {
        self.header().parent_ref()
    }

    /// Provenance entries (empty for structural nodes).
    pub fn prov(&self) -> &'a [Provenance] {
        match self {
            ContentNode::Body(_) | ContentNode::Group(_) => &[],
            ContentNode::Text(t) => &t.prov,
            ContentNode::Picture(p) => &p.prov,
            ContentNode::Table(t) => &t.prov,
        }
    }
}
