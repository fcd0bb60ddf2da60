//! Reference resolution: which nodes belong under which parent.
//!
//! A child belongs to a parent when `child.parent == parent.self_ref`. The
//! parent's own `children` list is only consulted for ordering in
//! [`ChildOrder::Document`] mode.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{ContentNode, ContentRef, Document};

/// How children drawn from different collections are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildOrder {
    /// Texts, then pictures, then tables, then groups; source order within each
    #[default]
    Grouped,
    /// Position in the parent's `children` array; unlisted children follow in grouped order
    Document,
}

impl ChildOrder {
    /// Parse an order name (`grouped` or `document`).
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grouped" => Ok(ChildOrder::Grouped),
            "document" => Ok(ChildOrder::Document),
            other => Err(format!("unknown child order '{}'", other)),
        }
    }
}

/// Every node that may appear as a child, in grouped order.
fn candidates(doc: &Document) -> impl Iterator<Item = ContentNode<'_>> {
    doc.texts
        .iter()
        .map(ContentNode::Text)
        .chain(doc.pictures.iter().map(ContentNode::Picture))
        .chain(doc.tables.iter().map(ContentNode::Table))
        .chain(doc.groups.iter().map(ContentNode::Group))
}

fn sort_by_declared_position(
    doc: &Document,
    parent: &ContentRef,
    children: &mut [ContentNode<'_>],
) {
    let Some(node) = doc.node(parent) else {
        return;
    };

    let mut positions = HashMap::new();
    for (i, child) in node.header().children.iter().enumerate() {
        positions.entry(child.cref).or_insert(i);
    }

    // Stable sort keeps grouped order among unlisted children
    children.sort_by_key(|c| positions.get(&c.self_ref()).copied().unwrap_or(usize::MAX));
}

/// Children of `parent`, in the requested order.
///
/// Returns an empty list when nothing references `parent`. A node is never
/// reported as its own child.
pub fn children_of<'a>(
    doc: &'a Document,
    parent: &ContentRef,
    order: ChildOrder,
) -> Vec<ContentNode<'a>> {
    let mut children: Vec<ContentNode<'a>> = candidates(doc)
        .filter(|c| c.parent_ref() == Some(*parent) && c.self_ref() != *parent)
        .collect();

    if order == ChildOrder::Document {
        sort_by_declared_position(doc, parent, &mut children);
    }

    children
}

/// Precomputed parent → children map for walking a whole document.
///
/// Gives the same answers as [`children_of`] without rescanning every
/// collection per node.
#[derive(Debug, Clone)]
pub struct ChildIndex<'a> {
    children: HashMap<ContentRef, Vec<ContentNode<'a>>>,
}

impl<'a> ChildIndex<'a> {
    /// Index every node of `doc` under its parent.
    pub fn build(doc: &'a Document, order: ChildOrder) -> Self {
        let mut children: HashMap<ContentRef, Vec<ContentNode<'a>>> = HashMap::new();

        for node in candidates(doc) {
            if let Some(parent) = node.parent_ref() {
                if parent != node.self_ref() {
                    children.entry(parent).or_default().push(node);
                }
            }
        }

        if order == ChildOrder::Document {
            for (parent, list) in children.iter_mut() {
                sort_by_declared_position(doc, parent, list);
            }
        }

        Self { children }
    }

    /// Children of `parent`.
    pub fn children(&self, parent: &ContentRef) -> &[ContentNode<'a>] {
        self.children
            .get(parent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PictureNode, TableCell, TableNode, TextNode};

    fn refs(nodes: &[ContentNode<'_>]) -> Vec<ContentRef> {
        nodes.iter().map(|n| n.self_ref()).collect()
    }

    /// body: [table0, text0, picture0, text1]; picture0: [text2]
    fn interleaved() -> Document {
        let body = ContentRef::BODY;
        let mut doc = Document::new();
        doc.add_table(body, |r| TableNode::new(r, body, vec![vec![Some(TableCell::text("x"))]]));
        doc.add_text(body, |r| TextNode::new(r, body, "first"));
        let pic = doc.add_picture(body, |r| PictureNode::new(r, body));
        doc.add_text(body, |r| TextNode::new(r, body, "second"));
        doc.add_text(pic, |r| TextNode::new(r, pic, "inside"));
        doc
    }

    #[test]
    fn test_grouped_order() {
        let doc = interleaved();
        let children = children_of(&doc, &ContentRef::BODY, ChildOrder::Grouped);
        assert_eq!(
            refs(&children),
            vec![
                ContentRef::text(0),
                ContentRef::text(1),
                ContentRef::picture(0),
                ContentRef::table(0),
            ]
        );
    }

    #[test]
    fn test_document_order() {
        let doc = interleaved();
        let children = children_of(&doc, &ContentRef::BODY, ChildOrder::Document);
        assert_eq!(
            refs(&children),
            vec![
                ContentRef::table(0),
                ContentRef::text(0),
                ContentRef::picture(0),
                ContentRef::text(1),
            ]
        );
    }

    #[test]
    fn test_document_order_unlisted_children_last() {
        let mut doc = interleaved();
        // text0 still points at body but is no longer declared
        doc.body.header.children.retain(|c| c.cref != ContentRef::text(0));
        let children = children_of(&doc, &ContentRef::BODY, ChildOrder::Document);
        assert_eq!(children.last().map(|n| n.self_ref()), Some(ContentRef::text(0)));
    }

    #[test]
    fn test_children_preserve_source_order() {
        let doc = interleaved();
        let children = children_of(&doc, &ContentRef::BODY, ChildOrder::Grouped);
        let text_indices: Vec<usize> = children
            .iter()
            .filter(|n| matches!(n, ContentNode::Text(_)))
            .map(|n| n.self_ref().index)
            .collect();
        let mut sorted = text_indices.clone();
        sorted.sort();
        assert_eq!(text_indices, sorted);
    }

    #[test]
    fn test_no_children() {
        let doc = interleaved();
        assert!(children_of(&doc, &ContentRef::table(0), ChildOrder::Grouped).is_empty());
        assert!(children_of(&doc, &ContentRef::group(4), ChildOrder::Document).is_empty());
    }

    #[test]
    fn test_self_parent_is_not_a_child() {
        let mut doc = interleaved();
        doc.texts[2].header.parent = Some(ContentRef::text(2).into());
        assert!(children_of(&doc, &ContentRef::text(2), ChildOrder::Grouped).is_empty());
        let index = ChildIndex::build(&doc, ChildOrder::Grouped);
        assert!(index.children(&ContentRef::text(2)).is_empty());
    }

    #[test]
    fn test_index_matches_children_of() {
        let doc = interleaved();
        for order in [ChildOrder::Grouped, ChildOrder::Document] {
            let index = ChildIndex::build(&doc, order);
            for parent in [ContentRef::BODY, ContentRef::picture(0), ContentRef::table(0)] {
                assert_eq!(
                    refs(index.children(&parent)),
                    refs(&children_of(&doc, &parent, order))
                );
            }
        }
    }

    #[test]
    fn test_parse_child_order() {
        assert_eq!(ChildOrder::parse("Grouped"), Ok(ChildOrder::Grouped));
        assert_eq!(ChildOrder::parse("document"), Ok(ChildOrder::Document));
        assert!(ChildOrder::parse("random").is_err());
    }
}
