//! Pairing overrides: interaction on one node drives another's highlight.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{ContentRef, Document};

/// Map from a node to the partner whose highlight it drives.
///
/// Nodes without an entry mirror themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairingMap {
    partners: BTreeMap<ContentRef, ContentRef>,
}

impl PairingMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the `partner` fields of a document.
    pub fn from_document(doc: &Document) -> Self {
        let partners = doc
            .nodes()
            .filter_map(|n| n.header().partner.map(|p| (n.self_ref(), p.cref)))
            .collect();
        Self { partners }
    }

    /// Add a pairing and return self.
    pub fn with_pair(mut self, id: ContentRef, partner: ContentRef) -> Self {
        self.insert(id, partner);
        self
    }

    /// Add a pairing.
    pub fn insert(&mut self, id: ContentRef, partner: ContentRef) {
        self.partners.insert(id, partner);
    }

    /// The node whose highlight `id` drives.
    pub fn resolve(&self, id: &ContentRef) -> ContentRef {
        self.partners.get(id).copied().unwrap_or(*id)
    }

    /// Iterate over the overrides.
    pub fn iter(&self) -> impl Iterator<Item = (&ContentRef, &ContentRef)> {
        self.partners.iter()
    }

    /// Number of overrides.
    pub fn len(&self) -> usize {
        self.partners.len()
    }

    /// Whether there are no overrides.
    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PictureNode, TextNode};

    #[test]
    fn test_resolve_defaults_to_self() {
        let map = PairingMap::new().with_pair(ContentRef::picture(0), ContentRef::text(3));
        assert_eq!(map.resolve(&ContentRef::picture(0)), ContentRef::text(3));
        assert_eq!(map.resolve(&ContentRef::text(1)), ContentRef::text(1));
    }

    #[test]
    fn test_from_document() {
        let body = ContentRef::BODY;
        let mut doc = Document::new();
        doc.add_text(body, |r| TextNode::new(r, body, "caption"));
        let pic = doc.add_picture(body, |r| PictureNode::new(r, body));
        doc.pictures[0].header.partner = Some(ContentRef::text(0).into());

        let map = PairingMap::from_document(&doc);
        assert_eq!(map.len(), 1);
        assert_eq!(map.resolve(&pic), ContentRef::text(0));
    }

    #[test]
    fn test_serializes_as_ref_map() {
        let map = PairingMap::new().with_pair(ContentRef::picture(0), ContentRef::text(3));
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r##"{"#/pictures/0":"#/texts/3"}"##);

        let back: PairingMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
