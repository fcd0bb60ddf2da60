//! Structured content references.
//!
//! Docling documents link nodes with JSON-pointer-like strings such as
//! `#/texts/29`. They are parsed once at load time into [`ContentRef`] so the
//! rest of the crate never splits strings to find out what a node is.

use crate::error::Error;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// The document collection a node lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// The root `body` node
    Body,
    /// The root `furniture` node (page headers/footers)
    Furniture,
    /// `groups`
    Groups,
    /// `texts`
    Texts,
    /// `pictures`
    Pictures,
    /// `tables`
    Tables,
    /// `key_value_items`
    KeyValueItems,
    /// `form_items`
    FormItems,
}

impl Collection {
    /// Path segment used in reference strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Body => "body",
            Collection::Furniture => "furniture",
            Collection::Groups => "groups",
            Collection::Texts => "texts",
            Collection::Pictures => "pictures",
            Collection::Tables => "tables",
            Collection::KeyValueItems => "key_value_items",
            Collection::FormItems => "form_items",
        }
    }

    /// Whether this collection is a single root node rather than an array.
    pub fn is_root(&self) -> bool {
        matches!(self, Collection::Body | Collection::Furniture)
    }

    fn from_segment(segment: &str) -> Option<Self> {
        let collection = match segment {
            "body" => Collection::Body,
            "furniture" => Collection::Furniture,
            "groups" => Collection::Groups,
            "texts" => Collection::Texts,
            "pictures" => Collection::Pictures,
            "tables" => Collection::Tables,
            "key_value_items" => Collection::KeyValueItems,
            "form_items" => Collection::FormItems,
            _ => return None,
        };
        Some(collection)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `self_ref` / `$ref` value: collection plus array index.
///
/// Root nodes (`#/body`, `#/furniture`) always carry index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentRef {
    /// Collection the node is stored in
    pub collection: Collection,
    /// Position inside the collection
    pub index: usize,
}

impl ContentRef {
    /// Reference to the document body.
    pub const BODY: ContentRef = ContentRef {
        collection: Collection::Body,
        index: 0,
    };

    /// Create a reference into an array collection.
    pub fn new(collection: Collection, index: usize) -> Self {
        Self { collection, index }
    }

    /// Shorthand for `#/texts/<index>`.
    pub fn text(index: usize) -> Self {
        Self::new(Collection::Texts, index)
    }

    /// Shorthand for `#/pictures/<index>`.
    pub fn picture(index: usize) -> Self {
        Self::new(Collection::Pictures, index)
    }

    /// Shorthand for `#/tables/<index>`.
    pub fn table(index: usize) -> Self {
        Self::new(Collection::Tables, index)
    }

    /// Shorthand for `#/groups/<index>`.
    pub fn group(index: usize) -> Self {
        Self::new(Collection::Groups, index)
    }

    /// Stable identifier for rendered elements, e.g. `texts-29` or `body`.
    pub fn dom_id(&self) -> String {
        if self.collection.is_root() {
            self.collection.as_str().to_string()
        } else {
            format!("{}-{}", self.collection, self.index)
        }
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.collection.is_root() {
            write!(f, "#/{}", self.collection)
        } else {
            write!(f, "#/{}/{}", self.collection, self.index)
        }
    }
}

impl FromStr for ContentRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidRef(s.to_string());

        let path = s.strip_prefix("#/").ok_or_else(invalid)?;
        let mut segments = path.split('/');
        let collection = segments
            .next()
            .and_then(Collection::from_segment)
            .ok_or_else(invalid)?;

        let index = match segments.next() {
            None if collection.is_root() => 0,
            Some(idx) if !collection.is_root() => idx.parse().map_err(|_| invalid())?,
            _ => return Err(invalid()),
        };

        if segments.next().is_some() {
            return Err(invalid());
        }

        Ok(Self { collection, index })
    }
}

impl TryFrom<String> for ContentRef {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ContentRef> for String {
    fn from(value: ContentRef) -> Self {
        value.to_string()
    }
}

/// A `{"$ref": "..."}` link as stored in `parent` and `children`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RefItem {
    /// The referenced node
    #[serde(rename = "$ref")]
    pub cref: ContentRef,
}

impl RefItem {
    /// Wrap a reference.
    pub fn new(cref: ContentRef) -> Self {
        Self { cref }
    }
}

impl From<ContentRef> for RefItem {
    fn from(cref: ContentRef) -> Self {
        Self { cref }
    }
}

/// Link as written in the input, before the reference is parsed.
#[derive(Deserialize)]
struct RawRefItem {
    #[serde(rename = "$ref")]
    cref: String,
}

impl RawRefItem {
    fn parse(self) -> Option<RefItem> {
        match self.cref.parse() {
            Ok(cref) => Some(RefItem { cref }),
            Err(e) => {
                log::warn!("Dropping link: {}", e);
                None
            }
        }
    }
}

/// Deserialize an optional link, dropping it when the reference is malformed.
pub(crate) fn lenient_ref<'de, D>(deserializer: D) -> Result<Option<RefItem>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawRefItem>::deserialize(deserializer)?.and_then(RawRefItem::parse))
}

/// Deserialize a list of links, dropping the malformed ones.
pub(crate) fn lenient_refs<'de, D>(deserializer: D) -> Result<Vec<RefItem>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Vec::<RawRefItem>::deserialize(deserializer)?
        .into_iter()
        .filter_map(RawRefItem::parse)
        .collect())
}
