//! Structured document loader.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use unicode_normalization::{is_nfc, UnicodeNormalization};

use crate::error::{Error, Result};
use crate::model::{Collection, ContentNode, Document, TableData};

use super::options::{ErrorMode, LoadOptions};

/// Loader for Docling-style JSON documents.
pub struct DocumentLoader {
    doc: Document,
    options: LoadOptions,
}

impl DocumentLoader {
    /// Open a JSON document file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, LoadOptions::default())
    }

    /// Open a JSON document file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading document from {}", path.display());
        let data = std::fs::read(path)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Load a document from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, LoadOptions::default())
    }

    /// Load a document from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: LoadOptions) -> Result<Self> {
        // Anything that is not a JSON object cannot be a document
        let first = data.iter().find(|b| !b.is_ascii_whitespace());
        if first != Some(&b'{') {
            return Err(Error::UnknownFormat);
        }

        let doc: Document = serde_json::from_slice(data)?;
        Ok(Self { doc, options })
    }

    /// Load a document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, LoadOptions::default())
    }

    /// Load a document from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: LoadOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Check the loaded tree and return the finished document.
    pub fn parse(self) -> Result<Document> {
        let mut doc = self.doc;

        check_references(&doc, self.options.error_mode)?;

        if self.options.normalize_text {
            normalize_text(&mut doc);
        }

        let orphans = doc.orphans();
        if !orphans.is_empty() {
            log::debug!(
                "{} item(s) have unresolved parents and will not be listed",
                orphans.len()
            );
        }

        log::debug!(
            "Loaded document '{}': {} texts, {} pictures, {} tables, {} groups",
            doc.name,
            doc.texts.len(),
            doc.pictures.len(),
            doc.tables.len(),
            doc.groups.len()
        );

        Ok(doc)
    }
}

/// Verify `self_ref` uniqueness and that every node sits in its own collection.
fn check_references(doc: &Document, mode: ErrorMode) -> Result<()> {
    let mut seen = HashSet::new();

    for node in doc.nodes() {
        let cref = node.self_ref();

        let expected = match node {
            ContentNode::Body(_) => Some(Collection::Body),
            ContentNode::Group(_) => None,
            ContentNode::Text(_) => Some(Collection::Texts),
            ContentNode::Picture(_) => Some(Collection::Pictures),
            ContentNode::Table(_) => Some(Collection::Tables),
        };
        let misplaced = match expected {
            Some(collection) => cref.collection != collection,
            None => !matches!(cref.collection, Collection::Groups | Collection::Furniture),
        };
        if misplaced {
            let message = format!("{} is stored outside its collection", cref);
            match mode {
                ErrorMode::Strict => return Err(Error::InvalidRef(message)),
                ErrorMode::Lenient => log::warn!("{}", message),
            }
        }

        if !seen.insert(cref) {
            match mode {
                ErrorMode::Strict => return Err(Error::DuplicateRef(cref.to_string())),
                ErrorMode::Lenient => log::warn!("Duplicate content reference {}", cref),
            }
        }
    }

    Ok(())
}

fn normalize_in_place(s: &mut String) {
    if !is_nfc(s) {
        let normalized: String = s.as_str().nfc().collect();
        *s = normalized;
    }
}

fn normalize_table(data: &mut TableData) {
    for cell in data.table_cells.iter_mut() {
        normalize_in_place(&mut cell.text);
    }
    for cell in data.grid.iter_mut().flatten().flatten() {
        normalize_in_place(&mut cell.text);
    }
}

/// Recompose decomposed text (common for Hangul extracted from PDFs).
fn normalize_text(doc: &mut Document) {
    for text in doc.texts.iter_mut() {
        normalize_in_place(&mut text.text);
        normalize_in_place(&mut text.orig);
    }
    for table in doc.tables.iter_mut() {
        normalize_table(&mut table.data);
    }
}
