//! Relocation and pairing rules applied after loading.
//!
//! A relocation displays a node under another node than its producer-assigned
//! parent (e.g. a caption text clustered into its picture). A pairing makes
//! hover and activation on one node drive another node's highlight.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{ContentRef, Document};

/// Display `node` under `into`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocationRule {
    /// Node to move
    pub node: ContentRef,
    /// New parent
    pub into: ContentRef,
}

/// Let `id` act on behalf of `partner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingRule {
    /// Node receiving the interaction
    pub id: ContentRef,
    /// Node whose highlight it drives
    pub partner: ContentRef,
}

/// A set of relocation and pairing rules.
///
/// # Example
/// ```
/// use docpair::layout::ViewRules;
///
/// let rules = ViewRules::from_json(
///     r##"{"relocations": [{"node": "#/texts/3", "into": "#/pictures/0"}]}"##,
/// ).unwrap();
/// assert_eq!(rules.relocations.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRules {
    /// Relocations, applied in order
    #[serde(default)]
    pub relocations: Vec<RelocationRule>,

    /// Pairing overrides
    #[serde(default)]
    pub pairings: Vec<PairingRule>,
}

impl ViewRules {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relocation and return self.
    pub fn with_relocation(mut self, node: ContentRef, into: ContentRef) -> Self {
        self.relocations.push(RelocationRule { node, into });
        self
    }

    /// Add a pairing and return self.
    pub fn with_pairing(mut self, id: ContentRef, partner: ContentRef) -> Self {
        self.pairings.push(PairingRule { id, partner });
        self
    }

    /// Parse rules from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidRules(e.to_string()))
    }

    /// Read rules from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Whether there are no rules.
    pub fn is_empty(&self) -> bool {
        self.relocations.is_empty() && self.pairings.is_empty()
    }

    /// Produce a new document with every rule applied.
    ///
    /// Relocations declared on the nodes themselves (`visual_group`) run
    /// first, then the explicit ones. Rules naming missing nodes or creating
    /// a cycle are skipped with a warning.
    pub fn apply(&self, doc: &Document) -> Document {
        let mut out = doc.clone();

        let declared: Vec<RelocationRule> = doc
            .nodes()
            .filter_map(|n| {
                n.header().visual_group.map(|g| RelocationRule {
                    node: n.self_ref(),
                    into: g.cref,
                })
            })
            .collect();

        let mut moved = 0;
        for rule in declared.iter().chain(&self.relocations) {
            if relocate(&mut out, rule) {
                moved += 1;
            }
        }

        let mut paired = 0;
        for rule in &self.pairings {
            if !out.contains(&rule.id) || !out.contains(&rule.partner) {
                log::warn!(
                    "Skipping pairing {} -> {}: node not found",
                    rule.id,
                    rule.partner
                );
                continue;
            }
            if let Some(header) = out.header_mut(&rule.id) {
                header.partner = Some(rule.partner.into());
                paired += 1;
            }
        }

        if moved > 0 || paired > 0 {
            log::debug!("Applied {} relocation(s) and {} pairing(s)", moved, paired);
        }

        out
    }
}

/// Whether `ancestor` appears on the parent chain of `node` (or is `node`).
fn is_ancestor(doc: &Document, ancestor: &ContentRef, node: &ContentRef) -> bool {
    let mut visited = HashSet::new();
    let mut current = Some(*node);

    while let Some(cref) = current {
        if cref == *ancestor {
            return true;
        }
        if !visited.insert(cref) {
            return false;
        }
        current = doc.node(&cref).and_then(|n| n.parent_ref());
    }

    false
}

fn relocate(doc: &mut Document, rule: &RelocationRule) -> bool {
    if rule.node.collection.is_root() {
        log::warn!("Skipping relocation of root {}", rule.node);
        return false;
    }
    if !doc.contains(&rule.node) || !doc.contains(&rule.into) {
        log::warn!(
            "Skipping relocation {} -> {}: node not found",
            rule.node,
            rule.into
        );
        return false;
    }
    if is_ancestor(doc, &rule.node, &rule.into) {
        log::warn!(
            "Skipping relocation {} -> {}: would create a cycle",
            rule.node,
            rule.into
        );
        return false;
    }

    let old_parent = doc.node(&rule.node).and_then(|n| n.parent_ref());
    if old_parent != Some(rule.into) {
        if let Some(parent) = old_parent {
            if let Some(header) = doc.header_mut(&parent) {
                header.children.retain(|c| c.cref != rule.node);
            }
        }
        if let Some(header) = doc.header_mut(&rule.into) {
            header.children.push(rule.node.into());
        }
    }

    if let Some(header) = doc.header_mut(&rule.node) {
        header.parent = Some(rule.into.into());
        header.visual_group = None;
    }

    true
}
