//! Plain text rendering of the reading order.

use crate::error::Result;

use super::compose::{ListEntry, View};

/// Convert a view to plain text.
///
/// Texts become paragraphs, table rows become tab-separated lines and
/// pictures contribute only their nested entries.
pub fn to_text(view: &View) -> Result<String> {
    let mut output = String::new();
    for entry in &view.list {
        render_entry(&mut output, entry);
    }
    Ok(output.trim().to_string())
}

fn render_entry(output: &mut String, entry: &ListEntry) {
    match entry {
        ListEntry::Text(text) => {
            let content = text.text.trim();
            if !content.is_empty() {
                output.push_str(content);
                output.push_str("\n\n");
            }
        }
        ListEntry::Table(table) => {
            let rows = std::iter::once(&table.table.header).chain(&table.table.rows);
            for row in rows.filter(|r| !r.is_empty()) {
                let cells: Vec<&str> = row.iter().map(|c| c.text.trim()).collect();
                output.push_str(&cells.join("\t"));
                output.push('\n');
            }
            output.push('\n');
        }
        ListEntry::Group(_) | ListEntry::Picture(_) => {}
    }

    for child in entry.children() {
        render_entry(output, child);
    }
}
