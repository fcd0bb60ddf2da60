//! Markdown rendering of the reading order.

use crate::error::Result;
use crate::layout::ResolvedTable;
use crate::model::TextLabel;

use super::compose::{ListEntry, PictureEntry, TextEntry, View};
use super::html::escape_html;
use super::visitor::{ViewVisitor, VisitorAction};
use super::{RenderOptions, RenderResult, TableFallback};

/// Convert a view to Markdown.
pub fn to_markdown(view: &View, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(view)
}

/// Convert a view to Markdown with statistics.
pub fn to_markdown_with_stats(view: &View, options: &RenderOptions) -> Result<RenderResult> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render_with_stats(view)
}

/// Heading level for a text entry, or `None` if it is not a heading.
///
/// Titles are level 1; section headers sit one below their declared level.
pub(crate) fn heading_level(label: TextLabel, level: Option<u8>, max: u8) -> Option<u8> {
    let level = match label {
        TextLabel::Title => 1,
        TextLabel::SectionHeader => level.unwrap_or(1).saturating_add(1),
        _ => return None,
    };
    Some(level.clamp(1, max.clamp(1, 6)))
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
    visitor: Option<Box<dyn ViewVisitor>>,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            visitor: None,
        }
    }

    /// Customise rendering with a visitor.
    pub fn with_visitor<V: ViewVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitor = Some(Box::new(visitor));
        self
    }

    /// Render a view to Markdown.
    pub fn render(mut self, view: &View) -> Result<String> {
        let mut output = String::new();
        for entry in &view.list {
            self.render_entry(&mut output, entry, 0);
        }
        Ok(output.trim().to_string())
    }

    /// Render a view to Markdown with statistics.
    pub fn render_with_stats(self, view: &View) -> Result<RenderResult> {
        let content = self.render(view)?;
        Ok(RenderResult::new(content, view.title.clone(), view.stats.clone()))
    }

    fn render_entry(&mut self, output: &mut String, entry: &ListEntry, depth: usize) {
        match self.visit_entry(entry) {
            VisitorAction::Skip => return,
            VisitorAction::Replace(content) => {
                output.push_str(&content);
                if !content.ends_with('\n') {
                    output.push_str("\n\n");
                }
                return;
            }
            VisitorAction::Continue => {}
        }

        match entry {
            ListEntry::Group(group) => {
                let nested = if group.label == "list" || group.label == "ordered_list" {
                    depth + 1
                } else {
                    depth
                };
                self.render_children(output, &group.children, nested);
                if !output.ends_with("\n\n") && !output.is_empty() {
                    output.push('\n');
                }
            }
            ListEntry::Text(text) => {
                self.render_text(output, text, depth);
                self.render_children(output, &text.children, depth + 1);
            }
            ListEntry::Picture(picture) => {
                self.render_picture(output, picture);
                self.render_children(output, &picture.children, depth);
            }
            ListEntry::Table(table) => {
                self.render_table(output, &table.table);
                self.render_children(output, &table.children, depth);
            }
        }
    }

    fn render_children(&mut self, output: &mut String, children: &[ListEntry], depth: usize) {
        for child in children {
            self.render_entry(output, child, depth);
        }
    }

    fn render_text(&self, output: &mut String, text: &TextEntry, depth: usize) {
        if text.text.trim().is_empty() {
            return;
        }
        let content = self.escape(text.text.trim());

        if let Some(level) = heading_level(text.label, text.level, self.options.max_heading_level)
        {
            output.push_str(&"#".repeat(level as usize));
            output.push(' ');
            output.push_str(&content);
            output.push_str("\n\n");
            return;
        }

        match text.label {
            TextLabel::ListItem => {
                let indent = "  ".repeat(depth.saturating_sub(1));
                output.push_str(&indent);
                output.push(self.options.list_marker);
                output.push(' ');
                output.push_str(&strip_bullet(&content));
                output.push('\n');
            }
            TextLabel::Caption => {
                output.push_str(&format!("*{}*\n\n", content));
            }
            TextLabel::Code => {
                output.push_str(&format!("```\n{}\n```\n\n", text.text.trim()));
            }
            TextLabel::Formula => {
                output.push_str(&format!("$${}$$\n\n", text.text.trim()));
            }
            _ => {
                output.push_str(&content);
                output.push_str("\n\n");
            }
        }
    }

    fn render_picture(&self, output: &mut String, picture: &PictureEntry) {
        if let Some(ref uri) = picture.uri {
            output.push_str(&format!("![{}]({})\n\n", picture.label, uri));
        }
    }

    fn render_table(&self, output: &mut String, table: &ResolvedTable) {
        if table.is_empty() {
            return;
        }

        // Use HTML for complex tables
        if table.has_merged_cells() && self.options.table_fallback == TableFallback::Html {
            render_table_html(output, table);
            return;
        }

        self.render_table_markdown(output, table);
    }

    fn render_table_markdown(&self, output: &mut String, table: &ResolvedTable) {
        let col_count = table.column_count();
        if col_count == 0 {
            return;
        }

        let header = spread_row(&table.header, col_count);
        output.push('|');
        for cell in &header {
            output.push_str(&format!(" {} |", self.cell_text(cell)));
        }
        output.push('\n');
        output.push('|');
        for _ in 0..col_count {
            output.push_str(" --- |");
        }
        output.push('\n');

        for row in &table.rows {
            if row.is_empty() {
                continue;
            }
            output.push('|');
            for cell in &spread_row(row, col_count) {
                output.push_str(&format!(" {} |", self.cell_text(cell)));
            }
            output.push('\n');
        }

        output.push('\n');
    }

    fn cell_text(&self, text: &str) -> String {
        self.escape(text.replace('\n', " ").trim())
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }

    fn visit_entry(&mut self, entry: &ListEntry) -> VisitorAction {
        let Some(visitor) = self.visitor.as_mut() else {
            return VisitorAction::Continue;
        };
        match entry {
            ListEntry::Group(e) => visitor.visit_group(e),
            ListEntry::Text(e) => visitor.visit_text(e),
            ListEntry::Picture(e) => visitor.visit_picture(e),
            ListEntry::Table(e) => visitor.visit_table(e),
        }
    }
}

/// Lay resolved cells out over `col_count` columns; spans leave empty cells.
fn spread_row(cells: &[crate::layout::ResolvedCell], col_count: usize) -> Vec<String> {
    let mut row = vec![String::new(); col_count];
    for cell in cells {
        if let Some(slot) = row.get_mut(cell.col) {
            *slot = cell.text.clone();
        }
    }
    row
}

fn render_table_html(output: &mut String, table: &ResolvedTable) {
    output.push_str("<table>\n");

    if !table.header.is_empty() {
        output.push_str("<thead>\n<tr>");
        for cell in &table.header {
            output.push_str(&format!("<th{}>{}</th>", span_attrs(cell), escape_html(&cell.text)));
        }
        output.push_str("</tr>\n</thead>\n");
    }

    output.push_str("<tbody>\n");
    for row in &table.rows {
        output.push_str("<tr>");
        for cell in row {
            output.push_str(&format!("<td{}>{}</td>", span_attrs(cell), escape_html(&cell.text)));
        }
        output.push_str("</tr>\n");
    }
    output.push_str("</tbody>\n</table>\n\n");
}

fn span_attrs(cell: &crate::layout::ResolvedCell) -> String {
    let mut attrs = String::new();
    if cell.row_span > 1 {
        attrs.push_str(&format!(" rowspan=\"{}\"", cell.row_span));
    }
    if cell.col_span > 1 {
        attrs.push_str(&format!(" colspan=\"{}\"", cell.col_span));
    }
    attrs
}

/// Drop a bullet the producer left in list item text.
fn strip_bullet(text: &str) -> String {
    let trimmed = text.trim_start();
    for bullet in ["•", "·", "▪", "-", "\\*"] {
        if let Some(rest) = trimmed.strip_prefix(bullet) {
            if rest.starts_with(char::is_whitespace) {
                return rest.trim_start().to_string();
            }
        }
    }
    trimmed.to_string()
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            // Core formatting that must be escaped
            '\\' | '`' | '*' | '_' |
            // Brackets for links/images, pipe for tables
            '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentRef, Document, ImageRef, PictureNode, TableCell, TableNode, TextNode};
    use crate::render::compose;
    use crate::render::visitor::SkipPicturesVisitor;

    fn markdown(doc: &Document, options: &RenderOptions) -> String {
        to_markdown(&compose(doc, options), options).unwrap()
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("Hello *world*"), "Hello \\*world\\*");
        assert_eq!(escape_markdown("[link]"), "\\[link\\]");
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level(TextLabel::Title, None, 6), Some(1));
        assert_eq!(heading_level(TextLabel::SectionHeader, Some(1), 6), Some(2));
        assert_eq!(heading_level(TextLabel::SectionHeader, Some(7), 3), Some(3));
        assert_eq!(heading_level(TextLabel::Text, None, 6), None);
    }

    #[test]
    fn test_render_headings_and_paragraphs() {
        let body = ContentRef::BODY;
        let mut doc = Document::new();
        doc.add_text(body, |r| TextNode::new(r, body, "Report").with_label(TextLabel::Title));
        doc.add_text(body, |r| {
            let mut t = TextNode::new(r, body, "Scope").with_label(TextLabel::SectionHeader);
            t.level = Some(1);
            t
        });
        doc.add_text(body, |r| TextNode::new(r, body, "Hello, world!"));

        let md = markdown(&doc, &RenderOptions::default());
        assert_eq!(md, "# Report\n\n## Scope\n\nHello, world!");
    }

    #[test]
    fn test_render_list_group() {
        let body = ContentRef::BODY;
        let mut doc = Document::new();
        let list = doc.add_group(body, "list");
        doc.groups[0].label = "list".to_string();
        doc.add_text(list, |r| TextNode::new(r, list, "• first").with_label(TextLabel::ListItem));
        doc.add_text(list, |r| TextNode::new(r, list, "second").with_label(TextLabel::ListItem));

        let md = markdown(&doc, &RenderOptions::default());
        assert_eq!(md, "- first\n- second");
    }

    #[test]
    fn test_render_picture_with_caption() {
        let body = ContentRef::BODY;
        let mut doc = Document::new();
        let pic = doc.add_picture(body, |r| {
            PictureNode::new(r, body).with_image(ImageRef::new("fig.png"))
        });
        doc.add_text(pic, |r| TextNode::new(r, pic, "Figure 1").with_label(TextLabel::Caption));

        let options = RenderOptions::default();
        let md = markdown(&doc, &options);
        assert_eq!(md, "![picture](fig.png)\n\n*Figure 1*");

        let view = compose(&doc, &options);
        let skipped = MarkdownRenderer::new(options)
            .with_visitor(SkipPicturesVisitor)
            .render(&view)
            .unwrap();
        assert!(skipped.is_empty());
    }

    fn merged_table_doc() -> Document {
        let body = ContentRef::BODY;
        let mut doc = Document::new();
        doc.add_table(body, |r| {
            TableNode::new(
                r,
                body,
                vec![
                    vec![Some(TableCell::text("A")), Some(TableCell::text("B"))],
                    vec![
                        Some(TableCell::text("x").colspan(2)),
                        Some(TableCell::text("x").colspan(2)),
                    ],
                    vec![Some(TableCell::text("1")), Some(TableCell::text("2"))],
                ],
            )
        });
        doc
    }

    #[test]
    fn test_render_table_markdown() {
        let md = markdown(&merged_table_doc(), &RenderOptions::default());
        assert_eq!(md, "| A | B |\n| --- | --- |\n| x |  |\n| 1 | 2 |");
    }

    #[test]
    fn test_render_table_html_fallback() {
        let options = RenderOptions::new().with_table_fallback(TableFallback::Html);
        let md = markdown(&merged_table_doc(), &options);
        assert!(md.starts_with("<table>"));
        assert!(md.contains("<td colspan=\"2\">x</td>"));
    }

    #[test]
    fn test_render_with_stats() {
        let doc = merged_table_doc();
        let options = RenderOptions::default();
        let result = to_markdown_with_stats(&compose(&doc, &options), &options).unwrap();
        assert_eq!(result.stats.table_count, 1);
        assert!(result.content_len() > 0);
    }
}
