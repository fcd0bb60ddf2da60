//! Self-contained two-pane HTML viewer.
//!
//! The left pane stacks invisible buttons over the page image, the right
//! pane lists the reading order. A small inline script does what
//! [`SelectionCoordinator`](crate::interact::SelectionCoordinator) does:
//! hover highlights both panes (through the pairing map), leave clears only
//! its own selection, click scrolls the other pane.

use crate::error::{Error, Result};
use crate::layout::{OverlayRect, ResolvedCell, ResolvedTable, VerticalAnchor};

use super::compose::{ListEntry, OverlayItem, OverlayPane, View};
use super::markdown::heading_level;
use super::visitor::{ViewVisitor, VisitorAction};
use super::RenderOptions;

const STYLE: &str = r##"* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; }
.viewer { display: flex; }
.page-pane { position: relative; width: 50%; height: 100vh; overflow: auto; background: #f4f4f4; }
.page-surface { position: relative; margin: 0 auto; background: #fff; }
.page-image { display: block; width: 100%; height: 100%; }
.interaction-nav-btn { position: absolute; padding: 0; border: 0; background: transparent; cursor: pointer; }
.interaction-nav-btn.active { background: rgba(255, 213, 0, 0.35); outline: 2px solid #f5b400; }
.list-pane { display: flex; flex-direction: column; gap: 0.5rem; width: 50%; height: 100vh; overflow-y: scroll; padding: 1rem 1.5rem; }
.list-group, .list-children { display: flex; flex-direction: column; gap: 0.5rem; }
.interaction-item { display: block; width: 100%; margin: 0; padding: 0.25rem; border: 1px solid transparent; background: none; font: inherit; text-align: left; cursor: pointer; }
.interaction-item.active { background: #fff6cc; border-color: #f5b400; }
.interaction-item img { max-width: 100%; }
.label-title { font-size: 1.6rem; font-weight: 700; }
.label-section_header { font-size: 1.2rem; font-weight: 700; }
.label-caption, .label-footnote { font-size: 0.85rem; color: #555; }
table.interaction-item { border-collapse: collapse; }
th, td { border: 1px solid #ccc; padding: 0.25rem 0.5rem; }
.column-header { text-align: center; }
.row-header { font-weight: 600; }
tbody tr { text-align: right; }
"##;

const SCRIPT: &str = r##"(function () {
  var selected = null;
  function resolve(ref) { return PAIRINGS[ref] || ref; }
  function elements(ref) {
    return document.querySelectorAll('[data-pane][data-ref="' + CSS.escape(ref) + '"]');
  }
  function paint(ref, on) {
    if (ref === null) return;
    elements(ref).forEach(function (el) { el.classList.toggle('active', on); });
  }
  document.querySelectorAll('[data-pane]').forEach(function (el) {
    var ref = el.getAttribute('data-ref');
    el.addEventListener('mouseenter', function () {
      paint(selected, false);
      selected = resolve(ref);
      paint(selected, true);
    });
    el.addEventListener('mouseleave', function () {
      if (selected === resolve(ref)) {
        paint(selected, false);
        selected = null;
      }
    });
    el.addEventListener('click', function () {
      var other = el.getAttribute('data-pane') === 'overlay' ? 'list' : 'overlay';
      var target = document.querySelector(
        '[data-pane="' + other + '"][data-ref="' + CSS.escape(resolve(ref)) + '"]');
      if (target) target.scrollIntoView({ behavior: 'smooth', block: 'center' });
    });
  });
})();
"##;

/// Render a view as a standalone HTML page.
pub fn to_html(view: &View, options: &RenderOptions) -> Result<String> {
    HtmlRenderer::new(options.clone()).render(view)
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
    visitor: Option<Box<dyn ViewVisitor>>,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
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

    /// Render a view to HTML.
    pub fn render(mut self, view: &View) -> Result<String> {
        let pairings = serde_json::to_string(&view.pairings)
            .map_err(|e| Error::Render(format!("pairing map serialization error: {}", e)))?;

        let mut output = String::with_capacity(8 * 1024);
        output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        output.push_str(&format!("<title>{}</title>\n", escape_html(&view.title)));
        output.push_str("<style>\n");
        output.push_str(STYLE);
        output.push_str("</style>\n</head>\n<body>\n<main class=\"viewer\">\n");

        self.render_overlay(&mut output, &view.overlay);

        output.push_str("<section class=\"list-pane\">\n");
        for entry in &view.list {
            self.render_entry(&mut output, entry);
        }
        output.push_str("</section>\n</main>\n<script>\n");
        output.push_str(&format!("const PAIRINGS = {};\n", escape_script(&pairings)));
        output.push_str(SCRIPT);
        output.push_str("</script>\n</body>\n</html>\n");

        Ok(output)
    }

    fn render_overlay(&mut self, output: &mut String, pane: &OverlayPane) {
        output.push_str("<section class=\"page-pane\">\n");

        let mut size = String::new();
        if let Some(width) = pane.width {
            size.push_str(&format!("width:{};", px(width)));
        }
        if let Some(height) = pane.height {
            size.push_str(&format!("height:{};", px(height)));
        }
        output.push_str(&format!(
            "<div class=\"page-surface\" data-page=\"{}\" style=\"{}\">\n",
            pane.page_no, size
        ));

        if let Some(ref image) = pane.image {
            output.push_str(&format!(
                "<img class=\"page-image\" src=\"{}\" alt=\"Page {}\">\n",
                escape_html(image),
                pane.page_no
            ));
        }

        for item in &pane.items {
            match self.visit_overlay_item(item) {
                VisitorAction::Skip => continue,
                VisitorAction::Replace(content) => {
                    output.push_str(&content);
                    output.push('\n');
                }
                VisitorAction::Continue => self.render_overlay_item(output, item),
            }
        }

        output.push_str("</div>\n</section>\n");
    }

    fn render_overlay_item(&self, output: &mut String, item: &OverlayItem) {
        output.push_str(&format!(
            "<button type=\"button\" id=\"{}\" class=\"interaction-nav-btn label-{}\" data-ref=\"{}\" data-pane=\"overlay\" style=\"{}\" title=\"{}\"></button>\n",
            item.element_id(),
            item.label.as_str(),
            item.id,
            rect_style(&item.rect),
            escape_html(&item.text)
        ));
    }

    fn render_entry(&mut self, output: &mut String, entry: &ListEntry) {
        match self.visit_entry(entry) {
            VisitorAction::Skip => return,
            VisitorAction::Replace(content) => {
                output.push_str(&content);
                output.push('\n');
                return;
            }
            VisitorAction::Continue => {}
        }

        let attrs = format!(
            "id=\"{}\" data-ref=\"{}\" data-pane=\"list\"",
            entry.element_id(),
            entry.id()
        );

        match entry {
            ListEntry::Group(group) => {
                output.push_str(&format!(
                    "<div id=\"{}\" class=\"list-group\" data-ref=\"{}\">\n",
                    entry.element_id(),
                    group.id
                ));
                self.render_children(output, &group.children, false);
                output.push_str("</div>\n");
            }
            ListEntry::Text(text) => {
                let heading = heading_level(text.label, text.level, self.options.max_heading_level)
                    .map(|level| format!(" role=\"heading\" aria-level=\"{}\"", level))
                    .unwrap_or_default();
                output.push_str(&format!(
                    "<button type=\"button\" {} class=\"interaction-item label-{}\"{}>{}</button>\n",
                    attrs,
                    text.label.as_str(),
                    heading,
                    escape_html(&text.text)
                ));
                self.render_children(output, &text.children, true);
            }
            ListEntry::Picture(picture) => {
                output.push_str(&format!("<figure {} class=\"interaction-item\">\n", attrs));
                if let Some(ref uri) = picture.uri {
                    output.push_str(&format!("<img src=\"{}\" alt=\"\">\n", escape_html(uri)));
                }
                self.render_children(output, &picture.children, false);
                output.push_str("</figure>\n");
            }
            ListEntry::Table(table) => {
                render_table(output, &attrs, &table.table);
                self.render_children(output, &table.children, true);
            }
        }
    }

    fn render_children(&mut self, output: &mut String, children: &[ListEntry], wrap: bool) {
        if children.is_empty() {
            return;
        }
        if wrap {
            output.push_str("<div class=\"list-children\">\n");
        }
        for child in children {
            self.render_entry(output, child);
        }
        if wrap {
            output.push_str("</div>\n");
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

    fn visit_overlay_item(&mut self, item: &OverlayItem) -> VisitorAction {
        match self.visitor.as_mut() {
            Some(visitor) => visitor.visit_overlay_item(item),
            None => VisitorAction::Continue,
        }
    }
}

fn render_table(output: &mut String, attrs: &str, table: &ResolvedTable) {
    output.push_str(&format!("<table {} class=\"interaction-item\">\n", attrs));

    if !table.header.is_empty() {
        output.push_str("<thead>\n<tr>");
        for cell in &table.header {
            render_cell(output, cell, "th");
        }
        output.push_str("</tr>\n</thead>\n");
    }

    output.push_str("<tbody>\n");
    for row in &table.rows {
        output.push_str("<tr>");
        for cell in row {
            let tag = if cell.row_header { "th" } else { "td" };
            render_cell(output, cell, tag);
        }
        output.push_str("</tr>\n");
    }
    output.push_str("</tbody>\n</table>\n");
}

fn render_cell(output: &mut String, cell: &ResolvedCell, tag: &str) {
    let mut attrs = String::new();
    if cell.row_span > 1 {
        attrs.push_str(&format!(" rowspan=\"{}\"", cell.row_span));
    }
    if cell.col_span > 1 {
        attrs.push_str(&format!(" colspan=\"{}\"", cell.col_span));
    }
    if cell.column_header {
        attrs.push_str(" class=\"column-header\"");
    } else if cell.row_header {
        attrs.push_str(" class=\"row-header\"");
    }

    output.push_str(&format!("<{}{}>{}</{}>", tag, attrs, escape_html(&cell.text), tag));
}

/// Inline CSS placing an overlay rectangle.
fn rect_style(rect: &OverlayRect) -> String {
    let edge = match rect.anchor {
        VerticalAnchor::Top => "top",
        VerticalAnchor::Bottom => "bottom",
    };
    format!(
        "left:{};{}:{};width:{};height:{}",
        px(rect.x),
        edge,
        px(rect.y),
        px(rect.width),
        px(rect.height)
    )
}

fn px(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{}px", trimmed)
}

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Keep embedded JSON from closing the script element.
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BoundingBox, ContentRef, CoordOrigin, Document, PageInfo, PictureNode, Provenance,
        TableCell, TableNode, TextLabel, TextNode,
    };
    use crate::render::compose;
    use crate::render::visitor::SkipFurnitureVisitor;

    fn located(bbox: BoundingBox) -> Provenance {
        Provenance {
            page_no: 1,
            bbox: Some(bbox),
            charspan: None,
        }
    }

    fn sample() -> Document {
        let body = ContentRef::BODY;
        let mut doc = Document::new();
        doc.name = "Quarterly <Report>".to_string();
        doc.add_page(PageInfo::new(1, 600.0, 800.0));
        doc.add_text(body, |r| {
            TextNode::new(r, body, "Heading")
                .with_label(TextLabel::SectionHeader)
                .with_prov(located(BoundingBox::new(10.0, 20.0, 110.0, 60.0, CoordOrigin::TopLeft)))
        });
        doc.add_text(body, |r| {
            TextNode::new(r, body, "Page 1 of 3")
                .with_label(TextLabel::PageFooter)
                .with_prov(located(BoundingBox::new(10.0, 40.0, 110.0, 20.0, CoordOrigin::BottomLeft)))
        });
        doc.add_picture(body, |r| PictureNode::new(r, body));
        doc.add_table(body, |r| {
            TableNode::new(
                r,
                body,
                vec![
                    vec![
                        Some(TableCell::text("Region").as_column_header()),
                        Some(TableCell::text("Sales").as_column_header()),
                    ],
                    vec![
                        Some(TableCell::text("North").rowspan(2).as_row_header()),
                        Some(TableCell::text("1 < 2")),
                    ],
                    vec![Some(TableCell::placeholder()), Some(TableCell::text("7"))],
                ],
            )
        });
        doc.pictures[0].header.partner = Some(ContentRef::text(0).into());
        doc
    }

    fn render(doc: &Document) -> String {
        let options = RenderOptions::default();
        to_html(&compose(doc, &options), &options).unwrap()
    }

    #[test]
    fn test_overlay_positions() {
        let html = render(&sample());
        assert!(html.contains("id=\"overlay-texts-0\""));
        assert!(html.contains("style=\"left:10px;top:20px;width:100px;height:40px\""));
        assert!(html.contains("style=\"left:10px;bottom:20px;width:100px;height:20px\""));
        assert!(html.contains("style=\"width:600px;height:800px;\""));
    }

    #[test]
    fn test_list_items() {
        let html = render(&sample());
        assert!(html.contains("id=\"item-texts-0\" data-ref=\"#/texts/0\" data-pane=\"list\""));
        assert!(html.contains("role=\"heading\" aria-level=\"2\""));
        assert!(html.contains("<figure id=\"item-pictures-0\""));
        assert!(html.contains("<table id=\"item-tables-0\""));
    }

    #[test]
    fn test_table_spans_and_headers() {
        let html = render(&sample());
        assert!(html.contains("<th class=\"column-header\">Region</th>"));
        assert!(html.contains("<th rowspan=\"2\" class=\"row-header\">North</th>"));
        assert!(html.contains("<td>1 &lt; 2</td>"));
        assert!(html.contains("<tr><td>7</td></tr>"));
    }

    #[test]
    fn test_escapes_title() {
        let html = render(&sample());
        assert!(html.contains("<title>Quarterly &lt;Report&gt;</title>"));
    }

    #[test]
    fn test_pairings_embedded() {
        let html = render(&sample());
        assert!(html.contains(r##"const PAIRINGS = {"#/pictures/0":"#/texts/0"};"##));
        assert!(html.contains("scrollIntoView({ behavior: 'smooth', block: 'center' })"));
    }

    #[test]
    fn test_visitor_skips_furniture() {
        let options = RenderOptions::default();
        let view = compose(&sample(), &options);
        let html = HtmlRenderer::new(options)
            .with_visitor(SkipFurnitureVisitor)
            .render(&view)
            .unwrap();
        assert!(!html.contains("overlay-texts-1"));
        assert!(!html.contains("item-texts-1"));
        assert!(html.contains("overlay-texts-0"));
    }

    #[test]
    fn test_px_formatting() {
        assert_eq!(px(10.0), "10px");
        assert_eq!(px(100.0), "100px");
        assert_eq!(px(20.5), "20.5px");
        assert_eq!(px(1.239), "1.24px");
    }

    #[test]
    fn test_escape_script() {
        assert_eq!(escape_script(r#"{"a":"</script>"}"#), r#"{"a":"<\/script>"}"#);
    }
}
