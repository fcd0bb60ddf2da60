//! Integration tests for the visitor pattern.

use docpair::render::visitor::{
    CompositeVisitor, DefaultVisitor, SkipFurnitureVisitor, SkipPicturesVisitor, ViewVisitor,
    VisitorAction,
};
use docpair::render::{
    compose, GroupEntry, HtmlRenderer, MarkdownRenderer, OverlayItem, PictureEntry,
    RenderOptions, TableEntry, TextEntry, View,
};
use docpair::{load_bytes, TextLabel};

const REPORT: &str = include_str!("fixtures/report.json");

fn view() -> View {
    compose(&load_bytes(REPORT.as_bytes()).unwrap(), &RenderOptions::default())
}

/// Custom visitor that tracks visit counts.
#[derive(Default)]
struct CountingVisitor {
    groups: usize,
    texts: usize,
    pictures: usize,
    tables: usize,
    overlays: usize,
}

impl ViewVisitor for CountingVisitor {
    fn visit_group(&mut self, _group: &GroupEntry) -> VisitorAction {
        self.groups += 1;
        VisitorAction::Continue
    }

    fn visit_text(&mut self, _text: &TextEntry) -> VisitorAction {
        self.texts += 1;
        VisitorAction::Continue
    }

    fn visit_picture(&mut self, _picture: &PictureEntry) -> VisitorAction {
        self.pictures += 1;
        VisitorAction::Continue
    }

    fn visit_table(&mut self, _table: &TableEntry) -> VisitorAction {
        self.tables += 1;
        VisitorAction::Continue
    }

    fn visit_overlay_item(&mut self, _item: &OverlayItem) -> VisitorAction {
        self.overlays += 1;
        VisitorAction::Continue
    }
}

/// Replaces tables with a placeholder.
struct TablePlaceholder;

impl ViewVisitor for TablePlaceholder {
    fn visit_table(&mut self, table: &TableEntry) -> VisitorAction {
        VisitorAction::Replace(format!("[table {}]", table.id))
    }
}

/// Hides section headers.
struct SkipSectionHeaders;

impl ViewVisitor for SkipSectionHeaders {
    fn visit_text(&mut self, text: &TextEntry) -> VisitorAction {
        if text.label == TextLabel::SectionHeader {
            VisitorAction::Skip
        } else {
            VisitorAction::Continue
        }
    }
}

#[test]
fn test_visitor_action_helpers() {
    assert!(VisitorAction::Skip.should_skip());
    assert!(!VisitorAction::Continue.should_skip());

    let replace = VisitorAction::Replace("x".to_string());
    assert!(replace.is_replace());
    assert_eq!(replace.replacement(), Some("x"));
    assert_eq!(VisitorAction::Continue.replacement(), None);
}

#[test]
fn test_default_visitor_changes_nothing() {
    let view = view();
    let plain = MarkdownRenderer::new(RenderOptions::default())
        .render(&view)
        .unwrap();
    let visited = MarkdownRenderer::new(RenderOptions::default())
        .with_visitor(DefaultVisitor)
        .render(&view)
        .unwrap();
    assert_eq!(plain, visited);
}

#[test]
fn test_table_replacement_in_markdown() {
    let markdown = MarkdownRenderer::new(RenderOptions::default())
        .with_visitor(TablePlaceholder)
        .render(&view())
        .unwrap();
    assert!(markdown.contains("[table #/tables/0]"));
    assert!(!markdown.contains("| Region |"));
}

#[test]
fn test_skip_pictures_drops_captions() {
    let markdown = MarkdownRenderer::new(RenderOptions::default())
        .with_visitor(SkipPicturesVisitor)
        .render(&view())
        .unwrap();
    assert!(!markdown.contains("figures/sales.png"));
    assert!(!markdown.contains("Figure 1"));
    assert!(markdown.contains("# Annual Report"));
}

#[test]
fn test_skip_in_html_list_and_overlay() {
    let html = HtmlRenderer::new(RenderOptions::default())
        .with_visitor(SkipPicturesVisitor)
        .render(&view())
        .unwrap();
    assert!(!html.contains("id=\"item-pictures-0\""));
    assert!(!html.contains("id=\"item-texts-3\""));
    // The overlay is not a list entry and stays
    assert!(html.contains("id=\"overlay-texts-3\""));
}

#[test]
fn test_furniture_visitor_keeps_body_text() {
    let markdown = MarkdownRenderer::new(RenderOptions::default())
        .with_visitor(SkipFurnitureVisitor)
        .render(&view())
        .unwrap();
    assert!(markdown.contains("# Annual Report"));
    assert!(markdown.contains("## Details"));
}

#[test]
fn test_composite_visitor_first_action_wins() {
    let visitor = CompositeVisitor::new()
        .with_visitor(SkipSectionHeaders)
        .with_visitor(TablePlaceholder);

    let markdown = MarkdownRenderer::new(RenderOptions::default())
        .with_visitor(visitor)
        .render(&view())
        .unwrap();
    assert!(!markdown.contains("Details"));
    assert!(markdown.contains("[table #/tables/0]"));
    assert!(markdown.contains("Revenue grew"));
}

#[test]
fn test_counting_visitor_sees_every_entry() {
    let view = view();
    let mut counter = CountingVisitor::default();

    for entry in view.entries() {
        match entry {
            docpair::ListEntry::Group(g) => counter.visit_group(g),
            docpair::ListEntry::Text(t) => counter.visit_text(t),
            docpair::ListEntry::Picture(p) => counter.visit_picture(p),
            docpair::ListEntry::Table(t) => counter.visit_table(t),
        };
    }
    for item in &view.overlay.items {
        counter.visit_overlay_item(item);
    }

    assert_eq!(counter.groups, 1);
    assert_eq!(counter.texts, 5);
    assert_eq!(counter.pictures, 1);
    assert_eq!(counter.tables, 1);
    assert_eq!(counter.overlays, 3);
}
