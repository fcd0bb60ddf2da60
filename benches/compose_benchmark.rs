//! Benchmarks for docpair composition and rendering.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic documents with a section per page.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use docpair::model::{
    BoundingBox, CoordOrigin, Document, PageInfo, Provenance, TableCell, TableNode, TextLabel,
    TextNode,
};
use docpair::render::{self, RenderOptions, ViewCache};
use docpair::ChildOrder;

/// Creates a synthetic document with a heading, paragraphs and a merged
/// table under a group on every page.
fn create_test_document(page_count: u32) -> Document {
    let mut doc = Document::new();
    doc.name = "benchmark".to_string();

    for page_no in 1..=page_count {
        doc.add_page(PageInfo::a4(page_no));
        let section = doc.add_group(docpair::ContentRef::BODY, format!("page-{}", page_no));

        doc.add_text(section, |r| {
            TextNode::new(r, section, format!("Section {}", page_no))
                .with_label(TextLabel::SectionHeader)
                .with_prov(prov(page_no, 40.0))
        });

        for i in 0..20 {
            let top = 80.0 + i as f64 * 30.0;
            doc.add_text(section, |r| {
                TextNode::new(
                    r,
                    section,
                    "Paragraph text for docpair performance measurement.",
                )
                .with_prov(prov(page_no, top))
            });
        }

        doc.add_table(section, |r| {
            let mut grid = vec![vec![
                Some(TableCell::text("Key").as_column_header()),
                Some(TableCell::text("Value").colspan(2).as_column_header()),
                Some(TableCell::text("Value").colspan(2).as_column_header()),
            ]];
            for row in 0..10 {
                grid.push(vec![
                    Some(TableCell::text(format!("k{}", row / 2)).rowspan(2)),
                    Some(TableCell::text("a")),
                    Some(TableCell::text("b")),
                ]);
            }
            TableNode::new(r, section, grid)
        });
    }

    doc
}

fn prov(page_no: u32, top: f64) -> Provenance {
    Provenance {
        page_no,
        bbox: Some(BoundingBox::new(
            50.0,
            top,
            545.0,
            top + 20.0,
            CoordOrigin::TopLeft,
        )),
        charspan: None,
    }
}

/// Benchmark document loading.
fn bench_loading(c: &mut Criterion) {
    let data = serde_json::to_vec(&create_test_document(10)).unwrap();
    let not_json = b"Not a document at all, just random text content";

    c.bench_function("detect_document", |b| {
        b.iter(|| docpair::detect_format_from_bytes(black_box(&data)).unwrap());
    });

    c.bench_function("detect_non_document", |b| {
        b.iter(|| docpair::detect_format_from_bytes(black_box(not_json)).is_err());
    });

    c.bench_function("load_10_pages", |b| {
        b.iter(|| docpair::load_bytes(black_box(&data)).unwrap());
    });
}

/// Benchmark composition at various sizes.
fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");

    for page_count in [1, 10, 50].iter() {
        let doc = create_test_document(*page_count);

        for order in [ChildOrder::Grouped, ChildOrder::Document] {
            let options = RenderOptions::new().with_child_order(order);
            group.bench_function(format!("{}_pages_{:?}", page_count, order), |b| {
                b.iter(|| render::compose(black_box(&doc), &options));
            });
        }
    }

    group.finish();
}

/// Benchmark the cached path against a fresh composition.
fn bench_cache(c: &mut Criterion) {
    let doc = create_test_document(10);
    let options = RenderOptions::default();
    let mut cache = ViewCache::new();

    c.bench_function("view_cache_hit", |b| {
        b.iter(|| cache.get_or_compose(black_box(&doc), &options));
    });
}

/// Benchmark rendering of a composed view.
fn bench_render(c: &mut Criterion) {
    let doc = create_test_document(10);
    let options = RenderOptions::default();
    let view = render::compose(&doc, &options);

    c.bench_function("render_html", |b| {
        b.iter(|| render::to_html(black_box(&view), &options).unwrap());
    });

    c.bench_function("render_markdown", |b| {
        b.iter(|| render::to_markdown(black_box(&view), &options).unwrap());
    });
}

criterion_group!(benches, bench_loading, bench_compose, bench_cache, bench_render);
criterion_main!(benches);
