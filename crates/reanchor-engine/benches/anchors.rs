use criterion::{Criterion, criterion_group, criterion_main};
use reanchor_engine::{AnchorOptions, Document, DomRange, TextTree, anchor, describe};
mod common;

fn bench_anchor_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("anchors");
    group.sample_size(10);

    let content = common::generate_markdown_content(100);
    let doc = Document::from_markdown(&content).unwrap();
    let options = AnchorOptions::default();
    let leaves = doc.leaf_segments(doc.root());
    let leaf = leaves[leaves.len() / 2];
    let range = DomRange::new(leaf, 0, leaf, doc.text_len(leaf));

    group.bench_function("describe", |b| {
        b.iter(|| describe(std::hint::black_box(&doc), doc.root(), &range, &options));
    });

    let selectors = describe(&doc, doc.root(), &range, &options);
    let quote_only: Vec<_> = selectors
        .iter()
        .filter(|s| s.kind() == "TextQuoteSelector")
        .cloned()
        .collect();

    group.bench_function("anchor_all_selectors", |b| {
        b.iter(|| anchor(std::hint::black_box(&doc), doc.root(), &selectors, &options));
    });
    group.bench_function("anchor_quote_only", |b| {
        b.iter(|| anchor(std::hint::black_box(&doc), doc.root(), &quote_only, &options));
    });

    group.finish();
}

criterion_group!(benches, bench_anchor_operations);
criterion_main!(benches);
