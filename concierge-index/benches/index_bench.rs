use criterion::{black_box, criterion_group, criterion_main, Criterion};

use concierge_index::IndexBuilder;

fn build_corpus(n: usize) -> concierge_index::InvertedIndex {
    let mut builder = IndexBuilder::with_default_stopwords(1.5, 0.75);
    for i in 0..n {
        builder.add_document(
            format!("doc-{i}"),
            "花园大床房 早餐 服务 态度 很好 干净 整洁 交通 便利",
        );
    }
    builder.build()
}

fn bench_search(c: &mut Criterion) {
    let index = build_corpus(10_000);
    c.bench_function("bm25_search_10k_docs", |b| {
        b.iter(|| black_box(index.search("早餐 服务", 150)))
    });
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("bm25_build_1k_docs", |b| b.iter(|| black_box(build_corpus(1_000))));
}

criterion_group!(benches, bench_search, bench_build);
criterion_main!(benches);
