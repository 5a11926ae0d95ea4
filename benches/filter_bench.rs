//! Publication filter throughput.

#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, Criterion, black_box};
use folio::host::memory::MemoryHost;
use folio::host::Host;
use folio::publications::{
    matches_search, PublicationsFilterManager, CARD_CLASS, SEARCH_CLASS,
};

fn match_benchmark(c: &mut Criterion) {
    let fields = [
        "Sparse Attention for Long-Context Retrieval",
        "We study attention patterns that scale sub-quadratically.",
        "A. Lovelace, G. Hopper, A. Turing",
    ];
    c.bench_function("matches_search_author_hit", |b| {
        b.iter(|| black_box(matches_search(black_box("turing"), &fields)))
    });
    c.bench_function("matches_search_miss", |b| {
        b.iter(|| black_box(matches_search(black_box("kernel"), &fields)))
    });
}

fn page_search_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("publication_search");

    for count in [10, 50, 200].iter() {
        let host = MemoryHost::shared();
        let body = host.body().unwrap_or_else(|| host.document_element());
        let _input = host.insert_with_classes(body, "input", &[SEARCH_CLASS]);
        for i in 0..*count {
            let card = host.insert_with_classes(body, "article", &[CARD_CLASS]);
            for (class, text) in [
                ("publication__title", format!("Paper {i} on graph learning")),
                (
                    "publication__abstract",
                    "An abstract of moderate length.".to_owned(),
                ),
                (
                    "publication__authors",
                    format!("Author {i}, Coauthor {}", i + 1),
                ),
            ] {
                let node = host.insert_with_classes(card, "p", &[class]);
                host.set_text_content(node, &text);
            }
        }
        let Some(manager) = PublicationsFilterManager::attach(&host) else {
            continue;
        };

        group.bench_function(format!("{count}_cards"), |b| {
            b.iter(|| black_box(manager.search(black_box("coauthor 7"))))
        });
    }
    group.finish();
}

criterion_group!(benches, match_benchmark, page_search_benchmark);
criterion_main!(benches);
