//! Benchmarks for kNN classification.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use formatknn::prelude::*;

const WIDTH: usize = 12;

fn generate_corpus(n: usize) -> Corpus {
    let vectors: Vec<Vec<Feature>> = (0..n)
        .map(|i| {
            (0..WIDTH)
                .map(|j| ((i * 31 + j * 17) % 23) as Feature)
                .collect()
        })
        .collect();
    let labels: Vec<Category> = (0..n).map(|i| (i % 5) as Category).collect();
    let mask: Vec<bool> = (0..WIDTH).map(|j| j % 3 != 0).collect();

    Corpus::new(vectors, labels, mask).unwrap()
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("knn_classify");
    let query: Vec<Feature> = (0..WIDTH).map(|j| (j * 7 % 23) as Feature).collect();

    for size in [100, 1_000, 10_000].iter() {
        let knn = KNearestNeighbors::new(generate_corpus(*size), MixedDistance::uniform(WIDTH))
            .unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| knn.classify(black_box(11), black_box(&query)).unwrap());
        });
    }

    group.finish();
}

fn bench_votes(c: &mut Criterion) {
    let mut group = c.benchmark_group("knn_votes");
    let query: Vec<Feature> = (0..WIDTH).map(|j| (j * 5 % 23) as Feature).collect();

    for size in [100, 1_000, 10_000].iter() {
        let knn = KNearestNeighbors::new(generate_corpus(*size), Hamming)
            .unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                knn.votes_with_threshold(black_box(11), black_box(&query), black_box(0.5))
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classify, bench_votes);
criterion_main!(benches);
