use criterion::{Criterion, criterion_group, criterion_main};
use kyori::{Hand, NeighborSearch, SearchConfig};
use std::hint::black_box;

fn hand() -> Hand {
    "1c 2c 3c 4c 5c 6c 7d 8d 9d 2b 3b 4b east east".parse().unwrap()
}

fn neighbors(c: &mut Criterion) {
    let hand = hand();
    c.bench_function("neighbors 1", |b| b.iter(|| black_box(&hand).neighbors(1).unwrap()));

    let mut group = c.benchmark_group("neighbors 2");
    group.sample_size(10);
    for parallel in [false, true] {
        let search = NeighborSearch::new(SearchConfig {
            parallel,
            ..Default::default()
        });
        group.bench_function(if parallel { "parallel" } else { "sequential" }, |b| {
            b.iter(|| search.neighbors(black_box(&hand), 2).unwrap())
        });
    }
    group.finish();
}

fn distances(c: &mut Criterion) {
    let hand = hand();
    let others = hand.neighbors(1).unwrap().into_hands();
    c.bench_function("batched distances", |b| b.iter(|| black_box(&hand).distances(&others)));
    c.bench_function("pairwise distances", |b| {
        b.iter(|| others.iter().map(|o| black_box(&hand).distance(o)).collect::<Vec<_>>())
    });
}

criterion_group!(benches, neighbors, distances);
criterion_main!(benches);
