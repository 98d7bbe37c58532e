use apsp::*;
use criterion::{criterion_group, criterion_main, Criterion, black_box};

fn bench_dijkstra(c: &mut Criterion) {
    let n = 50_000;
    let g = generate::sparse(n, 200_000, 1, 20, 42);
    c.bench_function("dijkstra_50k_200k", |b| {
        b.iter(|| {
            let dist = dijkstra(&g, black_box(1)).unwrap();
            black_box(dist.len());
        })
    });
}

fn bench_bellman_ford(c: &mut Criterion) {
    let g = generate::with_potential_shift(&generate::sparse(2_000, 8_000, 1, 20, 7), 50, 7);
    c.bench_function("bellman_ford_2k_8k_negative", |b| {
        b.iter(|| black_box(bellman_ford(&g, black_box(1)).unwrap().len()))
    });
}

fn bench_johnson(c: &mut Criterion) {
    let g = generate::with_potential_shift(&generate::sparse(400, 2_000, 1, 20, 11), 50, 11);
    let mut group = c.benchmark_group("johnson_400_2k_negative");
    for threads in [1, 4] {
        let config = JohnsonConfig::default().with_threads(threads);
        group.bench_function(format!("threads_{threads}"), |b| {
            b.iter(|| black_box(johnson_with(&g, &config).unwrap().len()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dijkstra, bench_bellman_ford, bench_johnson);
criterion_main!(benches);
