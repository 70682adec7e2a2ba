//! Benchmarks for the clustering hotspot
//!
//! Run with: cargo bench --package clustering

use clustering::KMeans;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Synthetic rating-like vectors around four centers, seeded so every
/// bench run sees the same data.
fn synthetic_samples(n: usize, dim: usize) -> Vec<Vec<f32>> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..n)
        .map(|i| {
            let center = (i % 4) as f32 * 2.5;
            (0..dim)
                .map(|_| center + rng.random::<f32>())
                .collect()
        })
        .collect()
}

fn bench_kmeans_fit(c: &mut Criterion) {
    let samples = synthetic_samples(500, 50);

    c.bench_function("kmeans_fit_500x50_k4", |b| {
        b.iter(|| {
            let mut kmeans = KMeans::new(4).with_seed(42);
            kmeans.fit(black_box(&samples)).unwrap();
            black_box(kmeans.inertia())
        })
    });
}

fn bench_kmeans_fit_many_clusters(c: &mut Criterion) {
    let samples = synthetic_samples(500, 50);

    c.bench_function("kmeans_fit_500x50_k16", |b| {
        b.iter(|| {
            let mut kmeans = KMeans::new(16).with_seed(42);
            kmeans.fit(black_box(&samples)).unwrap();
            black_box(kmeans.inertia())
        })
    });
}

criterion_group!(benches, bench_kmeans_fit, bench_kmeans_fit_many_clusters);
criterion_main!(benches);
