use std::sync::Arc;

use adaptive_hash::{AdaptiveHasher, BitStats};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_update(c: &mut Criterion) {
    let stats = BitStats::new();
    let mut key = 0u64;
    c.bench_function("bit_stats_update", |b| {
        b.iter(|| {
            key = key.wrapping_add(0x9E37_79B9_7F4A_7C15);
            stats.update(black_box(key));
        })
    });
}

fn bench_compute_ordering(c: &mut Criterion) {
    let stats = BitStats::new();
    for k in 0..10_000u64 {
        stats.update(k.wrapping_mul(0xBF58_476D_1CE4_E5B9));
    }
    c.bench_function("bit_stats_compute_ordering", |b| {
        b.iter(|| black_box(stats.compute_ordering()))
    });
}

fn bench_hash(c: &mut Criterion) {
    let hasher = AdaptiveHasher::new(Arc::new(BitStats::new()));
    let mut key = 0u64;
    c.bench_function("adaptive_hash", |b| {
        b.iter(|| {
            key = key.wrapping_add(1);
            black_box(hasher.hash(black_box(key)))
        })
    });
    c.bench_function("adaptive_extract", |b| {
        b.iter(|| {
            key = key.wrapping_add(1);
            black_box(hasher.extract(black_box(key)))
        })
    });
}

criterion_group!(benches, bench_update, bench_compute_ordering, bench_hash);
criterion_main!(benches);
