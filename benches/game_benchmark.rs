//! Benchmarks for running complete autoplay sessions.
//!
//! This benchmarks map generation and the full session loop - the hot path
//! behind batch simulation.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use riftline::game::{Rng, ZoneMap};
use riftline::sim::{run_session, SimConfig};

fn bench_map_generation(c: &mut Criterion) {
    c.bench_function("generate_map_15", |b| {
        let mut rng = Rng::new(42);
        let mut map = ZoneMap::new();
        b.iter(|| {
            map.generate(&mut rng, black_box(15));
            black_box(map.len())
        });
    });

    c.bench_function("generate_map_100", |b| {
        let mut rng = Rng::new(42);
        let mut map = ZoneMap::new();
        b.iter(|| {
            map.generate(&mut rng, black_box(100));
            black_box(map.len())
        });
    });
}

fn bench_single_session(c: &mut Criterion) {
    let config = SimConfig::default();

    c.bench_function("single_session_2p", |b| {
        b.iter(|| {
            let result = run_session(black_box(42), black_box(&config));
            black_box(result)
        });
    });
}

fn bench_single_session_4p(c: &mut Criterion) {
    let config = SimConfig {
        players: 4,
        ..SimConfig::default()
    };

    c.bench_function("single_session_4p", |b| {
        b.iter(|| {
            let result = run_session(black_box(42), black_box(&config));
            black_box(result)
        });
    });
}

fn bench_session_batch(c: &mut Criterion) {
    // 10 sessions sequentially, without the parallel overhead
    let config = SimConfig::default();

    c.bench_function("10_sessions_sequential", |b| {
        b.iter(|| {
            for seed in 0..10u64 {
                let result = run_session(black_box(seed), black_box(&config));
                let _ = black_box(result);
            }
        });
    });
}

criterion_group!(
    benches,
    bench_map_generation,
    bench_single_session,
    bench_single_session_4p,
    bench_session_batch
);
criterion_main!(benches);
