//! Benchmarks for the forging parting-line solver.
//!
//! Run with: cargo bench -p blank-forge
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p blank-forge -- --save-baseline main
//! 2. After changes: cargo bench -p blank-forge -- --baseline main

#![allow(missing_docs)]

use blank_forge::solve_forging;
use blank_sweep::candidate_directions;
use blank_types::{cuboid, uv_sphere, ForgingConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_forge_block(c: &mut Criterion) {
    let block = cuboid(60.0, 40.0, 25.0);
    let candidates = candidate_directions(&block, None).unwrap();
    let config = ForgingConfig::default();

    c.bench_function("forge_block_60x40x25", |b| {
        b.iter(|| solve_forging(black_box(&block), black_box(&candidates), &config));
    });
}

fn bench_forge_sphere(c: &mut Criterion) {
    let sphere = uv_sphere(20.0, 16, 32);
    let candidates = candidate_directions(&sphere, None).unwrap();
    let config = ForgingConfig::default().with_min_slices(12);

    c.bench_function("forge_sphere_r20", |b| {
        b.iter(|| solve_forging(black_box(&sphere), black_box(&candidates), &config));
    });
}

fn bench_fine_slicing(c: &mut Criterion) {
    let block = cuboid(60.0, 40.0, 25.0);
    let candidates = candidate_directions(&block, None).unwrap();
    let config = ForgingConfig::default().with_min_slices(32);

    c.bench_function("forge_block_fine_slices", |b| {
        b.iter(|| solve_forging(black_box(&block), black_box(&candidates), &config));
    });
}

criterion_group!(
    benches,
    bench_forge_block,
    bench_forge_sphere,
    bench_fine_slicing
);
criterion_main!(benches);
