// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Benchmarks for scanline-major point sorting.
//!
//! Measures:
//! - Every comparator variant with both sort algorithms on a shuffled sweep
//! - The same on an already sorted sweep (the common case for live frames)
//! - Raw comparator throughput
//!
//! Run with: cargo bench --bench sort_bench
//!
//! For on-target profiling, cross-compile and run:
//!   cargo bench --bench sort_bench --target aarch64-unknown-linux-gnu

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use edgefirst_lidarsort::{
    generate::{generate, shuffle},
    sort::{is_sorted, sort_points},
    Algorithm, Comparator, Point3, ScanPattern,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generate a sweep and a shuffled copy of it.
fn scene(lines: usize, points_per_line: usize) -> (Vec<Point3>, Vec<Point3>) {
    let pattern = ScanPattern {
        lines,
        points_per_line,
        ..Default::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let points = generate(&pattern, &mut rng).expect("valid scan pattern");
    let shuffled = shuffle(&points, &mut rng);
    (points, shuffled)
}

/// Sort shuffled sweeps at sizes matching common sensors.
fn bench_sort_shuffled(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_shuffled");
    group.sample_size(20);

    // Ouster OS1-32 512x10, OS1-64 1024x10, OS1-128 2048x10
    for &(lines, points_per_line) in &[(32, 512), (64, 1024), (128, 2048)] {
        let (_, shuffled) = scene(lines, points_per_line);
        let n_points = shuffled.len();
        group.throughput(Throughput::Elements(n_points as u64));

        for algorithm in Algorithm::ALL {
            for comparator in Comparator::ALL {
                group.bench_with_input(
                    BenchmarkId::new(format!("{} {}", algorithm, comparator), n_points),
                    &shuffled,
                    |b, shuffled| {
                        b.iter_batched(
                            || shuffled.clone(),
                            |mut cloud| sort_points(&mut cloud, comparator, algorithm),
                            BatchSize::LargeInput,
                        )
                    },
                );
            }
        }
    }

    group.finish();
}

/// Sort sweeps that are already in order.
fn bench_sort_sorted(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_sorted");

    let (points, _) = scene(64, 1024);
    group.throughput(Throughput::Elements(points.len() as u64));

    for algorithm in Algorithm::ALL {
        for comparator in [Comparator::EXACT, Comparator::FAST] {
            group.bench_with_input(
                BenchmarkId::new(algorithm.to_string(), comparator),
                &points,
                |b, points| {
                    b.iter_batched(
                        || points.clone(),
                        |mut cloud| sort_points(&mut cloud, comparator, algorithm),
                        BatchSize::LargeInput,
                    )
                },
            );
        }
    }

    group.finish();
}

/// One comparator call per adjacent pair, i.e. a sortedness check.
fn bench_comparator(c: &mut Criterion) {
    let mut group = c.benchmark_group("comparator");

    let (points, _) = scene(64, 1024);
    group.throughput(Throughput::Elements(points.len() as u64 - 1));

    for comparator in Comparator::ALL {
        group.bench_function(comparator.to_string(), |b| {
            b.iter(|| is_sorted(black_box(&points), comparator))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_sort_shuffled,
    bench_sort_sorted,
    bench_comparator,
);
criterion_main!(benches);
