//! Benchmark for CowVector update paths.
//!
//! Compares in-place updates of a uniquely owned vector against
//! copy-on-write updates of a shared one, and appends against `Vec::push`.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use cowvec::persistent::CowVector;
use std::hint::black_box;

// =============================================================================
// update Benchmark
// =============================================================================

fn benchmark_update(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("update");

    for size in [100, 1000, 10000] {
        // Unique: every update happens in place
        group.bench_with_input(BenchmarkId::new("unique", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut vector = CowVector::from_vec((0..size).collect::<Vec<usize>>());
                for index in 0..size {
                    vector = vector.update(black_box(index), index * 2);
                }
                black_box(vector)
            });
        });

        // Shared: every update copies the whole buffer
        group.bench_with_input(BenchmarkId::new("shared", size), &size, |bencher, &size| {
            let base = CowVector::from_vec((0..size).collect::<Vec<usize>>());
            bencher.iter(|| {
                let vector = base.clone();
                black_box(vector.update(black_box(size / 2), 0))
            });
        });
    }

    group.finish();
}

// =============================================================================
// append Benchmark
// =============================================================================

fn benchmark_append(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("append");

    for size in [100, 1000, 10000] {
        group.bench_with_input(
            BenchmarkId::new("CowVector", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut vector = CowVector::with_capacity(1);
                    for index in 0..size {
                        vector = vector.update(index, black_box(index));
                    }
                    black_box(vector)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut vector = Vec::new();
                for index in 0..size {
                    vector.push(black_box(index));
                }
                black_box(vector)
            });
        });
    }

    group.finish();
}

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in [100, 1000] {
        group.bench_with_input(
            BenchmarkId::new("CowVector front", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut vector = CowVector::new();
                    for index in 0..size {
                        vector = vector.insert(0, black_box(index));
                    }
                    black_box(vector)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_update, benchmark_append, benchmark_insert);

criterion_main!(benches);
