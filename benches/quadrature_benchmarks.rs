//! Performance benchmarks for partitioning, local integration, and the
//! full parallel run across worker counts.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use parapi::config::RunConfig;
use parapi::integrate::{interval_width, midpoint_sum};
use parapi::partition::{partition, partition_all};
use parapi::report::FormatType;
use parapi::worker;
use std::hint::black_box;

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");

    for workers in [1usize, 4, 16, 64] {
        group.bench_with_input(
            BenchmarkId::new("partition_all", workers),
            &workers,
            |b, &workers| {
                b.iter(|| partition_all(black_box(1_000_000), black_box(workers)));
            },
        );
    }

    group.finish();
}

fn bench_midpoint_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("midpoint_sum");

    for n in [1_000u64, 100_000, 1_000_000] {
        let range = partition(n, 1, 0);
        let h = interval_width(n);
        group.bench_with_input(BenchmarkId::new("intervals", n), &n, |b, _| {
            b.iter(|| midpoint_sum(black_box(range), black_box(h)));
        });
    }

    group.finish();
}

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_run");
    group.sample_size(20);

    for workers in [1usize, 2, 4, 8] {
        let config = RunConfig {
            intervals: 200_000,
            workers,
            format: FormatType::Text,
        };
        group.bench_with_input(
            BenchmarkId::new("workers", workers),
            &config,
            |b, config| {
                b.iter(|| worker::run(black_box(config)).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_partition,
    bench_midpoint_sum,
    bench_full_run
);
criterion_main!(benches);
