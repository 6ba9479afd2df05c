//! End-to-end tests for the full partition → integrate → reduce pipeline
//!
//! Runs the real thread runner through the library API and checks the
//! accuracy and invariants of the aggregated result.

use parapi::config::RunConfig;
use parapi::integrate::sequential_estimate;
use parapi::report::FormatType;
use parapi::worker;

fn config(intervals: u64, workers: usize) -> RunConfig {
    RunConfig {
        intervals,
        workers,
        format: FormatType::Text,
    }
}

#[test]
fn test_million_intervals_four_workers_hits_pi() {
    let result = worker::run(&config(1_000_000, 4)).unwrap();
    assert!(
        result.error_vs_pi() < 1e-6,
        "estimate {} too far from pi",
        result.pi_estimate
    );

    let total: u64 = result.per_worker.iter().map(|w| w.interval_count).sum();
    assert_eq!(total, 1_000_000);
}

#[test]
fn test_zero_intervals_gives_exact_zero_for_any_worker_count() {
    for workers in [1, 2, 5] {
        let result = worker::run(&config(0, workers)).unwrap();
        assert_eq!(result.pi_estimate, 0.0);
        assert_eq!(result.intervals, 0);
        assert!(result.per_worker.iter().all(|w| w.interval_count == 0));
    }
}

#[test]
fn test_single_worker_matches_sequential_sum() {
    let result = worker::run(&config(10_000, 1)).unwrap();
    let sequential = sequential_estimate(10_000);
    assert!((result.pi_estimate - sequential).abs() < 1e-12);
}

#[test]
fn test_worker_counts_only_reorder_the_sum() {
    // Different partitionings change addition order, not the value beyond
    // floating-point associativity error.
    let one = worker::run(&config(100_000, 1)).unwrap();
    let many = worker::run(&config(100_000, 7)).unwrap();
    assert!((one.pi_estimate - many.pi_estimate).abs() < 1e-10);
}

#[test]
fn test_result_is_ordered_and_balanced() {
    let result = worker::run(&config(1_001, 4)).unwrap();

    let ranks: Vec<usize> = result.per_worker.iter().map(|w| w.rank).collect();
    assert_eq!(ranks, vec![0, 1, 2, 3]);

    let counts: Vec<u64> = result.per_worker.iter().map(|w| w.interval_count).collect();
    let min = counts.iter().min().unwrap();
    let max = counts.iter().max().unwrap();
    assert!(max - min <= 1);
}

#[test]
fn test_work_shares_cover_everything() {
    let result = worker::run(&config(10_000, 3)).unwrap();
    let total_share: f64 = (0..3).map(|rank| result.work_share_pct(rank)).sum();
    assert!((total_share - 100.0).abs() < 1e-9);
}
