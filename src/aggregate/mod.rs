//! Coordinator-side result assembly and timing metrics
//!
//! Pure functions that turn the reduced global sum and the gathered
//! per-rank sums, times, and interval counts into a [`GlobalResult`] and
//! a derived [`TimingSummary`]. Degenerate inputs (zero intervals, zero
//! measured time) yield non-finite metric values instead of errors.

use serde::{Deserialize, Serialize};

/// One worker's contribution to the run, immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialResult {
    /// Worker rank in `[0, P)`
    pub rank: usize,
    /// Midpoint-rule partial sum for this worker's block, already scaled by h
    pub local_sum: f64,
    /// Measured compute time, from the post-barrier timestamp
    pub elapsed_secs: f64,
    /// Number of intervals this worker processed
    pub interval_count: u64,
}

/// Final result assembled once on the coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalResult {
    /// The π estimate: sum of all workers' local sums
    pub pi_estimate: f64,
    /// Post-barrier timestamp to completion of the reduce, coordinator clock
    pub total_elapsed_secs: f64,
    /// Total interval count N
    pub intervals: u64,
    /// Per-worker results, ordered by rank
    pub per_worker: Vec<PartialResult>,
}

impl GlobalResult {
    /// Absolute error of the estimate against the f64 π constant
    pub fn error_vs_pi(&self) -> f64 {
        (self.pi_estimate - std::f64::consts::PI).abs()
    }

    /// Percentage of the total work a worker processed; NaN when N == 0
    pub fn work_share_pct(&self, rank: usize) -> f64 {
        self.per_worker[rank].interval_count as f64 / self.intervals as f64 * 100.0
    }

    /// Elapsed times ordered by rank
    pub fn worker_times(&self) -> Vec<f64> {
        self.per_worker.iter().map(|w| w.elapsed_secs).collect()
    }
}

/// Load-balance diagnostics derived from per-worker times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingSummary {
    pub min_secs: f64,
    pub max_secs: f64,
    pub avg_secs: f64,
    /// Slowest over fastest worker time; 1.0 is perfectly balanced,
    /// +∞ when the fastest time is zero
    pub load_imbalance: f64,
    /// Average worker time over total wall time, as a percentage;
    /// overhead from synchronization shows up as a value below 100
    pub parallel_efficiency_pct: f64,
}

impl TimingSummary {
    /// Derive the summary from gathered times and the coordinator's
    /// total elapsed span.
    pub fn from_run(times: &[f64], total_elapsed_secs: f64) -> Self {
        if times.is_empty() {
            return Self {
                min_secs: f64::NAN,
                max_secs: f64::NAN,
                avg_secs: f64::NAN,
                load_imbalance: f64::NAN,
                parallel_efficiency_pct: f64::NAN,
            };
        }

        let min = times.iter().copied().fold(f64::INFINITY, f64::min);
        let max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = times.iter().sum::<f64>() / times.len() as f64;

        let load_imbalance = if min == 0.0 { f64::INFINITY } else { max / min };

        Self {
            min_secs: min,
            max_secs: max,
            avg_secs: avg,
            load_imbalance,
            parallel_efficiency_pct: avg / total_elapsed_secs * 100.0,
        }
    }
}

/// Assemble the coordinator's [`GlobalResult`] from the collective outputs.
///
/// `sums`, `times`, and `counts` are rank-ordered as returned by the
/// gathers; `global_sum` is the reduced π estimate.
pub fn aggregate(
    n: u64,
    global_sum: f64,
    sums: &[f64],
    times: &[f64],
    counts: &[u64],
    total_elapsed_secs: f64,
) -> GlobalResult {
    debug_assert_eq!(sums.len(), times.len());
    debug_assert_eq!(sums.len(), counts.len());
    debug_assert_eq!(counts.iter().sum::<u64>(), n);

    let per_worker = sums
        .iter()
        .zip(times)
        .zip(counts)
        .enumerate()
        .map(|(rank, ((&local_sum, &elapsed_secs), &interval_count))| PartialResult {
            rank,
            local_sum,
            elapsed_secs,
            interval_count,
        })
        .collect();

    GlobalResult {
        pi_estimate: global_sum,
        total_elapsed_secs,
        intervals: n,
        per_worker,
    }
}
