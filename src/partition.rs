//! Deterministic interval partitioning across workers
//!
//! Pure functions that split N integration intervals into contiguous
//! blocks across P ranks with an imbalance of at most one interval.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Half-open range of interval indices owned by one worker.
///
/// Ranges produced by [`partition`] are pairwise disjoint, contiguous in
/// rank order, and together cover exactly `[0, n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalRange {
    pub start: u64,
    pub end: u64,
}

impl IntervalRange {
    /// Number of intervals in this block
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// True when the block holds no intervals
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Iterator over the interval indices in this block
    pub fn indices(&self) -> Range<u64> {
        self.start..self.end
    }
}

/// Compute the contiguous interval block owned by `rank`.
///
/// `base = n / p`, `rem = n % p`; the first `rem` ranks get one extra
/// interval, so no two blocks differ in size by more than one. Deterministic:
/// the same `(n, p, rank)` always yields the same block.
///
/// `p == 0` or `rank >= p` is a programmer error, not a user-recoverable
/// condition; the config layer rejects bad worker counts before any
/// partitioning happens.
pub fn partition(n: u64, p: usize, rank: usize) -> IntervalRange {
    debug_assert!(p >= 1, "partition requires at least one rank");
    debug_assert!(rank < p, "rank {rank} out of bounds for {p} ranks");

    let p = p as u64;
    let rank = rank as u64;
    let base = n / p;
    let rem = n % p;

    let start = rank * base + rank.min(rem);
    let count = base + u64::from(rank < rem);

    IntervalRange {
        start,
        end: start + count,
    }
}

/// Compute the blocks for every rank, ordered by rank.
///
/// Convenience for planning and reporting; `partition_all(n, p)[r]` equals
/// `partition(n, p, r)`.
pub fn partition_all(n: u64, p: usize) -> Vec<IntervalRange> {
    (0..p).map(|rank| partition(n, p, rank)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_cover_range_exactly() {
        for &(n, p) in &[(0u64, 1usize), (1, 4), (7, 3), (100, 7), (1_000_000, 4)] {
            let blocks = partition_all(n, p);
            assert_eq!(blocks.len(), p);

            // Contiguous in rank order, starting at 0 and ending at n
            assert_eq!(blocks[0].start, 0);
            assert_eq!(blocks[p - 1].end, n);
            for pair in blocks.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
            }

            let total: u64 = blocks.iter().map(IntervalRange::len).sum();
            assert_eq!(total, n);
        }
    }

    #[test]
    fn test_blocks_are_balanced() {
        for &(n, p) in &[(1u64, 4usize), (7, 3), (10, 3), (100, 7), (999_999, 8)] {
            let counts: Vec<u64> = partition_all(n, p).iter().map(IntervalRange::len).collect();
            let min = counts.iter().min().unwrap();
            let max = counts.iter().max().unwrap();
            assert!(max - min <= 1, "n={n} p={p}: counts {counts:?}");
        }
    }

    #[test]
    fn test_first_ranks_absorb_remainder() {
        // 10 intervals over 3 ranks: 4, 3, 3
        let blocks = partition_all(10, 3);
        assert_eq!(blocks[0], IntervalRange { start: 0, end: 4 });
        assert_eq!(blocks[1], IntervalRange { start: 4, end: 7 });
        assert_eq!(blocks[2], IntervalRange { start: 7, end: 10 });
    }

    #[test]
    fn test_more_ranks_than_intervals() {
        let blocks = partition_all(2, 5);
        let counts: Vec<u64> = blocks.iter().map(IntervalRange::len).collect();
        assert_eq!(counts, vec![1, 1, 0, 0, 0]);
        assert!(blocks[3].is_empty());
    }

    #[test]
    fn test_partition_is_deterministic() {
        for rank in 0..7 {
            assert_eq!(partition(12_345, 7, rank), partition(12_345, 7, rank));
        }
    }

    #[test]
    fn test_single_rank_owns_everything() {
        let block = partition(42, 1, 0);
        assert_eq!(block, IntervalRange { start: 0, end: 42 });
        assert_eq!(block.len(), 42);
    }

    #[test]
    fn test_zero_intervals() {
        for rank in 0..4 {
            assert!(partition(0, 4, rank).is_empty());
        }
    }
}
