//! Midpoint-rule integration of 4/(1+x²)
//!
//! Pure local-integrator functions. Each worker evaluates the integrand at
//! the midpoints of its interval block and scales the accumulated sum by
//! the interval width.

use crate::partition::{partition, IntervalRange};

/// Integrand: ∫₀¹ 4/(1+x²) dx = π
fn f(x: f64) -> f64 {
    4.0 / (1.0 + x * x)
}

/// Midpoint-rule partial sum over one interval block.
///
/// Accumulates `f(h * (i + 0.5))` for every index in `range` in a single
/// f64 pass and returns the accumulated value scaled by `h`. Deterministic:
/// identical inputs give bit-identical output. Summation order differs
/// across worker counts, so aggregated results are only comparable within
/// floating-point associativity tolerance.
pub fn midpoint_sum(range: IntervalRange, h: f64) -> f64 {
    if range.is_empty() {
        return 0.0;
    }

    let mut acc = 0.0;
    for i in range.indices() {
        let x = h * (i as f64 + 0.5);
        acc += f(x);
    }
    acc * h
}

/// Width of each of the `n` intervals spanning [0, 1].
///
/// Zero when `n == 0`, so an empty run contributes an exact 0.0 rather
/// than propagating an infinite width.
pub fn interval_width(n: u64) -> f64 {
    if n == 0 {
        0.0
    } else {
        1.0 / n as f64
    }
}

/// Single-pass sequential midpoint-rule estimate over all `n` intervals.
///
/// Reference implementation for parity tests and benchmarks.
pub fn sequential_estimate(n: u64) -> f64 {
    midpoint_sum(partition(n, 1, 0), interval_width(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_interval() {
        // One interval: midpoint x = 0.5, f(0.5) = 3.2, scaled by h = 1
        let sum = midpoint_sum(IntervalRange { start: 0, end: 1 }, 1.0);
        assert_eq!(sum, 3.2);
    }

    #[test]
    fn test_empty_range_is_exact_zero() {
        let sum = midpoint_sum(IntervalRange { start: 3, end: 3 }, 0.1);
        assert_eq!(sum, 0.0);
        assert_eq!(sequential_estimate(0), 0.0);
    }

    #[test]
    fn test_bit_identical_across_calls() {
        let range = IntervalRange { start: 100, end: 10_000 };
        let h = interval_width(10_000);
        assert_eq!(
            midpoint_sum(range, h).to_bits(),
            midpoint_sum(range, h).to_bits()
        );
    }

    #[test]
    fn test_sequential_estimate_converges() {
        let estimate = sequential_estimate(100_000);
        assert!((estimate - std::f64::consts::PI).abs() < 1e-8);
    }

    #[test]
    fn test_interval_width() {
        assert_eq!(interval_width(0), 0.0);
        assert_eq!(interval_width(4), 0.25);
    }
}
