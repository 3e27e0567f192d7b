//! Streaming moment fixtures
//!
//! One-pass mean and population variance over a borrowed `f64` slice.

/// Population variance of `data`, computed in a single pass.
///
/// Divides by `n`, not `n - 1`. Empty input returns `0.0`.
///
/// # Test Cases
/// - population_variance([]) = 0.0
/// - population_variance([2.0, 2.0, 2.0]) = 0.0
/// - population_variance([1.1, 2.2, 3.3, 4.4, 5.5]) ≈ 2.42
pub fn population_variance(data: &[f64]) -> f64 {
    population_variance_with(data, |_| {})
}

/// Like [`population_variance`], calling `observe` once per element in
/// traversal order.
///
/// The observer is the progress side channel; it never sees the empty
/// input and cannot influence the result.
#[inline(never)]
pub fn population_variance_with<F>(data: &[f64], mut observe: F) -> f64
where
    F: FnMut(f64),
{
    if data.is_empty() {
        return 0.0;
    }

    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for &val in data {
        sum += val;
        sum_sq += val * val;
        observe(val);
    }

    let n = data.len() as f64;
    let mean = sum / n;
    let variance = (sum_sq / n) - (mean * mean);

    // Cancellation can push a zero-spread result slightly below zero
    if variance < 0.0 {
        0.0
    } else {
        variance
    }
}

/// Arithmetic mean of `data`; `0.0` when empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}
