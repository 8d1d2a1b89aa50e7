//! Weighted moving average
//!
//! Each value is weighted by its position in the series (oldest = 1), so the
//! most recent periods dominate the estimate.
//!
//! Example: `[100, 200, 300]` with weights 1, 2, 3 gives
//! `(100 + 400 + 900) / 6 = 233.33`.

/// Linearly weighted average. An empty series yields 0 ("no data yet").
pub fn weighted_average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let (weighted_sum, total_weight) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sum, weights), (i, value)| {
            let weight = (i + 1) as f64;
            (sum + value * weight, weights + weight)
        });

    weighted_sum / total_weight
}

/// Confidence in a forecast built from `sample_count` observed periods.
///
/// Fixed steps: 0 → 0, 1 → 40, 2 → 60, 3 → 75, 4+ → 85.
pub fn confidence_from_sample_count(sample_count: usize) -> u8 {
    match sample_count {
        0 => 0,
        1 => 40,
        2 => 60,
        3 => 75,
        _ => 85,
    }
}
