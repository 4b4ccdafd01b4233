//! Per-record score and the rounding rules shared by every metric.

use crate::survey::RatingGroup;

/// Arithmetic mean of every rating in the group, unrounded.
///
/// Inputs are assumed to have passed submission validation; values are not
/// re-checked here.
pub fn mean_rating<G: RatingGroup>(group: &G) -> f64 {
    let values = group.values();
    let sum: i32 = values.iter().sum();
    f64::from(sum) / values.len() as f64
}

/// Round to one decimal place, halves away from zero.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean of `values`, rounded to one decimal. Empty input yields `0.0`.
pub fn rounded_mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return 0.0;
    }
    round_one_decimal(sum / count as f64)
}

/// `count / total` as a percentage rounded to one decimal. Zero total yields `0.0`.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_one_decimal(count as f64 / total as f64 * 100.0)
}
