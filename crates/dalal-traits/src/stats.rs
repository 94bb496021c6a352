//! Statistical utility functions shared by the indicator and scoring crates.
//!
//! These functions do not skip `NaN`. Callers filter undefined values with
//! [`finite_values`] first when a series may contain them.

/// Score returned whenever a 0-100 score has no basis.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Minimum threshold below which a mean or spread is treated as zero.
pub const MIN_STD_THRESHOLD: f64 = 1e-10;

/// Copy the finite values of a slice, preserving order.
#[must_use]
pub fn finite_values(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Arithmetic mean, or `None` for an empty slice.
///
/// The sum is taken over deviations from the first value, so a slice of
/// identical values returns that value exactly.
///
/// # Examples
///
/// ```
/// use dalal_traits::stats::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    let (&anchor, _) = values.split_first()?;
    let offset = values.iter().map(|v| v - anchor).sum::<f64>() / values.len() as f64;
    Some(anchor + offset)
}

/// Sample standard deviation (N-1 denominator), or `None` below two values.
///
/// A deviation below [`MIN_STD_THRESHOLD`] relative to the mean is
/// rounding noise and returns exactly 0.
#[must_use]
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    let std = variance.sqrt();
    if std < MIN_STD_THRESHOLD * m.abs().max(1.0) {
        Some(0.0)
    } else {
        Some(std)
    }
}

/// Ordinary least-squares slope of `values` against the index `0..n`.
///
/// Returns `None` for fewer than two points.
///
/// # Examples
///
/// ```
/// use dalal_traits::stats::ols_slope;
///
/// let slope = ols_slope(&[1.0, 3.0, 5.0, 7.0]).unwrap();
/// assert!((slope - 2.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn ols_slope(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(values)?;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }
    Some(numerator / denominator)
}

/// Clamp a score to `[0, 100]`; `NaN` becomes [`NEUTRAL_SCORE`].
#[must_use]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        NEUTRAL_SCORE
    } else {
        score.clamp(0.0, 100.0)
    }
}

/// Clamp a confidence to `[0, 1]`; `NaN` becomes 0.
#[must_use]
pub fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}
