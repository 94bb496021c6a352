//! Relative Strength Index.

use crate::moving_average::sma;
use dalal_traits::{Indicator, IndicatorSet, PriceField, PriceHistory, Result};
use serde::{Deserialize, Serialize};

/// Configuration for RSI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsiConfig {
    /// Number of trailing price changes averaged (default: 14)
    pub period: usize,
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// RSI from simple rolling means of gains and losses.
///
/// Gains and losses are the positive and negative close-to-close changes,
/// each zero-filled for the other sign. Position `i` averages the `period`
/// changes ending at `i`, so the first defined value is at `i == period`.
///
/// A window with no losses reads 100. A window with neither gains nor losses
/// reads 50. The result therefore always lies in `[0, 100]`.
///
/// # Examples
///
/// ```
/// use dalal_indicators::momentum::rsi;
///
/// let flat = rsi(&[5.0; 20], 14);
/// assert_eq!(flat[19], 50.0);
///
/// let rising: Vec<f64> = (0..20).map(f64::from).collect();
/// assert_eq!(rsi(&rising, 14)[19], 100.0);
/// ```
#[must_use]
pub fn rsi(closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    let mut out = vec![f64::NAN; n];
    if period == 0 || n <= period {
        return out;
    }

    let mut gains = Vec::with_capacity(n - 1);
    let mut losses = Vec::with_capacity(n - 1);
    for pair in closes.windows(2) {
        let delta = pair[1] - pair[0];
        gains.push(delta.max(0.0));
        losses.push((-delta).max(0.0));
    }

    let avg_gain = sma(&gains, period);
    let avg_loss = sma(&losses, period);

    for i in period..n {
        let gain = avg_gain[i - 1];
        let loss = avg_loss[i - 1];
        out[i] = rsi_from_averages(gain, loss);
    }
    out
}

fn rsi_from_averages(gain: f64, loss: f64) -> f64 {
    if gain.is_nan() || loss.is_nan() {
        return f64::NAN;
    }
    if loss == 0.0 {
        if gain == 0.0 { 50.0 } else { 100.0 }
    } else {
        100.0 - 100.0 / (1.0 + gain / loss)
    }
}

/// Relative Strength Index of closes, published as `rsi`.
#[derive(Debug, Clone, Default)]
pub struct Rsi {
    config: RsiConfig,
}

impl Rsi {
    /// Create a new RSI with the given configuration.
    #[must_use]
    pub const fn new(config: RsiConfig) -> Self {
        Self { config }
    }

    /// Get the averaging period.
    #[must_use]
    pub const fn period(&self) -> usize {
        self.config.period
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        "rsi"
    }

    fn lookback(&self) -> usize {
        self.config.period + 1
    }

    fn required_fields(&self) -> &[PriceField] {
        &[PriceField::Close]
    }

    fn compute(&self, history: &PriceHistory) -> Result<IndicatorSet> {
        tracing::trace!(indicator = "rsi", period = self.config.period, "computing");
        let mut set = IndicatorSet::new(history.len());
        set.insert(self.name(), rsi(&history.closes(), self.config.period))?;
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rsi_flat_is_fifty() {
        let out = rsi(&[100.0; 30], 14);
        assert!(out[..14].iter().all(|v| v.is_nan()));
        assert!(out[14..].iter().all(|&v| v == 50.0));

        for close in [0.1, 19.99, 101.3, 2456.35] {
            let out = rsi(&[close; 30], 14);
            assert!(out[14..].iter().all(|&v| v == 50.0), "rsi at {close}");
        }
    }

    #[test]
    fn test_rsi_non_decreasing_is_hundred() {
        let mut closes = vec![10.0; 5];
        closes.extend((0..20).map(|i| 10.0 + f64::from(i)));
        let out = rsi(&closes, 14);
        let last = *out.last().unwrap();
        assert!(!last.is_nan());
        assert_eq!(last, 100.0);
    }

    #[test]
    fn test_rsi_bounded() {
        let closes: Vec<f64> = (0..200)
            .map(|i| 100.0 + (f64::from(i) * 1.3).sin() * 10.0 + (f64::from(i) * 0.2).cos() * 3.0)
            .collect();
        for v in rsi(&closes, 14).into_iter().filter(|v| !v.is_nan()) {
            assert!((0.0..=100.0).contains(&v), "rsi {v} out of range");
        }
    }

    #[test]
    fn test_rsi_known_value() {
        // Two gains of 2 and one loss of 1 over a three-change window.
        let out = rsi(&[10.0, 12.0, 11.0, 13.0], 3);
        let gain = 4.0 / 3.0;
        let loss = 1.0 / 3.0;
        assert_relative_eq!(out[3], 100.0 - 100.0 / (1.0 + gain / loss), epsilon = 1e-12);
        assert_relative_eq!(out[3], 80.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rsi_falling_is_zero() {
        let closes: Vec<f64> = (0..20).map(|i| 50.0 - f64::from(i)).collect();
        assert_relative_eq!(*rsi(&closes, 14).last().unwrap(), 0.0);
    }

    #[test]
    fn test_rsi_too_short() {
        assert!(rsi(&[1.0, 2.0, 3.0], 14).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_rsi_indicator_lookback() {
        let indicator = Rsi::default();
        assert_eq!(indicator.period(), 14);
        assert_eq!(indicator.lookback(), 15);
        assert_eq!(indicator.name(), "rsi");
    }
}
