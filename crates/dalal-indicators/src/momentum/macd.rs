//! Moving Average Convergence Divergence.

use crate::moving_average::ema;
use dalal_traits::{Indicator, IndicatorSet, PriceField, PriceHistory, Result};
use serde::{Deserialize, Serialize};

/// Configuration for MACD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdConfig {
    /// Span of the fast EMA (default: 12)
    pub fast: usize,
    /// Span of the slow EMA (default: 26)
    pub slow: usize,
    /// Span of the signal EMA applied to the MACD line (default: 9)
    pub signal: usize,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

/// MACD line, signal line and histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    /// `EMA(fast) - EMA(slow)`
    pub macd: Vec<f64>,
    /// EMA of the MACD line
    pub signal: Vec<f64>,
    /// `macd - signal`
    pub histogram: Vec<f64>,
}

/// Compute the three MACD series for `closes`.
#[must_use]
pub fn macd(closes: &[f64], config: &MacdConfig) -> MacdSeries {
    let fast = ema(closes, config.fast);
    let slow = ema(closes, config.slow);
    let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal = ema(&line, config.signal);
    let histogram = line.iter().zip(&signal).map(|(m, s)| m - s).collect();

    MacdSeries {
        macd: line,
        signal,
        histogram,
    }
}

/// MACD indicator, published as `macd`, `macd_signal` and `macd_histogram`.
#[derive(Debug, Clone, Default)]
pub struct Macd {
    config: MacdConfig,
}

impl Macd {
    /// Create a new MACD with the given configuration.
    #[must_use]
    pub const fn new(config: MacdConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &MacdConfig {
        &self.config
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        "macd"
    }

    fn lookback(&self) -> usize {
        self.config.slow.max(self.config.fast)
    }

    fn required_fields(&self) -> &[PriceField] {
        &[PriceField::Close]
    }

    fn compute(&self, history: &PriceHistory) -> Result<IndicatorSet> {
        tracing::trace!(indicator = "macd", bars = history.len(), "computing");
        let series = macd(&history.closes(), &self.config);
        let mut set = IndicatorSet::new(history.len());
        set.insert("macd", series.macd)?;
        set.insert("macd_signal", series.signal)?;
        set.insert("macd_histogram", series.histogram)?;
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_macd_flat_histogram_zero() {
        let series = macd(&[250.0; 60], &MacdConfig::default());
        for i in 0..60 {
            assert_abs_diff_eq!(series.macd[i], 0.0);
            assert_abs_diff_eq!(series.histogram[i], 0.0);
        }
    }

    #[test]
    fn test_macd_flat_histogram_zero_at_inexact_prices() {
        for close in [0.1, 19.99, 101.3, 2456.35] {
            let series = macd(&[close; 60], &MacdConfig::default());
            assert!(series.macd.iter().all(|v| *v == 0.0));
            assert!(series.histogram.iter().all(|v| *v == 0.0));
        }
    }

    #[test]
    fn test_macd_rising_is_positive() {
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + f64::from(i)).collect();
        let series = macd(&closes, &MacdConfig::default());
        assert!(series.macd[79] > 0.0);
        assert!(series.macd[79] > series.signal[79]);
    }

    #[test]
    fn test_macd_defined_from_start() {
        let series = macd(&[1.0, 2.0, 3.0], &MacdConfig::default());
        assert!(series.macd.iter().all(|v| v.is_finite()));
        assert_abs_diff_eq!(series.macd[0], 0.0);
    }

    #[test]
    fn test_macd_histogram_identity() {
        let closes: Vec<f64> = (0..40).map(|i| (f64::from(i) * 0.5).sin() * 4.0 + 50.0).collect();
        let series = macd(&closes, &MacdConfig::default());
        for i in 0..40 {
            assert_abs_diff_eq!(
                series.histogram[i],
                series.macd[i] - series.signal[i],
                epsilon = 1e-12
            );
        }
    }
}
