//! Average True Range.

use crate::moving_average::sma;
use dalal_traits::{Indicator, IndicatorSet, PriceBar, PriceField, PriceHistory, Result};
use serde::{Deserialize, Serialize};

/// Configuration for ATR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtrConfig {
    /// Number of true ranges averaged (default: 14)
    pub period: usize,
}

impl Default for AtrConfig {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// True range of each bar.
///
/// The first bar has no previous close, so its range is `high - low`.
#[must_use]
pub fn true_range(bars: &[PriceBar]) -> Vec<f64> {
    let mut out = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        let range = bar.high - bar.low;
        let tr = match i.checked_sub(1).map(|p| bars[p].close) {
            None => range,
            Some(prev_close) => range
                .max((bar.high - prev_close).abs())
                .max((bar.low - prev_close).abs()),
        };
        out.push(tr);
    }
    out
}

/// Simple rolling mean of the true range.
#[must_use]
pub fn atr(bars: &[PriceBar], period: usize) -> Vec<f64> {
    sma(&true_range(bars), period)
}

/// Average True Range, published as `atr`.
#[derive(Debug, Clone, Default)]
pub struct Atr {
    config: AtrConfig,
}

impl Atr {
    /// Create a new ATR with the given configuration.
    #[must_use]
    pub const fn new(config: AtrConfig) -> Self {
        Self { config }
    }
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        "atr"
    }

    fn lookback(&self) -> usize {
        self.config.period
    }

    fn required_fields(&self) -> &[PriceField] {
        &[PriceField::High, PriceField::Low, PriceField::Close]
    }

    fn compute(&self, history: &PriceHistory) -> Result<IndicatorSet> {
        tracing::trace!(indicator = "atr", period = self.config.period, "computing");
        let mut set = IndicatorSet::new(history.len());
        set.insert(self.name(), atr(history.bars(), self.config.period))?;
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dalal_traits::Date;

    fn bar(day: u32, high: f64, low: f64, close: f64) -> PriceBar {
        PriceBar::new(
            Date::from_ymd_opt(2024, 3, day).unwrap(),
            close,
            high,
            low,
            close,
            500.0,
        )
    }

    #[test]
    fn test_true_range_first_bar() {
        let tr = true_range(&[bar(1, 12.0, 9.0, 10.0)]);
        assert_eq!(tr, vec![3.0]);
    }

    #[test]
    fn test_true_range_gap() {
        // Gap up: previous close 10, today 14..13.
        let tr = true_range(&[bar(1, 11.0, 9.0, 10.0), bar(2, 14.0, 13.0, 13.5)]);
        assert_relative_eq!(tr[1], 4.0);

        // Gap down: previous close 10, today 7..6.
        let tr = true_range(&[bar(1, 11.0, 9.0, 10.0), bar(2, 7.0, 6.0, 6.5)]);
        assert_relative_eq!(tr[1], 4.0);
    }

    #[test]
    fn test_atr_window() {
        let bars = vec![
            bar(1, 11.0, 9.0, 10.0),
            bar(2, 12.0, 10.0, 11.0),
            bar(3, 13.0, 11.0, 12.0),
        ];
        let out = atr(&bars, 2);
        assert!(out[0].is_nan());
        assert_relative_eq!(out[1], 2.0);
        assert_relative_eq!(out[2], 2.0);
    }
}
