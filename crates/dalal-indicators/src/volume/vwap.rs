//! Volume-Weighted Average Price.

use dalal_traits::{Indicator, IndicatorSet, PriceBar, PriceField, PriceHistory, Result};

/// Cumulative `sum(volume * typical_price) / sum(volume)` from the first bar.
///
/// Positions where no volume has traded yet are `NaN`.
#[must_use]
pub fn vwap(bars: &[PriceBar]) -> Vec<f64> {
    let mut out = Vec::with_capacity(bars.len());
    let mut cum_pv = 0.0;
    let mut cum_volume = 0.0;
    for bar in bars {
        cum_pv += bar.volume * bar.typical_price();
        cum_volume += bar.volume;
        out.push(if cum_volume > 0.0 {
            cum_pv / cum_volume
        } else {
            f64::NAN
        });
    }
    out
}

/// Volume-Weighted Average Price, published as `vwap`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vwap;

impl Indicator for Vwap {
    fn name(&self) -> &str {
        "vwap"
    }

    fn lookback(&self) -> usize {
        1
    }

    fn required_fields(&self) -> &[PriceField] {
        &[
            PriceField::High,
            PriceField::Low,
            PriceField::Close,
            PriceField::Volume,
        ]
    }

    fn compute(&self, history: &PriceHistory) -> Result<IndicatorSet> {
        let mut set = IndicatorSet::new(history.len());
        set.insert(self.name(), vwap(history.bars()))?;
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dalal_traits::Date;

    #[test]
    fn test_vwap_cumulative() {
        let day = |d| Date::from_ymd_opt(2024, 5, d).unwrap();
        let bars = vec![
            PriceBar::new(day(1), 10.0, 12.0, 9.0, 12.0, 0.0),
            PriceBar::new(day(2), 10.0, 12.0, 9.0, 9.0, 100.0),
            PriceBar::new(day(3), 10.0, 15.0, 12.0, 12.0, 300.0),
        ];
        let out = vwap(&bars);
        assert!(out[0].is_nan());
        assert_relative_eq!(out[1], 10.0);
        assert_relative_eq!(out[2], (100.0 * 10.0 + 300.0 * 13.0) / 400.0);
    }
}
