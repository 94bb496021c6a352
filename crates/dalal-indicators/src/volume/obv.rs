//! On-Balance Volume.

use dalal_traits::{Indicator, IndicatorSet, PriceBar, PriceField, PriceHistory, Result};

/// Running volume flow: add volume on an up close, subtract it on a down
/// close, carry on a tie. The first bar is 0.
#[must_use]
pub fn obv(bars: &[PriceBar]) -> Vec<f64> {
    let mut out = Vec::with_capacity(bars.len());
    let mut running = 0.0;
    for (i, bar) in bars.iter().enumerate() {
        if i > 0 {
            let prev = bars[i - 1].close;
            if bar.close > prev {
                running += bar.volume;
            } else if bar.close < prev {
                running -= bar.volume;
            }
        }
        out.push(running);
    }
    out
}

/// On-Balance Volume, published as `obv`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Obv;

impl Indicator for Obv {
    fn name(&self) -> &str {
        "obv"
    }

    fn lookback(&self) -> usize {
        1
    }

    fn required_fields(&self) -> &[PriceField] {
        &[PriceField::Close, PriceField::Volume]
    }

    fn compute(&self, history: &PriceHistory) -> Result<IndicatorSet> {
        let mut set = IndicatorSet::new(history.len());
        set.insert(self.name(), obv(history.bars()))?;
        Ok(set)
    }
}
