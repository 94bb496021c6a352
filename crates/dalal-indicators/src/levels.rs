//! Classic pivot support and resistance levels.
//!
//! Over the trailing window with high `H`, low `L` and last close `C`:
//!
//! ```text
//! P  = (H + L + C) / 3
//! R1 = 2P - L        S1 = 2P - H
//! R2 = P + (H - L)   S2 = P - (H - L)
//! ```

use dalal_traits::{Fallback, PriceHistory};
use serde::{Deserialize, Serialize};

/// Configuration for pivot levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelsConfig {
    /// Trailing bars spanned by the range (default: 20)
    pub window: usize,
}

impl Default for LevelsConfig {
    fn default() -> Self {
        Self { window: 20 }
    }
}

/// Pivot point with two supports and two resistances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotLevels {
    /// Pivot point `P`.
    pub pivot: f64,
    /// First resistance `R1`.
    pub resistance_1: f64,
    /// Second resistance `R2`.
    pub resistance_2: f64,
    /// First support `S1`.
    pub support_1: f64,
    /// Second support `S2`.
    pub support_2: f64,
    /// Bars the range was taken over; below the window on short histories.
    pub bars_used: usize,
}

impl PivotLevels {
    /// Levels over the trailing window of `history`.
    ///
    /// A history shorter than the window uses every bar it has.
    #[must_use]
    pub fn compute(history: &PriceHistory, config: &LevelsConfig) -> Self {
        let bars = history.bars();
        let start = bars.len().saturating_sub(config.window.max(1));
        let recent = &bars[start..];

        let high = recent.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        let low = recent.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        let close = recent.last().map_or(f64::NAN, |b| b.close);

        let pivot = (high + low + close) / 3.0;
        let range = high - low;

        Self {
            pivot,
            resistance_1: 2.0f64.mul_add(pivot, -low),
            resistance_2: pivot + range,
            support_1: 2.0f64.mul_add(pivot, -high),
            support_2: pivot - range,
            bars_used: recent.len(),
        }
    }

    /// Insufficient-data note when the range spans fewer bars than configured.
    #[must_use]
    pub fn shortfall(&self, config: &LevelsConfig) -> Option<Fallback> {
        (self.bars_used < config.window)
            .then(|| Fallback::insufficient("pivot_levels", config.window, self.bars_used))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dalal_traits::{Date, PriceBar};

    fn history(rows: &[(f64, f64, f64)]) -> PriceHistory {
        let start = Date::from_ymd_opt(2024, 2, 1).unwrap();
        let bars = rows
            .iter()
            .enumerate()
            .map(|(i, &(high, low, close))| {
                PriceBar::new(start + chrono::Days::new(i as u64), close, high, low, close, 10.0)
            })
            .collect();
        PriceHistory::new(bars).unwrap()
    }

    #[test]
    fn test_pivot_levels() {
        let history = history(&[(110.0, 95.0, 100.0), (120.0, 100.0, 105.0), (115.0, 90.0, 102.0)]);
        let levels = PivotLevels::compute(&history, &LevelsConfig::default());

        let p = (120.0 + 90.0 + 102.0) / 3.0;
        assert_relative_eq!(levels.pivot, p);
        assert_relative_eq!(levels.resistance_1, 2.0 * p - 90.0, epsilon = 1e-12);
        assert_relative_eq!(levels.support_1, 2.0 * p - 120.0, epsilon = 1e-12);
        assert_relative_eq!(levels.resistance_2, p + 30.0);
        assert_relative_eq!(levels.support_2, p - 30.0);
        assert!(levels.support_2 < levels.support_1);
        assert!(levels.resistance_1 < levels.resistance_2);
    }

    #[test]
    fn test_window_limits_range() {
        let history = history(&[(500.0, 1.0, 100.0), (110.0, 100.0, 105.0), (112.0, 101.0, 106.0)]);
        let config = LevelsConfig { window: 2 };
        let levels = PivotLevels::compute(&history, &config);
        assert_eq!(levels.bars_used, 2);
        assert_relative_eq!(levels.pivot, (112.0 + 100.0 + 106.0) / 3.0);
        assert!(levels.shortfall(&config).is_none());
    }

    #[test]
    fn test_short_history_shortfall() {
        let history = history(&[(11.0, 9.0, 10.0)]);
        let config = LevelsConfig::default();
        let levels = PivotLevels::compute(&history, &config);
        assert_eq!(levels.bars_used, 1);
        assert_eq!(
            levels.shortfall(&config),
            Some(Fallback::insufficient("pivot_levels", 20, 1))
        );
    }
}
