//! Indicator registry for discovering and categorizing available indicators.
//!
//! This module provides metadata for every indicator in the library: the
//! series names each one publishes and the bars it needs before its first
//! defined value under the default configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Indicator category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IndicatorCategory {
    /// Trend-following averages
    MovingAverage,
    /// Momentum oscillators
    Momentum,
    /// Volatility measures
    Volatility,
    /// Volume-flow measures
    Volume,
    /// Price levels derived from recent ranges
    Levels,
}

impl IndicatorCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::MovingAverage => "Trend-following moving averages of closing prices",
            Self::Momentum => "Oscillators measuring the speed of price changes",
            Self::Volatility => "Dispersion and range of recent prices",
            Self::Volume => "Cumulative volume flow and volume-weighted prices",
            Self::Levels => "Support and resistance from recent trading ranges",
        }
    }
}

impl fmt::Display for IndicatorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MovingAverage => "Moving Average",
            Self::Momentum => "Momentum",
            Self::Volatility => "Volatility",
            Self::Volume => "Volume",
            Self::Levels => "Levels",
        };
        f.write_str(label)
    }
}

/// Metadata about an indicator.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorInfo {
    /// Unique identifier for the indicator
    pub name: &'static str,

    /// Category classification
    pub category: IndicatorCategory,

    /// Human-readable description
    pub description: &'static str,

    /// Bars needed before the first defined value, default configuration
    pub lookback: usize,

    /// Series names published into an `IndicatorSet`
    pub outputs: &'static [&'static str],
}

/// Get information about all available indicators.
#[must_use]
pub fn available_indicators() -> Vec<IndicatorInfo> {
    vec![
        IndicatorInfo {
            name: "sma",
            category: IndicatorCategory::MovingAverage,
            description: "Simple moving average of closes (standard windows 20, 50, 200)",
            lookback: 20,
            outputs: &["sma_20", "sma_50", "sma_200"],
        },
        IndicatorInfo {
            name: "ema",
            category: IndicatorCategory::MovingAverage,
            description: "Exponential moving average seeded by the first close",
            lookback: 1,
            outputs: &["ema_12", "ema_26"],
        },
        IndicatorInfo {
            name: "rsi",
            category: IndicatorCategory::Momentum,
            description: "14-period Relative Strength Index from simple mean gains and losses",
            lookback: 15,
            outputs: &["rsi"],
        },
        IndicatorInfo {
            name: "macd",
            category: IndicatorCategory::Momentum,
            description: "EMA(12) - EMA(26) with a 9-period signal line and histogram",
            lookback: 26,
            outputs: &["macd", "macd_signal", "macd_histogram"],
        },
        IndicatorInfo {
            name: "bollinger",
            category: IndicatorCategory::Volatility,
            description: "20-period SMA with bands two sample deviations away",
            lookback: 20,
            outputs: &["bb_upper", "bb_middle", "bb_lower"],
        },
        IndicatorInfo {
            name: "atr",
            category: IndicatorCategory::Volatility,
            description: "14-period simple mean of the true range",
            lookback: 14,
            outputs: &["atr"],
        },
        IndicatorInfo {
            name: "obv",
            category: IndicatorCategory::Volume,
            description: "On-balance volume accumulated from the first bar",
            lookback: 1,
            outputs: &["obv"],
        },
        IndicatorInfo {
            name: "vwap",
            category: IndicatorCategory::Volume,
            description: "Volume-weighted typical price accumulated from the first bar",
            lookback: 1,
            outputs: &["vwap"],
        },
        IndicatorInfo {
            name: "pivot_levels",
            category: IndicatorCategory::Levels,
            description: "Classic pivot, two supports and two resistances over 20 bars",
            lookback: 20,
            outputs: &[],
        },
    ]
}

/// Get all indicators in a specific category.
#[must_use]
pub fn indicators_by_category(category: IndicatorCategory) -> Vec<IndicatorInfo> {
    available_indicators()
        .into_iter()
        .filter(|info| info.category == category)
        .collect()
}

/// Get information about a specific indicator by name.
#[must_use]
pub fn get_indicator_info(name: &str) -> Option<IndicatorInfo> {
    available_indicators()
        .into_iter()
        .find(|info| info.name == name)
}

/// Find the indicator that publishes a given series name.
#[must_use]
pub fn find_by_output(series: &str) -> Option<IndicatorInfo> {
    available_indicators()
        .into_iter()
        .find(|info| info.outputs.contains(&series))
}

/// Get all categories that have indicators, in declaration order.
#[must_use]
pub fn available_categories() -> Vec<IndicatorCategory> {
    let mut categories: Vec<_> = available_indicators()
        .into_iter()
        .map(|info| info.category)
        .collect();
    categories.sort();
    categories.dedup();
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_indicators() {
        let indicators = available_indicators();
        assert_eq!(indicators.len(), 9);

        let mut names: Vec<_> = indicators.iter().map(|i| i.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 9);
    }

    #[test]
    fn test_indicators_by_category() {
        assert_eq!(indicators_by_category(IndicatorCategory::MovingAverage).len(), 2);
        assert_eq!(indicators_by_category(IndicatorCategory::Momentum).len(), 2);
        assert_eq!(indicators_by_category(IndicatorCategory::Volatility).len(), 2);
        assert_eq!(indicators_by_category(IndicatorCategory::Volume).len(), 2);
        assert_eq!(indicators_by_category(IndicatorCategory::Levels).len(), 1);
    }

    #[test]
    fn test_get_indicator_info() {
        let info = get_indicator_info("macd").unwrap();
        assert_eq!(info.category, IndicatorCategory::Momentum);
        assert_eq!(info.lookback, 26);
        assert!(get_indicator_info("stochastic").is_none());
    }

    #[test]
    fn test_find_by_output() {
        assert_eq!(find_by_output("bb_lower").unwrap().name, "bollinger");
        assert_eq!(find_by_output("sma_200").unwrap().name, "sma");
        assert!(find_by_output("pivot").is_none());
    }

    #[test]
    fn test_available_categories() {
        let categories = available_categories();
        assert_eq!(categories.len(), 5);
        assert_eq!(categories[0], IndicatorCategory::MovingAverage);
        assert!(!IndicatorCategory::Levels.description().is_empty());
    }

    #[test]
    fn test_outputs_match_standard_suite() {
        let suite = crate::IndicatorSuite::standard();
        let published: Vec<&str> = available_indicators()
            .iter()
            .flat_map(|info| info.outputs.iter().copied())
            .collect();
        for name in suite.series_names() {
            assert!(published.contains(&name.as_str()), "{name} not registered");
        }
    }
}
