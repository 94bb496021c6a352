//! Rating a metric against its sector benchmark.
//!
//! For benchmark `b` and value `v`:
//!
//! | Tier | Higher is better | Lower is better |
//! |------|------------------|-----------------|
//! | Excellent | `v >= 1.2b` | `v <= 0.8b` |
//! | Good | `v >= b` | `v <= b` |
//! | Average | `v >= 0.8b` | `v <= 1.2b` |
//! | Below Average | otherwise | |
//! | Concerning | | otherwise |
//!
//! Metrics without a benchmark, with a non-positive benchmark, or without a
//! known polarity are rated N/A and excluded from category scores.

use crate::benchmark::{BenchmarkSource, SectorBenchmarks};
use dalal_traits::Fallback;
use serde::{Deserialize, Serialize};
use std::fmt;

const HIGHER_IS_BETTER: &[&str] = &[
    "roe",
    "roce",
    "roa",
    "net_margin",
    "operating_margin",
    "ebitda_margin",
    "gross_margin",
    "current_ratio",
    "quick_ratio",
    "cash_ratio",
    "interest_coverage",
    "asset_turnover",
    "inventory_turnover",
    "receivables_turnover",
];

const LOWER_IS_BETTER: &[&str] = &["debt_to_equity", "debt_to_assets"];

/// Whether a larger value of a metric is favourable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricPolarity {
    /// Returns, margins, liquidity, coverage and turnover.
    HigherIsBetter,
    /// Leverage ratios.
    LowerIsBetter,
}

impl MetricPolarity {
    /// Polarity of a known metric.
    ///
    /// # Examples
    ///
    /// ```
    /// use dalal_fundamentals::MetricPolarity;
    ///
    /// assert_eq!(MetricPolarity::of("roe"), Some(MetricPolarity::HigherIsBetter));
    /// assert_eq!(MetricPolarity::of("debt_to_equity"), Some(MetricPolarity::LowerIsBetter));
    /// assert_eq!(MetricPolarity::of("market_cap"), None);
    /// ```
    #[must_use]
    pub fn of(metric: &str) -> Option<Self> {
        if HIGHER_IS_BETTER.contains(&metric) {
            Some(Self::HigherIsBetter)
        } else if LOWER_IS_BETTER.contains(&metric) {
            Some(Self::LowerIsBetter)
        } else {
            None
        }
    }
}

/// Qualitative tier of a metric relative to its benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingTier {
    /// Well ahead of the benchmark.
    Excellent,
    /// At or ahead of the benchmark.
    Good,
    /// Within 20% on the unfavourable side.
    Average,
    /// Well behind a higher-is-better benchmark.
    BelowAverage,
    /// Well beyond a lower-is-better benchmark.
    Concerning,
    /// Not rated.
    NotAvailable,
}

impl RatingTier {
    /// Classify `value` against `benchmark`.
    ///
    /// Non-finite inputs or a non-positive benchmark give
    /// [`RatingTier::NotAvailable`].
    #[must_use]
    pub fn classify(value: f64, benchmark: f64, polarity: MetricPolarity) -> Self {
        if !value.is_finite() || !benchmark.is_finite() || benchmark <= 0.0 {
            return Self::NotAvailable;
        }
        match polarity {
            MetricPolarity::HigherIsBetter => {
                if value >= benchmark * 1.2 {
                    Self::Excellent
                } else if value >= benchmark {
                    Self::Good
                } else if value >= benchmark * 0.8 {
                    Self::Average
                } else {
                    Self::BelowAverage
                }
            }
            MetricPolarity::LowerIsBetter => {
                if value <= benchmark * 0.8 {
                    Self::Excellent
                } else if value <= benchmark {
                    Self::Good
                } else if value <= benchmark * 1.2 {
                    Self::Average
                } else {
                    Self::Concerning
                }
            }
        }
    }

    /// Whether this tier takes part in scoring.
    #[must_use]
    pub const fn is_rated(&self) -> bool {
        !matches!(self, Self::NotAvailable)
    }

    /// Display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::BelowAverage => "Below Average",
            Self::Concerning => "Concerning",
            Self::NotAvailable => "N/A",
        }
    }
}

impl fmt::Display for RatingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One metric value with its benchmark and tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    /// Metric name.
    pub name: String,
    /// Company value.
    pub value: f64,
    /// Benchmark used, if any.
    pub benchmark: Option<f64>,
    /// Lookup layer the benchmark came from.
    pub source: BenchmarkSource,
    /// Metric polarity, if known.
    pub polarity: Option<MetricPolarity>,
    /// Resulting tier.
    pub tier: RatingTier,
}

impl MetricValue {
    /// Rate `value` for `metric` using the sector's benchmarks.
    ///
    /// # Example
    ///
    /// ```
    /// use dalal_fundamentals::{MetricValue, RatingTier, SectorBenchmarks};
    ///
    /// let benchmarks = SectorBenchmarks::nse();
    /// let rated = MetricValue::rate("roe", 31.0, "IT", &benchmarks);
    /// assert_eq!(rated.tier, RatingTier::Excellent);
    /// ```
    #[must_use]
    pub fn rate(metric: &str, value: f64, sector: &str, benchmarks: &SectorBenchmarks) -> Self {
        let lookup = benchmarks.lookup(sector, metric);
        let polarity = MetricPolarity::of(metric);
        let tier = match (lookup.value, polarity) {
            (Some(b), Some(p)) => RatingTier::classify(value, b, p),
            _ => RatingTier::NotAvailable,
        };
        Self {
            name: metric.to_string(),
            value,
            benchmark: lookup.value,
            source: lookup.source,
            polarity,
            tier,
        }
    }

    /// Why the metric went unrated, if it did.
    #[must_use]
    pub fn note(&self) -> Option<Fallback> {
        if self.tier.is_rated() {
            return None;
        }
        match (self.benchmark, self.polarity) {
            (Some(_), Some(_)) => Some(Fallback::invalid_divisor(self.name.clone())),
            _ => Some(Fallback::UnknownMetric {
                metric: self.name.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_higher_is_better_tiers() {
        let p = MetricPolarity::HigherIsBetter;
        assert_eq!(RatingTier::classify(12.5, 10.0, p), RatingTier::Excellent);
        assert_eq!(RatingTier::classify(10.0, 10.0, p), RatingTier::Good);
        assert_eq!(RatingTier::classify(8.5, 10.0, p), RatingTier::Average);
        assert_eq!(RatingTier::classify(7.9, 10.0, p), RatingTier::BelowAverage);
    }

    #[test]
    fn test_lower_is_better_tiers() {
        let p = MetricPolarity::LowerIsBetter;
        assert_eq!(RatingTier::classify(0.35, 0.5, p), RatingTier::Excellent);
        assert_eq!(RatingTier::classify(0.5, 0.5, p), RatingTier::Good);
        assert_eq!(RatingTier::classify(0.55, 0.5, p), RatingTier::Average);
        assert_eq!(RatingTier::classify(0.61, 0.5, p), RatingTier::Concerning);
    }

    #[test]
    fn test_zero_benchmark_not_available() {
        let tier = RatingTier::classify(5.0, 0.0, MetricPolarity::HigherIsBetter);
        assert_eq!(tier, RatingTier::NotAvailable);
        assert!(!tier.is_rated());
        assert_eq!(tier.to_string(), "N/A");
    }

    #[test]
    fn test_rate_missing_benchmark() {
        let benchmarks = SectorBenchmarks::nse();
        let rated = MetricValue::rate("quick_ratio", 1.1, "IT", &benchmarks);
        assert_eq!(rated.tier, RatingTier::NotAvailable);
        assert_eq!(rated.source, BenchmarkSource::Missing);
        assert_eq!(
            rated.note(),
            Some(Fallback::UnknownMetric {
                metric: "quick_ratio".to_string()
            })
        );
    }

    #[test]
    fn test_rate_unknown_polarity() {
        let benchmarks = SectorBenchmarks::nse().with_sector(
            "IT",
            [("pe_ratio".to_string(), 20.0)].into_iter().collect(),
        );
        let rated = MetricValue::rate("pe_ratio", 18.0, "IT", &benchmarks);
        assert_eq!(rated.tier, RatingTier::NotAvailable);
        assert!(rated.note().is_some());
    }

    #[test]
    fn test_rate_unknown_sector_uses_default() {
        let benchmarks = SectorBenchmarks::nse();
        let rated = MetricValue::rate("debt_to_equity", 0.3, "Textiles", &benchmarks);
        assert_eq!(rated.source, BenchmarkSource::Default);
        assert_eq!(rated.benchmark, Some(0.5));
        assert_eq!(rated.tier, RatingTier::Excellent);
        assert!(rated.note().is_none());
    }

    #[test]
    fn test_rate_zero_benchmark_is_invalid_divisor() {
        let benchmarks = SectorBenchmarks::nse()
            .with_sector("Shell", [("roe".to_string(), 0.0)].into_iter().collect());
        let rated = MetricValue::rate("roe", 10.0, "Shell", &benchmarks);
        assert_eq!(rated.note(), Some(Fallback::invalid_divisor("roe")));
    }
}
