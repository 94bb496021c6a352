//! Scoring categories and the tier points table.

use dalal_fundamentals::{MetricValue, RatingTier, SectorBenchmarks};
use dalal_traits::{MetricSnapshot, stats};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scoring category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Returns and margins.
    Profitability,
    /// Short-term solvency.
    Liquidity,
    /// Indebtedness.
    Leverage,
    /// Asset utilisation.
    Efficiency,
    /// Price-based signal tally.
    Technical,
    /// Revenue and profit growth.
    Growth,
    /// Earnings quality.
    Quality,
}

impl Category {
    /// Every category.
    pub const ALL: [Self; 7] = [
        Self::Profitability,
        Self::Liquidity,
        Self::Leverage,
        Self::Efficiency,
        Self::Technical,
        Self::Growth,
        Self::Quality,
    ];

    /// Categories scored from rated ratios.
    pub const RATIO: [Self; 4] = [
        Self::Profitability,
        Self::Liquidity,
        Self::Leverage,
        Self::Efficiency,
    ];

    /// Snake-case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Profitability => "profitability",
            Self::Liquidity => "liquidity",
            Self::Leverage => "leverage",
            Self::Efficiency => "efficiency",
            Self::Technical => "technical",
            Self::Growth => "growth",
            Self::Quality => "quality",
        }
    }

    /// Metrics rated for a ratio category. Empty for the others.
    #[must_use]
    pub const fn metrics(&self) -> &'static [&'static str] {
        match self {
            Self::Profitability => &[
                "roe",
                "roce",
                "roa",
                "net_margin",
                "operating_margin",
                "ebitda_margin",
            ],
            Self::Liquidity => &["current_ratio", "quick_ratio", "cash_ratio"],
            Self::Leverage => &["debt_to_equity", "debt_to_assets", "interest_coverage"],
            Self::Efficiency => &[
                "asset_turnover",
                "inventory_turnover",
                "receivables_turnover",
            ],
            Self::Technical | Self::Growth | Self::Quality => &[],
        }
    }

    /// Whether the category reads tiers from the inverted points column.
    #[must_use]
    pub const fn is_inverted(&self) -> bool {
        matches!(self, Self::Leverage)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier to (standard, inverted) points.
const TIER_POINTS: [(RatingTier, f64, f64); 5] = [
    (RatingTier::Excellent, 100.0, 100.0),
    (RatingTier::Good, 75.0, 75.0),
    (RatingTier::Average, 50.0, 50.0),
    (RatingTier::BelowAverage, 25.0, 75.0),
    (RatingTier::Concerning, 10.0, 25.0),
];

/// Points a tier earns. `None` for [`RatingTier::NotAvailable`].
///
/// # Examples
///
/// ```
/// use dalal_combine::tier_points;
/// use dalal_fundamentals::RatingTier;
///
/// assert_eq!(tier_points(RatingTier::Good, false), Some(75.0));
/// assert_eq!(tier_points(RatingTier::Concerning, true), Some(25.0));
/// assert_eq!(tier_points(RatingTier::NotAvailable, false), None);
/// ```
#[must_use]
pub fn tier_points(tier: RatingTier, inverted: bool) -> Option<f64> {
    TIER_POINTS
        .iter()
        .find(|(t, _, _)| *t == tier)
        .map(|&(_, standard, inverse)| if inverted { inverse } else { standard })
}

/// One category's score with the ratings behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    /// The category.
    pub category: Category,
    /// Score in `[0, 100]`.
    pub score: f64,
    /// Ratings of the category's metrics, including unrated ones.
    pub metrics: Vec<MetricValue>,
}

impl CategoryScore {
    /// A score computed elsewhere, with no metric breakdown.
    #[must_use]
    pub fn fixed(category: Category, score: f64) -> Self {
        Self {
            category,
            score: stats::clamp_score(score),
            metrics: Vec::new(),
        }
    }

    /// Score from already-rated metrics.
    ///
    /// The score is the mean of the points of rated metrics, or 50 when none
    /// is rated.
    #[must_use]
    pub fn from_ratings(category: Category, metrics: Vec<MetricValue>) -> Self {
        let points: Vec<f64> = metrics
            .iter()
            .filter_map(|m| tier_points(m.tier, category.is_inverted()))
            .collect();
        let score = stats::mean(&points).unwrap_or(stats::NEUTRAL_SCORE);
        Self {
            category,
            score: stats::clamp_score(score),
            metrics,
        }
    }

    /// Rate the category's metrics that appear in `snapshot` and score them.
    ///
    /// # Example
    ///
    /// ```
    /// use dalal_combine::{Category, CategoryScore};
    /// use dalal_fundamentals::SectorBenchmarks;
    ///
    /// let snapshot = std::collections::BTreeMap::from([("roe".to_string(), 30.0), ("roce".to_string(), 19.0)]);
    /// let score = CategoryScore::rate(Category::Profitability, &snapshot, "Auto", &SectorBenchmarks::nse());
    /// assert_eq!(score.score, 87.5);
    /// ```
    #[must_use]
    pub fn rate(
        category: Category,
        snapshot: &MetricSnapshot,
        sector: &str,
        benchmarks: &SectorBenchmarks,
    ) -> Self {
        let metrics: Vec<MetricValue> = category
            .metrics()
            .iter()
            .filter_map(|name| {
                let value = snapshot.get(*name).copied().filter(|v| v.is_finite())?;
                Some(MetricValue::rate(name, value, sector, benchmarks))
            })
            .collect();

        let rated = metrics.iter().filter(|m| m.tier.is_rated()).count();
        tracing::trace!(%category, present = metrics.len(), rated, "rated category metrics");
        if rated == 0 {
            tracing::debug!(%category, "no rated metrics, neutral score");
        }
        Self::from_ratings(category, metrics)
    }

    /// Number of metrics that contributed points.
    #[must_use]
    pub fn contributing(&self) -> usize {
        self.metrics.iter().filter(|m| m.tier.is_rated()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn snapshot(pairs: &[(&str, f64)]) -> MetricSnapshot {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_empty_category_is_neutral() {
        let benchmarks = SectorBenchmarks::nse();
        for category in Category::ALL {
            let score = CategoryScore::rate(category, &MetricSnapshot::new(), "IT", &benchmarks);
            assert_relative_eq!(score.score, 50.0);
            assert_eq!(score.contributing(), 0);
        }
    }

    #[test]
    fn test_unrated_metrics_excluded() {
        // quick_ratio has no benchmark anywhere
        let scores = CategoryScore::rate(
            Category::Liquidity,
            &snapshot(&[("current_ratio", 3.5), ("quick_ratio", 0.2)]),
            "IT",
            &SectorBenchmarks::nse(),
        );
        assert_eq!(scores.metrics.len(), 2);
        assert_eq!(scores.contributing(), 1);
        assert_relative_eq!(scores.score, 100.0);
    }

    #[test]
    fn test_leverage_uses_inverted_column() {
        let concerning = CategoryScore::rate(
            Category::Leverage,
            &snapshot(&[("debt_to_equity", 2.0)]),
            "Auto",
            &SectorBenchmarks::nse(),
        );
        assert_eq!(concerning.metrics[0].tier, RatingTier::Concerning);
        assert_relative_eq!(concerning.score, 25.0);

        let excellent = CategoryScore::rate(
            Category::Leverage,
            &snapshot(&[("debt_to_equity", 0.1)]),
            "Auto",
            &SectorBenchmarks::nse(),
        );
        assert_relative_eq!(excellent.score, 100.0);
    }

    #[test]
    fn test_tier_table() {
        assert_eq!(tier_points(RatingTier::BelowAverage, false), Some(25.0));
        assert_eq!(tier_points(RatingTier::BelowAverage, true), Some(75.0));
        assert_eq!(tier_points(RatingTier::Concerning, false), Some(10.0));
        assert_eq!(tier_points(RatingTier::Excellent, true), Some(100.0));
    }

    #[test]
    fn test_fixed_is_clamped() {
        assert_relative_eq!(CategoryScore::fixed(Category::Growth, 140.0).score, 100.0);
        assert_relative_eq!(CategoryScore::fixed(Category::Quality, f64::NAN).score, 50.0);
    }

    #[test]
    fn test_non_finite_values_skipped() {
        let score = CategoryScore::rate(
            Category::Profitability,
            &snapshot(&[("roe", f64::NAN)]),
            "IT",
            &SectorBenchmarks::nse(),
        );
        assert!(score.metrics.is_empty());
        assert_relative_eq!(score.score, 50.0);
    }
}
