//! The fundamental track: ratios, growth and earnings quality combined into
//! one weighted score.

use crate::config::FundamentalConfig;
use dalal_combine::{
    Category, CategoryScore, Combiner, CompositeScore, Recommendation, WeightedCombiner,
};
use dalal_fundamentals::growth::MIN_CAGR_PERIODS;
use dalal_fundamentals::performance::metric_series;
use dalal_fundamentals::{
    EarningsQuality, FinancialPerformance, FinancialPeriod, GrowthAnalysis, PeerComparison,
};
use dalal_traits::{Fallback, MetricSnapshot, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Input to the fundamental analyzer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalInput {
    /// Sector name used for benchmark lookup.
    #[serde(default)]
    pub sector: String,
    /// Reporting periods, oldest first. The last period supplies the ratios.
    #[serde(default)]
    pub periods: Vec<FinancialPeriod>,
}

/// Output of the fundamental analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalReport {
    /// Requested sector.
    pub sector: String,
    /// Latest figures, year-over-year changes and trends.
    pub performance: FinancialPerformance,
    /// Every category score that was computed.
    pub categories: BTreeMap<Category, CategoryScore>,
    /// Growth rates and trends.
    pub growth: GrowthAnalysis,
    /// Earnings quality.
    pub quality: EarningsQuality,
    /// Comparison against sector benchmarks.
    pub peer: PeerComparison,
    /// Weighted overall score.
    pub composite: CompositeScore,
    /// Score-based recommendation.
    pub recommendation: Recommendation,
    /// Absorbed conditions.
    pub notes: Vec<Fallback>,
}

/// Scores a company from its reported fundamentals.
///
/// # Example
///
/// ```
/// use dalal_analysis::{FundamentalAnalyzer, FundamentalInput};
/// use dalal_fundamentals::FinancialPeriod;
///
/// let period = FinancialPeriod::new(
///     "FY24",
///     [("roe".to_string(), 28.0), ("debt_to_equity".to_string(), 0.05)].into(),
/// );
/// let input = FundamentalInput { sector: "IT".into(), periods: vec![period] };
///
/// let report = FundamentalAnalyzer::default().analyze(&input).unwrap();
/// assert!(report.composite.overall > 50.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FundamentalAnalyzer {
    config: FundamentalConfig,
    combiner: WeightedCombiner,
}

impl FundamentalAnalyzer {
    /// Create an analyzer.
    #[must_use]
    pub fn new(config: FundamentalConfig) -> Self {
        let combiner = WeightedCombiner::new(config.weights.clone());
        Self { config, combiner }
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &FundamentalConfig {
        &self.config
    }

    /// Analyze one company.
    ///
    /// # Errors
    ///
    /// Returns [`DalalError::NonFiniteValue`](dalal_traits::DalalError) when
    /// a period carries an infinite value.
    #[tracing::instrument(skip_all, fields(sector = %input.sector, periods = input.periods.len()))]
    pub fn analyze(&self, input: &FundamentalInput) -> Result<FundamentalReport> {
        for (index, period) in input.periods.iter().enumerate() {
            period.validate(index)?;
        }

        let benchmarks = &self.config.benchmarks;
        let mut notes = Vec::new();

        if !benchmarks.has_sector(&input.sector) {
            tracing::debug!("unknown sector, using default benchmarks");
            notes.push(Fallback::UnknownSector {
                sector: input.sector.clone(),
            });
        }
        if input.periods.len() < MIN_CAGR_PERIODS {
            tracing::debug!("too few periods for growth rates");
            notes.push(Fallback::insufficient(
                "growth",
                MIN_CAGR_PERIODS,
                input.periods.len(),
            ));
        }

        let empty = MetricSnapshot::new();
        let latest = input.periods.last().map_or(&empty, |p| &p.metrics);

        let mut categories = BTreeMap::new();
        for category in Category::RATIO {
            let score = CategoryScore::rate(category, latest, &input.sector, benchmarks);
            notes.extend(score.metrics.iter().filter_map(|m| m.note()));
            categories.insert(category, score);
        }

        let growth = GrowthAnalysis::from_periods(&input.periods);
        categories.insert(
            Category::Growth,
            CategoryScore::fixed(Category::Growth, growth.score()),
        );

        let net_profits: Vec<f64> = metric_series(&input.periods, "net_profit")
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        let last = input.periods.last();
        let quality = EarningsQuality::assess(
            last.and_then(|p| p.get("operating_cash_flow")),
            last.and_then(|p| p.get("net_profit")),
            &net_profits,
        );
        categories.insert(
            Category::Quality,
            CategoryScore::fixed(Category::Quality, quality.score),
        );

        let scores: Vec<CategoryScore> = categories.values().cloned().collect();
        let composite = self.combiner.combine(&scores)?;
        let recommendation = Recommendation::from_composite(&composite);

        tracing::debug!(
            overall = composite.overall,
            rating = %composite.rating,
            notes = notes.len(),
            "fundamental analysis complete"
        );

        Ok(FundamentalReport {
            sector: input.sector.clone(),
            performance: FinancialPerformance::from_periods(&input.periods),
            categories,
            growth,
            quality,
            peer: PeerComparison::compare(latest, &input.sector, benchmarks),
            composite,
            recommendation,
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dalal_combine::{Action, ScoreRating};
    use dalal_traits::DalalError;

    fn period(label: &str, pairs: &[(&str, f64)]) -> FinancialPeriod {
        FinancialPeriod::new(
            label,
            pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        )
    }

    #[test]
    fn test_empty_input_is_neutral() {
        let report = FundamentalAnalyzer::default()
            .analyze(&FundamentalInput {
                sector: "IT".to_string(),
                periods: Vec::new(),
            })
            .unwrap();

        for category in Category::RATIO {
            assert_relative_eq!(report.categories[&category].score, 50.0);
        }
        assert_relative_eq!(report.categories[&Category::Growth].score, 50.0);
        // Quality starts from its own base without data.
        assert_relative_eq!(report.categories[&Category::Quality].score, 70.0);
        // 0.85 * 50 + 0.15 * 70
        assert_relative_eq!(report.composite.overall, 53.0, epsilon = 1e-9);
        assert_eq!(report.recommendation.action, Action::Hold);
        assert!(report.notes.contains(&Fallback::insufficient("growth", 4, 0)));
    }

    #[test]
    fn test_strong_company() {
        let periods: Vec<FinancialPeriod> = (0..4)
            .map(|i| {
                let g = 1.25_f64.powi(i);
                period(
                    &format!("FY{}", 20 + i),
                    &[
                        ("revenue", 1000.0 * g),
                        ("net_profit", 200.0 * g),
                        ("operating_cash_flow", 260.0 * g),
                        ("revenue_growth", 25.0),
                        ("roe", 35.0),
                        ("roce", 40.0),
                        ("net_margin", 22.0),
                        ("current_ratio", 3.2),
                        ("debt_to_equity", 0.05),
                    ],
                )
            })
            .collect();

        let report = FundamentalAnalyzer::default()
            .analyze(&FundamentalInput {
                sector: "IT".to_string(),
                periods,
            })
            .unwrap();

        assert_relative_eq!(report.categories[&Category::Profitability].score, 100.0);
        assert_relative_eq!(report.categories[&Category::Leverage].score, 100.0);
        assert_relative_eq!(report.categories[&Category::Growth].score, 100.0);
        assert_relative_eq!(report.categories[&Category::Quality].score, 100.0);
        assert!(report.composite.overall >= 80.0);
        assert_eq!(report.composite.rating, ScoreRating::Excellent);
        assert_eq!(report.recommendation.action, Action::StrongBuy);
        assert!(report.performance.latest.contains_key("revenue"));
        assert_eq!(report.peer.sector.as_deref(), Some("IT"));
        assert!(report.notes.is_empty(), "{:?}", report.notes);
    }

    #[test]
    fn test_unknown_sector_and_metric_noted() {
        let report = FundamentalAnalyzer::default()
            .analyze(&FundamentalInput {
                sector: "Textiles".to_string(),
                periods: vec![period("FY24", &[("roe", 15.0), ("quick_ratio", 1.0)])],
            })
            .unwrap();

        assert!(report.notes.contains(&Fallback::UnknownSector {
            sector: "Textiles".to_string()
        }));
        assert!(report.notes.contains(&Fallback::UnknownMetric {
            metric: "quick_ratio".to_string()
        }));
        assert_relative_eq!(report.categories[&Category::Profitability].score, 75.0);
    }

    #[test]
    fn test_infinite_value_rejected() {
        let result = FundamentalAnalyzer::default().analyze(&FundamentalInput {
            sector: "IT".to_string(),
            periods: vec![period("FY24", &[("roe", f64::INFINITY)])],
        });
        assert!(matches!(result, Err(DalalError::NonFiniteValue { .. })));
    }
}
