//! The valuation track: fair value from multiples blended with the technical
//! tally.

use crate::config::AnalysisConfig;
use crate::validate_snapshot;
use dalal_combine::{Category, CategoryScore, Recommendation};
use dalal_fundamentals::{IndustryComparison, ValuationEstimate};
use dalal_indicators::{IndicatorSuite, PivotLevels, TechnicalAnalysis};
use dalal_traits::{Fallback, IndicatorSet, MetricSnapshot, PriceHistory, Result, stats};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Input to the valuation analyzer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationInput {
    /// Valuation multiples and `current_price`.
    #[serde(default)]
    pub metrics: MetricSnapshot,
    /// Price history for the technical side, if available.
    #[serde(default)]
    pub history: Option<PriceHistory>,
}

/// Output of the valuation analyzer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationReport {
    /// Fair value, upside and rating.
    pub estimate: ValuationEstimate,
    /// Multiples against industry averages.
    pub industry: BTreeMap<String, IndustryComparison>,
    /// Full indicator set, when a history was supplied.
    pub indicators: Option<IndicatorSet>,
    /// Technical tally, when a history was supplied.
    pub technical: Option<TechnicalAnalysis>,
    /// Support and resistance, when a history was supplied.
    pub levels: Option<PivotLevels>,
    /// Technical tally as a category score; neutral without a history.
    pub technical_score: CategoryScore,
    /// Mean of the discretized upside score and the technical score.
    pub track_score: f64,
    /// Vote-based recommendation.
    pub recommendation: Recommendation,
    /// Absorbed conditions.
    pub notes: Vec<Fallback>,
}

/// Values a company from its multiples and price action.
///
/// When the snapshot has no `current_price`, the last close of the history is
/// used.
pub struct ValuationAnalyzer {
    config: AnalysisConfig,
    suite: IndicatorSuite,
}

impl ValuationAnalyzer {
    /// Create an analyzer. The indicator suite is built once from the config
    /// and always computes the SMA windows the technical tally reads.
    #[must_use]
    pub fn new(config: AnalysisConfig) -> Self {
        let suite =
            IndicatorSuite::from_config(&config.suite.clone().covering(&config.technical));
        Self { config, suite }
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one company.
    ///
    /// # Errors
    ///
    /// Returns an error for an infinite metric value or a misaligned
    /// indicator series.
    #[tracing::instrument(skip_all, fields(metrics = input.metrics.len(), bars = input.history.as_ref().map(PriceHistory::len)))]
    pub fn analyze(&self, input: &ValuationInput) -> Result<ValuationReport> {
        validate_snapshot(&input.metrics, 0)?;

        let mut metrics = input.metrics.clone();
        let has_price = metrics.get("current_price").is_some_and(|p| p.is_finite());
        if !has_price {
            if let Some(bar) = input.history.as_ref().and_then(PriceHistory::last) {
                tracing::debug!(close = bar.close, "using last close as current price");
                metrics.insert("current_price".to_string(), bar.close);
            }
        }

        let estimate = ValuationEstimate::estimate(&metrics, &self.config.valuation);
        let industry = IndustryComparison::compare_all(&metrics, &self.config.valuation);
        let mut notes = estimate.notes.clone();

        let (indicators, technical, levels) = match &input.history {
            Some(history) => {
                let indicators = self.suite.compute(history)?;
                let technical =
                    TechnicalAnalysis::evaluate(history, &indicators, &self.config.technical);
                let levels = PivotLevels::compute(history, &self.config.levels);
                notes.extend(technical.notes.iter().cloned());
                notes.extend(levels.shortfall(&self.config.levels));
                (Some(indicators), Some(technical), Some(levels))
            }
            None => {
                tracing::debug!("no price history, technical score neutral");
                notes.push(Fallback::insufficient("technical", 1, 0));
                (None, None, None)
            }
        };

        let technical_score = CategoryScore::fixed(
            Category::Technical,
            technical
                .as_ref()
                .map_or(stats::NEUTRAL_SCORE, TechnicalAnalysis::score),
        );
        let track_score =
            stats::clamp_score((estimate.rating.score() + technical_score.score) / 2.0);

        let mut votes = vec![("valuation", estimate.rating.vote())];
        if let Some(technical) = &technical {
            votes.push(("technical", technical.vote()));
        }
        let recommendation = Recommendation::from_votes(&votes);

        tracing::debug!(
            upside = estimate.upside,
            track_score,
            action = %recommendation.action,
            "valuation analysis complete"
        );

        Ok(ValuationReport {
            estimate,
            industry,
            indicators,
            technical,
            levels,
            technical_score,
            track_score,
            recommendation,
            notes,
        })
    }
}

impl Default for ValuationAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl fmt::Debug for ValuationAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuationAnalyzer")
            .field("config", &self.config)
            .field("suite", &self.suite)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dalal_combine::Action;
    use dalal_fundamentals::ValuationRating;
    use dalal_indicators::TechnicalRating;
    use dalal_traits::{Date, DalalError, PriceBar};

    fn rising_history(n: usize) -> PriceHistory {
        let start = Date::from_ymd_opt(2023, 1, 2).unwrap();
        let bars = (0..n)
            .map(|i| {
                let c = 100.0 + i as f64 * 0.5 + (i as f64 * 0.7).sin();
                PriceBar::new(
                    start + chrono::Days::new(i as u64),
                    c - 0.2,
                    c + 1.0,
                    c - 1.0,
                    c,
                    50_000.0,
                )
            })
            .collect();
        PriceHistory::new(bars).unwrap()
    }

    fn snapshot(pairs: &[(&str, f64)]) -> MetricSnapshot {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_metrics_only() {
        let input = ValuationInput {
            metrics: snapshot(&[("current_price", 100.0), ("pe_ratio", 11.0)]),
            history: None,
        };
        let report = ValuationAnalyzer::default().analyze(&input).unwrap();

        assert_eq!(report.estimate.rating, ValuationRating::HighlyUndervalued);
        assert!(report.technical.is_none());
        assert_relative_eq!(report.technical_score.score, 50.0);
        // (100 + 50) / 2
        assert_relative_eq!(report.track_score, 75.0);
        assert_eq!(report.recommendation.action, Action::StrongBuy);
        assert!(report.notes.contains(&Fallback::insufficient("technical", 1, 0)));
    }

    #[test]
    fn test_with_history() {
        let history = rising_history(260);
        let last_close = history.last().unwrap().close;
        let input = ValuationInput {
            metrics: snapshot(&[("pe_ratio", 22.0)]),
            history: Some(history),
        };
        let report = ValuationAnalyzer::default().analyze(&input).unwrap();

        // Price taken from the last close, P/E at the industry average.
        assert_relative_eq!(report.estimate.current_price.unwrap(), last_close);
        assert_relative_eq!(report.estimate.upside, 0.0, epsilon = 1e-9);

        let technical = report.technical.as_ref().unwrap();
        assert_ne!(technical.rating, TechnicalRating::Bearish);
        assert!(report.indicators.as_ref().unwrap().latest("sma_200").is_some());
        assert_eq!(report.levels.unwrap().bars_used, 20);
        assert!((0.0..=100.0).contains(&report.track_score));
    }

    #[test]
    fn test_short_history_notes() {
        let input = ValuationInput {
            metrics: snapshot(&[("current_price", 100.0)]),
            history: Some(rising_history(30)),
        };
        let report = ValuationAnalyzer::default().analyze(&input).unwrap();
        assert!(report.notes.iter().any(|n| matches!(
            n,
            Fallback::InsufficientData { subject, .. } if subject == "moving_averages"
        )));
    }

    #[test]
    fn test_custom_ma_window_is_computed() {
        let mut config = AnalysisConfig::default();
        config.technical.fast_ma_window = 30;
        let input = ValuationInput {
            metrics: snapshot(&[("current_price", 100.0)]),
            history: Some(rising_history(300)),
        };
        let report = ValuationAnalyzer::new(config).analyze(&input).unwrap();

        let technical = report.technical.as_ref().unwrap();
        assert_eq!(technical.signals.len(), 4);
        assert!(technical.signals.iter().any(|s| s.name == "moving_averages"));
        assert!(report.indicators.as_ref().unwrap().latest("sma_30").is_some());
        assert!(!report.notes.iter().any(|n| matches!(
            n,
            Fallback::InsufficientData { subject, .. }
                | Fallback::MissingIndicator { subject, .. } if subject == "moving_averages"
        )));
    }

    #[test]
    fn test_infinite_metric_rejected() {
        let input = ValuationInput {
            metrics: snapshot(&[("pe_ratio", f64::NEG_INFINITY)]),
            history: None,
        };
        let result = ValuationAnalyzer::default().analyze(&input);
        assert!(matches!(result, Err(DalalError::NonFiniteValue { .. })));
    }
}
