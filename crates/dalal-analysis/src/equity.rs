//! Both tracks plus the cross-source blend.

use crate::config::AnalysisConfig;
use crate::fundamental::{FundamentalAnalyzer, FundamentalInput, FundamentalReport};
use crate::valuation::{ValuationAnalyzer, ValuationInput, ValuationReport};
use dalal_combine::{BlendInput, BlendScore};
use dalal_fundamentals::FinancialPeriod;
use dalal_traits::{MetricSnapshot, PriceHistory, Result, Symbol};
use serde::{Deserialize, Serialize};

/// Everything known about one equity.
///
/// External scores (sentiment, macro, geopolitical) come from collaborators
/// outside this workspace and are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquityInput {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Sector name.
    pub sector: String,
    /// Reporting periods, oldest first.
    pub periods: Vec<FinancialPeriod>,
    /// Valuation multiples and `current_price`.
    pub metrics: MetricSnapshot,
    /// Daily price history.
    pub history: Option<PriceHistory>,
    /// News sentiment compound score in `[-1, 1]`.
    pub sentiment: Option<f64>,
    /// Macro economic health score in `[0, 100]`.
    pub macro_health: Option<f64>,
    /// Geopolitical risk score in `[0, 100]`.
    pub geopolitical_risk: Option<f64>,
}

/// Reports of both tracks and the blend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityReport {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Fundamental track.
    pub fundamental: FundamentalReport,
    /// Valuation track.
    pub valuation: ValuationReport,
    /// Cross-source blend.
    pub blend: BlendScore,
}

/// Runs the fundamental and valuation tracks and blends them with external
/// scores.
#[derive(Debug, Default)]
pub struct EquityAnalyzer {
    fundamental: FundamentalAnalyzer,
    valuation: ValuationAnalyzer,
}

impl EquityAnalyzer {
    /// Create an analyzer from a full configuration.
    #[must_use]
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            fundamental: FundamentalAnalyzer::new(config.fundamental.clone()),
            valuation: ValuationAnalyzer::new(config),
        }
    }

    /// Analyze one equity.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed input in either track.
    #[tracing::instrument(skip_all, fields(symbol = %input.symbol))]
    pub fn analyze(&self, input: &EquityInput) -> Result<EquityReport> {
        let fundamental = self.fundamental.analyze(&FundamentalInput {
            sector: input.sector.clone(),
            periods: input.periods.clone(),
        })?;
        let valuation = self.valuation.analyze(&ValuationInput {
            metrics: input.metrics.clone(),
            history: input.history.clone(),
        })?;

        let upside = valuation
            .estimate
            .notes
            .is_empty()
            .then_some(valuation.estimate.upside);
        let blend = BlendScore::compute(&BlendInput {
            sentiment: input.sentiment,
            macro_health: input.macro_health,
            geopolitical_risk: input.geopolitical_risk,
            valuation_upside: upside,
            fundamental_score: Some(fundamental.composite.overall),
        });

        Ok(EquityReport {
            symbol: input.symbol.clone(),
            fundamental,
            valuation,
            blend,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_minimal_input() {
        let input = EquityInput {
            symbol: "INFY".to_string(),
            sector: "IT".to_string(),
            ..EquityInput::default()
        };
        let report = EquityAnalyzer::default().analyze(&input).unwrap();

        assert_eq!(report.symbol, "INFY");
        // No price, so no upside enters the blend.
        assert!(!report.blend.components.contains_key("valuation"));
        assert_relative_eq!(
            report.blend.components["fundamental"],
            report.fundamental.composite.overall
        );
    }

    #[test]
    fn test_external_scores_blended() {
        let input = EquityInput {
            symbol: "TCS".to_string(),
            sector: "IT".to_string(),
            metrics: [
                ("current_price".to_string(), 100.0),
                ("pe_ratio".to_string(), 22.0),
            ]
            .into(),
            sentiment: Some(0.0),
            geopolitical_risk: Some(50.0),
            ..EquityInput::default()
        };
        let report = EquityAnalyzer::default().analyze(&input).unwrap();

        assert_eq!(report.blend.components.len(), 4);
        assert_relative_eq!(report.blend.components["sentiment"], 50.0);
        assert_relative_eq!(report.blend.components["valuation"], 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "symbol": "ITC",
            "sector": "FMCG",
            "periods": [{"label": "FY24", "metrics": {"roe": 30.0}}],
            "metrics": {"current_price": 450.0}
        }"#;
        let input: EquityInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.periods.len(), 1);
        assert!(input.history.is_none());
        assert!(EquityAnalyzer::default().analyze(&input).is_ok());
    }
}
