//! Analyzer configuration.

use dalal_combine::CategoryWeights;
use dalal_fundamentals::{SectorBenchmarks, ValuationConfig};
use dalal_indicators::{LevelsConfig, SuiteConfig, TechnicalConfig};
use dalal_traits::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the fundamental track.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundamentalConfig {
    /// Sector benchmark tables (default: built-in NSE tables)
    pub benchmarks: SectorBenchmarks,
    /// Composite weights (default: profitability 0.30, growth 0.25,
    /// leverage 0.20, quality 0.15, liquidity 0.10)
    pub weights: CategoryWeights,
}

/// Full analyzer configuration.
///
/// Partial JSON documents are filled from defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Fundamental track.
    pub fundamental: FundamentalConfig,
    /// Valuation estimator.
    pub valuation: ValuationConfig,
    /// Indicator suite.
    pub suite: SuiteConfig,
    /// Technical tally thresholds.
    pub technical: TechnicalConfig,
    /// Support and resistance window.
    pub levels: LevelsConfig,
}

impl AnalysisConfig {
    /// Parse a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or invalid weights.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading analysis config");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dalal_combine::Category;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.fundamental.weights.len(), 5);
        assert_eq!(config.suite.sma_windows, vec![20, 50, 200]);
        assert_eq!(config.levels.window, 20);
    }

    #[test]
    fn test_partial_document() {
        let json = r#"{
            "fundamental": {"weights": {"profitability": 0.6, "growth": 0.4}},
            "levels": {"window": 10}
        }"#;
        let config = AnalysisConfig::from_json_str(json).unwrap();
        assert_eq!(config.fundamental.weights.get(Category::Growth), Some(0.4));
        assert_eq!(config.fundamental.weights.get(Category::Quality), None);
        assert_eq!(config.levels.window, 10);
        assert!(config.fundamental.benchmarks.has_sector("IT"));
    }

    #[test]
    fn test_invalid_weight_rejected() {
        let json = r#"{"fundamental": {"weights": {"growth": -0.5}}}"#;
        assert!(AnalysisConfig::from_json_str(json).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(AnalysisConfig::from_path("/nonexistent/dalal.json").is_err());
    }
}
