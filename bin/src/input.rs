//! Input loading utilities for the dalal CLI.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use dalal_analysis::{AnalysisConfig, EquityInput};
use dalal_traits::{PriceBar, PriceHistory};
use std::path::Path;

/// Load a price history from a JSON array of bars.
pub(crate) fn load_history(path: &Path) -> Result<PriceHistory> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading price history {}", path.display()))?;
    let bars: Vec<PriceBar> = serde_json::from_str(&json)
        .with_context(|| format!("parsing price history {}", path.display()))?;
    tracing::debug!(bars = bars.len(), "loaded price history");
    Ok(PriceHistory::new(bars)?)
}

/// Load an equity input document.
pub(crate) fn load_equity(path: &Path) -> Result<EquityInput> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading equity input {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing equity input {}", path.display()))
}

/// Load a configuration file, or the defaults when no path is given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

/// Parse a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{date_str}', expected YYYY-MM-DD"))
}

/// Keep the bars dated on or before `as_of`.
pub(crate) fn truncate_history(history: &PriceHistory, as_of: NaiveDate) -> Result<PriceHistory> {
    let bars: Vec<PriceBar> = history
        .bars()
        .iter()
        .filter(|bar| bar.date <= as_of)
        .copied()
        .collect();
    if bars.is_empty() {
        anyhow::bail!("no bars on or before {as_of}");
    }
    Ok(PriceHistory::new(bars)?)
}
