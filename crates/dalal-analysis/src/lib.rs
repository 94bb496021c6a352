#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dalal/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod config;
pub mod equity;
pub mod fundamental;
pub mod valuation;

// Re-export main types
pub use config::{AnalysisConfig, FundamentalConfig};
pub use equity::{EquityAnalyzer, EquityInput, EquityReport};
pub use fundamental::{FundamentalAnalyzer, FundamentalInput, FundamentalReport};
pub use valuation::{ValuationAnalyzer, ValuationInput, ValuationReport};

use dalal_traits::{DalalError, MetricSnapshot, Result};

/// Reject infinite metric values. `NaN` is accepted as "not reported".
pub(crate) fn validate_snapshot(metrics: &MetricSnapshot, index: usize) -> Result<()> {
    match metrics.iter().find(|(_, v)| v.is_infinite()) {
        Some((name, _)) => Err(DalalError::NonFiniteValue {
            field: name.clone(),
            index,
        }),
        None => Ok(()),
    }
}
