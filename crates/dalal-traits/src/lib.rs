#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dalal/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core type and trait definitions for the dalal equity scoring engine.
//!
//! This crate provides the foundational abstractions shared by the indicator
//! library, the fundamental raters and the composite scoring engine.

/// The version of the dalal-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod fallback;
pub mod indicator;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{DalalError, Result};
pub use fallback::Fallback;
pub use indicator::{Indicator, IndicatorSet};
pub use types::{Date, MetricSnapshot, PriceBar, PriceField, PriceHistory, Symbol};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
