#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dalal/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! ## Architecture
//!
//! Data flows leaves-first:
//!
//! 1. **Indicators** compute aligned series from a [`PriceHistory`]
//! 2. **Raters** classify ratios against sector benchmarks
//! 3. **Category scorers** turn tiers into 0-100 scores
//! 4. **Combiners** weight category scores into a [`CompositeScore`]
//! 5. **Analyzers** wire the above together per call
//!
//! Short histories, zero divisors and unknown sectors never fail a call.
//! They yield neutral values and a [`Fallback`] note on the report.

/// Version information for the dalal crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Shared types, the [`Indicator`] trait and error handling.
pub mod traits {
    pub use dalal_traits::*;
}

pub use dalal_traits::{
    DalalError, Date, Fallback, Indicator, IndicatorSet, MetricSnapshot, PriceBar, PriceField,
    PriceHistory, Result, Symbol,
};

// ============================================================================
// Indicators
// ============================================================================

/// Technical indicators.
///
/// | Category | Indicators |
/// |----------|------------|
/// | Moving average | SMA, EMA |
/// | Momentum | RSI, MACD |
/// | Volatility | Bollinger Bands, ATR |
/// | Volume | OBV, VWAP |
/// | Levels | pivot support and resistance |
///
/// # Example
///
/// ```
/// use dalal::indicators::moving_average::sma;
///
/// let out = sma(&[1.0, 2.0, 3.0, 4.0], 2);
/// assert!(out[0].is_nan());
/// assert_eq!(out[3], 3.5);
/// ```
pub mod indicators {
    pub use dalal_indicators::*;
}

// ============================================================================
// Fundamentals
// ============================================================================

/// Growth, ratio rating, earnings quality and valuation.
pub mod fundamentals {
    pub use dalal_fundamentals::*;
}

// ============================================================================
// Combination
// ============================================================================

/// Category scoring, composite scores and recommendations.
pub mod combine {
    pub use dalal_combine::*;
}

pub use dalal_combine::{Combiner, CompositeScore, Recommendation};

// ============================================================================
// Analysis
// ============================================================================

/// Analyzer entry points.
pub mod analysis {
    pub use dalal_analysis::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits.
///
/// ```
/// use dalal::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Combiner, CompositeScore, Recommendation};
    pub use crate::{DalalError, Fallback, Result};
    pub use crate::{Date, Indicator, IndicatorSet, MetricSnapshot, PriceBar, PriceHistory};
    pub use dalal_analysis::{
        AnalysisConfig, EquityAnalyzer, EquityInput, FundamentalAnalyzer, FundamentalInput,
        ValuationAnalyzer, ValuationInput,
    };
    pub use dalal_combine::{Action, Category, CategoryScore, WeightedCombiner};
    pub use dalal_fundamentals::{FinancialPeriod, SectorBenchmarks};
    pub use dalal_indicators::{IndicatorSuite, TechnicalAnalysis};
}

// ============================================================================
// Tests
// ============================================================================
