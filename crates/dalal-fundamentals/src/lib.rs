#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dalal/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod benchmark;
pub mod growth;
pub mod peer;
pub mod performance;
pub mod quality;
pub mod rating;
pub mod valuation;

// Re-export key types
pub use benchmark::{BenchmarkLookup, BenchmarkSource, BenchmarkTable, SectorBenchmarks};
pub use growth::{GrowthAnalysis, GrowthConsistency, PeriodComparison, TrendDirection};
pub use peer::{BenchmarkAssessment, MetricComparison, PeerComparison};
pub use performance::{FinancialPerformance, FinancialPeriod};
pub use quality::{EarningsPersistence, EarningsQuality};
pub use rating::{MetricPolarity, MetricValue, RatingTier};
pub use valuation::{
    IndustryAverages, IndustryComparison, IndustryVerdict, MethodEstimate, ValuationConfig,
    ValuationEstimate, ValuationMethod, ValuationRating,
};
