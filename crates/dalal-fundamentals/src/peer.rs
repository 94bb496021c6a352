//! Comparison of a company's ratios with its sector benchmarks.

use crate::benchmark::SectorBenchmarks;
use crate::rating::MetricPolarity;
use dalal_traits::MetricSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Where a metric stands relative to its benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkAssessment {
    /// More than 20% above a higher-is-better benchmark.
    SignificantlyAbove,
    /// 5% to 20% above.
    Above,
    /// Within 5% either way.
    InLine,
    /// 5% to 20% below.
    Below,
    /// More than 20% below.
    SignificantlyBelow,
    /// More than 20% below a lower-is-better benchmark.
    SignificantlyBetter,
    /// 5% to 20% below a lower-is-better benchmark.
    Better,
    /// 5% to 20% above a lower-is-better benchmark.
    Worse,
    /// More than 20% above a lower-is-better benchmark.
    SignificantlyWorse,
    /// Unknown polarity.
    NotAvailable,
}

impl BenchmarkAssessment {
    /// Assess a percentage difference from the benchmark.
    #[must_use]
    pub fn from_pct_diff(pct_diff: f64, polarity: Option<MetricPolarity>) -> Self {
        match polarity {
            Some(MetricPolarity::HigherIsBetter) => {
                if pct_diff > 20.0 {
                    Self::SignificantlyAbove
                } else if pct_diff > 5.0 {
                    Self::Above
                } else if pct_diff > -5.0 {
                    Self::InLine
                } else if pct_diff > -20.0 {
                    Self::Below
                } else {
                    Self::SignificantlyBelow
                }
            }
            Some(MetricPolarity::LowerIsBetter) => {
                if pct_diff < -20.0 {
                    Self::SignificantlyBetter
                } else if pct_diff < -5.0 {
                    Self::Better
                } else if pct_diff < 5.0 {
                    Self::InLine
                } else if pct_diff < 20.0 {
                    Self::Worse
                } else {
                    Self::SignificantlyWorse
                }
            }
            None => Self::NotAvailable,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SignificantlyAbove => "Significantly Above Benchmark",
            Self::Above => "Above Benchmark",
            Self::InLine => "In Line with Benchmark",
            Self::Below => "Below Benchmark",
            Self::SignificantlyBelow => "Significantly Below Benchmark",
            Self::SignificantlyBetter => "Significantly Better than Benchmark",
            Self::Better => "Better than Benchmark",
            Self::Worse => "Worse than Benchmark",
            Self::SignificantlyWorse => "Significantly Worse than Benchmark",
            Self::NotAvailable => "N/A",
        }
    }
}

impl fmt::Display for BenchmarkAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One metric set against its benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    /// Company value.
    pub value: f64,
    /// Sector benchmark.
    pub benchmark: f64,
    /// `value - benchmark`.
    pub difference: f64,
    /// Difference as a percentage of the benchmark, 0 when the benchmark is 0.
    pub pct_difference: f64,
    /// Assessment by the metric's polarity.
    pub assessment: BenchmarkAssessment,
}

/// Company metrics compared with every benchmark that applies to its sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerComparison {
    /// Canonical sector name, when the sector has its own table.
    pub sector: Option<String>,
    /// Comparison per metric, for metrics present in both the snapshot and
    /// the sector's effective table.
    pub metrics: BTreeMap<String, MetricComparison>,
}

impl PeerComparison {
    /// Compare a snapshot with the sector's effective benchmark table.
    ///
    /// # Example
    ///
    /// ```
    /// use dalal_fundamentals::{BenchmarkAssessment, PeerComparison, SectorBenchmarks};
    ///
    /// let metrics = std::collections::BTreeMap::from([("roe".to_string(), 28.0)]);
    /// let cmp = PeerComparison::compare(&metrics, "IT", &SectorBenchmarks::nse());
    /// assert_eq!(cmp.metrics["roe"].assessment, BenchmarkAssessment::Above);
    /// ```
    #[must_use]
    pub fn compare(metrics: &MetricSnapshot, sector: &str, benchmarks: &SectorBenchmarks) -> Self {
        let table = benchmarks.effective_table(sector);
        let compared = metrics
            .iter()
            .filter(|(_, value)| value.is_finite())
            .filter_map(|(name, &value)| {
                let benchmark = *table.get(name)?;
                let difference = value - benchmark;
                let pct_difference = if benchmark == 0.0 {
                    0.0
                } else {
                    difference / benchmark * 100.0
                };
                let assessment =
                    BenchmarkAssessment::from_pct_diff(pct_difference, MetricPolarity::of(name));
                Some((
                    name.clone(),
                    MetricComparison {
                        value,
                        benchmark,
                        difference,
                        pct_difference,
                        assessment,
                    },
                ))
            })
            .collect();

        Self {
            sector: benchmarks.canonical_sector(sector).map(str::to_string),
            metrics: compared,
        }
    }
}
