//! Growth and trend estimation over short periodic series.
//!
//! Inputs are reporting-period series that may have gaps. Missing points are
//! passed as `NaN` (or `None` where noted) and dropped before computing.

use crate::performance::{FinancialPeriod, metric_series};
use dalal_traits::stats::{self, NEUTRAL_SCORE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Periods between a value and its year-ago counterpart in quarterly data.
pub const YOY_LAG: usize = 4;

/// Periods required before CAGR is reported in a growth analysis.
pub const MIN_CAGR_PERIODS: usize = 4;

/// Points required for a trend classification.
pub const MIN_TREND_POINTS: usize = 3;

/// Growth rates required for a consistency assessment.
pub const MIN_CONSISTENCY_PERIODS: usize = 4;

/// Compound growth rate per period, in percent.
///
/// Non-finite points are dropped first. Returns `None` with fewer than two
/// points, a non-positive first value, or a non-finite result (e.g. a
/// negative last value with an even root).
///
/// # Examples
///
/// ```
/// use dalal_fundamentals::growth::cagr;
///
/// let rate = cagr(&[100.0, 121.0]).unwrap();
/// assert!((rate - 21.0).abs() < 1e-9);
///
/// assert_eq!(cagr(&[0.0, 50.0]), None);
/// assert_eq!(cagr(&[100.0]), None);
/// ```
#[must_use]
pub fn cagr(values: &[f64]) -> Option<f64> {
    let clean = stats::finite_values(values);
    if clean.len() < 2 {
        return None;
    }
    let first = clean[0];
    let last = clean[clean.len() - 1];
    if first <= 0.0 {
        return None;
    }
    let periods = (clean.len() - 1) as f64;
    let rate = ((last / first).powf(1.0 / periods) - 1.0) * 100.0;
    rate.is_finite().then_some(rate)
}

/// Percentage change from `previous` to `current`, relative to `|previous|`.
///
/// Returns `None` when `previous` is zero or either value is not finite.
#[must_use]
pub fn period_change(current: f64, previous: f64) -> Option<f64> {
    if !current.is_finite() || !previous.is_finite() || previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous.abs() * 100.0)
}

/// Direction of a linear trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Slope above 5% of the mean level per period.
    StrongUptrend,
    /// Slope between 1% and 5%.
    Uptrend,
    /// Slope between -1% and 1%, or a zero mean.
    Flat,
    /// Slope between -5% and -1%.
    Downtrend,
    /// Slope at or below -5%.
    StrongDowntrend,
    /// Fewer than three points.
    InsufficientData,
}

impl TrendDirection {
    /// Classify the OLS trend of `values` against their index.
    ///
    /// The slope is normalized by the series mean into percent of level.
    ///
    /// # Examples
    ///
    /// ```
    /// use dalal_fundamentals::TrendDirection;
    ///
    /// let trend = TrendDirection::classify(&[100.0, 110.0, 120.0, 130.0]);
    /// assert_eq!(trend, TrendDirection::StrongUptrend);
    /// ```
    #[must_use]
    pub fn classify(values: &[f64]) -> Self {
        let clean = stats::finite_values(values);
        if clean.len() < MIN_TREND_POINTS {
            return Self::InsufficientData;
        }
        let (Some(slope), Some(mean)) = (stats::ols_slope(&clean), stats::mean(&clean)) else {
            return Self::InsufficientData;
        };
        if mean == 0.0 {
            return Self::Flat;
        }

        let slope_pct = slope / mean * 100.0;
        if slope_pct > 5.0 {
            Self::StrongUptrend
        } else if slope_pct > 1.0 {
            Self::Uptrend
        } else if slope_pct > -1.0 {
            Self::Flat
        } else if slope_pct > -5.0 {
            Self::Downtrend
        } else {
            Self::StrongDowntrend
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::StrongUptrend => "Strong Uptrend",
            Self::Uptrend => "Uptrend",
            Self::Flat => "Flat",
            Self::Downtrend => "Downtrend",
            Self::StrongDowntrend => "Strong Downtrend",
            Self::InsufficientData => "Insufficient Data",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How regularly a company grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthConsistency {
    /// At least 90% of periods grew.
    HighlyConsistent,
    /// At least 70%.
    Consistent,
    /// At least 50%.
    Moderate,
    /// Fewer than half.
    Inconsistent,
    /// Fewer than four growth rates.
    InsufficientData,
}

impl GrowthConsistency {
    /// Assess the share of positive growth rates.
    ///
    /// # Examples
    ///
    /// ```
    /// use dalal_fundamentals::GrowthConsistency;
    ///
    /// let c = GrowthConsistency::assess(&[5.0, 3.0, -1.0, 4.0]);
    /// assert_eq!(c, GrowthConsistency::Consistent);
    /// ```
    #[must_use]
    pub fn assess(growth_rates: &[f64]) -> Self {
        let clean = stats::finite_values(growth_rates);
        if clean.len() < MIN_CONSISTENCY_PERIODS {
            return Self::InsufficientData;
        }
        let positive = clean.iter().filter(|g| **g > 0.0).count();
        let ratio = positive as f64 / clean.len() as f64;

        if ratio >= 0.9 {
            Self::HighlyConsistent
        } else if ratio >= 0.7 {
            Self::Consistent
        } else if ratio >= 0.5 {
            Self::Moderate
        } else {
            Self::Inconsistent
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::HighlyConsistent => "Highly Consistent",
            Self::Consistent => "Consistent",
            Self::Moderate => "Moderate",
            Self::Inconsistent => "Inconsistent",
            Self::InsufficientData => "Insufficient data",
        }
    }
}

impl fmt::Display for GrowthConsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A value compared with an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparison {
    /// Latest value.
    pub current: f64,
    /// Earlier value.
    pub previous: f64,
    /// Percentage change.
    pub change: f64,
}

/// Compare the latest point of a periodic series with its year-ago value.
///
/// Requires at least [`YOY_LAG`] periods. The comparison point is
/// [`YOY_LAG`] periods back, or the earliest period when the series is too
/// short to reach that far. Returns `None` when either point is missing or
/// the earlier value is zero.
#[must_use]
pub fn year_over_year(series: &[Option<f64>]) -> Option<PeriodComparison> {
    if series.len() < YOY_LAG {
        return None;
    }
    let last = series.len() - 1;
    let base = last.saturating_sub(YOY_LAG);
    let current = series[last]?;
    let previous = series[base]?;
    let change = period_change(current, previous)?;
    Some(PeriodComparison {
        current,
        previous,
        change,
    })
}

/// Growth rates, trends and consistency across reporting periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthAnalysis {
    /// Revenue CAGR in percent.
    pub revenue_cagr: Option<f64>,
    /// Net profit CAGR in percent.
    pub profit_cagr: Option<f64>,
    /// EPS CAGR in percent.
    pub eps_cagr: Option<f64>,
    /// Trend of revenue, net profit and operating margin.
    pub trends: BTreeMap<String, TrendDirection>,
    /// Consistency of the `revenue_growth` series.
    pub consistency: GrowthConsistency,
}

impl GrowthAnalysis {
    /// Analyze a sequence of periods, oldest first.
    ///
    /// CAGR is only reported once [`MIN_CAGR_PERIODS`] periods exist.
    #[must_use]
    pub fn from_periods(periods: &[FinancialPeriod]) -> Self {
        let values = |metric: &str| -> Vec<f64> {
            metric_series(periods, metric)
                .into_iter()
                .map(|v| v.unwrap_or(f64::NAN))
                .collect()
        };
        let growth_cagr = |metric: &str| {
            if periods.len() >= MIN_CAGR_PERIODS {
                cagr(&values(metric))
            } else {
                None
            }
        };

        let mut trends = BTreeMap::new();
        for metric in ["revenue", "net_profit", "operating_margin"] {
            let trend = TrendDirection::classify(&values(metric));
            if trend != TrendDirection::InsufficientData {
                trends.insert(metric.to_string(), trend);
            }
        }

        Self {
            revenue_cagr: growth_cagr("revenue"),
            profit_cagr: growth_cagr("net_profit"),
            eps_cagr: growth_cagr("eps"),
            trends,
            consistency: GrowthConsistency::assess(&values("revenue_growth")),
        }
    }

    /// Growth score heuristic on the 0-100 scale.
    ///
    /// Starts at 50. Revenue CAGR above 15, 10 or 5 adds 25, 15 or 5; a
    /// negative revenue CAGR subtracts 20. Profit CAGR above 20 or 10 adds 25
    /// or 15; a negative profit CAGR subtracts 20.
    #[must_use]
    pub fn score(&self) -> f64 {
        let mut score = NEUTRAL_SCORE;

        if let Some(revenue) = self.revenue_cagr {
            if revenue > 15.0 {
                score += 25.0;
            } else if revenue > 10.0 {
                score += 15.0;
            } else if revenue > 5.0 {
                score += 5.0;
            } else if revenue < 0.0 {
                score -= 20.0;
            }
        }

        if let Some(profit) = self.profit_cagr {
            if profit > 20.0 {
                score += 25.0;
            } else if profit > 10.0 {
                score += 15.0;
            } else if profit < 0.0 {
                score -= 20.0;
            }
        }

        stats::clamp_score(score)
    }
}
