//! Reporting periods and the financial performance summary.

use crate::growth::{PeriodComparison, TrendDirection, year_over_year};
use dalal_traits::{DalalError, MetricSnapshot, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Headline metrics summarized for the latest period.
pub const HEADLINE_METRICS: [&str; 5] = ["revenue", "operating_profit", "net_profit", "ebitda", "eps"];

/// Metrics whose trend is classified.
pub const TREND_METRICS: [&str; 3] = ["revenue", "net_profit", "eps"];

/// One reporting period's metrics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialPeriod {
    /// Period label, e.g. `"Mar 2024"`.
    #[serde(default)]
    pub label: String,
    /// Metric values by name.
    #[serde(default)]
    pub metrics: MetricSnapshot,
}

impl FinancialPeriod {
    /// Create a period.
    pub fn new(label: impl Into<String>, metrics: MetricSnapshot) -> Self {
        Self {
            label: label.into(),
            metrics,
        }
    }

    /// A metric value, if reported and finite.
    #[must_use]
    pub fn get(&self, metric: &str) -> Option<f64> {
        self.metrics.get(metric).copied().filter(|v| v.is_finite())
    }

    /// Reject infinite values. `NaN` is accepted as "not reported".
    ///
    /// # Errors
    ///
    /// Returns [`DalalError::NonFiniteValue`] naming the first infinite metric.
    pub fn validate(&self, index: usize) -> Result<()> {
        match self.metrics.iter().find(|(_, v)| v.is_infinite()) {
            Some((name, _)) => Err(DalalError::NonFiniteValue {
                field: name.clone(),
                index,
            }),
            None => Ok(()),
        }
    }
}

/// One metric across periods, oldest first, `None` where not reported.
#[must_use]
pub fn metric_series(periods: &[FinancialPeriod], metric: &str) -> Vec<Option<f64>> {
    periods.iter().map(|p| p.get(metric)).collect()
}

/// Latest values, year-over-year changes and trends of headline metrics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialPerformance {
    /// Label of the latest period.
    pub period: Option<String>,
    /// Latest reported value of each headline metric.
    pub latest: BTreeMap<String, f64>,
    /// Year-over-year comparison of each headline metric, where computable.
    pub year_over_year: BTreeMap<String, PeriodComparison>,
    /// Trend of revenue, net profit and EPS.
    pub trends: BTreeMap<String, TrendDirection>,
}

impl FinancialPerformance {
    /// Summarize periods, oldest first.
    ///
    /// # Example
    ///
    /// ```
    /// use dalal_fundamentals::{FinancialPerformance, FinancialPeriod};
    ///
    /// let periods: Vec<FinancialPeriod> = [100.0, 104.0, 108.0, 112.0, 120.0]
    ///     .iter()
    ///     .enumerate()
    ///     .map(|(i, r)| FinancialPeriod::new(format!("Q{i}"), [("revenue".to_string(), *r)].into()))
    ///     .collect();
    ///
    /// let perf = FinancialPerformance::from_periods(&periods);
    /// assert_eq!(perf.latest["revenue"], 120.0);
    /// assert_eq!(perf.year_over_year["revenue"].change, 20.0);
    /// ```
    #[must_use]
    pub fn from_periods(periods: &[FinancialPeriod]) -> Self {
        let Some(last) = periods.last() else {
            return Self::default();
        };

        let mut performance = Self {
            period: Some(last.label.clone()),
            ..Self::default()
        };

        for metric in HEADLINE_METRICS {
            if let Some(value) = last.get(metric) {
                performance.latest.insert(metric.to_string(), value);
            }
            if let Some(yoy) = year_over_year(&metric_series(periods, metric)) {
                performance.year_over_year.insert(metric.to_string(), yoy);
            }
        }

        for metric in TREND_METRICS {
            let values: Vec<f64> = metric_series(periods, metric)
                .into_iter()
                .map(|v| v.unwrap_or(f64::NAN))
                .collect();
            let trend = TrendDirection::classify(&values);
            if trend != TrendDirection::InsufficientData {
                performance.trends.insert(metric.to_string(), trend);
            }
        }

        performance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn period(label: &str, pairs: &[(&str, f64)]) -> FinancialPeriod {
        FinancialPeriod::new(
            label,
            pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        )
    }

    #[test]
    fn test_empty_periods() {
        let perf = FinancialPerformance::from_periods(&[]);
        assert!(perf.period.is_none());
        assert!(perf.latest.is_empty());
    }

    #[test]
    fn test_latest_skips_missing() {
        let periods = vec![
            period("Q1", &[("revenue", 100.0), ("eps", 5.0)]),
            period("Q2", &[("revenue", 110.0), ("eps", f64::NAN)]),
        ];
        let perf = FinancialPerformance::from_periods(&periods);
        assert_eq!(perf.period.as_deref(), Some("Q2"));
        assert_relative_eq!(perf.latest["revenue"], 110.0);
        assert!(!perf.latest.contains_key("eps"));
        assert!(perf.year_over_year.is_empty());
        assert!(perf.trends.is_empty());
    }

    #[test]
    fn test_trends_and_yoy() {
        let periods: Vec<FinancialPeriod> = (0..6)
            .map(|i| {
                let i = f64::from(i);
                period(
                    "Q",
                    &[
                        ("revenue", 100.0 + 10.0 * i),
                        ("net_profit", 20.0 - i),
                        ("eps", 4.0),
                    ],
                )
            })
            .collect();
        let perf = FinancialPerformance::from_periods(&periods);

        assert_eq!(perf.trends["revenue"], TrendDirection::StrongUptrend);
        assert_eq!(perf.trends["net_profit"], TrendDirection::StrongDowntrend);
        assert_eq!(perf.trends["eps"], TrendDirection::Flat);

        // Lag 4 from the sixth period is the second.
        let yoy = perf.year_over_year["revenue"];
        assert_relative_eq!(yoy.previous, 110.0);
        assert_relative_eq!(yoy.current, 150.0);
    }

    #[test]
    fn test_validate_rejects_infinity() {
        let ok = period("Q1", &[("revenue", f64::NAN)]);
        assert!(ok.validate(0).is_ok());

        let bad = period("Q1", &[("revenue", f64::INFINITY)]);
        assert!(matches!(
            bad.validate(2),
            Err(DalalError::NonFiniteValue { index: 2, .. })
        ));
    }
}
