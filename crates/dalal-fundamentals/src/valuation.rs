//! Fair-value estimation from peer multiples.
//!
//! Each multiple the company reports with a strictly positive value yields a
//! fair value `price * industry_average / company_multiple`; PEG yields
//! `price / peg`. The consensus is the mean of those estimates and the upside
//! is measured against the current price.

use dalal_traits::{Fallback, MetricSnapshot, stats};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A multiple-based fair value method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationMethod {
    /// Price to earnings.
    Pe,
    /// Price to book.
    Pb,
    /// PE to growth.
    Peg,
    /// Enterprise value to EBITDA.
    EvEbitda,
}

impl ValuationMethod {
    /// Every method in evaluation order.
    pub const ALL: [Self; 4] = [Self::Pe, Self::Pb, Self::Peg, Self::EvEbitda];

    /// Snapshot key holding the company's multiple.
    #[must_use]
    pub const fn metric(&self) -> &'static str {
        match self {
            Self::Pe => "pe_ratio",
            Self::Pb => "pb_ratio",
            Self::Peg => "peg_ratio",
            Self::EvEbitda => "ev_ebitda",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pe => "P/E",
            Self::Pb => "P/B",
            Self::Peg => "PEG",
            Self::EvEbitda => "EV/EBITDA",
        }
    }
}

impl fmt::Display for ValuationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Industry average multiples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustryAverages {
    /// Average P/E (default: 22.0)
    pub pe_ratio: f64,
    /// Average P/B (default: 3.5)
    pub pb_ratio: f64,
    /// Average P/S (default: 2.8)
    pub ps_ratio: f64,
    /// Average EV/EBITDA (default: 15.0)
    pub ev_ebitda: f64,
    /// Average PEG (default: 1.5)
    pub peg_ratio: f64,
    /// Average dividend yield in percent (default: 1.5)
    pub dividend_yield: f64,
}

impl Default for IndustryAverages {
    fn default() -> Self {
        Self {
            pe_ratio: 22.0,
            pb_ratio: 3.5,
            ps_ratio: 2.8,
            ev_ebitda: 15.0,
            peg_ratio: 1.5,
            dividend_yield: 1.5,
        }
    }
}

impl IndustryAverages {
    /// Metric names carried by the table.
    pub const METRICS: [&'static str; 6] = [
        "pe_ratio",
        "pb_ratio",
        "ps_ratio",
        "ev_ebitda",
        "peg_ratio",
        "dividend_yield",
    ];

    /// Average for a metric by snapshot key.
    #[must_use]
    pub fn get(&self, metric: &str) -> Option<f64> {
        match metric {
            "pe_ratio" => Some(self.pe_ratio),
            "pb_ratio" => Some(self.pb_ratio),
            "ps_ratio" => Some(self.ps_ratio),
            "ev_ebitda" => Some(self.ev_ebitda),
            "peg_ratio" => Some(self.peg_ratio),
            "dividend_yield" => Some(self.dividend_yield),
            _ => None,
        }
    }
}

/// Configuration for the valuation estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    /// Industry average multiples.
    pub industry_averages: IndustryAverages,
    /// Multiples below this fraction of the average read as cheap (default: 0.8)
    pub undervalued_band: f64,
    /// Multiples above this fraction of the average read as expensive (default: 1.2)
    pub overvalued_band: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            industry_averages: IndustryAverages::default(),
            undervalued_band: 0.8,
            overvalued_band: 1.2,
        }
    }
}

/// Qualitative reading of the upside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationRating {
    /// Upside above 30%.
    HighlyUndervalued,
    /// Above 15%.
    Undervalued,
    /// Above -15%.
    FairlyValued,
    /// Above -30%.
    Overvalued,
    /// At or below -30%.
    HighlyOvervalued,
}

impl ValuationRating {
    /// Rate an upside percentage.
    #[must_use]
    pub fn from_upside(upside: f64) -> Self {
        if upside > 30.0 {
            Self::HighlyUndervalued
        } else if upside > 15.0 {
            Self::Undervalued
        } else if upside > -15.0 {
            Self::FairlyValued
        } else if upside > -30.0 {
            Self::Overvalued
        } else {
            Self::HighlyOvervalued
        }
    }

    /// Recommendation vote in `-2..=2`.
    #[must_use]
    pub const fn vote(&self) -> i8 {
        match self {
            Self::HighlyUndervalued => 2,
            Self::Undervalued => 1,
            Self::FairlyValued => 0,
            Self::Overvalued => -1,
            Self::HighlyOvervalued => -2,
        }
    }

    /// Discretized score on the 0-100 scale.
    #[must_use]
    pub const fn score(&self) -> f64 {
        match self {
            Self::HighlyUndervalued => 100.0,
            Self::Undervalued => 75.0,
            Self::FairlyValued => 50.0,
            Self::Overvalued => 25.0,
            Self::HighlyOvervalued => 0.0,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::HighlyUndervalued => "Highly Undervalued",
            Self::Undervalued => "Undervalued",
            Self::FairlyValued => "Fairly Valued",
            Self::Overvalued => "Overvalued",
            Self::HighlyOvervalued => "Highly Overvalued",
        }
    }
}

impl fmt::Display for ValuationRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One method's fair value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MethodEstimate {
    /// Method used.
    pub method: ValuationMethod,
    /// The company's multiple.
    pub multiple: f64,
    /// Implied fair price.
    pub fair_value: f64,
}

/// Consensus fair value and upside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationEstimate {
    /// Current price, when reported.
    pub current_price: Option<f64>,
    /// Estimates of every method that applied.
    pub methods: Vec<MethodEstimate>,
    /// Mean of the method estimates, or the current price when none applied.
    pub fair_value: Option<f64>,
    /// Upside from the current price to the fair value, in percent.
    pub upside: f64,
    /// Rating of the upside.
    pub rating: ValuationRating,
    /// Absorbed conditions.
    pub notes: Vec<Fallback>,
}

impl ValuationEstimate {
    /// Estimate fair value from a metric snapshot.
    ///
    /// The price is read from `current_price`. Without a positive price no
    /// method applies and the upside is 0.
    ///
    /// # Example
    ///
    /// ```
    /// use dalal_fundamentals::{ValuationConfig, ValuationEstimate, ValuationRating};
    ///
    /// let metrics = std::collections::BTreeMap::from([
    ///     ("current_price".to_string(), 100.0),
    ///     ("pe_ratio".to_string(), 11.0),
    /// ]);
    /// let estimate = ValuationEstimate::estimate(&metrics, &ValuationConfig::default());
    /// assert_eq!(estimate.fair_value, Some(200.0));
    /// assert_eq!(estimate.rating, ValuationRating::HighlyUndervalued);
    /// ```
    #[must_use]
    pub fn estimate(metrics: &MetricSnapshot, config: &ValuationConfig) -> Self {
        let mut notes = Vec::new();
        let current_price = metrics.get("current_price").copied().filter(|p| p.is_finite());

        let Some(price) = current_price.filter(|p| *p > 0.0) else {
            tracing::debug!(price = ?current_price, "no positive price, upside set to zero");
            notes.push(Fallback::invalid_divisor("upside"));
            return Self {
                current_price,
                methods: Vec::new(),
                fair_value: current_price,
                upside: 0.0,
                rating: ValuationRating::from_upside(0.0),
                notes,
            };
        };

        let averages = &config.industry_averages;
        let methods: Vec<MethodEstimate> = ValuationMethod::ALL
            .into_iter()
            .filter_map(|method| {
                let multiple = metrics
                    .get(method.metric())
                    .copied()
                    .filter(|m| m.is_finite() && *m > 0.0)?;
                let fair_value = match method {
                    ValuationMethod::Peg => price / multiple,
                    _ => price * averages.get(method.metric())? / multiple,
                };
                Some(MethodEstimate {
                    method,
                    multiple,
                    fair_value,
                })
            })
            .collect();

        let fair_values: Vec<f64> = methods.iter().map(|m| m.fair_value).collect();
        let fair_value = stats::mean(&fair_values).unwrap_or(price);
        if methods.is_empty() {
            tracing::debug!("no positive multiples, fair value defaults to price");
        }

        let upside = (fair_value - price) / price * 100.0;
        Self {
            current_price,
            methods,
            fair_value: Some(fair_value),
            upside,
            rating: ValuationRating::from_upside(upside),
            notes,
        }
    }
}

/// Position of a multiple relative to its industry average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndustryVerdict {
    /// Cheaper than the industry.
    Undervalued,
    /// Within the band.
    FairlyValued,
    /// Dearer than the industry.
    Overvalued,
}

impl fmt::Display for IndustryVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Undervalued => "Undervalued",
            Self::FairlyValued => "Fairly Valued",
            Self::Overvalued => "Overvalued",
        })
    }
}

/// One multiple compared with the industry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndustryComparison {
    /// Company value.
    pub value: f64,
    /// Industry average.
    pub industry_average: f64,
    /// Verdict.
    pub verdict: IndustryVerdict,
}

impl IndustryComparison {
    /// Compare every reported multiple with its industry average.
    ///
    /// A higher dividend yield reads as cheaper, so its verdict is inverted.
    #[must_use]
    pub fn compare_all(
        metrics: &MetricSnapshot,
        config: &ValuationConfig,
    ) -> BTreeMap<String, Self> {
        IndustryAverages::METRICS
            .into_iter()
            .filter_map(|metric| {
                let value = metrics.get(metric).copied().filter(|v| v.is_finite())?;
                let average = config.industry_averages.get(metric)?;
                let below = value < average * config.undervalued_band;
                let above = value > average * config.overvalued_band;
                let verdict = match (metric == "dividend_yield", below, above) {
                    (false, true, _) | (true, _, true) => IndustryVerdict::Undervalued,
                    (false, _, true) | (true, true, _) => IndustryVerdict::Overvalued,
                    _ => IndustryVerdict::FairlyValued,
                };
                Some((
                    metric.to_string(),
                    Self {
                        value,
                        industry_average: average,
                        verdict,
                    },
                ))
            })
            .collect()
    }
}
