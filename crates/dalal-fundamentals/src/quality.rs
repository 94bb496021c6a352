//! Earnings quality: cash backing and persistence of profits.
//!
//! The score is a fixed heuristic. It starts at 70 and moves by +15 or +5
//! for cash conversion above 100% or 70%, by -15 below 50%, by +15 for high
//! persistence and by -10 for low persistence.

use dalal_traits::stats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Starting point of the earnings quality score.
pub const BASE_SCORE: f64 = 70.0;

/// Net profit observations required to judge persistence.
pub const MIN_PERSISTENCE_POINTS: usize = 4;

/// How stable net profit has been.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarningsPersistence {
    /// Coefficient of variation below 0.3.
    High,
    /// Below 0.5.
    Moderate,
    /// 0.5 or more.
    Low,
}

impl EarningsPersistence {
    /// Classify from the coefficient of variation of net profit.
    #[must_use]
    pub fn from_variation(cv: f64) -> Self {
        if cv < 0.3 {
            Self::High
        } else if cv < 0.5 {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for EarningsPersistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "High",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
        })
    }
}

/// Earnings quality assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsQuality {
    /// Operating cash flow as a percentage of net profit.
    pub cash_conversion: Option<f64>,
    /// Stability of net profit across periods.
    pub persistence: Option<EarningsPersistence>,
    /// Score on the 0-100 scale.
    pub score: f64,
    /// Human-readable warnings.
    pub flags: Vec<String>,
}

impl EarningsQuality {
    /// Assess earnings quality.
    ///
    /// Cash conversion needs an operating cash flow figure and a positive net
    /// profit. Persistence needs at least four finite net profit points with a
    /// non-zero mean.
    ///
    /// # Example
    ///
    /// ```
    /// use dalal_fundamentals::{EarningsPersistence, EarningsQuality};
    ///
    /// let q = EarningsQuality::assess(Some(120.0), Some(100.0), &[95.0, 100.0, 98.0, 102.0]);
    /// assert_eq!(q.persistence, Some(EarningsPersistence::High));
    /// assert_eq!(q.score, 100.0);
    /// ```
    #[must_use]
    pub fn assess(
        operating_cash_flow: Option<f64>,
        net_profit: Option<f64>,
        net_profits: &[f64],
    ) -> Self {
        let mut flags = Vec::new();
        let mut score = BASE_SCORE;

        let cash_conversion = match (operating_cash_flow, net_profit) {
            (Some(ocf), Some(np)) if ocf.is_finite() && np.is_finite() && np > 0.0 => {
                Some(ocf / np * 100.0)
            }
            _ => None,
        };

        if let Some(conversion) = cash_conversion {
            if conversion < 50.0 {
                flags.push("Low cash conversion - earnings may not be backed by cash".to_string());
            } else if conversion > 150.0 {
                flags.push("High cash conversion - strong earnings quality".to_string());
            }

            if conversion > 100.0 {
                score += 15.0;
            } else if conversion > 70.0 {
                score += 5.0;
            } else if conversion < 50.0 {
                score -= 15.0;
            }
        }

        let persistence = persistence(net_profits);
        match persistence {
            Some(EarningsPersistence::High) => score += 15.0,
            Some(EarningsPersistence::Low) => {
                score -= 10.0;
                flags.push("Volatile earnings - low persistence".to_string());
            }
            Some(EarningsPersistence::Moderate) | None => {}
        }

        Self {
            cash_conversion,
            persistence,
            score: stats::clamp_score(score),
            flags,
        }
    }
}

fn persistence(net_profits: &[f64]) -> Option<EarningsPersistence> {
    let clean = stats::finite_values(net_profits);
    if clean.len() < MIN_PERSISTENCE_POINTS {
        return None;
    }
    let mean = stats::mean(&clean)?;
    if mean == 0.0 {
        return None;
    }
    let std = stats::sample_std(&clean)?;
    Some(EarningsPersistence::from_variation(std / mean.abs()))
}
