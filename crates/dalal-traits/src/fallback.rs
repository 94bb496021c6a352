//! Conditions that the scoring code absorbs instead of failing on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A locally absorbed condition.
///
/// Reports carry a list of these so a caller can tell a neutral sub-score
/// that came from real data apart from one that came from a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fallback {
    /// Fewer observations than the computation needs; the output is undefined.
    InsufficientData {
        /// What was being computed.
        subject: String,
        /// Observations required.
        required: usize,
        /// Observations available.
        available: usize,
    },

    /// A benchmark, price or denominator was zero or undefined.
    InvalidDivisor {
        /// What was being computed.
        subject: String,
    },

    /// The sector has no benchmark table; the default table was used.
    UnknownSector {
        /// The requested sector.
        sector: String,
    },

    /// The metric has no benchmark in any table; it was rated "N/A".
    UnknownMetric {
        /// The metric name.
        metric: String,
    },

    /// An input series was never computed, so the dependent signal was skipped.
    MissingIndicator {
        /// What was being computed.
        subject: String,
        /// The absent series.
        series: String,
    },
}

impl Fallback {
    /// Shorthand for [`Fallback::InsufficientData`].
    pub fn insufficient(subject: impl Into<String>, required: usize, available: usize) -> Self {
        Self::InsufficientData {
            subject: subject.into(),
            required,
            available,
        }
    }

    /// Shorthand for [`Fallback::InvalidDivisor`].
    pub fn invalid_divisor(subject: impl Into<String>) -> Self {
        Self::InvalidDivisor {
            subject: subject.into(),
        }
    }
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientData {
                subject,
                required,
                available,
            } => write!(
                f,
                "{subject}: insufficient data ({available} of {required} observations)"
            ),
            Self::InvalidDivisor { subject } => write!(f, "{subject}: zero or undefined divisor"),
            Self::UnknownSector { sector } => {
                write!(f, "unknown sector '{sector}', using default benchmarks")
            }
            Self::UnknownMetric { metric } => write!(f, "no benchmark for '{metric}'"),
            Self::MissingIndicator { subject, series } => {
                write!(f, "{subject}: series '{series}' was not computed")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let note = Fallback::insufficient("sma_200", 200, 50);
        assert_eq!(
            note.to_string(),
            "sma_200: insufficient data (50 of 200 observations)"
        );

        let note = Fallback::UnknownSector {
            sector: "Textiles".to_string(),
        };
        assert!(note.to_string().contains("Textiles"));

        let note = Fallback::MissingIndicator {
            subject: "moving_averages".to_string(),
            series: "sma_30".to_string(),
        };
        assert_eq!(
            note.to_string(),
            "moving_averages: series 'sma_30' was not computed"
        );
    }

    #[test]
    fn test_serde_tagging() {
        let note = Fallback::invalid_divisor("upside");
        let json = serde_json::to_string(&note).unwrap();
        assert_eq!(json, r#"{"kind":"invalid_divisor","subject":"upside"}"#);

        let back: Fallback = serde_json::from_str(&json).unwrap();
        assert_eq!(back, note);
    }
}
