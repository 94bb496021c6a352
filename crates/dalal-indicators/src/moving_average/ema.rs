//! Exponential moving average.

use dalal_traits::{Indicator, IndicatorSet, PriceField, PriceHistory, Result};
use serde::{Deserialize, Serialize};

/// Configuration for an exponential moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmaConfig {
    /// Span `s`; the smoothing factor is `2 / (s + 1)` (default: 12)
    pub span: usize,
}

impl Default for EmaConfig {
    fn default() -> Self {
        Self { span: 12 }
    }
}

/// Recursive exponential smoothing with `alpha = 2 / (span + 1)`.
///
/// The first finite value seeds the average, so the output is defined from
/// that position on with no warm-up gap. A `NaN` input yields `NaN` at that
/// position and leaves the running average untouched.
///
/// # Examples
///
/// ```
/// use dalal_indicators::moving_average::ema;
///
/// let out = ema(&[10.0, 10.0, 10.0], 5);
/// assert_eq!(out, vec![10.0, 10.0, 10.0]);
/// ```
#[must_use]
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut state: Option<f64> = None;

    for &value in values {
        if !value.is_finite() {
            out.push(f64::NAN);
            continue;
        }
        let next = match state {
            None => value,
            Some(prev) => alpha.mul_add(value - prev, prev),
        };
        state = Some(next);
        out.push(next);
    }
    out
}

/// Exponential moving average of closes, published as `ema_<span>`.
#[derive(Debug, Clone)]
pub struct Ema {
    config: EmaConfig,
    name: String,
}

impl Ema {
    /// Create a new EMA with the given configuration.
    #[must_use]
    pub fn new(config: EmaConfig) -> Self {
        Self {
            name: format!("ema_{}", config.span),
            config,
        }
    }

    /// Get the span.
    #[must_use]
    pub const fn span(&self) -> usize {
        self.config.span
    }
}

impl Default for Ema {
    fn default() -> Self {
        Self::new(EmaConfig::default())
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        1
    }

    fn required_fields(&self) -> &[PriceField] {
        &[PriceField::Close]
    }

    fn compute(&self, history: &PriceHistory) -> Result<IndicatorSet> {
        tracing::trace!(indicator = %self.name, bars = history.len(), "computing");
        let mut set = IndicatorSet::new(history.len());
        set.insert(self.name.clone(), ema(&history.closes(), self.config.span))?;
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ema_seeded_by_first_value() {
        let out = ema(&[1.0, 2.0, 3.0], 3);
        // alpha = 0.5
        assert_relative_eq!(out[0], 1.0);
        assert_relative_eq!(out[1], 1.5);
        assert_relative_eq!(out[2], 2.25);
    }

    #[test]
    fn test_ema_skips_leading_nan() {
        let out = ema(&[f64::NAN, 4.0, 6.0], 3);
        assert!(out[0].is_nan());
        assert_relative_eq!(out[1], 4.0);
        assert_relative_eq!(out[2], 5.0);
    }

    #[test]
    fn test_ema_name() {
        let indicator = Ema::new(EmaConfig { span: 26 });
        assert_eq!(indicator.name(), "ema_26");
        assert_eq!(indicator.span(), 26);
        assert_eq!(indicator.lookback(), 1);
    }

    #[test]
    fn test_ema_config_serde() {
        let config: EmaConfig = serde_json::from_str(r#"{"span": 9}"#).unwrap();
        assert_eq!(config.span, 9);
    }
}
