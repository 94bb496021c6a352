//! Simple moving average.

use dalal_traits::{Indicator, IndicatorSet, PriceField, PriceHistory, Result, stats};
use serde::{Deserialize, Serialize};

/// Configuration for a simple moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmaConfig {
    /// Number of trailing closes averaged (default: 20)
    pub window: usize,
}

impl Default for SmaConfig {
    fn default() -> Self {
        Self { window: 20 }
    }
}

/// Trailing arithmetic mean over `window` values.
///
/// Position `i` is `NaN` while `i + 1 < window`, and also whenever the
/// window contains a `NaN`. Each window is averaged with [`stats::mean`], so
/// `window == 1` reproduces its input and a flat window returns its value
/// exactly. A zero window yields an all-`NaN` series.
///
/// # Examples
///
/// ```
/// use dalal_indicators::moving_average::sma;
///
/// let out = sma(&[1.0, 2.0, 3.0, 4.0], 2);
/// assert!(out[0].is_nan());
/// assert_eq!(&out[1..], &[1.5, 2.5, 3.5]);
/// ```
#[must_use]
pub fn sma(values: &[f64], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    for end in window..=values.len() {
        out[end - 1] = stats::mean(&values[end - window..end]).unwrap_or(f64::NAN);
    }
    out
}

/// Simple moving average of closes, published as `sma_<window>`.
///
/// # Example
///
/// ```ignore
/// use dalal_indicators::{Sma, SmaConfig};
///
/// let sma_50 = Sma::new(SmaConfig { window: 50 });
/// let set = sma_50.compute(&history)?;
/// let latest = set.latest("sma_50");
/// ```
#[derive(Debug, Clone)]
pub struct Sma {
    config: SmaConfig,
    name: String,
}

impl Sma {
    /// Create a new SMA with the given configuration.
    #[must_use]
    pub fn new(config: SmaConfig) -> Self {
        Self {
            name: format!("sma_{}", config.window),
            config,
        }
    }

    /// Get the window length.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.config.window
    }
}

impl Default for Sma {
    fn default() -> Self {
        Self::new(SmaConfig::default())
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.config.window
    }

    fn required_fields(&self) -> &[PriceField] {
        &[PriceField::Close]
    }

    fn compute(&self, history: &PriceHistory) -> Result<IndicatorSet> {
        tracing::trace!(indicator = %self.name, bars = history.len(), "computing");
        let mut set = IndicatorSet::new(history.len());
        set.insert(self.name.clone(), sma(&history.closes(), self.config.window))?;
        Ok(set)
    }
}
