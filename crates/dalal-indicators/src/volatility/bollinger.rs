//! Bollinger Bands.

use crate::moving_average::sma;
use dalal_traits::{Indicator, IndicatorSet, PriceField, PriceHistory, Result, stats};
use serde::{Deserialize, Serialize};

/// Configuration for Bollinger Bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerConfig {
    /// Window of the middle band and the rolling deviation (default: 20)
    pub window: usize,
    /// Band width in standard deviations (default: 2.0)
    pub num_std: f64,
}

impl Default for BollingerConfig {
    fn default() -> Self {
        Self {
            window: 20,
            num_std: 2.0,
        }
    }
}

/// Upper, middle and lower bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    /// `middle + k * std`
    pub upper: Vec<f64>,
    /// SMA of closes
    pub middle: Vec<f64>,
    /// `middle - k * std`
    pub lower: Vec<f64>,
}

/// Rolling sample standard deviation over `window` values.
fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if window < 2 || values.len() < window {
        return out;
    }
    for end in window..=values.len() {
        out[end - 1] = stats::sample_std(&values[end - window..end]).unwrap_or(f64::NAN);
    }
    out
}

/// Compute Bollinger Bands of `closes`.
///
/// The deviation is the sample standard deviation of the window, so a flat
/// series collapses all three bands onto the middle.
#[must_use]
pub fn bollinger(closes: &[f64], config: &BollingerConfig) -> BollingerBands {
    let middle = sma(closes, config.window);
    let std = rolling_std(closes, config.window);

    let upper = middle
        .iter()
        .zip(&std)
        .map(|(m, s)| config.num_std.mul_add(*s, *m))
        .collect();
    let lower = middle
        .iter()
        .zip(&std)
        .map(|(m, s)| (-config.num_std).mul_add(*s, *m))
        .collect();

    BollingerBands {
        upper,
        middle,
        lower,
    }
}

/// Bollinger Bands, published as `bb_upper`, `bb_middle` and `bb_lower`.
#[derive(Debug, Clone, Default)]
pub struct Bollinger {
    config: BollingerConfig,
}

impl Bollinger {
    /// Create new Bollinger Bands with the given configuration.
    #[must_use]
    pub const fn new(config: BollingerConfig) -> Self {
        Self { config }
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        "bb"
    }

    fn lookback(&self) -> usize {
        self.config.window
    }

    fn required_fields(&self) -> &[PriceField] {
        &[PriceField::Close]
    }

    fn compute(&self, history: &PriceHistory) -> Result<IndicatorSet> {
        tracing::trace!(indicator = "bollinger", window = self.config.window, "computing");
        let bands = bollinger(&history.closes(), &self.config);
        let mut set = IndicatorSet::new(history.len());
        set.insert("bb_upper", bands.upper)?;
        set.insert("bb_middle", bands.middle)?;
        set.insert("bb_lower", bands.lower)?;
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_series_collapses_bands() {
        let bands = bollinger(&[42.0; 25], &BollingerConfig::default());
        for i in 19..25 {
            assert_eq!(bands.upper[i], 42.0);
            assert_eq!(bands.middle[i], 42.0);
            assert_eq!(bands.lower[i], 42.0);
        }
        assert!(bands.upper[18].is_nan());
    }

    #[test]
    fn test_flat_series_collapses_bands_at_inexact_prices() {
        for close in [0.1, 0.7, 19.99, 101.3, 2456.35] {
            let bands = bollinger(&[close; 25], &BollingerConfig::default());
            for i in 19..25 {
                assert_eq!(bands.middle[i], close, "middle at {close}");
                assert_eq!(bands.upper[i], close, "upper at {close}");
                assert_eq!(bands.lower[i], close, "lower at {close}");
            }
        }
    }

    #[test]
    fn test_band_width_uses_sample_std() {
        let config = BollingerConfig {
            window: 4,
            num_std: 2.0,
        };
        let bands = bollinger(&[1.0, 2.0, 3.0, 4.0], &config);
        let std = (5.0_f64 / 3.0).sqrt();
        assert_relative_eq!(bands.middle[3], 2.5);
        assert_relative_eq!(bands.upper[3], 2.5 + 2.0 * std, epsilon = 1e-12);
        assert_relative_eq!(bands.lower[3], 2.5 - 2.0 * std, epsilon = 1e-12);
    }

    #[test]
    fn test_bands_are_ordered() {
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + (f64::from(i) * 0.9).sin() * 6.0).collect();
        let bands = bollinger(&closes, &BollingerConfig::default());
        for i in 19..50 {
            assert!(bands.lower[i] <= bands.middle[i]);
            assert!(bands.middle[i] <= bands.upper[i]);
        }
    }
}
