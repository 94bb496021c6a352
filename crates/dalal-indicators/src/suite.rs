//! A configured collection of indicators computed together.

use crate::{
    Atr, AtrConfig, Bollinger, BollingerConfig, Ema, EmaConfig, Macd, MacdConfig, Obv, Rsi,
    RsiConfig, Sma, SmaConfig, TechnicalConfig, Vwap,
};
use dalal_traits::{Indicator, IndicatorSet, PriceHistory, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameters of the standard indicator suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// SMA windows (default: 20, 50, 200)
    pub sma_windows: Vec<usize>,
    /// EMA spans (default: 12, 26)
    pub ema_spans: Vec<usize>,
    /// RSI parameters
    pub rsi: RsiConfig,
    /// MACD parameters
    pub macd: MacdConfig,
    /// Bollinger parameters
    pub bollinger: BollingerConfig,
    /// ATR parameters
    pub atr: AtrConfig,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            sma_windows: vec![20, 50, 200],
            ema_spans: vec![12, 26],
            rsi: RsiConfig::default(),
            macd: MacdConfig::default(),
            bollinger: BollingerConfig::default(),
            atr: AtrConfig::default(),
        }
    }
}

impl SuiteConfig {
    /// Add the SMA windows the technical tally reads, if they are not
    /// already configured.
    ///
    /// # Examples
    ///
    /// ```
    /// use dalal_indicators::{SuiteConfig, TechnicalConfig};
    ///
    /// let technical = TechnicalConfig { fast_ma_window: 30, ..TechnicalConfig::default() };
    /// let config = SuiteConfig::default().covering(&technical);
    /// assert_eq!(config.sma_windows, vec![20, 50, 200, 30]);
    /// ```
    #[must_use]
    pub fn covering(mut self, technical: &TechnicalConfig) -> Self {
        for window in [technical.fast_ma_window, technical.slow_ma_window] {
            if !self.sma_windows.contains(&window) {
                tracing::debug!(window, "adding SMA window read by the technical tally");
                self.sma_windows.push(window);
            }
        }
        self
    }
}

/// Indicators computed over one history into a single [`IndicatorSet`].
///
/// # Example
///
/// ```ignore
/// use dalal_indicators::IndicatorSuite;
///
/// let set = IndicatorSuite::standard().compute(&history)?;
/// let rsi = set.latest("rsi");
/// ```
pub struct IndicatorSuite {
    indicators: Vec<Box<dyn Indicator>>,
    series: Vec<String>,
}

impl IndicatorSuite {
    /// An empty suite.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            indicators: Vec::new(),
            series: Vec::new(),
        }
    }

    /// The standard suite with default parameters.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_config(&SuiteConfig::default())
    }

    /// Build the standard suite from explicit parameters.
    #[must_use]
    pub fn from_config(config: &SuiteConfig) -> Self {
        let mut suite = Self::empty();
        for &window in &config.sma_windows {
            suite = suite.with(Sma::new(SmaConfig { window }), [format!("sma_{window}")]);
        }
        for &span in &config.ema_spans {
            suite = suite.with(Ema::new(EmaConfig { span }), [format!("ema_{span}")]);
        }
        suite
            .with(Macd::new(config.macd), ["macd", "macd_signal", "macd_histogram"].map(String::from))
            .with(Rsi::new(config.rsi), ["rsi".to_string()])
            .with(
                Bollinger::new(config.bollinger),
                ["bb_upper", "bb_middle", "bb_lower"].map(String::from),
            )
            .with(Atr::new(config.atr), ["atr".to_string()])
            .with(Obv, ["obv".to_string()])
            .with(Vwap, ["vwap".to_string()])
    }

    /// Add an indicator together with the series names it publishes.
    #[must_use]
    pub fn with<I, N>(mut self, indicator: I, series: N) -> Self
    where
        I: Indicator + 'static,
        N: IntoIterator<Item = String>,
    {
        self.indicators.push(Box::new(indicator));
        self.series.extend(series);
        self
    }

    /// Number of indicators in the suite.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    /// Whether the suite has no indicators.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// Names of the series the suite publishes, in insertion order.
    #[must_use]
    pub fn series_names(&self) -> &[String] {
        &self.series
    }

    /// Longest lookback of any indicator in the suite.
    #[must_use]
    pub fn max_lookback(&self) -> usize {
        self.indicators
            .iter()
            .map(|i| i.lookback())
            .max()
            .unwrap_or(0)
    }

    /// Compute every indicator and merge the results.
    ///
    /// # Errors
    ///
    /// Returns an error if an indicator produces a misaligned series.
    pub fn compute(&self, history: &PriceHistory) -> Result<IndicatorSet> {
        let mut set = IndicatorSet::new(history.len());
        for indicator in &self.indicators {
            set.merge(indicator.compute(history)?)?;
        }

        if history.len() < self.max_lookback() {
            tracing::debug!(
                bars = history.len(),
                required = self.max_lookback(),
                "history shorter than longest indicator window"
            );
        }
        Ok(set)
    }
}

impl Default for IndicatorSuite {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for IndicatorSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndicatorSuite")
            .field(
                "indicators",
                &self.indicators.iter().map(|i| i.name()).collect::<Vec<_>>(),
            )
            .field("series", &self.series)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dalal_traits::{Date, PriceBar};

    fn history(n: usize) -> PriceHistory {
        let start = Date::from_ymd_opt(2023, 1, 2).unwrap();
        let bars = (0..n)
            .map(|i| {
                let c = 200.0 + (i as f64 * 0.3).sin() * 8.0;
                PriceBar::new(
                    start + chrono::Days::new(i as u64),
                    c - 0.5,
                    c + 2.0,
                    c - 2.0,
                    c,
                    10_000.0 + i as f64,
                )
            })
            .collect();
        PriceHistory::new(bars).unwrap()
    }

    #[test]
    fn test_standard_suite_publishes_all_series() {
        let suite = IndicatorSuite::standard();
        assert_eq!(suite.len(), 11);
        assert_eq!(suite.max_lookback(), 200);

        let set = suite.compute(&history(250)).unwrap();
        let names: Vec<&str> = set.names().collect();
        assert_eq!(names.len(), suite.series_names().len());
        for expected in suite.series_names() {
            assert!(names.contains(&expected.as_str()), "{expected} missing");
            assert!(set.latest(expected).is_some(), "{expected} undefined");
        }
    }

    #[test]
    fn test_short_history_leaves_long_windows_undefined() {
        let set = IndicatorSuite::standard().compute(&history(60)).unwrap();
        assert!(set.latest("sma_50").is_some());
        assert!(set.latest("sma_200").is_none());
        assert_eq!(set.get("sma_200").unwrap().len(), 60);
    }

    #[test]
    fn test_custom_config() {
        let config: SuiteConfig = serde_json::from_str(r#"{"sma_windows": [5]}"#).unwrap();
        let suite = IndicatorSuite::from_config(&config);
        assert!(suite.series_names().contains(&"sma_5".to_string()));
        assert!(!suite.series_names().contains(&"sma_200".to_string()));
        assert_eq!(config.ema_spans, vec![12, 26]);
    }

    #[test]
    fn test_covering_adds_technical_windows_once() {
        let technical = TechnicalConfig {
            fast_ma_window: 30,
            slow_ma_window: 200,
            ..TechnicalConfig::default()
        };
        let config = SuiteConfig::default().covering(&technical);
        assert_eq!(config.sma_windows, vec![20, 50, 200, 30]);

        let suite = IndicatorSuite::from_config(&config);
        let set = suite.compute(&history(250)).unwrap();
        assert!(set.latest("sma_30").is_some());
        assert!(set.latest("sma_200").is_some());

        let again = config.covering(&technical);
        assert_eq!(again.sma_windows, vec![20, 50, 200, 30]);
    }

    #[test]
    fn test_debug_lists_names() {
        let debug = format!("{:?}", IndicatorSuite::standard());
        assert!(debug.contains("rsi"));
    }
}
