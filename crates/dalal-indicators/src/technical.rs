//! Four-signal technical tally.
//!
//! Each signal reads the latest defined indicator values and votes Buy, Sell
//! or Neutral:
//!
//! | Signal | Buy | Sell |
//! |--------|-----|------|
//! | RSI | below the oversold level | above the overbought level |
//! | MACD | line above signal | line below signal |
//! | Moving averages | close > fast SMA > slow SMA | close < fast SMA < slow SMA |
//! | Bollinger | close below lower band | close above upper band |
//!
//! A signal whose inputs are undefined is skipped and recorded as an
//! insufficient-data note. The rating is Bullish when buys outnumber sells,
//! Bearish when sells outnumber buys, and Neutral otherwise.

use crate::registry;
use dalal_traits::{
    Fallback, IndicatorSet, PriceHistory,
    stats::{self, NEUTRAL_SCORE},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Thresholds for the technical tally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalConfig {
    /// RSI below this votes Buy (default: 30)
    pub rsi_oversold: f64,
    /// RSI above this votes Sell (default: 70)
    pub rsi_overbought: f64,
    /// Window of the fast trend SMA, read as `sma_<window>` (default: 50)
    pub fast_ma_window: usize,
    /// Window of the slow trend SMA, read as `sma_<window>` (default: 200)
    pub slow_ma_window: usize,
}

impl Default for TechnicalConfig {
    fn default() -> Self {
        Self {
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            fast_ma_window: 50,
            slow_ma_window: 200,
        }
    }
}

/// Vote cast by one technical signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalAction {
    /// Bullish vote.
    Buy,
    /// Bearish vote.
    Sell,
    /// No directional view.
    Neutral,
}

impl fmt::Display for SignalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Buy => "Buy",
            Self::Sell => "Sell",
            Self::Neutral => "Neutral",
        };
        f.write_str(label)
    }
}

/// Aggregate direction of the tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TechnicalRating {
    /// More buy votes than sell votes.
    Bullish,
    /// More sell votes than buy votes.
    Bearish,
    /// Tied, including no votes at all.
    Neutral,
}

impl fmt::Display for TechnicalRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Bullish => "Bullish",
            Self::Bearish => "Bearish",
            Self::Neutral => "Neutral",
        };
        f.write_str(label)
    }
}

/// One evaluated signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSignal {
    /// Signal name: `rsi`, `macd`, `moving_averages` or `bollinger`.
    pub name: String,
    /// The vote.
    pub action: SignalAction,
    /// Short human-readable reason.
    pub detail: String,
}

impl TechnicalSignal {
    fn new(name: &str, action: SignalAction, detail: String) -> Self {
        Self {
            name: name.to_string(),
            action,
            detail,
        }
    }
}

/// Latest values the tally reads. `None` means undefined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSnapshot {
    /// Number of bars in the history the values came from.
    pub bars: usize,
    /// Latest close.
    pub close: Option<f64>,
    /// Latest RSI.
    pub rsi: Option<f64>,
    /// Latest MACD line.
    pub macd: Option<f64>,
    /// Latest MACD signal line.
    pub macd_signal: Option<f64>,
    /// Latest fast trend SMA.
    pub sma_fast: Option<f64>,
    /// Latest slow trend SMA.
    pub sma_slow: Option<f64>,
    /// Latest upper Bollinger band.
    pub bb_upper: Option<f64>,
    /// Latest lower Bollinger band.
    pub bb_lower: Option<f64>,
}

impl TechnicalSnapshot {
    /// Read the latest defined values from an indicator set.
    #[must_use]
    pub fn from_indicators(
        history: &PriceHistory,
        indicators: &IndicatorSet,
        config: &TechnicalConfig,
    ) -> Self {
        Self {
            bars: history.len(),
            close: history.last().map(|b| b.close),
            rsi: indicators.latest("rsi"),
            macd: indicators.latest("macd"),
            macd_signal: indicators.latest("macd_signal"),
            sma_fast: indicators.latest(&format!("sma_{}", config.fast_ma_window)),
            sma_slow: indicators.latest(&format!("sma_{}", config.slow_ma_window)),
            bb_upper: indicators.latest("bb_upper"),
            bb_lower: indicators.latest("bb_lower"),
        }
    }
}

/// Result of the technical tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalAnalysis {
    /// The values the tally read.
    pub snapshot: TechnicalSnapshot,
    /// Evaluated signals, in evaluation order.
    pub signals: Vec<TechnicalSignal>,
    /// Number of Buy votes.
    pub buy_count: usize,
    /// Number of Sell votes.
    pub sell_count: usize,
    /// Aggregate rating.
    pub rating: TechnicalRating,
    /// Signals skipped for lack of data.
    pub notes: Vec<Fallback>,
}

impl TechnicalAnalysis {
    /// Run the tally on the latest values of `indicators`.
    ///
    /// A signal skipped because one of its series is absent from the set,
    /// rather than undefined for lack of bars, is noted as
    /// [`Fallback::MissingIndicator`].
    #[must_use]
    pub fn evaluate(
        history: &PriceHistory,
        indicators: &IndicatorSet,
        config: &TechnicalConfig,
    ) -> Self {
        let mut analysis = Self::from_snapshot(
            TechnicalSnapshot::from_indicators(history, indicators, config),
            config,
        );
        for note in &mut analysis.notes {
            let Fallback::InsufficientData { subject, .. } = note else {
                continue;
            };
            let subject = subject.clone();
            let absent = input_series(&subject, config)
                .into_iter()
                .find(|series| indicators.get(series).is_none());
            if let Some(series) = absent {
                tracing::debug!(%subject, %series, "signal input was not computed");
                *note = Fallback::MissingIndicator { subject, series };
            }
        }
        analysis
    }

    /// Run the tally on explicit values.
    ///
    /// Skipped signals are noted with the bar count they need: the slow SMA
    /// window for the moving-average signal, the registry lookback otherwise.
    #[must_use]
    pub fn from_snapshot(snapshot: TechnicalSnapshot, config: &TechnicalConfig) -> Self {
        let mut signals = Vec::with_capacity(4);
        let mut notes = Vec::new();
        let mut skip = |subject: &str| {
            let required = if subject == "moving_averages" {
                config.slow_ma_window
            } else {
                registry::get_indicator_info(subject).map_or(0, |info| info.lookback)
            };
            notes.push(Fallback::insufficient(subject, required, snapshot.bars));
        };

        match snapshot.rsi {
            Some(rsi) => {
                let action = if rsi < config.rsi_oversold {
                    SignalAction::Buy
                } else if rsi > config.rsi_overbought {
                    SignalAction::Sell
                } else {
                    SignalAction::Neutral
                };
                let detail = match action {
                    SignalAction::Buy => format!("RSI {rsi:.1} oversold"),
                    SignalAction::Sell => format!("RSI {rsi:.1} overbought"),
                    SignalAction::Neutral => format!("RSI {rsi:.1} neutral"),
                };
                signals.push(TechnicalSignal::new("rsi", action, detail));
            }
            None => skip("rsi"),
        }

        match (snapshot.macd, snapshot.macd_signal) {
            (Some(line), Some(signal)) => {
                let action = if line > signal {
                    SignalAction::Buy
                } else if line < signal {
                    SignalAction::Sell
                } else {
                    SignalAction::Neutral
                };
                let detail = format!("MACD {line:.2} vs signal {signal:.2}");
                signals.push(TechnicalSignal::new("macd", action, detail));
            }
            _ => skip("macd"),
        }

        match (snapshot.close, snapshot.sma_fast, snapshot.sma_slow) {
            (Some(close), Some(fast), Some(slow)) => {
                let action = if close > fast && fast > slow {
                    SignalAction::Buy
                } else if close < fast && fast < slow {
                    SignalAction::Sell
                } else {
                    SignalAction::Neutral
                };
                let detail = match action {
                    SignalAction::Buy => "Price above rising moving averages".to_string(),
                    SignalAction::Sell => "Price below falling moving averages".to_string(),
                    SignalAction::Neutral => "Moving averages mixed".to_string(),
                };
                signals.push(TechnicalSignal::new("moving_averages", action, detail));
            }
            _ => skip("moving_averages"),
        }

        match (snapshot.close, snapshot.bb_lower, snapshot.bb_upper) {
            (Some(close), Some(lower), Some(upper)) => {
                let action = if close < lower {
                    SignalAction::Buy
                } else if close > upper {
                    SignalAction::Sell
                } else {
                    SignalAction::Neutral
                };
                let detail = match action {
                    SignalAction::Buy => "Price below lower band".to_string(),
                    SignalAction::Sell => "Price above upper band".to_string(),
                    SignalAction::Neutral => "Price within bands".to_string(),
                };
                signals.push(TechnicalSignal::new("bollinger", action, detail));
            }
            _ => skip("bollinger"),
        }

        let buy_count = signals
            .iter()
            .filter(|s| s.action == SignalAction::Buy)
            .count();
        let sell_count = signals
            .iter()
            .filter(|s| s.action == SignalAction::Sell)
            .count();
        let rating = match buy_count.cmp(&sell_count) {
            std::cmp::Ordering::Greater => TechnicalRating::Bullish,
            std::cmp::Ordering::Less => TechnicalRating::Bearish,
            std::cmp::Ordering::Equal => TechnicalRating::Neutral,
        };

        for note in &notes {
            tracing::debug!(%note, "technical signal skipped");
        }

        Self {
            snapshot,
            signals,
            buy_count,
            sell_count,
            rating,
            notes,
        }
    }

    /// Tally expressed on the 0-100 scale: `50 + 50 * (buys - sells) / evaluated`.
    ///
    /// No evaluated signals gives the neutral 50.
    #[must_use]
    pub fn score(&self) -> f64 {
        if self.signals.is_empty() {
            return NEUTRAL_SCORE;
        }
        let net = self.buy_count as f64 - self.sell_count as f64;
        stats::clamp_score(NEUTRAL_SCORE + 50.0 * net / self.signals.len() as f64)
    }

    /// Net vote `buys - sells`, clamped to `[-2, 2]`.
    #[must_use]
    pub fn vote(&self) -> i8 {
        let net = self.buy_count as i64 - self.sell_count as i64;
        net.clamp(-2, 2) as i8
    }
}

/// Series a signal reads from an [`IndicatorSet`].
fn input_series(subject: &str, config: &TechnicalConfig) -> Vec<String> {
    match subject {
        "rsi" => vec!["rsi".to_string()],
        "macd" => vec!["macd".to_string(), "macd_signal".to_string()],
        "moving_averages" => vec![
            format!("sma_{}", config.fast_ma_window),
            format!("sma_{}", config.slow_ma_window),
        ],
        "bollinger" => vec!["bb_lower".to_string(), "bb_upper".to_string()],
        _ => Vec::new(),
    }
}
