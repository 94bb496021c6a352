//! Momentum oscillators.
//!
//! - RSI: bounded `[0, 100]` oscillator from rolling mean gains and losses
//! - MACD: difference of a fast and a slow EMA, plus its signal line

mod macd;
mod rsi;

pub use macd::{Macd, MacdConfig, MacdSeries, macd};
pub use rsi::{Rsi, RsiConfig, rsi};
