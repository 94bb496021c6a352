//! Volatility measures.

mod atr;
mod bollinger;

pub use atr::{Atr, AtrConfig, atr, true_range};
pub use bollinger::{Bollinger, BollingerBands, BollingerConfig, bollinger};
