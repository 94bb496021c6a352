//! Moving averages of closing prices.
//!
//! - SMA: arithmetic mean of the trailing window, `NaN` until the window fills
//! - EMA: recursive smoothing seeded by the first value, defined from bar 0

mod ema;
mod sma;

pub use ema::{Ema, EmaConfig, ema};
pub use sma::{Sma, SmaConfig, sma};
