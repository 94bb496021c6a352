//! Volume-weighted measures.
//!
//! Both are cumulative from the first bar of the history; neither resets
//! per session.

mod obv;
mod vwap;

pub use obv::{Obv, obv};
pub use vwap::{Vwap, vwap};
