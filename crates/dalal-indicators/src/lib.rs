#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dalal/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod levels;
pub mod momentum;
pub mod moving_average;
pub mod registry;
pub mod suite;
pub mod technical;
pub mod volatility;
pub mod volume;

// Re-export key types
pub use levels::{LevelsConfig, PivotLevels};
pub use momentum::{Macd, MacdConfig, Rsi, RsiConfig};
pub use moving_average::{Ema, EmaConfig, Sma, SmaConfig};
pub use registry::{IndicatorCategory, IndicatorInfo};
pub use suite::{IndicatorSuite, SuiteConfig};
pub use technical::{
    SignalAction, TechnicalAnalysis, TechnicalConfig, TechnicalRating, TechnicalSignal,
    TechnicalSnapshot,
};
pub use volatility::{Atr, AtrConfig, Bollinger, BollingerConfig};
pub use volume::{Obv, Vwap};
