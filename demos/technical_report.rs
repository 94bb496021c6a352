//! Technical report on a synthetic price history.
//!
//! This example demonstrates:
//! - Building a validated `PriceHistory` from OHLCV bars
//! - Computing the standard indicator suite
//! - Running the buy/sell signal tally
//! - Deriving pivot support and resistance levels

use dalal::indicators::{LevelsConfig, PivotLevels, TechnicalConfig};
use dalal::prelude::*;

/// Trading days to simulate.
const BARS: usize = 260;

/// Starting close.
const START_PRICE: f64 = 1_450.0;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let history = synthetic_history()?;
    let indicators = IndicatorSuite::standard().compute(&history)?;

    println!("Bars: {}", history.len());
    println!("\nLatest indicator values:");
    for name in indicators.names() {
        match indicators.latest(name) {
            Some(value) => println!("  {name:16} {value:>10.2}"),
            None => println!("  {name:16} {:>10}", "-"),
        }
    }

    let technical = TechnicalAnalysis::evaluate(&history, &indicators, &TechnicalConfig::default());
    println!("\nSignals:");
    for signal in &technical.signals {
        println!("  {:16} {:8} {}", signal.name, signal.action, signal.detail);
    }
    println!(
        "Rating: {} ({} buy / {} sell), score {:.1}",
        technical.rating,
        technical.buy_count,
        technical.sell_count,
        technical.score()
    );

    let levels = PivotLevels::compute(&history, &LevelsConfig::default());
    println!("\nLevels over {} bars:", levels.bars_used);
    println!("  R2 {:.2}  R1 {:.2}", levels.resistance_2, levels.resistance_1);
    println!("  P  {:.2}", levels.pivot);
    println!("  S1 {:.2}  S2 {:.2}", levels.support_1, levels.support_2);

    for note in &technical.notes {
        println!("note: {note}");
    }

    Ok(())
}

/// A trending series with a slow cycle on top.
fn synthetic_history() -> Result<PriceHistory> {
    let start = Date::from_ymd_opt(2024, 1, 1).ok_or("invalid start date")?;
    let bars = start
        .iter_days()
        .take(BARS)
        .enumerate()
        .map(|(i, date)| {
            let t = i as f64;
            let close = START_PRICE + 1.2 * t + 40.0 * (t / 15.0).sin();
            let open = close - 3.0 * (t / 3.0).cos();
            let volume = 2.0e6 + 5.0e5 * (t / 7.0).sin().abs();
            PriceBar::new(date, open, close + 12.0, close - 12.0, close, volume)
        })
        .collect();
    PriceHistory::new(bars)
}
