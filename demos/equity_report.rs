//! End-to-end equity report from a JSON document.
//!
//! This example demonstrates:
//! - Deserializing an `EquityInput` with partial fields
//! - Loading a partial `AnalysisConfig` that overrides composite weights
//! - Running both analysis tracks and the cross-source blend
//! - Serializing the full report back to JSON

use dalal::prelude::*;

const INPUT: &str = r#"{
    "symbol": "HINDUNILVR",
    "sector": "FMCG",
    "periods": [
        {"label": "FY22", "metrics": {"revenue": 51193, "net_profit": 8818, "eps": 37.5}},
        {"label": "FY23", "metrics": {"revenue": 58154, "net_profit": 10143, "eps": 43.1}},
        {"label": "FY24", "metrics": {"revenue": 59579, "net_profit": 10282, "eps": 43.7}},
        {"label": "FY25", "metrics": {
            "revenue": 60680, "net_profit": 10649, "eps": 45.3,
            "operating_cash_flow": 15000,
            "roe": 20.4, "net_margin": 17.5, "current_ratio": 1.3, "debt_to_equity": 0.02
        }}
    ],
    "metrics": {"current_price": 2350.0, "pe_ratio": 51.9, "pb_ratio": 10.8, "eps": 45.3},
    "sentiment": 0.2,
    "macro_health": 62.0
}"#;

const CONFIG: &str = r#"{
    "fundamental": {
        "weights": {"profitability": 0.4, "growth": 0.2, "leverage": 0.2, "quality": 0.2}
    }
}"#;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let input: EquityInput = serde_json::from_str(INPUT)?;
    let config = AnalysisConfig::from_json_str(CONFIG)?;

    let report = EquityAnalyzer::new(config).analyze(&input)?;

    println!(
        "{}: fundamental {:.1}, valuation track {:.1}, blend {:.1} -> {}",
        report.symbol,
        report.fundamental.composite.overall,
        report.valuation.track_score,
        report.blend.overall,
        report.blend.action
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
