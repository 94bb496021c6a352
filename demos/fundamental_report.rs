//! Fundamental report for a company with eight reported quarters.
//!
//! This example demonstrates:
//! - Describing reporting periods with `FinancialPeriod`
//! - Scoring ratio categories against NSE sector benchmarks
//! - Growth, earnings quality and the weighted composite
//! - Reading absorbed fallbacks from the report notes

use dalal::prelude::*;

/// Quarterly revenue growth factor.
const GROWTH: f64 = 1.04;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let periods = (0..8)
        .map(|q| {
            let g = GROWTH.powi(q);
            FinancialPeriod::new(
                format!("Q{}FY{}", q % 4 + 1, 23 + q / 4),
                [
                    ("revenue", 38_000.0 * g),
                    ("operating_profit", 9_100.0 * g),
                    ("net_profit", 6_200.0 * g),
                    ("ebitda", 10_400.0 * g),
                    ("eps", 15.0 * g),
                    ("operating_cash_flow", 7_000.0 * g),
                    ("roe", 31.0),
                    ("roce", 38.0),
                    ("net_margin", 16.3),
                    ("current_ratio", 2.4),
                    ("debt_to_equity", 0.08),
                    ("asset_turnover", 1.1),
                ]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            )
        })
        .collect();

    let input = FundamentalInput {
        sector: "IT".to_string(),
        periods,
    };
    let report = FundamentalAnalyzer::default().analyze(&input)?;

    println!("Category scores:");
    for score in report.categories.values() {
        println!("  {:14} {:>6.1}", score.category.to_string(), score.score);
    }
    println!(
        "Composite: {:.1} ({})",
        report.composite.overall, report.composite.rating
    );
    println!("Recommendation: {}", report.recommendation);

    println!("\nGrowth consistency: {}", report.growth.consistency);
    if let Some(cagr) = report.growth.revenue_cagr {
        println!("Revenue CAGR: {cagr:.1}%");
    }
    if let Some(conversion) = report.quality.cash_conversion {
        println!("Cash conversion: {conversion:.1}%");
    }

    println!("\nAgainst IT benchmarks:");
    for (metric, cmp) in &report.peer.metrics {
        println!("  {metric:16} {:+6.1}%  {}", cmp.pct_difference, cmp.assessment);
    }

    for note in &report.notes {
        println!("note: {note}");
    }

    Ok(())
}
