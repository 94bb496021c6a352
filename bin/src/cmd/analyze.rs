//! Full equity analysis command implementation.

use crate::{Format, input};
use anyhow::Result;
use dalal_analysis::{EquityAnalyzer, EquityReport, FundamentalReport, ValuationReport};
use std::path::Path;

/// Analyze one equity input file and print the report.
pub(crate) fn run_analysis(path: &Path, config: Option<&Path>, format: Format) -> Result<()> {
    let config = input::load_config(config)?;
    let equity = input::load_equity(path)?;

    let analyzer = EquityAnalyzer::new(config);
    let report = analyzer.analyze(&equity)?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Text => print_report(&report),
    }
    Ok(())
}

fn print_report(report: &EquityReport) {
    let title = if report.symbol.is_empty() {
        "Equity Analysis".to_string()
    } else {
        format!("Equity Analysis: {}", report.symbol)
    };
    super::header(&title);

    print_fundamental(&report.fundamental);
    print_valuation(&report.valuation);

    super::section("Blend");
    for (source, score) in &report.blend.components {
        println!("  {source:20} {score:>8.1}");
    }
    println!("  {:20} {:>8.1}", "overall", report.blend.overall);
    println!("  Action: {}\n", report.blend.action);

    let notes: Vec<_> = report
        .fundamental
        .notes
        .iter()
        .chain(&report.valuation.notes)
        .collect();
    if !notes.is_empty() {
        super::section("Notes");
        for note in notes {
            println!("  {note}");
        }
        println!();
    }
}

fn print_fundamental(report: &FundamentalReport) {
    super::section(&format!("Fundamentals ({})", report.sector));
    if let Some(period) = &report.performance.period {
        println!("  Latest period: {period}");
    }
    for (metric, value) in &report.performance.latest {
        let yoy = report
            .performance
            .year_over_year
            .get(metric)
            .map(|c| format!("{:+.1}% YoY", c.change))
            .unwrap_or_default();
        println!("  {metric:20} {value:>14.2}  {yoy}");
    }
    println!();

    for score in report.categories.values() {
        println!("  {:20} {:>8.1}", score.category.to_string(), score.score);
    }
    println!(
        "  {:20} {:>8.1}  {}",
        "composite", report.composite.overall, report.composite.rating
    );
    println!();

    let growth = &report.growth;
    println!("  Revenue CAGR        {:>8}", super::fmt_opt(growth.revenue_cagr));
    println!("  Profit CAGR         {:>8}", super::fmt_opt(growth.profit_cagr));
    println!("  EPS CAGR            {:>8}", super::fmt_opt(growth.eps_cagr));
    println!("  Consistency         {}", growth.consistency);

    let quality = &report.quality;
    println!(
        "  Cash conversion     {:>8}",
        super::fmt_opt(quality.cash_conversion)
    );
    if let Some(persistence) = quality.persistence {
        println!("  Persistence         {persistence}");
    }
    for flag in &quality.flags {
        println!("  ! {flag}");
    }
    println!();

    if !report.peer.metrics.is_empty() {
        for (metric, cmp) in &report.peer.metrics {
            println!(
                "  {metric:20} {:>10.2} vs {:>8.2}  {:+6.1}%  {}",
                cmp.value, cmp.benchmark, cmp.pct_difference, cmp.assessment
            );
        }
        println!();
    }

    println!("  Recommendation: {}\n", report.recommendation);
}

fn print_valuation(report: &ValuationReport) {
    super::section("Valuation");
    let estimate = &report.estimate;
    println!("  Current price       {:>10}", super::fmt_opt(estimate.current_price));
    for method in &estimate.methods {
        println!(
            "  {:20}{:>10.2}  (x{:.2})",
            method.method.to_string(),
            method.fair_value,
            method.multiple
        );
    }
    println!("  Fair value          {:>10}", super::fmt_opt(estimate.fair_value));
    println!(
        "  Upside              {:>9.1}%  {}",
        estimate.upside, estimate.rating
    );
    for (metric, cmp) in &report.industry {
        println!(
            "  {metric:20}{:>10.2} vs {:>8.2}  {}",
            cmp.value, cmp.industry_average, cmp.verdict
        );
    }
    println!();

    if let Some(technical) = &report.technical {
        println!(
            "  Technical: {} ({} buy, {} sell)",
            technical.rating, technical.buy_count, technical.sell_count
        );
    }
    if let Some(levels) = &report.levels {
        println!(
            "  Support {:.2} / {:.2}, resistance {:.2} / {:.2}",
            levels.support_1, levels.support_2, levels.resistance_1, levels.resistance_2
        );
    }
    println!("  Technical score: {:.1}", report.technical_score.score);
    println!("  Track score: {:.1}", report.track_score);
    println!("  Recommendation: {}\n", report.recommendation);
}
