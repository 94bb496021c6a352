//! Technical analysis command implementation.

use crate::{Format, input};
use anyhow::Result;
use dalal_indicators::{IndicatorSuite, PivotLevels, TechnicalAnalysis};
use dalal_traits::{Fallback, IndicatorSet};
use serde::Serialize;
use std::path::Path;

/// Latest-value view of one run.
#[derive(Debug, Serialize)]
struct TechnicalReport {
    bars: usize,
    as_of: String,
    latest: Vec<(String, Option<f64>)>,
    technical: TechnicalAnalysis,
    levels: PivotLevels,
    notes: Vec<Fallback>,
}

/// Compute indicators, the signal tally and pivot levels for a history file.
pub(crate) fn run_technical(
    path: &Path,
    as_of: Option<&str>,
    config: Option<&Path>,
    format: Format,
) -> Result<()> {
    let config = input::load_config(config)?;
    let mut history = input::load_history(path)?;
    if let Some(date) = as_of {
        history = input::truncate_history(&history, input::parse_date(date)?)?;
    }

    let suite = IndicatorSuite::from_config(&config.suite.clone().covering(&config.technical));
    let indicators = suite.compute(&history)?;
    let technical = TechnicalAnalysis::evaluate(&history, &indicators, &config.technical);
    let levels = PivotLevels::compute(&history, &config.levels);

    let mut notes = technical.notes.clone();
    notes.extend(levels.shortfall(&config.levels));

    let report = TechnicalReport {
        bars: history.len(),
        as_of: history
            .last()
            .map(|bar| bar.date.to_string())
            .unwrap_or_default(),
        latest: latest_values(&indicators),
        technical,
        levels,
        notes,
    };

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Text => print_report(&report),
    }
    Ok(())
}

fn latest_values(indicators: &IndicatorSet) -> Vec<(String, Option<f64>)> {
    indicators
        .names()
        .map(|name| (name.to_string(), indicators.latest(name)))
        .collect()
}

fn print_report(report: &TechnicalReport) {
    super::header("Technical Analysis");
    println!("Bars:   {}", report.bars);
    println!("As of:  {}\n", report.as_of);

    super::section("Indicators");
    for (name, value) in &report.latest {
        println!("  {name:16} {:>12}", super::fmt_opt(*value));
    }
    println!();

    super::section("Signals");
    for signal in &report.technical.signals {
        println!("  {:16} {:8} {}", signal.name, signal.action, signal.detail);
    }
    println!(
        "\n  Rating: {} ({} buy, {} sell)\n",
        report.technical.rating, report.technical.buy_count, report.technical.sell_count
    );

    let levels = &report.levels;
    super::section(&format!("Levels ({} bars)", levels.bars_used));
    println!("  R2      {:>12.2}", levels.resistance_2);
    println!("  R1      {:>12.2}", levels.resistance_1);
    println!("  Pivot   {:>12.2}", levels.pivot);
    println!("  S1      {:>12.2}", levels.support_1);
    println!("  S2      {:>12.2}", levels.support_2);
    println!();

    if !report.notes.is_empty() {
        super::section("Notes");
        for note in &report.notes {
            println!("  {note}");
        }
        println!();
    }
}
