//! Benchmark table command implementation.

use anyhow::{Context, Result};
use dalal_fundamentals::{BenchmarkTable, MetricPolarity, SectorBenchmarks};
use std::path::Path;

/// Print the benchmark tables, or a single sector's effective table.
pub(crate) fn show_benchmarks(sector: Option<&str>, file: Option<&Path>) -> Result<()> {
    let benchmarks = match file {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading benchmarks {}", path.display()))?;
            SectorBenchmarks::from_json_str(&json)?
        }
        None => SectorBenchmarks::nse(),
    };

    super::header("Sector Benchmarks");

    match sector {
        Some(name) => {
            match benchmarks.canonical_sector(name) {
                Some(canonical) => super::section(canonical),
                None => {
                    println!("Unknown sector '{name}', showing default benchmarks.\n");
                    super::section("Default");
                }
            }
            print_table(&benchmarks.effective_table(name));
        }
        None => {
            for name in benchmarks.sector_names() {
                super::section(name);
                if let Some(table) = benchmarks.sector(name) {
                    print_table(table);
                }
            }
            super::section("Default");
            print_table(benchmarks.default_table());
        }
    }

    Ok(())
}

fn print_table(table: &BenchmarkTable) {
    for (metric, value) in table {
        let polarity = match MetricPolarity::of(metric) {
            Some(MetricPolarity::HigherIsBetter) => "higher is better",
            Some(MetricPolarity::LowerIsBetter) => "lower is better",
            None => "",
        };
        println!("  {metric:20} {value:>10.2}   {polarity}");
    }
    println!();
}
