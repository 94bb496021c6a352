//! Sector benchmark tables with an explicit layered lookup.
//!
//! A metric's benchmark is taken from the company's sector table when the
//! sector is known and lists the metric, then from the default table, and
//! is otherwise missing. Each layer is reported through [`BenchmarkSource`].

use dalal_traits::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Benchmark values keyed by metric name.
pub type BenchmarkTable = BTreeMap<String, f64>;

/// Which layer of the lookup produced a benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkSource {
    /// The company's sector table.
    Sector,
    /// The default table.
    Default,
    /// Neither table lists the metric.
    Missing,
}

/// Result of a layered benchmark lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkLookup {
    /// The benchmark, when found.
    pub value: Option<f64>,
    /// The layer it came from.
    pub source: BenchmarkSource,
}

impl BenchmarkLookup {
    const MISSING: Self = Self {
        value: None,
        source: BenchmarkSource::Missing,
    };
}

/// Benchmark tables for every known sector plus a default table.
///
/// The table is immutable once built and may be shared freely across
/// threads.
///
/// # Example
///
/// ```
/// use dalal_fundamentals::{BenchmarkSource, SectorBenchmarks};
///
/// let benchmarks = SectorBenchmarks::nse();
///
/// let it = benchmarks.lookup("IT", "roe");
/// assert_eq!(it.value, Some(25.0));
/// assert_eq!(it.source, BenchmarkSource::Sector);
///
/// let unknown = benchmarks.lookup("Textiles", "roe");
/// assert_eq!(unknown.source, BenchmarkSource::Default);
///
/// let missing = benchmarks.lookup("IT", "inventory_turnover");
/// assert_eq!(missing.source, BenchmarkSource::Missing);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorBenchmarks {
    /// Per-sector tables keyed by sector name.
    #[serde(default)]
    pub sectors: BTreeMap<String, BenchmarkTable>,
    /// Table used when the sector or the metric is not listed.
    #[serde(default)]
    pub default: BenchmarkTable,
}

fn table(entries: [(&str, f64); 5]) -> BenchmarkTable {
    entries
        .into_iter()
        .map(|(metric, value)| (metric.to_string(), value))
        .collect()
}

impl SectorBenchmarks {
    /// Create benchmarks with only a default table.
    #[must_use]
    pub const fn new(default: BenchmarkTable) -> Self {
        Self {
            sectors: BTreeMap::new(),
            default,
        }
    }

    /// Add or replace one sector's table.
    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>, table: BenchmarkTable) -> Self {
        self.sectors.insert(sector.into(), table);
        self
    }

    /// Built-in benchmarks for major NSE sectors.
    #[must_use]
    pub fn nse() -> Self {
        let rows: [(&str, [f64; 5]); 8] = [
            ("IT", [25.0, 30.0, 18.0, 0.1, 2.5]),
            ("Banking", [15.0, 12.0, 15.0, 8.0, 1.0]),
            ("Pharma", [18.0, 20.0, 12.0, 0.3, 2.0]),
            ("Auto", [15.0, 18.0, 8.0, 0.5, 1.2]),
            ("FMCG", [35.0, 40.0, 15.0, 0.2, 1.5]),
            ("Infrastructure", [12.0, 14.0, 8.0, 1.0, 1.2]),
            ("Metals", [12.0, 15.0, 10.0, 0.8, 1.0]),
            ("Oil & Gas", [15.0, 18.0, 8.0, 0.6, 1.2]),
        ];

        let row = |[roe, roce, net_margin, debt_to_equity, current_ratio]: [f64; 5]| {
            table([
                ("roe", roe),
                ("roce", roce),
                ("net_margin", net_margin),
                ("debt_to_equity", debt_to_equity),
                ("current_ratio", current_ratio),
            ])
        };

        rows.into_iter().fold(
            Self::new(row([15.0, 18.0, 10.0, 0.5, 1.5])),
            |acc, (sector, values)| acc.with_sector(sector, row(values)),
        )
    }

    /// Parse benchmarks from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON for this type.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve a sector name, ignoring ASCII case.
    fn resolve(&self, sector: &str) -> Option<(&str, &BenchmarkTable)> {
        let sector = sector.trim();
        self.sectors
            .get_key_value(sector)
            .or_else(|| {
                self.sectors
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(sector))
            })
            .map(|(name, table)| (name.as_str(), table))
    }

    /// Whether a sector has its own table.
    #[must_use]
    pub fn has_sector(&self, sector: &str) -> bool {
        self.resolve(sector).is_some()
    }

    /// A sector's own table, if it has one.
    #[must_use]
    pub fn sector(&self, sector: &str) -> Option<&BenchmarkTable> {
        self.resolve(sector).map(|(_, table)| table)
    }

    /// The canonical name of a known sector.
    #[must_use]
    pub fn canonical_sector(&self, sector: &str) -> Option<&str> {
        self.resolve(sector).map(|(name, _)| name)
    }

    /// The default table.
    #[must_use]
    pub const fn default_table(&self) -> &BenchmarkTable {
        &self.default
    }

    /// Known sector names in sorted order.
    pub fn sector_names(&self) -> impl Iterator<Item = &str> {
        self.sectors.keys().map(String::as_str)
    }

    /// Layered lookup: sector table, then default table, then missing.
    #[must_use]
    pub fn lookup(&self, sector: &str, metric: &str) -> BenchmarkLookup {
        if let Some(value) = self.sector(sector).and_then(|t| t.get(metric)) {
            return BenchmarkLookup {
                value: Some(*value),
                source: BenchmarkSource::Sector,
            };
        }
        if let Some(value) = self.default.get(metric) {
            return BenchmarkLookup {
                value: Some(*value),
                source: BenchmarkSource::Default,
            };
        }
        BenchmarkLookup::MISSING
    }

    /// Every benchmark that applies to a sector: the default table overlaid
    /// with the sector's own values.
    #[must_use]
    pub fn effective_table(&self, sector: &str) -> BenchmarkTable {
        let mut merged = self.default.clone();
        if let Some(own) = self.sector(sector) {
            merged.extend(own.iter().map(|(k, v)| (k.clone(), *v)));
        }
        merged
    }
}

impl Default for SectorBenchmarks {
    fn default() -> Self {
        Self::nse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nse_tables() {
        let benchmarks = SectorBenchmarks::nse();
        assert_eq!(benchmarks.sector_names().count(), 8);
        assert_eq!(benchmarks.sector("FMCG").unwrap()["roe"], 35.0);
        assert_eq!(benchmarks.default_table()["current_ratio"], 1.5);
        assert!(benchmarks.has_sector("Oil & Gas"));
    }

    #[test]
    fn test_lookup_layers() {
        let benchmarks = SectorBenchmarks::new(table([
            ("roe", 15.0),
            ("roce", 18.0),
            ("net_margin", 10.0),
            ("debt_to_equity", 0.5),
            ("current_ratio", 1.5),
        ]))
        .with_sector("Banking", BTreeMap::from([("roe".to_string(), 14.0)]));

        let sector = benchmarks.lookup("Banking", "roe");
        assert_eq!(sector.value, Some(14.0));
        assert_eq!(sector.source, BenchmarkSource::Sector);

        let fallthrough = benchmarks.lookup("Banking", "roce");
        assert_eq!(fallthrough.value, Some(18.0));
        assert_eq!(fallthrough.source, BenchmarkSource::Default);

        let missing = benchmarks.lookup("Banking", "quick_ratio");
        assert_eq!(missing.value, None);
        assert_eq!(missing.source, BenchmarkSource::Missing);
    }

    #[test]
    fn test_sector_case_insensitive() {
        let benchmarks = SectorBenchmarks::nse();
        assert_eq!(benchmarks.canonical_sector("pharma"), Some("Pharma"));
        assert_eq!(benchmarks.lookup(" it ", "roe").source, BenchmarkSource::Sector);
        assert!(!benchmarks.has_sector("Textiles"));
    }

    #[test]
    fn test_effective_table() {
        let benchmarks = SectorBenchmarks::nse();
        let it = benchmarks.effective_table("IT");
        assert_eq!(it["roe"], 25.0);
        assert_eq!(it.len(), 5);

        let unknown = benchmarks.effective_table("Textiles");
        assert_eq!(unknown, *benchmarks.default_table());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"default": {"roe": 12.0}, "sectors": {"Retail": {"roe": 20.0}}}"#;
        let benchmarks = SectorBenchmarks::from_json_str(json).unwrap();
        assert_eq!(benchmarks.lookup("Retail", "roe").value, Some(20.0));
        assert_eq!(benchmarks.lookup("Other", "roe").value, Some(12.0));
        assert!(SectorBenchmarks::from_json_str("not json").is_err());
    }
}
