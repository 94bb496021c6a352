//! Common types used throughout the dalal workspace.
//!
//! This module defines price bars, the validated [`PriceHistory`] container
//! and the metric snapshot type used for fundamental data.

use crate::{DalalError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier, e.g. "INFY" or "TCS".
pub type Symbol = String;

/// Point-in-time metric values keyed by metric name (`roe`, `pe_ratio`, ...).
pub type MetricSnapshot = BTreeMap<String, f64>;

/// Days between 0001-01-01 and the Unix epoch, for polars date columns.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// One OHLCV observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading date.
    pub date: Date,
    /// Opening price.
    pub open: f64,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
}

impl PriceBar {
    /// Create a bar.
    #[must_use]
    pub const fn new(date: Date, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// `(high + low + close) / 3`.
    #[must_use]
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Read one field of the bar.
    #[must_use]
    pub const fn field(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
            PriceField::Volume => self.volume,
        }
    }
}

/// A numeric field of a [`PriceBar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    /// Opening price.
    Open,
    /// Session high.
    High,
    /// Session low.
    Low,
    /// Closing price.
    Close,
    /// Traded volume.
    Volume,
}

impl PriceField {
    /// All fields in column order.
    pub const ALL: [Self; 5] = [Self::Open, Self::High, Self::Low, Self::Close, Self::Volume];

    /// Column name of this field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
        }
    }
}

/// An ordered, validated sequence of price bars for one instrument.
///
/// Construction rejects malformed input up front so that every indicator
/// computed from a `PriceHistory` can assume:
/// - at least one bar
/// - dates strictly ascending (no duplicates)
/// - finite prices and finite, non-negative volumes
///
/// The history is read-only once built.
///
/// # Example
///
/// ```
/// use dalal_traits::{Date, PriceBar, PriceHistory};
///
/// let day = |d| Date::from_ymd_opt(2024, 1, d).unwrap();
/// let history = PriceHistory::new(vec![
///     PriceBar::new(day(1), 100.0, 102.0, 99.0, 101.0, 1_000.0),
///     PriceBar::new(day(2), 101.0, 103.0, 100.0, 102.5, 1_200.0),
/// ])
/// .unwrap();
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.closes(), vec![101.0, 102.5]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PriceBar>", into = "Vec<PriceBar>")]
pub struct PriceHistory {
    bars: Vec<PriceBar>,
}

impl PriceHistory {
    /// Validate and wrap a sequence of bars.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence is empty, if any price or volume is
    /// not finite, if any volume is negative, or if dates are not strictly
    /// ascending.
    pub fn new(bars: Vec<PriceBar>) -> Result<Self> {
        if bars.is_empty() {
            return Err(DalalError::EmptySeries);
        }

        for (index, bar) in bars.iter().enumerate() {
            for field in PriceField::ALL {
                if !bar.field(field).is_finite() {
                    return Err(DalalError::NonFiniteValue {
                        field: field.as_str().to_string(),
                        index,
                    });
                }
            }

            if bar.volume < 0.0 {
                return Err(DalalError::NegativeVolume {
                    index,
                    volume: bar.volume,
                });
            }

            if index > 0 {
                let previous = bars[index - 1].date;
                if bar.date <= previous {
                    return Err(DalalError::UnsortedDates {
                        index,
                        previous,
                        current: bar.date,
                    });
                }
            }
        }

        Ok(Self { bars })
    }

    /// Build a history from a DataFrame with `date`, `open`, `high`, `low`,
    /// `close` and `volume` columns.
    ///
    /// Numeric columns of any width are cast to `f64`.
    ///
    /// # Errors
    ///
    /// Returns an error if a column is missing, has the wrong type, contains
    /// nulls, or if the resulting bars fail [`PriceHistory::new`] validation.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        for col in ["date", "open", "high", "low", "close", "volume"] {
            if df.column(col).is_err() {
                return Err(DalalError::MissingColumn(col.to_string()));
            }
        }

        let dates: Vec<Option<Date>> = df
            .column("date")?
            .as_materialized_series()
            .date()?
            .into_iter()
            .map(|d: Option<i32>| {
                d.and_then(|d| Date::from_num_days_from_ce_opt(d + EPOCH_DAYS_FROM_CE))
            })
            .collect();

        let open = float_column(df, "open")?;
        let high = float_column(df, "high")?;
        let low = float_column(df, "low")?;
        let close = float_column(df, "close")?;
        let volume = float_column(df, "volume")?;

        let mut bars = Vec::with_capacity(dates.len());
        for (index, date) in dates.into_iter().enumerate() {
            let date = date.ok_or_else(|| {
                DalalError::InvalidData(format!("Missing date at row {index}"))
            })?;
            let value = |column: &[Option<f64>], field: &str| {
                column[index].ok_or_else(|| DalalError::NonFiniteValue {
                    field: field.to_string(),
                    index,
                })
            };
            bars.push(PriceBar::new(
                date,
                value(&open, "open")?,
                value(&high, "high")?,
                value(&low, "low")?,
                value(&close, "close")?,
                value(&volume, "volume")?,
            ));
        }

        Self::new(bars)
    }

    /// Convert the history to a DataFrame with one row per bar.
    ///
    /// # Errors
    ///
    /// Returns an error if Polars fails to assemble the frame.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let df = df! {
            "date" => self.dates(),
            "open" => self.values(PriceField::Open),
            "high" => self.values(PriceField::High),
            "low" => self.values(PriceField::Low),
            "close" => self.values(PriceField::Close),
            "volume" => self.values(PriceField::Volume),
        }?;
        Ok(df)
    }

    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a validated history; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The bars in date order.
    #[must_use]
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// The most recent bar.
    #[must_use]
    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Dates in order.
    #[must_use]
    pub fn dates(&self) -> Vec<Date> {
        self.bars.iter().map(|b| b.date).collect()
    }

    /// One field across all bars.
    #[must_use]
    pub fn values(&self, field: PriceField) -> Vec<f64> {
        self.bars.iter().map(|b| b.field(field)).collect()
    }

    /// Closing prices in order.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.values(PriceField::Close)
    }
}

impl TryFrom<Vec<PriceBar>> for PriceHistory {
    type Error = DalalError;

    fn try_from(bars: Vec<PriceBar>) -> Result<Self> {
        Self::new(bars)
    }
}

impl From<PriceHistory> for Vec<PriceBar> {
    fn from(history: PriceHistory) -> Self {
        history.bars
    }
}

impl AsRef<[PriceBar]> for PriceHistory {
    fn as_ref(&self) -> &[PriceBar] {
        &self.bars
    }
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let values = series.f64()?.into_iter().collect();
    Ok(values)
}
