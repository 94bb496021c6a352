//! Indicator trait and the aligned series container it produces.
//!
//! An [`Indicator`] turns a [`PriceHistory`] into one or more named series,
//! each exactly as long as the history. Positions where the lookback window
//! is not yet populated hold `NaN` and mean "insufficient history".

use crate::{DalalError, PriceField, PriceHistory, Result};
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// A technical indicator computed from a price history.
///
/// Implementations are pure: the same history always yields the same
/// series, and the history is never modified. They must be `Send + Sync` so
/// a registry of indicators can be shared across threads.
///
/// # Example
///
/// ```
/// use dalal_traits::{Indicator, IndicatorSet, PriceField, PriceHistory, Result};
///
/// struct LastClose;
///
/// impl Indicator for LastClose {
///     fn name(&self) -> &str {
///         "last_close"
///     }
///
///     fn lookback(&self) -> usize {
///         1
///     }
///
///     fn required_fields(&self) -> &[PriceField] {
///         &[PriceField::Close]
///     }
///
///     fn compute(&self, history: &PriceHistory) -> Result<IndicatorSet> {
///         let mut set = IndicatorSet::new(history.len());
///         set.insert(self.name(), history.closes())?;
///         Ok(set)
///     }
/// }
/// ```
pub trait Indicator: Send + Sync {
    /// Returns the name of this indicator.
    ///
    /// Single-output indicators use this as their series name; multi-output
    /// indicators use it as a prefix (`bb` for `bb_upper`, `bb_middle`, ...).
    fn name(&self) -> &str;

    /// Number of bars needed before the first defined output.
    fn lookback(&self) -> usize;

    /// Price fields read by this indicator.
    fn required_fields(&self) -> &[PriceField];

    /// Compute the indicator's series over the whole history.
    ///
    /// # Errors
    ///
    /// Returns an error only if the produced series cannot be stored, which
    /// indicates a bug in the implementation. Short histories are not errors:
    /// the output is simply `NaN` where the window is unfilled.
    fn compute(&self, history: &PriceHistory) -> Result<IndicatorSet>;
}

/// Named numeric series aligned to one price history.
///
/// Every series has the same length. Names are kept in sorted order so that
/// iteration and serialization are deterministic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSet {
    len: usize,
    series: BTreeMap<String, Vec<f64>>,
}

impl IndicatorSet {
    /// Create an empty set for a history of `len` bars.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self {
            len,
            series: BTreeMap::new(),
        }
    }

    /// Length every series in this set must have.
    #[must_use]
    pub const fn series_len(&self) -> usize {
        self.len
    }

    /// Number of series stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether no series are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Store a series, replacing any previous series of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`DalalError::LengthMismatch`] if the series length differs
    /// from [`IndicatorSet::series_len`].
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if values.len() != self.len {
            return Err(DalalError::LengthMismatch {
                name,
                expected: self.len,
                actual: values.len(),
            });
        }
        self.series.insert(name, values);
        Ok(())
    }

    /// Move every series of `other` into this set.
    ///
    /// # Errors
    ///
    /// Returns [`DalalError::LengthMismatch`] if the two sets describe
    /// histories of different lengths.
    pub fn merge(&mut self, other: Self) -> Result<()> {
        for (name, values) in other.series {
            self.insert(name, values)?;
        }
        Ok(())
    }

    /// Full series by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(Vec::as_slice)
    }

    /// Value of a series at one position, if defined.
    #[must_use]
    pub fn value_at(&self, name: &str, index: usize) -> Option<f64> {
        self.get(name)
            .and_then(|s| s.get(index).copied())
            .filter(|v| v.is_finite())
    }

    /// Value of a series at the last bar, if defined.
    #[must_use]
    pub fn latest(&self, name: &str) -> Option<f64> {
        self.len.checked_sub(1).and_then(|i| self.value_at(name, i))
    }

    /// Series names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Iterate over `(name, series)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.series
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Convert to a DataFrame with a `date` column followed by one column per
    /// series. Undefined values become nulls.
    ///
    /// # Errors
    ///
    /// Returns an error if `history` has a different length than the set or
    /// if Polars fails to assemble the frame.
    pub fn to_dataframe(&self, history: &PriceHistory) -> Result<DataFrame> {
        if history.len() != self.len {
            return Err(DalalError::LengthMismatch {
                name: "date".to_string(),
                expected: self.len,
                actual: history.len(),
            });
        }

        let mut columns = Vec::with_capacity(self.series.len() + 1);
        columns.push(Column::new("date".into(), history.dates()));
        for (name, values) in &self.series {
            let nullable: Vec<Option<f64>> = values
                .iter()
                .map(|v| v.is_finite().then_some(*v))
                .collect();
            columns.push(Column::new(name.as_str().into(), nullable));
        }

        Ok(DataFrame::new(columns)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Date, PriceBar};

    fn history(n: usize) -> PriceHistory {
        let start = Date::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = (0..n)
            .map(|i| {
                let close = 100.0 + i as f64;
                PriceBar::new(
                    start + chrono::Days::new(i as u64),
                    close,
                    close + 1.0,
                    close - 1.0,
                    close,
                    1_000.0,
                )
            })
            .collect();
        PriceHistory::new(bars).unwrap()
    }

    struct Doubled;

    impl Indicator for Doubled {
        fn name(&self) -> &str {
            "doubled"
        }

        fn lookback(&self) -> usize {
            1
        }

        fn required_fields(&self) -> &[PriceField] {
            &[PriceField::Close]
        }

        fn compute(&self, history: &PriceHistory) -> Result<IndicatorSet> {
            let mut set = IndicatorSet::new(history.len());
            set.insert(self.name(), history.closes().iter().map(|c| c * 2.0).collect())?;
            Ok(set)
        }
    }

    #[test]
    fn test_insert_length_mismatch() {
        let mut set = IndicatorSet::new(3);
        let result = set.insert("x", vec![1.0, 2.0]);
        assert!(matches!(
            result,
            Err(DalalError::LengthMismatch {
                expected: 3,
                actual: 2,
                ..
            })
        ));
        assert!(set.is_empty());
    }

    #[test]
    fn test_latest_skips_undefined() {
        let mut set = IndicatorSet::new(3);
        set.insert("a", vec![1.0, 2.0, 3.0]).unwrap();
        set.insert("b", vec![1.0, 2.0, f64::NAN]).unwrap();

        assert_eq!(set.latest("a"), Some(3.0));
        assert_eq!(set.latest("b"), None);
        assert_eq!(set.latest("missing"), None);
        assert_eq!(set.value_at("b", 1), Some(2.0));
    }

    #[test]
    fn test_names_sorted() {
        let mut set = IndicatorSet::new(1);
        set.insert("sma_50", vec![1.0]).unwrap();
        set.insert("atr", vec![1.0]).unwrap();
        set.insert("rsi", vec![1.0]).unwrap();
        let names: Vec<&str> = set.names().collect();
        assert_eq!(names, vec!["atr", "rsi", "sma_50"]);
    }

    #[test]
    fn test_merge() {
        let mut a = IndicatorSet::new(2);
        a.insert("x", vec![1.0, 2.0]).unwrap();
        let mut b = IndicatorSet::new(2);
        b.insert("y", vec![3.0, 4.0]).unwrap();
        a.merge(b).unwrap();
        assert_eq!(a.len(), 2);

        let c = IndicatorSet::new(5);
        let mut d = IndicatorSet::new(5);
        d.insert("z", vec![0.0; 5]).unwrap();
        assert!(a.merge(d).is_err());
        assert!(a.merge(c).is_ok());
    }

    #[test]
    fn test_indicator_compute() {
        let history = history(4);
        let set = Doubled.compute(&history).unwrap();
        assert_eq!(set.get("doubled").unwrap(), &[200.0, 202.0, 204.0, 206.0]);
        assert_eq!(Doubled.lookback(), 1);
        assert_eq!(Doubled.required_fields(), &[PriceField::Close]);
    }

    #[test]
    fn test_to_dataframe_nulls() {
        let history = history(3);
        let mut set = IndicatorSet::new(3);
        set.insert("sma_2", vec![f64::NAN, 100.5, 101.5]).unwrap();

        let df = set.to_dataframe(&history).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 2);
        let sma = df.column("sma_2").unwrap();
        assert_eq!(sma.null_count(), 1);
    }

    #[test]
    fn test_indicator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn Indicator>>();
    }
}
