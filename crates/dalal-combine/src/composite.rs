//! Weighted combination of category scores.

use crate::category::{Category, CategoryScore};
use dalal_traits::{DalalError, Result, stats};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Non-negative weights keyed by category.
///
/// Only listed categories enter the weighted sum; the others are absent from
/// it rather than weighted zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Category, f64>", into = "BTreeMap<Category, f64>")]
pub struct CategoryWeights {
    weights: BTreeMap<Category, f64>,
}

impl CategoryWeights {
    /// Validate and build weights.
    ///
    /// # Errors
    ///
    /// Returns [`DalalError::InvalidWeight`] for a negative or non-finite
    /// weight.
    pub fn new(weights: BTreeMap<Category, f64>) -> Result<Self> {
        if let Some((category, weight)) = weights
            .iter()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(DalalError::InvalidWeight {
                category: category.to_string(),
                weight: *weight,
            });
        }
        Ok(Self { weights })
    }

    /// Fundamental track weights: profitability 0.30, growth 0.25,
    /// leverage 0.20, quality 0.15, liquidity 0.10.
    #[must_use]
    pub fn fundamental() -> Self {
        Self {
            weights: BTreeMap::from([
                (Category::Profitability, 0.30),
                (Category::Growth, 0.25),
                (Category::Leverage, 0.20),
                (Category::Quality, 0.15),
                (Category::Liquidity, 0.10),
            ]),
        }
    }

    /// Weight of a category, if configured.
    #[must_use]
    pub fn get(&self, category: Category) -> Option<f64> {
        self.weights.get(&category).copied()
    }

    /// Configured categories in canonical order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.weights.keys().copied()
    }

    /// Sum of the weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Number of configured categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether no category is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// The weights as a map.
    #[must_use]
    pub const fn as_map(&self) -> &BTreeMap<Category, f64> {
        &self.weights
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self::fundamental()
    }
}

impl TryFrom<BTreeMap<Category, f64>> for CategoryWeights {
    type Error = DalalError;

    fn try_from(weights: BTreeMap<Category, f64>) -> Result<Self> {
        Self::new(weights)
    }
}

impl From<CategoryWeights> for BTreeMap<Category, f64> {
    fn from(weights: CategoryWeights) -> Self {
        weights.weights
    }
}

/// Rating label of an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRating {
    /// 80 or more.
    Excellent,
    /// 65 or more.
    Good,
    /// 50 or more.
    Average,
    /// 35 or more.
    BelowAverage,
    /// Below 35.
    Poor,
}

impl ScoreRating {
    /// Label an overall score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 65.0 {
            Self::Good
        } else if score >= 50.0 {
            Self::Average
        } else if score >= 35.0 {
            Self::BelowAverage
        } else {
            Self::Poor
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::BelowAverage => "Below Average",
            Self::Poor => "Poor",
        }
    }
}

impl fmt::Display for ScoreRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Overall score with its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    /// Overall score in `[0, 100]`.
    pub overall: f64,
    /// Label of the overall score.
    pub rating: ScoreRating,
    /// Score used for each weighted category. Missing ones appear as 50.
    pub categories: BTreeMap<Category, f64>,
    /// Weights used.
    pub weights: BTreeMap<Category, f64>,
}

/// Combines category scores into a composite score.
///
/// Implementations are pure: the same scores in any order give the same
/// result.
pub trait Combiner: Send + Sync {
    /// Combine category scores.
    ///
    /// # Errors
    ///
    /// Returns an error if the combination produces a non-finite score.
    fn combine(&self, scores: &[CategoryScore]) -> Result<CompositeScore>;

    /// Name of this combination strategy.
    fn name(&self) -> &str;
}

/// Index scores by category. A repeated category keeps its last score.
fn by_category(scores: &[CategoryScore]) -> BTreeMap<Category, f64> {
    scores.iter().map(|s| (s.category, s.score)).collect()
}

fn finish(
    overall: f64,
    categories: BTreeMap<Category, f64>,
    weights: BTreeMap<Category, f64>,
) -> Result<CompositeScore> {
    if !overall.is_finite() {
        return Err("Combination produced a non-finite score".into());
    }
    let overall = stats::clamp_score(overall);
    Ok(CompositeScore {
        overall,
        rating: ScoreRating::from_score(overall),
        categories,
        weights,
    })
}

/// Weighted sum over the configured categories.
///
/// # Example
///
/// ```
/// use dalal_combine::{Category, CategoryScore, Combiner, ScoreRating, WeightedCombiner};
///
/// let scores = [
///     CategoryScore::fixed(Category::Profitability, 100.0),
///     CategoryScore::fixed(Category::Growth, 100.0),
///     CategoryScore::fixed(Category::Leverage, 100.0),
///     CategoryScore::fixed(Category::Quality, 100.0),
///     CategoryScore::fixed(Category::Liquidity, 100.0),
/// ];
/// let composite = WeightedCombiner::default().combine(&scores).unwrap();
/// assert!((composite.overall - 100.0).abs() < 1e-9);
/// assert_eq!(composite.rating, ScoreRating::Excellent);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WeightedCombiner {
    weights: CategoryWeights,
}

impl WeightedCombiner {
    /// Create a combiner with the given weights.
    #[must_use]
    pub const fn new(weights: CategoryWeights) -> Self {
        Self { weights }
    }

    /// The configured weights.
    #[must_use]
    pub const fn weights(&self) -> &CategoryWeights {
        &self.weights
    }
}

impl Combiner for WeightedCombiner {
    fn combine(&self, scores: &[CategoryScore]) -> Result<CompositeScore> {
        let supplied = by_category(scores);
        let categories: BTreeMap<Category, f64> = self
            .weights
            .categories()
            .map(|c| {
                let score = supplied.get(&c).copied().unwrap_or_else(|| {
                    tracing::debug!(category = %c, "no score supplied, using neutral");
                    stats::NEUTRAL_SCORE
                });
                (c, score)
            })
            .collect();

        let score_vec = Array1::from_iter(categories.values().copied());
        let weight_vec = Array1::from_iter(self.weights.as_map().values().copied());
        let overall = score_vec.dot(&weight_vec);

        finish(overall, categories, self.weights.as_map().clone())
    }

    fn name(&self) -> &str {
        "weighted"
    }
}

/// Equal weights over whichever categories are supplied.
///
/// With no scores at all the result is the neutral 50.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualWeightCombiner;

impl Combiner for EqualWeightCombiner {
    fn combine(&self, scores: &[CategoryScore]) -> Result<CompositeScore> {
        let categories = by_category(scores);
        if categories.is_empty() {
            return finish(stats::NEUTRAL_SCORE, categories, BTreeMap::new());
        }

        let weight = 1.0 / categories.len() as f64;
        let weights: BTreeMap<Category, f64> = categories.keys().map(|c| (*c, weight)).collect();
        let score_vec = Array1::from_iter(categories.values().copied());
        let overall = score_vec.mean().unwrap_or(stats::NEUTRAL_SCORE);

        finish(overall, categories, weights)
    }

    fn name(&self) -> &str {
        "equal_weight"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scores(pairs: &[(Category, f64)]) -> Vec<CategoryScore> {
        pairs
            .iter()
            .map(|(c, s)| CategoryScore::fixed(*c, *s))
            .collect()
    }

    #[test]
    fn test_weighted_known_value() {
        let input = scores(&[
            (Category::Profitability, 80.0),
            (Category::Growth, 60.0),
            (Category::Leverage, 40.0),
            (Category::Quality, 70.0),
            (Category::Liquidity, 90.0),
        ]);
        let composite = WeightedCombiner::default().combine(&input).unwrap();
        // 24 + 15 + 8 + 10.5 + 9
        assert_relative_eq!(composite.overall, 66.5, epsilon = 1e-9);
        assert_eq!(composite.rating, ScoreRating::Good);
    }

    #[test]
    fn test_missing_category_counts_as_neutral() {
        let composite = WeightedCombiner::default().combine(&[]).unwrap();
        assert_relative_eq!(composite.overall, 50.0, epsilon = 1e-9);
        assert_eq!(composite.categories.len(), 5);
    }

    #[test]
    fn test_unweighted_category_ignored() {
        let with_technical = scores(&[
            (Category::Profitability, 80.0),
            (Category::Technical, 0.0),
        ]);
        let without = scores(&[(Category::Profitability, 80.0)]);
        let combiner = WeightedCombiner::default();
        assert_relative_eq!(
            combiner.combine(&with_technical).unwrap().overall,
            combiner.combine(&without).unwrap().overall
        );
        assert!(!combiner
            .combine(&with_technical)
            .unwrap()
            .categories
            .contains_key(&Category::Technical));
    }

    #[test]
    fn test_order_independent() {
        let mut input = scores(&[
            (Category::Liquidity, 33.0),
            (Category::Profitability, 71.0),
            (Category::Quality, 12.0),
            (Category::Growth, 95.0),
        ]);
        let combiner = WeightedCombiner::default();
        let forward = combiner.combine(&input).unwrap();
        input.reverse();
        let reversed = combiner.combine(&input).unwrap();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let negative = CategoryWeights::new(BTreeMap::from([(Category::Growth, -0.1)]));
        assert!(matches!(negative, Err(DalalError::InvalidWeight { .. })));

        let nan = CategoryWeights::new(BTreeMap::from([(Category::Growth, f64::NAN)]));
        assert!(nan.is_err());

        let json = serde_json::from_str::<CategoryWeights>(r#"{"growth": -1.0}"#);
        assert!(json.is_err());
    }

    #[test]
    fn test_subset_weights() {
        let weights: CategoryWeights =
            serde_json::from_str(r#"{"technical": 0.5, "growth": 0.5}"#).unwrap();
        assert_eq!(weights.len(), 2);
        let combiner = WeightedCombiner::new(weights);
        let composite = combiner
            .combine(&scores(&[(Category::Technical, 100.0), (Category::Growth, 60.0)]))
            .unwrap();
        assert_relative_eq!(composite.overall, 80.0);
    }

    #[test]
    fn test_overweight_is_clamped() {
        let weights = CategoryWeights::new(BTreeMap::from([
            (Category::Growth, 1.0),
            (Category::Quality, 1.0),
        ]))
        .unwrap();
        let composite = WeightedCombiner::new(weights)
            .combine(&scores(&[(Category::Growth, 90.0), (Category::Quality, 90.0)]))
            .unwrap();
        assert_relative_eq!(composite.overall, 100.0);
    }

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(ScoreRating::from_score(80.0), ScoreRating::Excellent);
        assert_eq!(ScoreRating::from_score(64.9), ScoreRating::Average);
        assert_eq!(ScoreRating::from_score(35.0), ScoreRating::BelowAverage);
        assert_eq!(ScoreRating::from_score(10.0), ScoreRating::Poor);
        assert_eq!(ScoreRating::BelowAverage.to_string(), "Below Average");
    }

    #[test]
    fn test_equal_weight() {
        let combiner = EqualWeightCombiner;
        let composite = combiner
            .combine(&scores(&[(Category::Technical, 80.0), (Category::Growth, 40.0)]))
            .unwrap();
        assert_relative_eq!(composite.overall, 60.0);
        assert_relative_eq!(composite.weights[&Category::Growth], 0.5);
        assert_eq!(combiner.name(), "equal_weight");

        let empty = combiner.combine(&[]).unwrap();
        assert_relative_eq!(empty.overall, 50.0);
    }
}
