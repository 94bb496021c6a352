//! Blend of scores produced by independent analysis sources.
//!
//! Each source is optional. Present ones are mapped onto the 0-100 scale and
//! averaged with equal weight.

use crate::recommendation::Action;
use dalal_traits::stats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Optional inputs from each analysis source.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendInput {
    /// News sentiment compound score in `[-1, 1]`.
    pub sentiment: Option<f64>,
    /// Macro economic health score in `[0, 100]`.
    pub macro_health: Option<f64>,
    /// Geopolitical risk score in `[0, 100]`; higher is riskier.
    pub geopolitical_risk: Option<f64>,
    /// Valuation upside in percent.
    pub valuation_upside: Option<f64>,
    /// Overall fundamental score in `[0, 100]`.
    pub fundamental_score: Option<f64>,
}

/// Blended score and action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendScore {
    /// Each present source on the 0-100 scale.
    pub components: BTreeMap<String, f64>,
    /// Mean of the components, 50 when none is present.
    pub overall: f64,
    /// Action for the overall score.
    pub action: Action,
}

impl BlendScore {
    /// Cut-offs on the blended score.
    pub const CUTOFFS: [f64; 4] = [70.0, 55.0, 45.0, 30.0];

    /// Blend the present sources.
    ///
    /// | Source | Mapping |
    /// |--------|---------|
    /// | sentiment | `(c + 1) * 50` |
    /// | macro | as given |
    /// | geopolitical | `100 - risk` |
    /// | valuation | `50 + upside` |
    /// | fundamental | as given |
    ///
    /// Every component is clamped to `[0, 100]`. Non-finite inputs count as
    /// absent.
    ///
    /// # Example
    ///
    /// ```
    /// use dalal_combine::{Action, BlendInput, BlendScore};
    ///
    /// let blend = BlendScore::compute(&BlendInput {
    ///     sentiment: Some(0.5),
    ///     valuation_upside: Some(25.0),
    ///     ..BlendInput::default()
    /// });
    /// assert_eq!(blend.overall, 75.0);
    /// assert_eq!(blend.action, Action::StrongBuy);
    /// ```
    #[must_use]
    pub fn compute(input: &BlendInput) -> Self {
        let mapped = [
            ("sentiment", input.sentiment.map(|c| (c + 1.0) * 50.0)),
            ("macro", input.macro_health),
            ("geopolitical", input.geopolitical_risk.map(|r| 100.0 - r)),
            ("valuation", input.valuation_upside.map(|u| 50.0 + u)),
            ("fundamental", input.fundamental_score),
        ];

        let components: BTreeMap<String, f64> = mapped
            .into_iter()
            .filter_map(|(name, score)| {
                let score = score.filter(|s| s.is_finite())?;
                Some((name.to_string(), stats::clamp_score(score)))
            })
            .collect();

        let values: Vec<f64> = components.values().copied().collect();
        let overall = stats::mean(&values).unwrap_or_else(|| {
            tracing::debug!("no blend components, neutral score");
            stats::NEUTRAL_SCORE
        });
        let overall = stats::clamp_score(overall);

        Self {
            components,
            overall,
            action: Action::from_score(overall, Self::CUTOFFS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_blend_is_neutral_hold() {
        let blend = BlendScore::compute(&BlendInput::default());
        assert!(blend.components.is_empty());
        assert_relative_eq!(blend.overall, 50.0);
        assert_eq!(blend.action, Action::Hold);
    }

    #[test]
    fn test_mappings() {
        let blend = BlendScore::compute(&BlendInput {
            sentiment: Some(-1.0),
            macro_health: Some(60.0),
            geopolitical_risk: Some(30.0),
            valuation_upside: Some(80.0),
            fundamental_score: Some(55.0),
        });
        assert_relative_eq!(blend.components["sentiment"], 0.0);
        assert_relative_eq!(blend.components["geopolitical"], 70.0);
        assert_relative_eq!(blend.components["valuation"], 100.0);
        // (0 + 60 + 70 + 100 + 55) / 5
        assert_relative_eq!(blend.overall, 57.0);
        assert_eq!(blend.action, Action::Buy);
    }

    #[test]
    fn test_non_finite_inputs_absent() {
        let blend = BlendScore::compute(&BlendInput {
            macro_health: Some(f64::NAN),
            fundamental_score: Some(20.0),
            ..BlendInput::default()
        });
        assert_eq!(blend.components.len(), 1);
        assert_eq!(blend.action, Action::StrongSell);
    }

    #[test]
    fn test_from_json() {
        let input: BlendInput = serde_json::from_str(r#"{"sentiment": 0.2}"#).unwrap();
        assert_eq!(input.sentiment, Some(0.2));
        assert_eq!(input.fundamental_score, None);
    }
}
