//! Recommendations from composite scores or from per-source votes.

use crate::composite::CompositeScore;
use dalal_traits::stats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Strong buy.
    StrongBuy,
    /// Buy.
    Buy,
    /// Hold.
    Hold,
    /// Sell.
    Sell,
    /// Strong sell.
    StrongSell,
}

impl Action {
    /// Display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::StrongBuy => "Strong Buy",
            Self::Buy => "Buy",
            Self::Hold => "Hold",
            Self::Sell => "Sell",
            Self::StrongSell => "Strong Sell",
        }
    }

    /// Map a 0-100 score onto an action using four descending cut-offs.
    #[must_use]
    pub fn from_score(score: f64, cutoffs: [f64; 4]) -> Self {
        let [strong_buy, buy, hold, sell] = cutoffs;
        if score >= strong_buy {
            Self::StrongBuy
        } else if score >= buy {
            Self::Buy
        } else if score >= hold {
            Self::Hold
        } else if score >= sell {
            Self::Sell
        } else {
            Self::StrongSell
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An action with its rationale and confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Recommended action.
    pub action: Action,
    /// Short explanation.
    pub rationale: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
}

impl Recommendation {
    /// Cut-offs on the overall fundamental score.
    pub const SCORE_CUTOFFS: [f64; 4] = [75.0, 60.0, 45.0, 30.0];

    /// Confidence when there is nothing to vote on.
    pub const NO_VOTE_CONFIDENCE: f64 = 0.3;

    /// Recommendation from an overall fundamental score.
    ///
    /// | Overall | Action | Confidence |
    /// |---------|--------|------------|
    /// | >= 75 | Strong Buy | 0.85 |
    /// | >= 60 | Buy | 0.70 |
    /// | >= 45 | Hold | 0.50 |
    /// | >= 30 | Sell | 0.65 |
    /// | < 30 | Strong Sell | 0.80 |
    #[must_use]
    pub fn from_composite(composite: &CompositeScore) -> Self {
        let action = Action::from_score(composite.overall, Self::SCORE_CUTOFFS);
        let (rationale, confidence) = match action {
            Action::StrongBuy => ("Excellent fundamentals across all parameters", 0.85),
            Action::Buy => ("Good fundamentals with room for improvement", 0.70),
            Action::Hold => ("Average fundamentals, monitor for changes", 0.50),
            Action::Sell => ("Below average fundamentals, consider exiting", 0.65),
            Action::StrongSell => ("Poor fundamentals, avoid or exit", 0.80),
        };
        Self {
            action,
            rationale: rationale.to_string(),
            confidence,
        }
    }

    /// Synthesize votes in `-2..=2` from independent sources.
    ///
    /// The mean vote maps to Strong Buy at 1.5, Buy at 0.5, Hold at -0.5 and
    /// Sell at -1.5, with confidence 0.9 for the strong actions, 0.7 for buy
    /// or sell and 0.5 for hold. No votes gives Hold at 0.3. Out-of-range
    /// votes are clamped, and the rationale lists the clamped values.
    ///
    /// # Example
    ///
    /// ```
    /// use dalal_combine::{Action, Recommendation};
    ///
    /// let rec = Recommendation::from_votes(&[("valuation", 2), ("technical", 1)]);
    /// assert_eq!(rec.action, Action::StrongBuy);
    /// assert_eq!(rec.confidence, 0.9);
    /// ```
    #[must_use]
    pub fn from_votes(votes: &[(&str, i8)]) -> Self {
        if votes.is_empty() {
            return Self {
                action: Action::Hold,
                rationale: "No signals available".to_string(),
                confidence: Self::NO_VOTE_CONFIDENCE,
            };
        }

        let clamped: Vec<(&str, i8)> = votes
            .iter()
            .map(|&(source, vote)| (source, vote.clamp(-2, 2)))
            .collect();
        let sum: f64 = clamped.iter().map(|&(_, v)| f64::from(v)).sum();
        let average = sum / clamped.len() as f64;

        let (action, confidence) = if average >= 1.5 {
            (Action::StrongBuy, 0.9)
        } else if average >= 0.5 {
            (Action::Buy, 0.7)
        } else if average >= -0.5 {
            (Action::Hold, 0.5)
        } else if average >= -1.5 {
            (Action::Sell, 0.7)
        } else {
            (Action::StrongSell, 0.9)
        };

        let rationale = clamped
            .iter()
            .map(|(source, vote)| format!("{source} {vote:+}"))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            action,
            rationale: format!("Average vote {average:+.2} ({rationale})"),
            confidence: stats::clamp_confidence(confidence),
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.0}% confidence): {}",
            self.action,
            self.confidence * 100.0,
            self.rationale
        )
    }
}
