#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dalal/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod blend;
pub mod category;
pub mod composite;
pub mod recommendation;

// Re-export main types
pub use blend::{BlendInput, BlendScore};
pub use category::{Category, CategoryScore, tier_points};
pub use composite::{
    CategoryWeights, Combiner, CompositeScore, EqualWeightCombiner, ScoreRating, WeightedCombiner,
};
pub use recommendation::{Action, Recommendation};
