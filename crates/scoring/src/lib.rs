//! Composite scoring for movie comparisons.
//!
//! This crate provides:
//! - ScoreComponent trait and the standard components
//! - FeatureEngineer for subset-relative normalization
//! - ScorePipeline for composing components and ranking
//!
//! ## Formula
//! ```text
//! score = 0.45·vote_average/10
//!       + 0.45·(p - min_p) / (max_p - min_p + 1e-10)
//!       + 0.10·(year - 1950) / (2023 - 1950)
//!       + 0.20 if favorite genre matches
//! ```
//! Popularity bounds come from the compared movies only.
//!
//! ## Example Usage
//! ```ignore
//! use scoring::{ScorePipeline, ScoringWeights};
//!
//! let pipeline = ScorePipeline::standard(&ScoringWeights::default(), Some("SciFi"));
//! let ranked = pipeline.rank(&[(0, &alien), (1, &aliens)], catalog.median_year());
//! println!("winner: {}", ranked[0].title);
//! ```

pub mod components;
pub mod features;
pub mod score_pipeline;
pub mod traits;
pub mod weights;

pub use features::{FeatureEngineer, MovieFeatures, SubsetStats, POPULARITY_EPSILON};
pub use score_pipeline::{ScoredMovie, ScorePipeline};
pub use traits::ScoreComponent;
pub use weights::ScoringWeights;
