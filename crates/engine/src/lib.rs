//! Engine crate for the reel-match recommender.
//!
//! This crate ties the catalog, the similarity index and the scoring
//! pipeline together behind the two user-facing operations:
//!
//! - `RecommendationEngine::recommend`: title query -> similar movies
//! - `Comparator::compare`: several titles -> ranked comparison
//!
//! Neither touches a terminal. Ambiguous comparison titles are settled by a
//! caller-supplied `Disambiguator`.
//!
//! ## Example Usage
//! ```ignore
//! use engine::{Comparator, FirstCandidate, RecommendationEngine};
//!
//! let engine = RecommendationEngine::new(Arc::new(catalog));
//! let recommendation = engine.recommend("alien", 5);
//!
//! let result = Comparator::new(&engine).compare(
//!     &["Alien", "Aliens"],
//!     Some("Science Fiction"),
//!     &mut FirstCandidate,
//! )?;
//! ```

pub mod comparator;
pub mod config;
pub mod error;
pub mod recommender;
pub mod resolver;

pub use comparator::{
    Comparator, ComparisonResult, DeclineAll, Disambiguator, FirstCandidate, Resolution,
    SkipReason,
};
pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use recommender::{Recommendation, RecommendationEngine, SimilarMovie};
