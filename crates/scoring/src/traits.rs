//! Core trait for the scoring pipeline.
//!
//! A comparison score is the sum of independent components. Each component
//! sees the raw record and its subset-normalized features.

use crate::features::MovieFeatures;
use data_loader::MovieRecord;

/// One weighted term of the composite score.
///
/// `Send + Sync` so a pipeline can be shared behind an `Arc` and scored
/// from rayon workers.
pub trait ScoreComponent: Send + Sync {
    /// Name used in debug logs
    fn name(&self) -> &str;

    /// This component's share of the movie's score
    fn contribution(&self, movie: &MovieRecord, features: &MovieFeatures) -> f64;
}
