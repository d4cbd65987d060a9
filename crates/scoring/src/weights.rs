//! Weights of the composite comparison score.

use serde::{Deserialize, Serialize};

/// Coefficients of `rating·r + popularity·p + recency·y (+ genre_bonus)`
///
/// `year_origin` and `year_horizon` map a release year to `norm_year`:
/// the origin maps to 0.0 and the horizon to 1.0. Years outside the range
/// are not clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub rating: f64,
    pub popularity: f64,
    pub recency: f64,
    pub genre_bonus: f64,
    pub year_origin: u16,
    pub year_horizon: u16,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            rating: 0.45,
            popularity: 0.45,
            recency: 0.1,
            genre_bonus: 0.2,
            year_origin: 1950,
            year_horizon: 2023,
        }
    }
}

impl ScoringWeights {
    /// Highest score a movie can reach without the genre bonus,
    /// given the largest `norm_year` in play
    pub fn max_base_score(&self, max_norm_year: f64) -> f64 {
        self.rating + self.popularity + self.recency * max_norm_year
    }
}
