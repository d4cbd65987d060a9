//! Recency term.
//!
//! Newer movies score higher. Movies without a release year were already
//! given the fallback year by the `FeatureEngineer`.

use crate::features::MovieFeatures;
use crate::traits::ScoreComponent;
use data_loader::MovieRecord;

pub struct RecencyComponent {
    weight: f64,
}

impl RecencyComponent {
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl ScoreComponent for RecencyComponent {
    fn name(&self) -> &str {
        "RecencyComponent"
    }

    fn contribution(&self, _movie: &MovieRecord, features: &MovieFeatures) -> f64 {
        self.weight * features.norm_year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recency_contribution() {
        let movie = MovieRecord {
            id: 1,
            title: "Heat".to_string(),
            genres: vec![],
            keywords: vec![],
            director: None,
            year: Some(1995),
            popularity: 0.0,
            vote_average: 0.0,
        };
        let features = MovieFeatures {
            norm_rating: 0.0,
            norm_popularity: 0.0,
            norm_year: 0.5,
            effective_year: Some(1995),
        };

        assert_eq!(RecencyComponent::new(0.1).contribution(&movie, &features), 0.05);
    }
}
