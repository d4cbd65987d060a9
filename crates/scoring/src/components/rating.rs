//! Audience rating term: `weight · vote_average / 10`.

use crate::features::MovieFeatures;
use crate::traits::ScoreComponent;
use data_loader::MovieRecord;

pub struct RatingComponent {
    weight: f64,
}

impl RatingComponent {
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl ScoreComponent for RatingComponent {
    fn name(&self) -> &str {
        "RatingComponent"
    }

    fn contribution(&self, _movie: &MovieRecord, features: &MovieFeatures) -> f64 {
        self.weight * features.norm_rating
    }
}
