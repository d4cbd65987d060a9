//! Popularity term, relative to the other compared movies.

use crate::features::MovieFeatures;
use crate::traits::ScoreComponent;
use data_loader::MovieRecord;

pub struct PopularityComponent {
    weight: f64,
}

impl PopularityComponent {
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl ScoreComponent for PopularityComponent {
    fn name(&self) -> &str {
        "PopularityComponent"
    }

    fn contribution(&self, _movie: &MovieRecord, features: &MovieFeatures) -> f64 {
        self.weight * features.norm_popularity
    }
}
