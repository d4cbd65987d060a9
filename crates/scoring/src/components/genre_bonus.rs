//! Flat bonus for movies in the user's favorite genre.

use crate::features::MovieFeatures;
use crate::traits::ScoreComponent;
use data_loader::MovieRecord;

/// Adds `bonus` when any of the movie's genres equals `genre`, ignoring case
pub struct GenreBonus {
    genre: String,
    bonus: f64,
}

impl GenreBonus {
    pub fn new(genre: impl Into<String>, bonus: f64) -> Self {
        Self {
            genre: genre.into(),
            bonus,
        }
    }
}

impl ScoreComponent for GenreBonus {
    fn name(&self) -> &str {
        "GenreBonus"
    }

    fn contribution(&self, movie: &MovieRecord, _features: &MovieFeatures) -> f64 {
        if movie.has_genre(&self.genre) {
            self.bonus
        } else {
            0.0
        }
    }
}
