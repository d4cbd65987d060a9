//! The ScorePipeline sums score components and ranks a compared subset.

use crate::components::{GenreBonus, PopularityComponent, RatingComponent, RecencyComponent};
use crate::features::{FeatureEngineer, MovieFeatures};
use crate::traits::ScoreComponent;
use crate::weights::ScoringWeights;
use data_loader::{MovieRecord, RowId};
use serde::Serialize;
use tracing::debug;

/// One ranked entry of a comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMovie {
    pub row: RowId,
    pub title: String,
    pub year: Option<u16>,
    pub vote_average: f64,
    pub popularity: f64,
    pub score: f64,
}

/// Chains score components together.
///
/// ## Usage
/// ```ignore
/// let pipeline = ScorePipeline::new(&weights)
///     .add_component(RatingComponent::new(0.45))
///     .add_component(GenreBonus::new("SciFi", 0.2));
///
/// let ranked = pipeline.rank(&movies, catalog.median_year());
/// ```
pub struct ScorePipeline {
    weights: ScoringWeights,
    components: Vec<Box<dyn ScoreComponent>>,
}

impl ScorePipeline {
    /// Empty pipeline; `weights` only supplies the year range here
    pub fn new(weights: &ScoringWeights) -> Self {
        Self {
            weights: weights.clone(),
            components: Vec::new(),
        }
    }

    /// Rating + popularity + recency, plus the genre bonus when a favorite genre is given
    pub fn standard(weights: &ScoringWeights, favorite_genre: Option<&str>) -> Self {
        let pipeline = Self::new(weights)
            .add_component(RatingComponent::new(weights.rating))
            .add_component(PopularityComponent::new(weights.popularity))
            .add_component(RecencyComponent::new(weights.recency));

        match favorite_genre.map(str::trim).filter(|genre| !genre.is_empty()) {
            Some(genre) => pipeline.add_component(GenreBonus::new(genre, weights.genre_bonus)),
            None => pipeline,
        }
    }

    /// Add a component to the pipeline (builder pattern)
    pub fn add_component(mut self, component: impl ScoreComponent + 'static) -> Self {
        self.components.push(Box::new(component));
        self
    }

    pub fn component_names(&self) -> Vec<&str> {
        self.components.iter().map(|c| c.name()).collect()
    }

    /// Sum of all component contributions
    pub fn score(&self, movie: &MovieRecord, features: &MovieFeatures) -> f64 {
        self.components.iter().fold(0.0, |total, component| {
            let contribution = component.contribution(movie, features);
            debug!(
                "{}: {} += {:.4}",
                component.name(),
                movie.title,
                contribution
            );
            total + contribution
        })
    }

    /// Score `movies` against each other and sort by score, highest first
    ///
    /// Equal scores keep their input order. `fallback_year` stands in for
    /// missing release years.
    pub fn rank(
        &self,
        movies: &[(RowId, &MovieRecord)],
        fallback_year: Option<u16>,
    ) -> Vec<ScoredMovie> {
        let records: Vec<&MovieRecord> = movies.iter().map(|&(_, movie)| movie).collect();
        let engineer = FeatureEngineer::new(&self.weights, fallback_year);
        let features = engineer.compute_features(&records);

        let mut ranked: Vec<ScoredMovie> = movies
            .iter()
            .zip(&features)
            .map(|(&(row, movie), features)| ScoredMovie {
                row,
                title: movie.title.clone(),
                year: movie.year,
                vote_average: movie.vote_average,
                popularity: movie.popularity,
                score: self.score(movie, features),
            })
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }
}

impl Default for ScorePipeline {
    fn default() -> Self {
        Self::new(&ScoringWeights::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, popularity: f64, vote_average: f64) -> MovieRecord {
        MovieRecord {
            id: 1,
            title: title.to_string(),
            genres: vec!["Drama".to_string()],
            keywords: vec![],
            director: None,
            year: Some(2000),
            popularity,
            vote_average,
        }
    }

    #[test]
    fn test_empty_pipeline_scores_zero() {
        let pipeline = ScorePipeline::new(&ScoringWeights::default());
        let a = movie("A", 1.0, 5.0);
        let ranked = pipeline.rank(&[(0, &a)], None);
        assert_eq!(ranked[0].score, 0.0);
    }

    #[test]
    fn test_standard_components() {
        let weights = ScoringWeights::default();
        assert_eq!(
            ScorePipeline::standard(&weights, None).component_names(),
            vec!["RatingComponent", "PopularityComponent", "RecencyComponent"]
        );
        assert_eq!(
            ScorePipeline::standard(&weights, Some("Drama")).component_names().len(),
            4
        );
        // Blank genre means no bonus
        assert_eq!(
            ScorePipeline::standard(&weights, Some("  ")).component_names().len(),
            3
        );
    }

    #[test]
    fn test_ties_keep_input_order() {
        let pipeline = ScorePipeline::standard(&ScoringWeights::default(), None);
        let (a, b) = (movie("A", 5.0, 6.0), movie("B", 5.0, 6.0));
        let ranked = pipeline.rank(&[(3, &a), (1, &b)], None);
        assert_eq!(ranked[0].row, 3);
        assert_eq!(ranked[1].row, 1);
    }
}
