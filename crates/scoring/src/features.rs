//! Per-subset feature normalization.
//!
//! Popularity is min-max normalized over the movies being compared, never
//! over the whole catalog, so the same movie can score differently in two
//! comparisons.

use crate::weights::ScoringWeights;
use data_loader::MovieRecord;
use rayon::prelude::*;

/// Keeps min-max normalization finite when every popularity is equal
pub const POPULARITY_EPSILON: f64 = 1e-10;

/// Normalized inputs of the score components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovieFeatures {
    /// `vote_average / 10`
    pub norm_rating: f64,
    /// `(p - min) / (max - min + ε)` over the subset
    pub norm_popularity: f64,
    /// `(year - origin) / (horizon - origin)`, unbounded
    pub norm_year: f64,
    /// Year the recency term was computed from; `None` if no year was available
    pub effective_year: Option<u16>,
}

/// Popularity range of the compared subset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubsetStats {
    pub min_popularity: f64,
    pub max_popularity: f64,
}

impl SubsetStats {
    pub fn from_movies(movies: &[&MovieRecord]) -> Self {
        let (min_popularity, max_popularity) = movies.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), movie| (lo.min(movie.popularity), hi.max(movie.popularity)),
        );
        if movies.is_empty() {
            return Self {
                min_popularity: 0.0,
                max_popularity: 0.0,
            };
        }
        Self {
            min_popularity,
            max_popularity,
        }
    }
}

/// Computes `MovieFeatures` for a compared subset
#[derive(Debug, Clone)]
pub struct FeatureEngineer {
    year_origin: f64,
    year_span: f64,
    /// Stand-in for movies without a release year (the catalog median)
    fallback_year: Option<u16>,
}

impl FeatureEngineer {
    pub fn new(weights: &ScoringWeights, fallback_year: Option<u16>) -> Self {
        let year_origin = f64::from(weights.year_origin);
        let span = f64::from(weights.year_horizon) - year_origin;
        Self {
            year_origin,
            // A degenerate range would divide by zero
            year_span: if span == 0.0 { 1.0 } else { span },
            fallback_year,
        }
    }

    /// Features for every movie, in input order
    pub fn compute_features(&self, movies: &[&MovieRecord]) -> Vec<MovieFeatures> {
        let stats = SubsetStats::from_movies(movies);
        movies
            .par_iter()
            .map(|movie| self.compute_single(movie, &stats))
            .collect()
    }

    fn compute_single(&self, movie: &MovieRecord, stats: &SubsetStats) -> MovieFeatures {
        let range = stats.max_popularity - stats.min_popularity + POPULARITY_EPSILON;
        let effective_year = movie.year.or(self.fallback_year);

        MovieFeatures {
            norm_rating: movie.vote_average / 10.0,
            norm_popularity: (movie.popularity - stats.min_popularity) / range,
            norm_year: effective_year
                .map(|year| self.normalize_year(year))
                .unwrap_or(0.0),
            effective_year,
        }
    }

    pub fn normalize_year(&self, year: u16) -> f64 {
        (f64::from(year) - self.year_origin) / self.year_span
    }
}
