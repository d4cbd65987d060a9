//! # Recommendation Engine
//!
//! Turns a free-text title into the most similar catalog movies:
//! 1. Case-insensitive exact lookup
//! 2. Otherwise fuzzy resolution against every distinct title
//! 3. Title index lookup of the matched title
//! 4. Nearest neighbors from the similarity index

use crate::config::EngineConfig;
use crate::resolver;
use data_loader::{Catalog, MovieRecord, RowId};
use similarity::SimilarityIndex;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// A neighbor of the query movie
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarMovie {
    pub row: RowId,
    pub movie: MovieRecord,
    /// Cosine similarity to the query movie
    pub similarity: f32,
}

/// Result of a recommendation query
///
/// `matched_title` is `None` when nothing in the catalog was close enough;
/// `results` is empty in that case.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recommendation {
    pub matched_title: Option<String>,
    pub results: Vec<SimilarMovie>,
}

/// Catalog snapshot plus its similarity index.
///
/// Immutable after construction; share it with `Arc` across threads.
#[derive(Debug)]
pub struct RecommendationEngine {
    catalog: Arc<Catalog>,
    index: SimilarityIndex,
    config: EngineConfig,
}

impl RecommendationEngine {
    /// Build the similarity index with the default configuration
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_config(catalog, EngineConfig::default())
    }

    #[instrument(skip(catalog, config), fields(movies = catalog.len()))]
    pub fn with_config(catalog: Arc<Catalog>, config: EngineConfig) -> Self {
        let start = Instant::now();
        let index = SimilarityIndex::build(&catalog);
        info!("Recommendation engine ready in {:?}", start.elapsed());
        Self {
            catalog,
            index,
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Recommend the `n` movies most similar to the best match of `title_query`
    #[instrument(skip(self))]
    pub fn recommend(&self, title_query: &str, n: usize) -> Recommendation {
        let Some(matched_title) = self.match_title(title_query) else {
            debug!("No title close to {:?}", title_query);
            return Recommendation::default();
        };

        let results = self.neighbors_of(&matched_title, n);
        debug!(
            "{:?} matched {:?}, {} neighbors",
            title_query,
            matched_title,
            results.len()
        );

        Recommendation {
            matched_title: Some(matched_title),
            results,
        }
    }

    /// `recommend` with the default of 5 results
    pub fn recommend_default(&self, title_query: &str) -> Recommendation {
        self.recommend(title_query, 5)
    }

    /// Neighbors of an exact catalog title; empty if the title is unknown
    pub fn neighbors_of(&self, title: &str, n: usize) -> Vec<SimilarMovie> {
        let Some(row) = self.catalog.row_of(title) else {
            return Vec::new();
        };

        self.index
            .neighbors_with_scores(row, n)
            .into_iter()
            .filter_map(|neighbor| {
                self.catalog.get(neighbor.row).map(|movie| SimilarMovie {
                    row: neighbor.row,
                    movie: movie.clone(),
                    similarity: neighbor.score,
                })
            })
            .collect()
    }

    /// Fuzzy candidates for `query` with their ratios, best first
    pub fn search(&self, query: &str, limit: usize, cutoff: f64) -> Vec<(String, f64)> {
        resolver::resolve_with_scores(query, self.catalog.titles(), limit, cutoff)
    }

    /// Canonical catalog title for a recommendation query
    fn match_title(&self, title_query: &str) -> Option<String> {
        if let Some(movie) = self
            .catalog
            .find_case_insensitive(title_query)
            .and_then(|row| self.catalog.get(row))
        {
            return Some(movie.title.clone());
        }

        resolver::resolve(
            title_query,
            self.catalog.titles(),
            1,
            self.config.recommend_cutoff,
        )
        .into_iter()
        .next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, genres: &[&str], keywords: &[&str]) -> MovieRecord {
        MovieRecord {
            id: 0,
            title: title.to_string(),
            genres: genres.iter().map(|s| s.to_string()).collect(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            director: None,
            year: None,
            popularity: 1.0,
            vote_average: 5.0,
        }
    }

    fn create_test_engine() -> RecommendationEngine {
        RecommendationEngine::new(Arc::new(Catalog::from_records(vec![
            movie("Heat", &["Crime"], &["heist", "los angeles"]),
            movie("The Town", &["Crime"], &["heist", "boston"]),
            movie("Up", &["Animation"], &["balloon"]),
            movie("Heat", &["Drama"], &["remake"]),
        ])))
    }

    #[test]
    fn test_recommend_exact_title() {
        let engine = create_test_engine();
        let recommendation = engine.recommend("heat", 2);

        assert_eq!(recommendation.matched_title.as_deref(), Some("Heat"));
        assert_eq!(recommendation.results[0].movie.title, "The Town");
        assert!(recommendation.results.iter().all(|r| r.row != 0));
    }

    #[test]
    fn test_duplicate_title_uses_first_occurrence() {
        let engine = create_test_engine();
        // Row 3 shares the title but is shadowed by row 0
        let neighbors = engine.neighbors_of("Heat", 3);
        assert!(neighbors.iter().all(|n| n.row != 0));
        assert!(neighbors.iter().any(|n| n.row == 3));
    }

    #[test]
    fn test_no_match() {
        let engine = create_test_engine();
        assert_eq!(engine.recommend("Casablanca", 5), Recommendation::default());
        assert!(engine.neighbors_of("heat", 5).is_empty());
    }

    #[test]
    fn test_search() {
        let engine = create_test_engine();
        let results = engine.search("the twn", 10, 0.4);
        assert_eq!(results[0].0, "The Town");
        // Distinct titles only
        assert_eq!(engine.search("heat", 10, 0.9).len(), 1);
    }
}
