//! # Comparator
//!
//! Resolves several user-supplied titles and ranks the resolved movies with
//! the composite score.
//!
//! ## Resolution, per title
//! 1. Case-insensitive exact match: accepted, fuzzy matching is skipped
//! 2. Otherwise up to `compare_max_candidates` fuzzy candidates above
//!    `compare_cutoff`, handed to a `Disambiguator`
//! 3. No candidates or a declined choice: the title is skipped
//!
//! A movie reached twice is only compared once. The winner's neighbors are
//! attached as suggestions.

use crate::error::{EngineError, Result};
use crate::recommender::{RecommendationEngine, SimilarMovie};
use crate::resolver;
use data_loader::{MovieRecord, RowId};
use scoring::{ScorePipeline, ScoredMovie};
use tracing::{debug, info, instrument};

/// Picks one of several fuzzy candidates for an input title.
///
/// Returns the index into `candidates`, or `None` to skip the title.
/// An out-of-range index counts as a skip.
pub trait Disambiguator {
    fn choose(&mut self, query: &str, candidates: &[String]) -> Option<usize>;
}

impl<F> Disambiguator for F
where
    F: FnMut(&str, &[String]) -> Option<usize>,
{
    fn choose(&mut self, query: &str, candidates: &[String]) -> Option<usize> {
        self(query, candidates)
    }
}

/// Always takes the best fuzzy candidate
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidate;

impl Disambiguator for FirstCandidate {
    fn choose(&mut self, _query: &str, candidates: &[String]) -> Option<usize> {
        (!candidates.is_empty()).then_some(0)
    }
}

/// Skips every title that needs disambiguation
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclineAll;

impl Disambiguator for DeclineAll {
    fn choose(&mut self, _query: &str, _candidates: &[String]) -> Option<usize> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No title above the cutoff
    NoMatch,
    /// The disambiguator declined every candidate
    Declined,
    /// Resolved to a movie already in the comparison
    Duplicate,
}

/// How one input title was handled
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Exact {
        query: String,
        row: RowId,
        title: String,
    },
    Fuzzy {
        query: String,
        row: RowId,
        title: String,
        candidates: Vec<String>,
    },
    Skipped {
        query: String,
        reason: SkipReason,
    },
}

impl Resolution {
    pub fn query(&self) -> &str {
        match self {
            Resolution::Exact { query, .. }
            | Resolution::Fuzzy { query, .. }
            | Resolution::Skipped { query, .. } => query,
        }
    }

    /// Catalog row, if the title was resolved
    pub fn row(&self) -> Option<RowId> {
        match self {
            Resolution::Exact { row, .. } | Resolution::Fuzzy { row, .. } => Some(*row),
            Resolution::Skipped { .. } => None,
        }
    }
}

/// Outcome of a comparison
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    /// Highest score first
    pub ranked: Vec<ScoredMovie>,
    /// Full record of `ranked[0]`
    pub winner: MovieRecord,
    /// One entry per input title, in input order
    pub resolutions: Vec<Resolution>,
    /// Movies similar to the winner
    pub suggestions: Vec<SimilarMovie>,
}

impl ComparisonResult {
    pub fn best(&self) -> Option<&ScoredMovie> {
        self.ranked.first()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &Resolution> {
        self.resolutions
            .iter()
            .filter(|r| matches!(r, Resolution::Skipped { .. }))
    }
}

/// Compares movies using a recommendation engine's catalog and index
pub struct Comparator<'a> {
    engine: &'a RecommendationEngine,
}

impl<'a> Comparator<'a> {
    pub fn new(engine: &'a RecommendationEngine) -> Self {
        Self { engine }
    }

    /// Resolve `titles`, score the resolved movies against each other and rank them
    ///
    /// Fails with `InsufficientInput` if fewer than `min_compare_titles`
    /// distinct movies are resolved.
    #[instrument(skip(self, titles, disambiguator), fields(titles = titles.len()))]
    pub fn compare<S: AsRef<str>>(
        &self,
        titles: &[S],
        favorite_genre: Option<&str>,
        disambiguator: &mut dyn Disambiguator,
    ) -> Result<ComparisonResult> {
        let config = self.engine.config();
        let catalog = self.engine.catalog();

        let mut resolutions = Vec::with_capacity(titles.len());
        let mut resolved: Vec<RowId> = Vec::new();

        for query in titles {
            let resolution = self.resolve_title(query.as_ref(), disambiguator);
            let resolution = match resolution.row() {
                Some(row) if resolved.contains(&row) => Resolution::Skipped {
                    query: resolution.query().to_string(),
                    reason: SkipReason::Duplicate,
                },
                Some(row) => {
                    resolved.push(row);
                    resolution
                }
                None => resolution,
            };
            debug!("Resolved {:?}", resolution);
            resolutions.push(resolution);
        }

        if resolved.len() < config.min_compare_titles {
            return Err(EngineError::InsufficientInput {
                resolved: resolved.len(),
                required: config.min_compare_titles,
            });
        }

        let movies: Vec<(RowId, &MovieRecord)> = resolved
            .iter()
            .filter_map(|&row| catalog.get(row).map(|movie| (row, movie)))
            .collect();

        let pipeline = ScorePipeline::standard(&config.scoring, favorite_genre);
        let ranked = pipeline.rank(&movies, catalog.median_year());

        let winner = match ranked.first().and_then(|best| catalog.get(best.row)) {
            Some(movie) => movie.clone(),
            None => {
                return Err(EngineError::InsufficientInput {
                    resolved: 0,
                    required: config.min_compare_titles,
                });
            }
        };

        let suggestions = self
            .engine
            .neighbors_of(&winner.title, config.suggestion_count);

        info!(
            "Compared {} movies, winner {:?} ({} suggestions)",
            ranked.len(),
            winner.title,
            suggestions.len()
        );

        Ok(ComparisonResult {
            ranked,
            winner,
            resolutions,
            suggestions,
        })
    }

    fn resolve_title(&self, query: &str, disambiguator: &mut dyn Disambiguator) -> Resolution {
        let catalog = self.engine.catalog();
        let config = self.engine.config();

        if let Some(row) = catalog.find_case_insensitive(query) {
            if let Some(movie) = catalog.get(row) {
                return Resolution::Exact {
                    query: query.to_string(),
                    row,
                    title: movie.title.clone(),
                };
            }
        }

        let candidates = resolver::resolve(
            query,
            catalog.titles(),
            config.compare_max_candidates,
            config.compare_cutoff,
        );
        if candidates.is_empty() {
            return Resolution::Skipped {
                query: query.to_string(),
                reason: SkipReason::NoMatch,
            };
        }

        let chosen = disambiguator
            .choose(query, &candidates)
            .and_then(|choice| candidates.get(choice))
            .and_then(|title| catalog.row_of(title).map(|row| (row, title.clone())));

        match chosen {
            Some((row, title)) => Resolution::Fuzzy {
                query: query.to_string(),
                row,
                title,
                candidates,
            },
            None => Resolution::Skipped {
                query: query.to_string(),
                reason: SkipReason::Declined,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Catalog;
    use std::sync::Arc;

    fn movie(title: &str, popularity: f64) -> MovieRecord {
        MovieRecord {
            id: 0,
            title: title.to_string(),
            genres: vec!["Drama".to_string()],
            keywords: vec![],
            director: None,
            year: Some(2000),
            popularity,
            vote_average: 6.0,
        }
    }

    fn create_test_engine() -> RecommendationEngine {
        RecommendationEngine::new(Arc::new(Catalog::from_records(vec![
            movie("Titanic", 20.0),
            movie("Titan A.E.", 5.0),
            movie("Heat", 10.0),
        ])))
    }

    #[test]
    fn test_exact_match_skips_disambiguation() {
        let engine = create_test_engine();
        let mut asked = 0;
        let mut counting = |_: &str, _: &[String]| -> Option<usize> {
            asked += 1;
            None
        };

        let result = Comparator::new(&engine)
            .compare(&["titanic", "HEAT"], None, &mut counting)
            .unwrap();

        assert_eq!(asked, 0);
        assert!(matches!(result.resolutions[0], Resolution::Exact { row: 0, .. }));
        assert_eq!(result.winner.title, "Titanic");
    }

    #[test]
    fn test_out_of_range_choice_is_a_decline() {
        let engine = create_test_engine();
        let mut wild = |_: &str, _: &[String]| -> Option<usize> { Some(99) };

        let err = Comparator::new(&engine)
            .compare(&["Heat", "Titanc"], None, &mut wild)
            .unwrap_err();

        assert_eq!(err, EngineError::InsufficientInput { resolved: 1, required: 2 });
    }

    #[test]
    fn test_duplicates_collapse() {
        let engine = create_test_engine();
        let result = Comparator::new(&engine)
            .compare(&["Heat", "heat", "Titanic"], None, &mut DeclineAll)
            .unwrap();

        assert_eq!(result.ranked.len(), 2);
        assert!(matches!(
            result.resolutions[1],
            Resolution::Skipped { reason: SkipReason::Duplicate, .. }
        ));
        assert_eq!(result.skipped().count(), 1);
    }

    #[test]
    fn test_duplicates_count_against_minimum() {
        let engine = create_test_engine();
        let err = Comparator::new(&engine)
            .compare(&["Heat", "HEAT"], None, &mut FirstCandidate)
            .unwrap_err();
        assert_eq!(err, EngineError::InsufficientInput { resolved: 1, required: 2 });
    }

    #[test]
    fn test_first_candidate() {
        let mut first = FirstCandidate;
        assert_eq!(first.choose("x", &["a".to_string()]), Some(0));
        assert_eq!(first.choose("x", &[]), None);
    }
}
