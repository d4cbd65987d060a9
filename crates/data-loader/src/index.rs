//! Catalog building logic.
//!
//! - Drop records that violate the catalog invariants (blank titles)
//! - Build the title index and the distinct title list
//! - Precompute the median release year
//! - Load the TMDB files and join movies with their credits

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument, warn};

impl Catalog {
    /// Build the immutable catalog from already-cleaned records.
    ///
    /// Titles are trimmed. Records whose title is empty (or whitespace only)
    /// are dropped here, so everything downstream can rely on a non-empty title.
    pub fn from_records(records: Vec<MovieRecord>) -> Self {
        let before = records.len();
        let records: Vec<MovieRecord> = records
            .into_iter()
            .filter_map(|mut record| {
                let title = record.title.trim();
                if title.is_empty() {
                    return None;
                }
                if title.len() != record.title.len() {
                    record.title = title.to_string();
                }
                Some(record)
            })
            .collect();

        let dropped = before - records.len();
        if dropped > 0 {
            warn!("Dropped {} records without a usable title", dropped);
        }

        let title_index = TitleIndex::build(&records);
        let titles = distinct_titles(&records);
        let median_year = compute_median_year(&records);

        Self {
            records,
            title_index,
            titles,
            median_year,
        }
    }

    /// Load the TMDB 5000 dataset (movies + credits) into a catalog
    ///
    /// Steps:
    /// 1. Parse both CSV files in parallel
    /// 2. Attach each movie's director from the credits
    /// 3. Build the catalog (title index, median year)
    #[instrument]
    pub fn load_from_files(movies_path: &Path, credits_path: &Path) -> Result<Self> {
        let start = Instant::now();

        // Rayon's `join` runs both parsers in parallel
        let (movies, directors) = rayon::join(
            || parser::parse_movies(movies_path),
            || parser::parse_credits(credits_path),
        );
        let movies = movies?;
        let directors = directors?;

        info!(
            "Parsed {} movies and {} credit rows",
            movies.len(),
            directors.len()
        );

        let records: Vec<MovieRecord> = movies
            .into_iter()
            .map(|mut record| {
                record.director = directors.get(&record.id).cloned().flatten();
                record
            })
            .collect();

        let catalog = Self::from_records(records);
        if catalog.is_empty() {
            return Err(DataLoadError::ValidationError(format!(
                "no usable movie records in {}",
                movies_path.display()
            )));
        }

        info!(
            "Catalog built with {} movies ({} distinct titles) in {:?}",
            catalog.len(),
            catalog.titles.len(),
            start.elapsed()
        );
        Ok(catalog)
    }
}

/// Distinct titles in first-occurrence order
fn distinct_titles(records: &[MovieRecord]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .filter(|record| seen.insert(record.title.as_str()))
        .map(|record| record.title.clone())
        .collect()
}

/// Median of the known release years (upper median for even counts)
fn compute_median_year(records: &[MovieRecord]) -> Option<u16> {
    let mut years: Vec<u16> = records.iter().filter_map(|r| r.year).collect();
    if years.is_empty() {
        return None;
    }
    years.sort_unstable();
    Some(years[years.len() / 2])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: MovieId, title: &str, year: Option<u16>) -> MovieRecord {
        MovieRecord {
            id,
            title: title.to_string(),
            genres: vec!["Drama".to_string()],
            keywords: vec![],
            director: None,
            year,
            popularity: 1.0,
            vote_average: 5.0,
        }
    }

    #[test]
    fn test_blank_titles_are_dropped() {
        let catalog = Catalog::from_records(vec![
            record(1, "Heat", Some(1995)),
            record(2, "   ", Some(2000)),
            record(3, "", None),
        ]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().title, "Heat");
    }

    #[test]
    fn test_duplicate_titles_first_occurrence_wins() {
        let catalog = Catalog::from_records(vec![
            record(1, "The Thing", Some(1982)),
            record(2, "Alien", Some(1979)),
            record(3, "The Thing", Some(2011)),
        ]);

        assert_eq!(catalog.row_of("The Thing"), Some(0));
        assert_eq!(catalog.title_index().len(), 2);
        assert_eq!(catalog.titles(), &["The Thing".to_string(), "Alien".to_string()]);
    }

    #[test]
    fn test_find_case_insensitive_returns_first_record() {
        let catalog = Catalog::from_records(vec![
            record(1, "Titanic", Some(1997)),
            record(2, "TITANIC", Some(1953)),
        ]);

        assert_eq!(catalog.find_case_insensitive("titanic"), Some(0));
        assert_eq!(catalog.find_case_insensitive("  Titanic "), Some(0));
        assert_eq!(catalog.find_case_insensitive("Titan"), None);
        // Exact lookup stays case-sensitive
        assert_eq!(catalog.row_of("titanic"), None);
    }

    #[test]
    fn test_titles_are_trimmed() {
        let catalog = Catalog::from_records(vec![
            record(1, "  Heat ", Some(1995)),
            record(2, "Alien\t", Some(1979)),
        ]);

        assert_eq!(catalog.get(0).unwrap().title, "Heat");
        assert_eq!(catalog.find_case_insensitive("heat"), Some(0));
        assert_eq!(catalog.find_case_insensitive(" ALIEN "), Some(1));
        assert_eq!(catalog.row_of("Alien"), Some(1));
        assert_eq!(catalog.titles(), &["Heat".to_string(), "Alien".to_string()]);
    }

    #[test]
    fn test_median_year() {
        let catalog = Catalog::from_records(vec![
            record(1, "A", Some(1990)),
            record(2, "B", None),
            record(3, "C", Some(2010)),
            record(4, "D", Some(2000)),
        ]);
        assert_eq!(catalog.median_year(), Some(2000));

        let no_years = Catalog::from_records(vec![record(1, "A", None)]);
        assert_eq!(no_years.median_year(), None);
    }

    #[test]
    fn test_load_dataset() {
        // This test requires the actual dataset files
        // Place the TMDB 5000 csv files in ../../data/
        let movies = Path::new("../../data/tmdb_5000_movies.csv");
        let credits = Path::new("../../data/tmdb_5000_credits.csv");

        if movies.exists() && credits.exists() {
            let catalog = Catalog::load_from_files(movies, credits).unwrap();
            assert!(catalog.len() > 4000);
            assert!(catalog.row_of("Avatar").is_some());
        }
    }
}
