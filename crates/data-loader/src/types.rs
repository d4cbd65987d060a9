//! Core domain types for the movie catalog.
//!
//! - `MovieRecord`: one cleaned catalog entry
//! - `TitleIndex`: title -> row lookup, first occurrence wins
//! - `Catalog`: the immutable, row-addressable snapshot every other crate borrows

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// TMDB identifier of a movie (used to join the credits file)
pub type MovieId = u32;

/// Position of a record inside the `Catalog`
///
/// Every index structure in the workspace (title index, similarity matrix,
/// comparison results) addresses movies by row, never by `MovieId`.
pub type RowId = usize;

// =============================================================================
// Movie Record
// =============================================================================

/// A movie after cleaning.
///
/// `genres` and `keywords` are already flattened to plain names and
/// `director` is the first crew member whose job is "Director".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    pub genres: Vec<String>,
    pub keywords: Vec<String>,
    pub director: Option<String>,
    /// Calendar year of the release date, `None` if it could not be parsed
    pub year: Option<u16>,
    pub popularity: f64,
    /// TMDB vote average in [0, 10]
    pub vote_average: f64,
}

impl MovieRecord {
    /// Whitespace-joined keywords, genres and director.
    ///
    /// This is the only text the similarity index sees. It is derived on
    /// every call so it can never drift from the fields it is built from.
    pub fn soup(&self) -> String {
        self.keywords
            .iter()
            .chain(self.genres.iter())
            .chain(self.director.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Case-insensitive genre membership
    pub fn has_genre(&self, genre: &str) -> bool {
        let wanted = genre.to_lowercase();
        self.genres.iter().any(|g| g.to_lowercase() == wanted)
    }
}

// =============================================================================
// Title Index
// =============================================================================

/// Maps a title to the catalog row where it first appears.
///
/// Later records with an identical title are shadowed: lookups always land
/// on the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    rows: HashMap<String, RowId>,
}

impl TitleIndex {
    /// Build the index over records in catalog order
    pub fn build(records: &[MovieRecord]) -> Self {
        let mut rows = HashMap::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            rows.entry(record.title.clone()).or_insert(row);
        }
        Self { rows }
    }

    /// Exact (case-sensitive) lookup
    pub fn get(&self, title: &str) -> Option<RowId> {
        self.rows.get(title).copied()
    }

    /// Number of distinct titles
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Catalog - the immutable snapshot
// =============================================================================

/// Immutable, in-memory table of cleaned movie records.
///
/// Built once (see `Catalog::from_records` and `Catalog::load_from_files`)
/// and shared read-only, typically behind an `Arc`. There are no mutators.
#[derive(Debug)]
pub struct Catalog {
    pub(crate) records: Vec<MovieRecord>,
    pub(crate) title_index: TitleIndex,
    /// Distinct titles in first-occurrence order
    pub(crate) titles: Vec<String>,
    pub(crate) median_year: Option<u16>,
}

impl Catalog {
    /// All records, addressable by `RowId`
    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Get a record by row
    pub fn get(&self, row: RowId) -> Option<&MovieRecord> {
        self.records.get(row)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct titles, in the order they first appear in the catalog
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn title_index(&self) -> &TitleIndex {
        &self.title_index
    }

    /// Row of an exact title (first occurrence)
    pub fn row_of(&self, title: &str) -> Option<RowId> {
        self.title_index.get(title)
    }

    /// First record, in catalog order, whose title equals `title` ignoring case
    pub fn find_case_insensitive(&self, title: &str) -> Option<RowId> {
        let wanted = title.trim().to_lowercase();
        self.records
            .iter()
            .position(|record| record.title.to_lowercase() == wanted)
    }

    /// Median release year over records with a known year
    pub fn median_year(&self) -> Option<u16> {
        self.median_year
    }

    /// Sorted, de-duplicated genre names present in the catalog
    pub fn genre_names(&self) -> Vec<String> {
        let mut genres: Vec<String> = self
            .records
            .iter()
            .flat_map(|record| record.genres.iter().cloned())
            .collect();
        genres.sort_unstable();
        genres.dedup();
        genres
    }
}
