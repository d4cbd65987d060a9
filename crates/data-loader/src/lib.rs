//! # Data Loader Crate
//!
//! This crate owns the movie catalog: the cleaned `MovieRecord`s, the title
//! index, and the loader for the TMDB 5000 dataset.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, TitleIndex, Catalog)
//! - **parser**: Parse the TMDB movies/credits CSV files
//! - **index**: Build the immutable Catalog snapshot
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_files(
//!     Path::new("data/tmdb_5000_movies.csv"),
//!     Path::new("data/tmdb_5000_credits.csv"),
//! )?;
//!
//! let row = catalog.row_of("Alien").unwrap();
//! println!("{}", catalog.get(row).unwrap().soup());
//! ```
//!
//! The catalog has no mutators: once built it is shared read-only
//! (usually as `Arc<Catalog>`) by the similarity index and the engine.

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    MovieId,
    RowId,
    // Core types
    MovieRecord,
    TitleIndex,
    Catalog,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn alien() -> MovieRecord {
        MovieRecord {
            id: 348,
            title: "Alien".to_string(),
            genres: vec!["Horror".to_string(), "SciFi".to_string()],
            keywords: vec!["space".to_string()],
            director: Some("Ridley Scott".to_string()),
            year: Some(1979),
            popularity: 10.0,
            vote_average: 7.5,
        }
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::from_records(Vec::new());

        assert!(catalog.is_empty());
        assert!(catalog.titles().is_empty());
        assert_eq!(catalog.median_year(), None);
        assert!(catalog.get(0).is_none());
    }

    #[test]
    fn test_soup_order() {
        // keywords, then genres, then director
        assert_eq!(alien().soup(), "space Horror SciFi Ridley Scott");

        let bare = MovieRecord {
            genres: vec![],
            keywords: vec![],
            director: None,
            ..alien()
        };
        assert_eq!(bare.soup(), "");
    }

    #[test]
    fn test_has_genre_ignores_case() {
        let movie = alien();
        assert!(movie.has_genre("scifi"));
        assert!(movie.has_genre("HORROR"));
        assert!(!movie.has_genre("Action"));
    }

    #[test]
    fn test_genre_names() {
        let catalog = Catalog::from_records(vec![
            alien(),
            MovieRecord {
                id: 679,
                title: "Aliens".to_string(),
                genres: vec!["Action".to_string(), "SciFi".to_string()],
                ..alien()
            },
        ]);

        assert_eq!(catalog.genre_names(), vec!["Action", "Horror", "SciFi"]);
    }
}
