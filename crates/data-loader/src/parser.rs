//! Parser for the TMDB 5000 CSV files.
//!
//! - movies csv: `id, title, genres, keywords, release_date, popularity, vote_average, ...`
//! - credits csv: `movie_id, title, cast, crew`
//!
//! `genres`, `keywords` and `crew` are JSON arrays embedded in a CSV cell,
//! e.g. `[{"id": 28, "name": "Action"}, {"id": 12, "name": "Adventure"}]`.
//! They are flattened here so the rest of the workspace only sees plain
//! strings.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

const MOVIES_FILE: &str = "movies.csv";
const CREDITS_FILE: &str = "credits.csv";

/// Raw row of the movies file. Columns we don't use are ignored.
#[derive(Debug, Deserialize)]
struct MovieRow {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    genres: Option<String>,
    #[serde(default)]
    keywords: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    popularity: Option<String>,
    #[serde(default)]
    vote_average: Option<String>,
}

/// Raw row of the credits file
#[derive(Debug, Deserialize)]
struct CreditRow {
    movie_id: String,
    #[serde(default)]
    crew: Option<String>,
}

/// `{"id": .., "name": ..}` entry of a genres/keywords cell
#[derive(Debug, Deserialize)]
struct NamedEntry {
    name: String,
}

/// Entry of a crew cell
#[derive(Debug, Deserialize)]
struct CrewMember {
    #[serde(default)]
    job: String,
    #[serde(default)]
    name: String,
}

/// Open a CSV file with headers
fn open_reader(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    Ok(csv::ReaderBuilder::new().has_headers(true).from_reader(file))
}

/// Parse the movies file
///
/// Rows without a title are skipped; `Catalog::from_records` would drop them anyway.
/// The director is left empty and filled in from the credits.
pub fn parse_movies(path: &Path) -> Result<Vec<MovieRecord>> {
    let mut reader = open_reader(path)?;
    let mut movies = Vec::new();

    for (idx, row) in reader.deserialize::<MovieRow>().enumerate() {
        let row = row?;
        // Row number in the file, the header being row 1
        let line = idx + 2;

        let title = match row.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => continue,
        };

        let movie = MovieRecord {
            id: parse_id(&row.id, MOVIES_FILE, line)?,
            title,
            genres: parse_names(row.genres.as_deref(), MOVIES_FILE, line)?,
            keywords: parse_names(row.keywords.as_deref(), MOVIES_FILE, line)?,
            director: None,
            year: row.release_date.as_deref().and_then(extract_year),
            popularity: parse_metric(row.popularity.as_deref(), "popularity")?.max(0.0),
            vote_average: parse_metric(row.vote_average.as_deref(), "vote_average")?
                .clamp(0.0, 10.0),
        };

        movies.push(movie);
    }

    Ok(movies)
}

/// Parse the credits file into `movie_id -> director`
///
/// A movie whose crew has no "Director" maps to `None`.
pub fn parse_credits(path: &Path) -> Result<HashMap<MovieId, Option<String>>> {
    let mut reader = open_reader(path)?;
    let mut directors = HashMap::new();

    for (idx, row) in reader.deserialize::<CreditRow>().enumerate() {
        let row = row?;
        let line = idx + 2;

        let movie_id = parse_id(&row.movie_id, CREDITS_FILE, line)?;
        let director = extract_director(row.crew.as_deref(), line)?;
        directors.entry(movie_id).or_insert(director);
    }

    Ok(directors)
}

fn parse_id(value: &str, file: &str, line: usize) -> Result<MovieId> {
    value.trim().parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Invalid movie id {:?}: {}", value, e),
    })
}

/// Parse a numeric column; empty or missing cells count as 0
fn parse_metric(value: Option<&str>, field: &str) -> Result<f64> {
    let value = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return Ok(0.0),
    };
    match value.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(parsed),
        _ => Err(DataLoadError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Flatten a JSON list of `{"name": ..}` objects into its names
///
/// Example: `[{"id": 28, "name": "Action"}]` -> `vec!["Action"]`
fn parse_names(cell: Option<&str>, file: &str, line: usize) -> Result<Vec<String>> {
    let cell = match cell.map(str::trim) {
        Some(c) if !c.is_empty() => c,
        _ => return Ok(Vec::new()),
    };
    let entries: Vec<NamedEntry> =
        serde_json::from_str(cell).map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line,
            reason: format!("Invalid name list: {}", e),
        })?;
    Ok(entries.into_iter().map(|entry| entry.name).collect())
}

/// First crew member whose job is "Director"
fn extract_director(cell: Option<&str>, line: usize) -> Result<Option<String>> {
    let cell = match cell.map(str::trim) {
        Some(c) if !c.is_empty() => c,
        _ => return Ok(None),
    };
    let crew: Vec<CrewMember> =
        serde_json::from_str(cell).map_err(|e| DataLoadError::ParseError {
            file: CREDITS_FILE.to_string(),
            line,
            reason: format!("Invalid crew list: {}", e),
        })?;
    Ok(crew
        .into_iter()
        .find(|member| member.job == "Director")
        .map(|member| member.name)
        .filter(|name| !name.trim().is_empty()))
}

/// Extract the calendar year from a `YYYY-MM-DD` release date
///
/// Example: "2009-12-10" -> Some(2009)
///          "" / "unknown" -> None
fn extract_year(date: &str) -> Option<u16> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    u16::try_from(date.year()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("2009-12-10"), Some(2009));
        assert_eq!(extract_year(" 1979-05-25 "), Some(1979));
        assert_eq!(extract_year(""), None);
        assert_eq!(extract_year("May 1979"), None);
    }

    #[test]
    fn test_parse_names() {
        let names = parse_names(
            Some(r#"[{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}]"#),
            MOVIES_FILE,
            2,
        )
        .unwrap();
        assert_eq!(names, vec!["Action", "Science Fiction"]);

        assert!(parse_names(Some("[]"), MOVIES_FILE, 2).unwrap().is_empty());
        assert!(parse_names(None, MOVIES_FILE, 2).unwrap().is_empty());
        assert!(parse_names(Some("not json"), MOVIES_FILE, 2).is_err());
    }

    #[test]
    fn test_extract_director_takes_first_director() {
        let crew = r#"[{"job": "Producer", "name": "Gale Anne Hurd"},
                       {"job": "Director", "name": "James Cameron"},
                       {"job": "Director", "name": "Someone Else"}]"#;
        assert_eq!(
            extract_director(Some(crew), 2).unwrap(),
            Some("James Cameron".to_string())
        );
        assert_eq!(
            extract_director(Some(r#"[{"job": "Writer", "name": "X"}]"#), 2).unwrap(),
            None
        );
    }

    #[test]
    fn test_parse_metric() {
        assert_eq!(parse_metric(Some("7.5"), "vote_average").unwrap(), 7.5);
        assert_eq!(parse_metric(Some(""), "vote_average").unwrap(), 0.0);
        assert_eq!(parse_metric(None, "popularity").unwrap(), 0.0);
        assert!(matches!(
            parse_metric(Some("abc"), "popularity"),
            Err(DataLoadError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_parse_movies_file() {
        let file = write_csv(concat!(
            "budget,genres,id,keywords,popularity,release_date,title,vote_average\n",
            "11000000,\"[{\"\"id\"\": 27, \"\"name\"\": \"\"Horror\"\"}]\",348,",
            "\"[{\"\"id\"\": 1, \"\"name\"\": \"\"space\"\"}]\",10.5,1979-05-25,Alien,7.5\n",
            "0,[],999,[],,not-a-date,,5.0\n",
            "0,[],1000,[],3.0,,Untitled Project,11.0\n",
        ));

        let movies = parse_movies(file.path()).unwrap();
        assert_eq!(movies.len(), 2);

        let alien = &movies[0];
        assert_eq!(alien.id, 348);
        assert_eq!(alien.title, "Alien");
        assert_eq!(alien.genres, vec!["Horror"]);
        assert_eq!(alien.keywords, vec!["space"]);
        assert_eq!(alien.year, Some(1979));
        assert_eq!(alien.popularity, 10.5);
        assert_eq!(alien.director, None);

        let untitled = &movies[1];
        assert_eq!(untitled.year, None);
        assert_eq!(untitled.vote_average, 10.0);
    }

    #[test]
    fn test_parse_credits_file() {
        let file = write_csv(concat!(
            "movie_id,title,cast,crew\n",
            "348,Alien,[],\"[{\"\"job\"\": \"\"Director\"\", \"\"name\"\": \"\"Ridley Scott\"\"}]\"\n",
            "999,Nobody,[],[]\n",
        ));

        let directors = parse_credits(file.path()).unwrap();
        assert_eq!(directors.len(), 2);
        assert_eq!(directors[&348], Some("Ridley Scott".to_string()));
        assert_eq!(directors[&999], None);
    }

    #[test]
    fn test_missing_file() {
        let result = parse_movies(Path::new("does/not/exist.csv"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound { .. })));
    }
}
