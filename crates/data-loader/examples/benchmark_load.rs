use anyhow::Result;
use data_loader::Catalog;
use std::path::Path;
use std::time::Instant;

fn main() -> Result<()> {
    let movies = Path::new("data/tmdb_5000_movies.csv");
    let credits = Path::new("data/tmdb_5000_credits.csv");

    println!("Loading TMDB 5000 dataset...\n");

    let start = Instant::now();
    let catalog = Catalog::load_from_files(movies, credits)?;
    let elapsed = start.elapsed();

    let with_director = catalog
        .records()
        .iter()
        .filter(|record| record.director.is_some())
        .count();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", catalog.len());
    println!("Distinct titles: {}", catalog.titles().len());
    println!("With director: {}", with_director);
    println!("Median year: {:?}", catalog.median_year());
    println!("\nPerformance: {:.0} movies/second",
             catalog.len() as f64 / elapsed.as_secs_f64());
    Ok(())
}
