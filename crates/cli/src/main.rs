use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::Catalog;
use engine::{
    Comparator, ComparisonResult, Disambiguator, EngineError, FirstCandidate, Recommendation,
    RecommendationEngine, Resolution, SkipReason,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// reel-match - content-based movie recommendations and comparisons
#[derive(Parser)]
#[command(name = "reel-match")]
#[command(about = "Find similar movies and compare movies against each other", long_about = None)]
struct Cli {
    /// Path to the TMDB movies CSV
    #[arg(long, default_value = "data/tmdb_5000_movies.csv")]
    movies: PathBuf,

    /// Path to the TMDB credits CSV
    #[arg(long, default_value = "data/tmdb_5000_credits.csv")]
    credits: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title
    Recommend {
        /// Movie title (typos are tolerated)
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// Compare two or more movies and pick the best one
    Compare {
        /// Movie titles to compare (repeat the flag)
        #[arg(long = "title", required = true, num_args = 1)]
        titles: Vec<String>,

        /// Favorite genre, gives matching movies a bonus
        #[arg(long)]
        genre: Option<String>,

        /// Take the best fuzzy match instead of asking
        #[arg(long)]
        no_prompt: bool,
    },

    /// List catalog titles close to a query
    Search {
        /// Title to search for
        #[arg(long)]
        title: String,

        /// Maximum number of results
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Minimum similarity ratio in [0, 1]
        #[arg(long, default_value = "0.4")]
        cutoff: f64,
    },

    /// Run benchmark to test recommendation latency
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading TMDB dataset from {}...", cli.movies.display());
    let start = Instant::now();
    let catalog = Arc::new(
        Catalog::load_from_files(&cli.movies, &cli.credits)
            .context("Failed to load TMDB dataset")?,
    );
    let engine = RecommendationEngine::new(catalog);
    println!(
        "{} Indexed {} movies in {:?}",
        "✓".green(),
        engine.catalog().len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Recommend { title, limit } => handle_recommend(&engine, &title, limit),
        Commands::Compare {
            titles,
            genre,
            no_prompt,
        } => handle_compare(&engine, &titles, genre.as_deref(), no_prompt)?,
        Commands::Search {
            title,
            limit,
            cutoff,
        } => handle_search(&engine, &title, limit, cutoff),
        Commands::Benchmark { requests } => handle_benchmark(&engine, requests)?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(engine: &RecommendationEngine, title: &str, limit: usize) {
    let recommendation = engine.recommend(title, limit);
    print_recommendation(title, &recommendation);
}

/// Handle the 'compare' command
fn handle_compare(
    engine: &RecommendationEngine,
    titles: &[String],
    genre: Option<&str>,
    no_prompt: bool,
) -> Result<()> {
    let comparator = Comparator::new(engine);
    let outcome = if no_prompt {
        comparator.compare(titles, genre, &mut FirstCandidate)
    } else {
        comparator.compare(titles, genre, &mut StdinDisambiguator)
    };

    match outcome {
        Ok(result) => {
            print_comparison(&result, genre);
            Ok(())
        }
        Err(EngineError::InsufficientInput { resolved, required }) => {
            println!(
                "{} Only {} of the titles matched a movie; at least {} are needed to compare.",
                "✗".red(),
                resolved,
                required
            );
            Ok(())
        }
    }
}

/// Handle the 'search' command
fn handle_search(engine: &RecommendationEngine, title: &str, limit: usize, cutoff: f64) {
    let matches = engine.search(title, limit, cutoff);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  no title scored {:.2} or more", cutoff);
        return;
    }
    for (rank, (candidate, ratio)) in matches.iter().enumerate() {
        let year = engine
            .catalog()
            .row_of(candidate)
            .and_then(|row| engine.catalog().get(row))
            .and_then(|movie| movie.year);
        println!(
            "{}. {} {} - match {:.2}",
            (rank + 1).to_string().green(),
            candidate,
            format_year(year),
            ratio
        );
    }
}

/// Handle the 'benchmark' command
fn handle_benchmark(engine: &RecommendationEngine, requests: usize) -> Result<()> {
    let titles = engine.catalog().titles();
    if titles.is_empty() || requests == 0 {
        anyhow::bail!("nothing to benchmark");
    }

    // Random catalog titles, some with a dropped character to exercise fuzzy matching
    let queries: Vec<String> = (0..requests)
        .map(|i| {
            let title = &titles[rand::random::<u32>() as usize % titles.len()];
            if i % 4 == 0 && title.chars().count() > 3 {
                title.chars().skip(1).collect()
            } else {
                title.clone()
            }
        })
        .collect();

    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    for query in &queries {
        let start = Instant::now();
        let recommendation = engine.recommend(query, 5);
        timings.push(start.elapsed());
        tracing::debug!("{:?} -> {:?}", query, recommendation.matched_title);
    }

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / timings.len() as u32;
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Asks on stdin which candidate was meant; empty input skips the title
struct StdinDisambiguator;

impl Disambiguator for StdinDisambiguator {
    fn choose(&mut self, query: &str, candidates: &[String]) -> Option<usize> {
        println!("{}", format!("No exact match for '{}'. Did you mean:", query).yellow());
        for (i, candidate) in candidates.iter().enumerate() {
            println!("  {}. {}", (i + 1).to_string().green(), candidate);
        }

        let stdin = io::stdin();
        loop {
            print!("Choose 1-{} (Enter to skip): ", candidates.len());
            io::stdout().flush().ok()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line).ok()? == 0 {
                return None;
            }
            let answer = line.trim();
            if answer.is_empty() {
                return None;
            }
            match answer.parse::<usize>() {
                Ok(choice) if (1..=candidates.len()).contains(&choice) => return Some(choice - 1),
                _ => println!("{}", "Please enter one of the listed numbers.".red()),
            }
        }
    }
}

fn format_year(year: Option<u16>) -> String {
    year.map(|y| format!("({})", y)).unwrap_or_default()
}

/// Helper function to format and print recommendations
fn print_recommendation(query: &str, recommendation: &Recommendation) {
    let Some(matched) = &recommendation.matched_title else {
        println!("{} No movie found matching '{}'", "✗".red(), query);
        return;
    };

    println!("{}", format!("Because you liked {}:", matched).bold().blue());
    if recommendation.results.is_empty() {
        println!("  no similar movies found");
    }
    for (rank, similar) in recommendation.results.iter().enumerate() {
        println!(
            "{}. {} {} [{}] - similarity {:.2}",
            (rank + 1).to_string().green(),
            similar.movie.title,
            format_year(similar.movie.year),
            similar.movie.genres.join(", "),
            similar.similarity
        );
    }
}

fn print_comparison(result: &ComparisonResult, genre: Option<&str>) {
    for resolution in &result.resolutions {
        match resolution {
            Resolution::Exact { .. } => {}
            Resolution::Fuzzy { query, title, .. } => {
                println!("  '{}' -> {}", query, title);
            }
            Resolution::Skipped { query, reason } => {
                let why = match reason {
                    SkipReason::NoMatch => "no match",
                    SkipReason::Declined => "skipped",
                    SkipReason::Duplicate => "already listed",
                };
                println!("  {} '{}' ({})", "-".yellow(), query, why);
            }
        }
    }

    let header = match genre {
        Some(genre) => format!("Ranking (favorite genre: {}):", genre),
        None => "Ranking:".to_string(),
    };
    println!("{}", header.bold().blue());
    for (rank, entry) in result.ranked.iter().enumerate() {
        println!(
            "{}. {} {} - rating {:.1}, popularity {:.1}, score {:.3}",
            (rank + 1).to_string().green(),
            entry.title,
            format_year(entry.year),
            entry.vote_average,
            entry.popularity,
            entry.score
        );
    }

    println!(
        "{} Best pick: {}",
        "★".yellow(),
        result.winner.title.bold()
    );

    if !result.suggestions.is_empty() {
        println!("{}", "You might also like:".bold().blue());
        for similar in &result.suggestions {
            println!("  - {} {}", similar.movie.title, format_year(similar.movie.year));
        }
    }
}
