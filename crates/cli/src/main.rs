use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use data_loader::{MovieCatalog, MovieId, load_dataset};
use engine::{CycleReport, RecommendationCycle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::time::Instant;

/// CohortRecs - movie recommendations from clusters of similar raters
#[derive(Parser)]
#[command(name = "cohort-recs")]
#[command(about = "Recommends unseen movies from the target user's rating cluster", long_about = None)]
struct Cli {
    /// Path to the newline-delimited JSON rating stream
    #[arg(long, default_value = "data/user_ratings.json")]
    ratings: PathBuf,

    /// Path to the newline-delimited JSON movie metadata feed
    #[arg(long, default_value = "data/imdb_recent_movies.json")]
    movies: PathBuf,

    /// Number of user clusters
    #[arg(short = 'k', long, default_value = "3")]
    clusters: usize,

    /// Seed for target-user selection (OS entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Pin the target user instead of selecting one at random
    #[arg(long)]
    user: Option<String>,

    /// How many recommendations to display
    #[arg(long, default_value = "5")]
    top: usize,

    /// Show the cast of each recommended movie
    #[arg(long)]
    cast: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!(
        "Loading ratings from {} and metadata from {}...",
        cli.ratings.display(),
        cli.movies.display()
    );
    let start = Instant::now();
    let dataset = load_dataset(&cli.ratings, &cli.movies)
        .context("Failed to load the rating dataset")?;
    println!("{} Loaded dataset in {:?}", "✓".green(), start.elapsed());

    let cycle = RecommendationCycle::new(cli.clusters);
    let report = match &cli.user {
        Some(user) => cycle.run_for_user(&dataset.matrix, user)?,
        None => {
            let mut rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            cycle.run(&dataset.matrix, &mut rng)?
        }
    };

    print_report(&report, &dataset.catalog, cli.top, cli.cast);
    Ok(())
}

/// Format and print one cycle report
fn print_report(report: &CycleReport, catalog: &MovieCatalog, top: usize, cast: bool) {
    println!();
    println!("{}", format!("For user {}:", report.target_user).bold().blue());

    println!("{}", "User seen movies:".bold());
    println!("---------------------------------------------");
    println!("{}", titles_of(&report.seen, catalog).join(", "));
    println!();

    println!("{}", "Recommended movies based upon movies seen:".bold());
    println!("---------------------------------------------");
    if report.recommended.is_empty() {
        println!("{}", "(nothing to recommend)".dimmed());
        return;
    }

    let shown = &report.recommended[..report.recommended.len().min(top)];
    println!("{}", titles_of(shown, catalog).join(", "));

    if cast {
        println!();
        for movie_id in shown {
            let names = cast_names(movie_id, catalog);
            println!(
                "  {} {}",
                format!("{}:", title_or_id(movie_id, catalog)).green(),
                if names.is_empty() {
                    "(no cast on record)".to_string()
                } else {
                    names.join(", ")
                }
            );
        }
    }
}

/// Titles in the given order; movies missing from the catalog fall back
/// to their raw identifier
fn titles_of(movie_ids: &[MovieId], catalog: &MovieCatalog) -> Vec<String> {
    movie_ids
        .iter()
        .map(|id| title_or_id(id, catalog))
        .collect()
}

fn title_or_id(movie_id: &str, catalog: &MovieCatalog) -> String {
    catalog
        .title_of(movie_id)
        .unwrap_or(movie_id)
        .to_string()
}

/// Cast names of a movie in the actor index's first-seen order
fn cast_names(movie_id: &str, catalog: &MovieCatalog) -> Vec<String> {
    let Some(movie) = catalog.movie(movie_id) else {
        return Vec::new();
    };

    let actors = catalog.actors();
    let mut members: Vec<(usize, &str)> = movie
        .cast
        .iter()
        .filter_map(|actor_id| {
            let index = actors.index_of(actor_id)?;
            let name = actors.name_of(actor_id)?;
            Some((index, name))
        })
        .collect();
    members.sort_unstable_by_key(|&(index, _)| index);
    members.into_iter().map(|(_, name)| name.to_string()).collect()
}
