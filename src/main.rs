//! # radiosift
//!
//! Extracts playlists from the text of radio station pages and learns, run by
//! run, which presenters play the kind of music you want.
//!
//! ## Usage
//!
//! ```bash
//! # Page text to a song list
//! radiosift extract page.txt -o songs.txt
//!
//! # Learn presenter preferences from a page
//! radiosift analyze page.txt --genres genres.json
//!
//! # See what has been learned
//! radiosift report
//!
//! # Only songs from preferred presenters
//! radiosift extract page.txt --filter
//! ```

use anyhow::Result;
use clap::{CommandFactory, Parser};
use log::{debug, info};
use radiosift::config::RuntimeConfig;
use radiosift::filter::{self, FilterOptions, FilterOutcome};
use radiosift::genres::{self, GenreCatalog};
use radiosift::store::{self, LoadStatus, StatsBackend, StatsStore};
use radiosift::{cli, completion, pipeline, report};
use std::path::{Path, PathBuf};

/// Open the stats store a command needs. An unreadable store is moved aside
/// and reported; only failing to move it is fatal.
fn open_stats(config: &RuntimeConfig) -> Result<(Box<dyn StatsBackend>, StatsStore)> {
    let backend = store::open_backend(&config.stats_path);
    let (stats, status) = store::load_or_empty(backend.as_ref())?;

    if let LoadStatus::SetAside { error, moved_to } = status {
        eprintln!("Warning: could not read stats store {}:", config.stats_path.display());
        eprintln!("  {error:#}");
        eprintln!("It was moved to {} and this run starts from empty statistics.", moved_to.display());
    }

    Ok((backend, stats))
}

fn announce_output(output: &Path, count: usize) {
    // stdout carries the song list itself
    if output.as_os_str() != pipeline::STDIO_PATH {
        println!("Saved {count} songs to {}", output.display());
    }
}

#[allow(clippy::too_many_arguments)]
fn run_extract(
    input: &Path,
    output: &Path,
    limit: usize,
    options: FilterOptions,
    exclude_genres: &[String],
    genres: Option<PathBuf>,
    stats: Option<PathBuf>,
) -> Result<()> {
    let lines = pipeline::read_input_lines(input)?;
    let mut records = pipeline::extract_records(&lines);
    info!("Found {} unique songs", records.len());

    if options.is_active() {
        let config = RuntimeConfig::resolve(stats, genres.clone())?;
        let (_, store) = open_stats(&config)?;
        let (kept, outcome) = filter::apply_filters(records, &store, &options, &config.context);
        if outcome == FilterOutcome::NoStatistics {
            eprintln!(
                "Warning: no presenter statistics in {}; run `radiosift analyze' first.",
                config.stats_path.display()
            );
            eprintln!("Writing the unfiltered song list.");
        }
        records = kept;
    }

    if !exclude_genres.is_empty() {
        if let Some(path) = genres {
            let catalog = GenreCatalog::load(&path)?;
            records = filter::exclude_genres(records, &catalog, exclude_genres);
        }
    }

    let records = pipeline::apply_limit(records, limit);
    pipeline::write_song_list(output, &records)?;
    announce_output(output, records.len());
    Ok(())
}

fn run_analyze(input: &Path, genres: PathBuf, stats: Option<PathBuf>, top_genres: usize) -> Result<()> {
    let lines = pipeline::read_input_lines(input)?;
    let records = pipeline::extract_records(&lines);

    let config = RuntimeConfig::resolve(stats, Some(genres))?;
    let catalog = match &config.genre_catalog {
        Some(path) => GenreCatalog::load(path)?,
        None => GenreCatalog::default(),
    };

    let (backend, mut stats) = open_stats(&config)?;

    let analysis = genres::analyze(&records, &catalog);
    stats.merge(&analysis.stats);
    backend.save(&stats, &config.context)?;

    println!(
        "Analysed {} of {} songs ({} without genre data)",
        analysis.analysed,
        records.len(),
        analysis.failed
    );
    println!("Stats saved to {}\n", config.stats_path.display());
    print!("{}", report::render_report(&stats, &config.context, top_genres));
    Ok(())
}

fn run_report(stats: Option<PathBuf>, top_genres: usize) -> Result<()> {
    let config = RuntimeConfig::resolve(stats, None)?;
    debug!("Reading stats from {}", config.stats_path.display());
    let (_, stats) = open_stats(&config)?;
    print!("{}", report::render_report(&stats, &config.context, top_genres));
    Ok(())
}

/// Main entry point for radiosift.
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug radiosift extract page.txt` - Enable debug logging
/// - `RUST_LOG=radiosift::classifier=trace radiosift extract page.txt` - See why lines were rejected
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    match args.command {
        cli::Command::Extract {
            input,
            output,
            limit,
            filter,
            include_neutral,
            top,
            exclude_genres,
            genres,
            stats,
        } => {
            let options = FilterOptions {
                top,
                by_classification: filter,
                include_neutral,
            };
            run_extract(&input, &output, limit, options, &exclude_genres, genres, stats)?;
        }
        cli::Command::Analyze {
            input,
            genres,
            stats,
            top_genres,
        } => {
            run_analyze(&input, genres, stats, top_genres)?;
        }
        cli::Command::Report { stats, top_genres } => {
            run_report(stats, top_genres)?;
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(shell), &mut cmd);
        }
    }

    Ok(())
}
