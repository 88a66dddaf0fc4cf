//! # Command-Line Interface Module
//!
//! Defines radiosift's command-line interface with Clap derive macros.
//!
//! ## Commands
//!
//! - `extract`: Turn page text into an `Artist - Title` song list
//! - `analyze`: Learn presenter genre preferences from page text
//! - `report`: Show what has been learned about each presenter
//! - `completion`: Generate shell completions
//!
//! ## Examples
//!
//! ```bash
//! radiosift extract page.txt -o songs.txt
//! radiosift analyze page.txt --genres genres.json
//! radiosift extract page.txt --filter --include-neutral
//! radiosift extract page.txt --top 3 --limit 50
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "radiosift")]
#[command(about = "radiosift: Playlist extraction from radio pages with per-presenter genre learning")]
#[command(version)]
pub struct Args {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract songs from page text
    ///
    /// Reads the text of a playlist or program page, one line per line of
    /// rendered text, and writes every song found as `Artist - Title`.
    /// Songs are attributed to the presenter of the time slot they aired in,
    /// which is what the presenter filters work on.
    Extract {
        /// Page text to read ("-" for stdin)
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Output file ("-" for stdout)
        #[arg(short, long, default_value = "songs.txt")]
        output: PathBuf,

        /// Limit number of songs (0 = all)
        #[arg(long, default_value_t = 0)]
        limit: usize,

        /// Keep only songs from presenters classified as preferred
        #[arg(long)]
        filter: bool,

        /// With --filter, also keep neutral and untracked presenters
        #[arg(long)]
        include_neutral: bool,

        /// Keep only songs from the N best-scoring presenters
        ///
        /// Takes precedence over --filter.
        #[arg(long, value_name = "N")]
        top: Option<usize>,

        /// Comma-separated genres to exclude (e.g. "rap,hip hop")
        ///
        /// Needs a genre catalog (--genres).
        #[arg(short = 'x', long, value_delimiter = ',', value_name = "GENRES", requires = "genres")]
        exclude_genres: Vec<String>,

        /// Genre catalog (JSON: artist or "artist - title" to genre list)
        #[arg(long, env = "RADIOSIFT_GENRES", value_name = "FILE")]
        genres: Option<PathBuf>,

        /// Presenter stats store (.json, or .db/.sqlite for SQLite)
        #[arg(long, env = "RADIOSIFT_STATS", value_name = "FILE")]
        stats: Option<PathBuf>,
    },

    /// Learn presenter genre preferences from page text
    ///
    /// Extracts songs like `extract`, looks up each song's genres and adds
    /// them to the presenter statistics. Statistics accumulate across runs.
    Analyze {
        /// Page text to read ("-" for stdin)
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Genre catalog (JSON: artist or "artist - title" to genre list)
        #[arg(long, env = "RADIOSIFT_GENRES", value_name = "FILE")]
        genres: PathBuf,

        /// Presenter stats store (.json, or .db/.sqlite for SQLite)
        #[arg(long, env = "RADIOSIFT_STATS", value_name = "FILE")]
        stats: Option<PathBuf>,

        /// Genres listed per presenter in the summary
        #[arg(long, default_value_t = 5, value_name = "N")]
        top_genres: usize,
    },

    /// Show presenter classifications and top genres
    Report {
        /// Presenter stats store (.json, or .db/.sqlite for SQLite)
        #[arg(long, env = "RADIOSIFT_STATS", value_name = "FILE")]
        stats: Option<PathBuf>,

        /// Genres listed per presenter
        #[arg(long, default_value_t = 5, value_name = "N")]
        top_genres: usize,
    },

    /// Generate shell completions
    ///
    /// Usage: radiosift completion bash > ~/.local/share/bash-completion/completions/radiosift
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
