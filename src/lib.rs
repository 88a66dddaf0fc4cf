//! Playlist extraction from radio pages, with per-presenter genre learning.
//!
//! Core modules:
//! - [`classifier`] - Decides whether a line of page text is an `Artist - Title` entry
//! - [`header`] - Recognises time-slot header lines and extracts presenter names
//! - [`scanner`] - Attributes songs to the presenter of their time slot
//! - [`dedupe`] - Case-insensitive, order-preserving duplicate removal
//! - [`stats`] - Per-presenter genre statistics, scoring and classification
//! - [`filter`] - Presenter and genre filters over a song list
//! - [`store`] - Persisted presenter statistics (JSON or SQLite)
//!
//! ### Supporting Modules
//!
//! - [`genres`] - Genre lookup seam and the file-backed genre catalog
//! - [`report`] - Human-readable presenter summary
//! - [`pipeline`] - Reading page text and writing song lists
//! - [`song`] - Song types and output formatting
//! - [`config`] - Data directory and runtime configuration
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```
//! use radiosift::{dedupe, scanner, stats, store};
//!
//! let lines = [
//!     "06.00 - 09.00 Jane Doe",
//!     "Queen - Bohemian Rhapsody",
//!     "07.00 - 10.00 John Roe",
//!     "Dua Lipa - Levitating",
//!     "Queen - Bohemian Rhapsody",
//! ];
//! let records = dedupe::dedupe(scanner::scan(lines));
//! assert_eq!(records.len(), 2);
//!
//! let mut learned = store::StatsStore::new();
//! learned.record_song(&records[0].presenter, ["classic rock", "glam rock"]);
//! learned.record_song(&records[1].presenter, ["dance pop"]);
//!
//! let context = stats::ClassificationContext::default();
//! let jane = learned.get("Jane Doe").unwrap();
//! assert_eq!(jane.classification(&context), stats::Classification::Preferred);
//! ```
//!
//! ## Error Handling
//!
//! Lines that are not songs or headers are simply skipped; classification
//! never fails. A missing or corrupt stats store is treated as empty, and a
//! failed genre lookup skips only that song. Fallible functions return
//! `anyhow::Result`; the fatal cases are an empty or unreadable input and an
//! unwritable output or store.

pub mod classifier;
pub mod cli;
pub mod completion;
pub mod config;
pub mod dedupe;
pub mod filter;
pub mod genres;
pub mod header;
pub mod pipeline;
pub mod report;
pub mod scanner;
pub mod song;
pub mod stats;
pub mod store;
