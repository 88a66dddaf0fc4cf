//! # Configuration Module
//!
//! Locates radiosift's data directory and gathers the runtime settings that
//! the CLI hands to the pipeline.
//!
//! ## Data Storage
//!
//! The presenter statistics live in the platform-standard data directory
//! unless `--stats` or `RADIOSIFT_STATS` points elsewhere:
//! - Linux: `~/.local/share/radiosift/dj_stats.json`
//! - macOS: `~/Library/Application Support/radiosift/dj_stats.json`
//! - Windows: `%APPDATA%\radiosift\dj_stats.json`

use crate::stats::ClassificationContext;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Default stats file name inside the data directory.
pub const STATS_FILE_NAME: &str = "dj_stats.json";

/// Returns the platform-appropriate data directory for radiosift, creating
/// it if needed.
///
/// # Errors
///
/// This function will return an error if:
/// - The system data directory cannot be determined
/// - The radiosift subdirectory cannot be created due to permissions
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system data directory. Use --stats to choose a stats file explicitly."
        )
    })?;

    let app_dir = data_dir.join("radiosift");
    fs::create_dir_all(&app_dir).with_context(|| {
        format!(
            "Failed to create radiosift data directory at {}. Please check file permissions.",
            app_dir.display()
        )
    })?;

    Ok(app_dir)
}

/// Returns the default stats store path.
///
/// # Examples
///
/// ```no_run
/// use radiosift::config::get_stats_path;
///
/// let stats_path = get_stats_path()?;
/// println!("Stats location: {}", stats_path.display());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn get_stats_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(STATS_FILE_NAME))
}

/// Configuration for one run
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Stats store location; the extension picks the format.
    pub stats_path: PathBuf,
    /// Optional genre catalog for analysis and genre exclusion.
    pub genre_catalog: Option<PathBuf>,
    /// Thresholds for presenter classification.
    pub context: ClassificationContext,
}

impl RuntimeConfig {
    /// Build a configuration, falling back to the default stats path when
    /// none is given.
    ///
    /// # Errors
    ///
    /// Returns an error only when no stats path was given and the default
    /// one cannot be determined.
    pub fn resolve(stats_path: Option<PathBuf>, genre_catalog: Option<PathBuf>) -> Result<Self> {
        let stats_path = match stats_path {
            Some(path) => path,
            None => get_stats_path()?,
        };

        Ok(Self {
            stats_path,
            genre_catalog,
            context: ClassificationContext::default(),
        })
    }
}
