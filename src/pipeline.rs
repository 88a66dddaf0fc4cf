//! Input and output around the core pipeline.
//!
//! Reads page text, runs scan + dedupe, and writes the final song list. An
//! empty or unreadable input and an unwritable output are the only fatal
//! conditions in a run.

use crate::dedupe::dedupe;
use crate::scanner::scan_with_summary;
use crate::song::{format_song, SongRecord};
use anyhow::{bail, Context, Result};
use log::info;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

/// Path meaning stdin or stdout.
pub const STDIO_PATH: &str = "-";

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO_PATH
}

/// Read page text as lines from a file, or stdin for `-`.
///
/// Invalid UTF-8 is replaced rather than rejected.
///
/// # Errors
///
/// Returns an error if the input cannot be read or holds no text at all.
pub fn read_input_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = if is_stdio(path) {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read page text from stdin")?;
        buf
    } else {
        fs::read(path).with_context(|| format!("Failed to read page text from {}", path.display()))?
    };

    let text = String::from_utf8_lossy(&bytes);
    if text.trim().is_empty() {
        bail!("Input {} is empty", path.display());
    }

    Ok(text.lines().map(str::to_string).collect())
}

/// Scan lines and collapse duplicate songs.
pub fn extract_records<I, S>(lines: I) -> Vec<SongRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (records, summary) = scan_with_summary(lines);
    info!(
        "Found {} songs under {} slot headers in {} lines",
        summary.songs, summary.headers, summary.lines
    );
    dedupe(records)
}

/// Keep the first `limit` records; 0 keeps everything.
#[must_use]
pub fn apply_limit(mut records: Vec<SongRecord>, limit: usize) -> Vec<SongRecord> {
    if limit > 0 {
        records.truncate(limit);
    }
    records
}

/// Render records as `Artist - Title` lines in title case.
#[must_use]
pub fn render_song_list(records: &[SongRecord]) -> String {
    records
        .iter()
        .map(|record| format_song(&record.song) + "\n")
        .collect()
}

/// Write the song list to a file, or stdout for `-`.
///
/// # Errors
///
/// Returns an error if the destination cannot be written.
pub fn write_song_list(path: &Path, records: &[SongRecord]) -> Result<()> {
    let content = render_song_list(records);

    if is_stdio(path) {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        out.write_all(content.as_bytes())
            .and_then(|()| out.flush())
            .context("Failed to write song list to stdout")?;
    } else {
        fs::write(path, content)
            .with_context(|| format!("Failed to write song list to {}", path.display()))?;
    }

    Ok(())
}
