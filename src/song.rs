//! Song types shared by the whole pipeline.
//!
//! A [`Song`] is what the line classifier pulls out of one line of page text.
//! A [`SongRecord`] is a song tagged with the presenter whose slot it aired in.

use std::fmt;

/// Presenter assigned to songs seen before any slot header.
pub const UNKNOWN_PRESENTER: &str = "Unknown";

/// Maximum artist length, in characters.
pub const MAX_ARTIST_LEN: usize = 100;

/// Maximum title length, in characters.
pub const MAX_TITLE_LEN: usize = 150;

/// A validated (artist, title) pair.
///
/// Both fields are trimmed and non-empty. Only the classifier builds these
/// from raw text, so the bounds in [`MAX_ARTIST_LEN`] and [`MAX_TITLE_LEN`]
/// always hold for songs coming out of a scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Song {
    pub artist: String,
    pub title: String,
}

impl Song {
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
        }
    }

    /// Case-insensitive identity used for deduplication.
    #[must_use]
    pub fn dedupe_key(&self) -> (String, String) {
        (self.artist.to_lowercase(), self.title.to_lowercase())
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}

/// A song attributed to the presenter on air when it was listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongRecord {
    pub song: Song,
    pub presenter: String,
}

impl SongRecord {
    pub fn new(song: Song, presenter: impl Into<String>) -> Self {
        Self {
            song,
            presenter: presenter.into(),
        }
    }

    pub fn artist(&self) -> &str {
        &self.song.artist
    }

    pub fn title(&self) -> &str {
        &self.song.title
    }
}

/// Render a song as `Artist - Title` in title case, the format the playlist
/// search downstream matches best.
#[must_use]
pub fn format_song(song: &Song) -> String {
    format!("{} - {}", title_case(&song.artist), title_case(&song.title))
}

/// Upper-case the first letter of every word and lower-case the rest.
///
/// A word starts after any character that is not a letter or an apostrophe,
/// so `"don't stop"` becomes `"Don't Stop"`, `"AC/DC"` becomes `"Ac/Dc"` and
/// `"2pac"` becomes `"2Pac"`.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = !(c == '\'' || c == '’');
        }
    }

    out
}
