//! Per-presenter genre statistics and preference scoring.
//!
//! Every analysed song feeds its genre tags into the presenter's [`DjStats`].
//! Tags are counted verbatim, and each tag is also checked against two fixed
//! term lists: a match against [`PREFERRED_TERMS`] bumps `preferred_score`, a
//! match against [`AVOIDED_TERMS`] bumps `avoided_score`. The preference
//! score is the net of the two per analysed song:
//!
//! ```text
//! score = (preferred_score - avoided_score) / songs_count     (0.0 when no songs)
//! ```
//!
//! and [`Classification`] buckets that score with the thresholds in
//! [`ClassificationContext`].

use indexmap::IndexMap;
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Substrings marking a tag as preferred. A tag scores at most once.
pub const PREFERRED_TERMS: &[&str] = &[
    "rock",
    "indie",
    "alternative",
    "post-punk",
    "shoegaze",
    "grunge",
    "punk",
    "new wave",
    "brit",
    "garage",
    "psychedelic",
    "progressive",
    "electronic",
    "synth",
    "dream pop",
    "noise",
    "experimental",
];

/// Substrings marking a tag as avoided. A tag scores at most once.
pub const AVOIDED_TERMS: &[&str] = &[
    "rap",
    "hip hop",
    "hip-hop",
    "trap",
    "drill",
    "grime",
    "r&b",
    "rnb",
    "reggaeton",
    "urban",
    "gangsta",
];

/// Score thresholds for presenter classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationContext {
    /// Scores strictly above this are preferred.
    pub preferred_threshold: f64,
    /// Scores strictly below this are avoided.
    pub avoided_threshold: f64,
}

impl Default for ClassificationContext {
    fn default() -> Self {
        Self {
            preferred_threshold: 0.1,
            avoided_threshold: -0.1,
        }
    }
}

/// Presenter bucket derived from the preference score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Preferred,
    Neutral,
    Avoided,
}

impl Classification {
    /// Bucket a score. Both thresholds are exclusive, so a score sitting
    /// exactly on one is neutral.
    #[must_use]
    pub fn from_score(score: f64, context: &ClassificationContext) -> Self {
        match score {
            s if s > context.preferred_threshold => Self::Preferred,
            s if s < context.avoided_threshold => Self::Avoided,
            _ => Self::Neutral,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preferred => "preferred",
            Self::Neutral => "neutral",
            Self::Avoided => "avoided",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated genre statistics for one presenter.
///
/// Counters only ever grow. `genre_counts` keeps tags in the order they were
/// first seen, which is what breaks ties when listing top genres.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DjStats {
    pub songs_count: u64,
    pub genre_counts: IndexMap<String, u64>,
    pub preferred_score: u64,
    pub avoided_score: u64,
}

impl DjStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one song's genre tags into the counters.
    ///
    /// Does not touch `songs_count`; see [`DjStats::record_song`].
    pub fn add_genres<I, S>(&mut self, genres: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for genre in genres {
            let tag = genre.as_ref().to_lowercase();

            if let Some(term) = first_match(&tag, PREFERRED_TERMS) {
                trace!("Genre `{tag}' is preferred (matched `{term}')");
                self.preferred_score += 1;
            }
            if let Some(term) = first_match(&tag, AVOIDED_TERMS) {
                trace!("Genre `{tag}' is avoided (matched `{term}')");
                self.avoided_score += 1;
            }

            *self.genre_counts.entry(tag).or_insert(0) += 1;
        }
    }

    /// Account for one analysed song: add its tags and count the song once,
    /// even when it has no tags at all.
    pub fn record_song<I, S>(&mut self, genres: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_genres(genres);
        self.songs_count += 1;
    }

    /// Net preference per analysed song.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score(&self) -> f64 {
        match self.songs_count {
            0 => 0.0,
            n => (self.preferred_score as f64 - self.avoided_score as f64) / n as f64,
        }
    }

    #[must_use]
    pub fn classification(&self, context: &ClassificationContext) -> Classification {
        Classification::from_score(self.score(), context)
    }

    /// The `n` most frequent tags, most frequent first. Equal counts keep
    /// first-seen order.
    #[must_use]
    pub fn top_genres(&self, n: usize) -> Vec<(&str, u64)> {
        let mut genres: Vec<(&str, u64)> = self
            .genre_counts
            .iter()
            .map(|(genre, &count)| (genre.as_str(), count))
            .collect();
        // stable sort keeps insertion order among ties
        genres.sort_by(|a, b| b.1.cmp(&a.1));
        genres.truncate(n);
        genres
    }

    /// Add another set of counters to this one.
    pub fn merge(&mut self, other: &DjStats) {
        self.songs_count += other.songs_count;
        self.preferred_score += other.preferred_score;
        self.avoided_score += other.avoided_score;
        for (genre, count) in &other.genre_counts {
            *self.genre_counts.entry(genre.clone()).or_insert(0) += count;
        }
    }
}

fn first_match(tag: &str, terms: &[&'static str]) -> Option<&'static str> {
    terms.iter().copied().find(|term| tag.contains(term))
}
