//! # Line Classifier
//!
//! Decides whether one line of scraped page text is a playlist entry of the
//! form `Artist - Title` and, if so, extracts the two halves.
//!
//! Page text is noisy: clock times, navigation labels, URLs, inline SVG and
//! CSS fragments all end up on their own lines. Every line is first checked
//! against a fixed table of noise patterns; only lines that survive are split
//! on the first `" - "` and validated.
//!
//! Rejection is never an error. [`classify_line`] returns `None` for anything
//! that is not clearly a song.

use crate::song::{Song, MAX_ARTIST_LEN, MAX_TITLE_LEN};
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

/// Separator between artist and title.
pub const SONG_SEPARATOR: &str = " - ";

/// Shortest trimmed line that can hold a song.
const MIN_LINE_LEN: usize = 5;

/// Shortest accepted artist or title.
const MIN_PART_LEN: usize = 2;

lazy_static! {
    /// Lines matching any of these are page furniture, not songs.
    static ref NOISE_PATTERNS: Vec<(&'static str, Regex)> = [
        ("timestamp", r"^\d{1,2}[:.]\d{2}"),
        ("url", r"^https?://"),
        ("number", r"^\d+\s*$"),
        ("braces", r"[{}]"),
        ("ui-label", r"^(?:Zobrazit|Show)\b"),
        ("emoji", r"^[🛒\s]+$"),
        ("layout", r"Stroke|Fill|Width"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("noise pattern is valid")))
    .collect();

    /// A half made only of symbols and whitespace.
    static ref NO_WORD_CHARS: Regex = Regex::new(r"^[\W\s]+$").expect("word pattern is valid");
}

/// Classify a single line, returning the song it encodes.
///
/// # Examples
///
/// ```
/// use radiosift::classifier::classify_line;
///
/// let song = classify_line("  Queen - Bohemian Rhapsody ").unwrap();
/// assert_eq!(song.artist, "Queen");
/// assert_eq!(song.title, "Bohemian Rhapsody");
///
/// assert!(classify_line("06:00 Ranní show").is_none());
/// assert!(classify_line("No separator here").is_none());
/// ```
#[must_use]
pub fn classify_line(line: &str) -> Option<Song> {
    let line = line.trim();
    if line.chars().count() < MIN_LINE_LEN {
        return None;
    }

    if let Some(name) = noise_pattern(line) {
        trace!("Rejected `{line}': matches {name} noise pattern");
        return None;
    }

    let (artist, title) = line.split_once(SONG_SEPARATOR)?;
    let artist = artist.trim();
    let title = title.trim();

    if !is_valid_part(artist, MAX_ARTIST_LEN) || !is_valid_part(title, MAX_TITLE_LEN) {
        trace!("Rejected `{line}': artist or title out of bounds");
        return None;
    }

    Some(Song::new(artist, title))
}

/// Name of the first noise pattern `line` matches, if any.
fn noise_pattern(line: &str) -> Option<&'static str> {
    NOISE_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(line))
        .map(|(name, _)| *name)
}

fn is_valid_part(part: &str, max_len: usize) -> bool {
    let len = part.chars().count();
    (MIN_PART_LEN..=max_len).contains(&len) && !NO_WORD_CHARS.is_match(part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_basic_song() {
        let song = classify_line("Dua Lipa - Levitating").unwrap();
        assert_eq!(song, Song::new("Dua Lipa", "Levitating"));
    }

    #[test]
    fn test_title_keeps_further_hyphens() {
        let song = classify_line("Blur - Song 2 - Remastered 2012").unwrap();
        assert_eq!(song.artist, "Blur");
        assert_eq!(song.title, "Song 2 - Remastered 2012");
    }

    #[test]
    fn test_inner_hyphen_without_spaces_is_not_a_separator() {
        assert!(classify_line("Jay-Z feat. Alicia Keys").is_none());
        let song = classify_line("Jay-Z - Empire State of Mind").unwrap();
        assert_eq!(song.artist, "Jay-Z");
    }

    #[test]
    fn test_short_lines_rejected() {
        assert!(classify_line("").is_none());
        assert!(classify_line("    ").is_none());
        assert!(classify_line("a - b").is_none());
    }

    #[test]
    fn test_noise_patterns_rejected() {
        let noise = [
            "06:00 Morning - Show",
            "6.30 Jane Doe - Live",
            "https://radio1.cz - program",
            "http://example.com/a - b",
            "2024",
            "12345   ",
            "Artist {color: red} - Title",
            "Zobrazit více - playlist",
            "Show more - songs",
            "🛒 🛒  🛒",
            "Stroke - Something",
            "Artist - Fill Color",
            "Line Width - Value",
        ];
        for line in noise {
            assert!(classify_line(line).is_none(), "expected `{line}' to be rejected");
        }
    }

    #[test]
    fn test_ui_label_is_a_whole_word() {
        let song = classify_line("Showaddywaddy - Under the Moon of Love").unwrap();
        assert_eq!(song.artist, "Showaddywaddy");
    }

    #[test]
    fn test_parts_too_short() {
        assert!(classify_line("A - Long enough title").is_none());
        assert!(classify_line("Long enough artist - B").is_none());
    }

    #[test]
    fn test_parts_made_of_symbols() {
        assert!(classify_line("*** - Some Title").is_none());
        assert!(classify_line("Some Artist - ?!").is_none());
    }

    #[test]
    fn test_length_bounds() {
        let artist_ok = "a".repeat(MAX_ARTIST_LEN);
        let artist_long = "a".repeat(MAX_ARTIST_LEN + 1);
        let title_ok = "t".repeat(MAX_TITLE_LEN);
        let title_long = "t".repeat(MAX_TITLE_LEN + 1);

        assert!(classify_line(&format!("{artist_ok} - {title_ok}")).is_some());
        assert!(classify_line(&format!("{artist_long} - {title_ok}")).is_none());
        assert!(classify_line(&format!("{artist_ok} - {title_long}")).is_none());
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        let artist = "ř".repeat(MAX_ARTIST_LEN);
        assert!(classify_line(&format!("{artist} - Píseň")).is_some());
    }

    #[test]
    fn test_hyphen_without_spaces_is_not_a_separator() {
        for line in ["Jay-Z Empire State", "Queen -Bohemian Rhapsody", "Queen- Bohemian Rhapsody"] {
            assert!(classify_line(line).is_none(), "{line}");
        }
    }

    #[test]
    fn test_unicode_song() {
        let song = classify_line("Lucie Bílá - Láska je láska").unwrap();
        assert_eq!(song.artist, "Lucie Bílá");
        assert_eq!(song.title, "Láska je láska");
    }

    proptest! {
        #[test]
        fn prop_no_separator_never_classifies(line in ".{0,80}") {
            prop_assume!(!line.contains(SONG_SEPARATOR));
            prop_assert!(classify_line(&line).is_none());
        }

        #[test]
        fn prop_loose_hyphens_never_classify(line in "[a-z -]{0,40}") {
            prop_assume!(!line.contains(SONG_SEPARATOR));
            prop_assert!(classify_line(&line).is_none());
        }

        #[test]
        fn prop_valid_halves_round_trip(
            artist in "[a-z]{2}[a-z ]{0,60}",
            title in "[a-z]{2}[a-z ]{0,100}",
        ) {
            let song = classify_line(&format!("{artist} - {title}"));
            prop_assert_eq!(song, Some(Song::new(artist.trim(), title.trim())));
        }
    }
}
