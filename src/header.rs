//! # DJ-Header Detector
//!
//! Recognises time-slot header lines such as `06.00 - 09.00 Jane Doe` or
//! `20:00 – 22:00 Noční linka / John Roe` and extracts the presenter name.
//!
//! Only lines that start with a clock range count as headers. Everything else
//! is either plainly not a header or, when it looks like something a careless
//! heuristic might take for a name (a URL, an e-mail, a list label), is
//! explicitly disqualified. Free-standing names are never promoted to headers.

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

/// Presenter names must be strictly longer than this.
const MIN_NAME_LEN: usize = 2;

/// Presenter names must be strictly shorter than this.
const MAX_NAME_LEN: usize = 50;

lazy_static! {
    /// `H.MM - H.MM rest`, tolerant of `.`/`:` and `-`/`–`.
    static ref SLOT_HEADER: Regex = Regex::new(
        r"^\d{1,2}[:.]\d{2}\s*[-–]\s*\d{1,2}[:.]\d{2}(.*)$"
    )
    .expect("slot header pattern is valid");

    static ref DISQUALIFIERS: Vec<(&'static str, Regex)> = [
        ("leading-digit", r"^\d"),
        ("url", r"^(?:https?://|www\.)"),
        ("ui-label", r"^(?:Zobrazit|Show)\b"),
        ("dash", r"[-–]"),
        ("email", r"@"),
        ("domain", r"\.cz"),
        ("list-label", r"^(?:Singles|Albums):"),
        ("emoji", r"^[🛒\s]+$"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("disqualifier pattern is valid")))
    .collect();
}

/// Verdict on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderMatch {
    /// A slot header naming this presenter.
    Presenter(String),
    /// Header-like text that must not be taken for a name.
    Disqualified(&'static str),
    /// Anything else.
    NotHeader,
}

/// Inspect a line and report whether it is a slot header.
///
/// A clock-range line whose remainder is not a plausible name (empty, or too
/// long) is reported as [`HeaderMatch::NotHeader`].
#[must_use]
pub fn inspect_header(line: &str) -> HeaderMatch {
    let line = line.trim();

    if let Some(caps) = SLOT_HEADER.captures(line) {
        let remainder = caps.get(1).map_or("", |m| m.as_str());
        // "Show title / Presenter" convention
        let candidate = remainder.rsplit('/').next().unwrap_or(remainder).trim();
        let len = candidate.chars().count();

        return if len > MIN_NAME_LEN && len < MAX_NAME_LEN {
            HeaderMatch::Presenter(candidate.to_string())
        } else {
            trace!("Slot header `{line}' has no usable presenter name");
            HeaderMatch::NotHeader
        };
    }

    match DISQUALIFIERS.iter().find(|(_, re)| re.is_match(line)) {
        Some((name, _)) => HeaderMatch::Disqualified(name),
        None => HeaderMatch::NotHeader,
    }
}

/// Extract the presenter named by a slot header line.
///
/// # Examples
///
/// ```
/// use radiosift::header::extract_presenter;
///
/// assert_eq!(extract_presenter("06.00 - 09.00 Jane Doe").as_deref(), Some("Jane Doe"));
/// assert_eq!(
///     extract_presenter("20:00 – 22:00 Noční linka / John Roe").as_deref(),
///     Some("John Roe"),
/// );
/// assert_eq!(extract_presenter("Jane Doe"), None);
/// ```
#[must_use]
pub fn extract_presenter(line: &str) -> Option<String> {
    match inspect_header(line) {
        HeaderMatch::Presenter(name) => Some(name),
        HeaderMatch::Disqualified(_) | HeaderMatch::NotHeader => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_and_hyphen() {
        assert_eq!(extract_presenter("06.00 - 09.00 Jane Doe").as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_colon_and_en_dash() {
        assert_eq!(extract_presenter("6:00 – 9:00 Jane Doe").as_deref(), Some("Jane Doe"));
        assert_eq!(extract_presenter("22:00–0:00 Night Owl").as_deref(), Some("Night Owl"));
    }

    #[test]
    fn test_mixed_separators() {
        assert_eq!(extract_presenter("10:00 - 12.00 Petr Novák").as_deref(), Some("Petr Novák"));
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(extract_presenter("   07.00 - 10.00   John Roe  ").as_deref(), Some("John Roe"));
    }

    #[test]
    fn test_slash_keeps_text_after_last_slash() {
        assert_eq!(
            extract_presenter("14.00 - 16.00 Odpolední show / Jana Nováková").as_deref(),
            Some("Jana Nováková")
        );
        assert_eq!(
            extract_presenter("14.00 - 16.00 Show / Special / DJ Petr").as_deref(),
            Some("DJ Petr")
        );
    }

    #[test]
    fn test_name_length_is_strictly_bounded() {
        assert_eq!(extract_presenter("06.00 - 09.00 Al"), None);
        assert_eq!(extract_presenter("06.00 - 09.00 Ali").as_deref(), Some("Ali"));

        let longest = "x".repeat(MAX_NAME_LEN - 1);
        let too_long = "x".repeat(MAX_NAME_LEN);
        assert_eq!(
            extract_presenter(&format!("06.00 - 09.00 {longest}")),
            Some(longest.clone())
        );
        assert_eq!(extract_presenter(&format!("06.00 - 09.00 {too_long}")), None);
    }

    #[test]
    fn test_empty_remainder() {
        assert_eq!(extract_presenter("06.00 - 09.00"), None);
        assert_eq!(extract_presenter("06.00 - 09.00 / "), None);
    }

    #[test]
    fn test_single_time_is_not_a_header() {
        assert_eq!(extract_presenter("06.00 Jane Doe"), None);
    }

    #[test]
    fn test_free_standing_names_are_not_headers() {
        assert_eq!(inspect_header("Jane Doe"), HeaderMatch::NotHeader);
        assert_eq!(extract_presenter("Ranní show s Janou"), None);
    }

    #[test]
    fn test_disqualified_lines() {
        let cases = [
            ("9 songs played", "leading-digit"),
            ("https://radio1.cz", "url"),
            ("www.radio1.cz", "url"),
            ("Zobrazit celý program", "ui-label"),
            ("Queen - Bohemian Rhapsody", "dash"),
            ("Odpolední – blok", "dash"),
            ("jane@radio.example", "email"),
            ("radio1.cz", "domain"),
            ("Singles: new this week", "list-label"),
            ("Albums: picks", "list-label"),
            ("🛒 ", "emoji"),
        ];
        for (line, reason) in cases {
            assert_eq!(inspect_header(line), HeaderMatch::Disqualified(reason), "line `{line}'");
            assert_eq!(extract_presenter(line), None);
        }
    }

    #[test]
    fn test_header_with_dash_in_name_is_still_a_header() {
        assert_eq!(
            extract_presenter("18.00 - 20.00 Hip-Hop Hour / MC Jay-Dee").as_deref(),
            Some("MC Jay-Dee")
        );
    }
}
