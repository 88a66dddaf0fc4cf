//! # Slot Scanner
//!
//! Walks page lines in order and attributes every song to the presenter of
//! the most recent slot header above it. Songs seen before the first header
//! go to [`UNKNOWN_PRESENTER`].
//!
//! The scan is a fold over the lines. The current presenter lives in the
//! accumulator, so two scans never share state.

use crate::classifier::classify_line;
use crate::header::{inspect_header, HeaderMatch};
use crate::song::{SongRecord, UNKNOWN_PRESENTER};
use log::{debug, trace};

/// Counters describing one scan, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub lines: usize,
    pub headers: usize,
    pub disqualified: usize,
    pub songs: usize,
    pub skipped: usize,
}

/// Fold accumulator.
#[derive(Debug)]
struct ScanState {
    presenter: String,
    records: Vec<SongRecord>,
    summary: ScanSummary,
}

impl ScanState {
    fn new() -> Self {
        Self {
            presenter: UNKNOWN_PRESENTER.to_string(),
            records: Vec::new(),
            summary: ScanSummary::default(),
        }
    }

    /// Header detection runs first: a header may contain a dash and must
    /// never be emitted as a song.
    fn step(mut self, line: &str) -> Self {
        self.summary.lines += 1;

        match inspect_header(line) {
            HeaderMatch::Presenter(name) => {
                trace!("Slot header: presenter is now `{name}'");
                self.summary.headers += 1;
                self.presenter = name;
                return self;
            }
            HeaderMatch::Disqualified(reason) => {
                trace!("Not a header ({reason}): `{}'", line.trim());
                self.summary.disqualified += 1;
            }
            HeaderMatch::NotHeader => {}
        }

        match classify_line(line) {
            Some(song) => {
                self.summary.songs += 1;
                self.records.push(SongRecord::new(song, self.presenter.clone()));
            }
            None => self.summary.skipped += 1,
        }

        self
    }
}

/// Scan lines into presenter-attributed song records.
///
/// # Examples
///
/// ```
/// use radiosift::scanner::scan;
///
/// let records = scan(["06.00 - 09.00 Jane Doe", "Queen - Bohemian Rhapsody"]);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].presenter, "Jane Doe");
/// ```
pub fn scan<I, S>(lines: I) -> Vec<SongRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    scan_with_summary(lines).0
}

/// Like [`scan`], but also returns what the scan saw.
pub fn scan_with_summary<I, S>(lines: I) -> (Vec<SongRecord>, ScanSummary)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let state = lines
        .into_iter()
        .fold(ScanState::new(), |state, line| state.step(line.as_ref()));

    debug!(
        "Scanned {} lines: {} headers, {} songs, {} skipped ({} header-like lines disqualified)",
        state.summary.lines,
        state.summary.headers,
        state.summary.songs,
        state.summary.skipped,
        state.summary.disqualified
    );

    (state.records, state.summary)
}
