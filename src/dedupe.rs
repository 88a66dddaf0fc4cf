//! Case-insensitive, order-preserving removal of repeated songs.
//!
//! The key is the lower-cased (artist, title) pair. The first record wins,
//! including its presenter: a song aired in two slots stays attributed to the
//! earlier one.

use crate::song::SongRecord;
use log::debug;
use std::collections::HashSet;

/// Drop records whose song was already seen, keeping first-seen order.
#[must_use]
pub fn dedupe(records: Vec<SongRecord>) -> Vec<SongRecord> {
    let before = records.len();
    let mut seen = HashSet::with_capacity(before);

    let unique: Vec<SongRecord> = records
        .into_iter()
        .filter(|record| seen.insert(record.song.dedupe_key()))
        .collect();

    debug!("Deduplicated {before} records into {} unique songs", unique.len());
    unique
}
