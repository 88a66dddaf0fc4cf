//! Song list filtering by presenter quality and by genre.
//!
//! Presenter filters come in two flavours, and only one runs per invocation:
//!
//! - **top-N**: keep songs whose presenter is among the N best-scoring
//!   presenters in the stats store. Untracked presenters never qualify.
//! - **classification**: keep songs from preferred presenters, optionally
//!   neutral ones too. Untracked presenters count as neutral. Avoided
//!   presenters are always dropped.
//!
//! When both are requested, top-N wins. All filters keep the relative order
//! of the songs they keep.

use crate::genres::GenreLookup;
use crate::song::SongRecord;
use crate::stats::{Classification, ClassificationContext};
use crate::store::StatsStore;
use log::{debug, info, warn};
use std::collections::HashSet;

/// Requested presenter filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Keep only the N best-scoring presenters.
    pub top: Option<usize>,
    /// Filter by presenter classification.
    pub by_classification: bool,
    /// With `by_classification`, keep neutral presenters as well.
    pub include_neutral: bool,
}

impl FilterOptions {
    pub fn is_active(&self) -> bool {
        self.top.is_some() || self.by_classification
    }
}

/// Keep songs whose presenter ranks among the top `n` by score.
#[must_use]
pub fn filter_top_n(records: Vec<SongRecord>, store: &StatsStore, n: usize) -> Vec<SongRecord> {
    let top: HashSet<&str> = store.top_presenters(n).into_iter().collect();
    debug!("Top {n} presenters: {top:?}");

    records
        .into_iter()
        .filter(|record| top.contains(record.presenter.as_str()))
        .collect()
}

/// Keep songs by their presenter's classification.
#[must_use]
pub fn filter_by_classification(
    records: Vec<SongRecord>,
    store: &StatsStore,
    context: &ClassificationContext,
    include_neutral: bool,
) -> Vec<SongRecord> {
    records
        .into_iter()
        .filter(|record| {
            let class = store
                .get(&record.presenter)
                .map_or(Classification::Neutral, |stats| stats.classification(context));
            match class {
                Classification::Preferred => true,
                Classification::Neutral => include_neutral,
                Classification::Avoided => false,
            }
        })
        .collect()
}

/// What [`apply_filters`] did with the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// No presenter filter was requested.
    NotRequested,
    Applied,
    /// A filter was requested but there were no statistics to apply it
    /// with, so the list is unfiltered.
    NoStatistics,
}

/// Apply the requested presenter filter.
///
/// Without any statistics to go on the list is returned unfiltered and the
/// outcome says so, for the caller to report.
#[must_use]
pub fn apply_filters(
    records: Vec<SongRecord>,
    store: &StatsStore,
    options: &FilterOptions,
    context: &ClassificationContext,
) -> (Vec<SongRecord>, FilterOutcome) {
    if !options.is_active() {
        return (records, FilterOutcome::NotRequested);
    }
    if store.is_empty() {
        warn!("No presenter statistics available; run `analyze' first. Skipping presenter filter.");
        return (records, FilterOutcome::NoStatistics);
    }

    let before = records.len();
    let filtered = match options.top {
        Some(n) => filter_top_n(records, store, n),
        None => filter_by_classification(records, store, context, options.include_neutral),
    };
    info!("Presenter filter kept {} of {before} songs", filtered.len());
    (filtered, FilterOutcome::Applied)
}

/// Drop songs whose genres contain any of the `excluded` terms.
///
/// Matching is a case-insensitive substring test, so `rap` also excludes
/// `trap` and `gangsta rap`. Songs whose lookup fails are kept.
#[must_use]
pub fn exclude_genres(
    records: Vec<SongRecord>,
    lookup: &dyn GenreLookup,
    excluded: &[String],
) -> Vec<SongRecord> {
    let excluded: Vec<String> = excluded
        .iter()
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect();
    if excluded.is_empty() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| {
            let genres = match lookup.genres(record.artist(), record.title()) {
                Ok(genres) => genres,
                Err(e) => {
                    debug!("Keeping `{}' without genre check: {e:#}", record.song);
                    return true;
                }
            };
            let hit = genres.iter().find(|genre| {
                let genre = genre.to_lowercase();
                excluded.iter().any(|term| genre.contains(term.as_str()))
            });
            match hit {
                Some(genre) => {
                    info!("Skipped (genre `{genre}'): {}", record.song);
                    false
                }
                None => true,
            }
        })
        .collect()
}
