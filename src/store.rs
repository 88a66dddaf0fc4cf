//! # Stats Store
//!
//! Durable mapping from presenter name to [`DjStats`]. The store is loaded at
//! the start of a run, run statistics are merged into it, and it is saved at
//! the end. It is an accumulating ledger: nothing is ever subtracted.
//!
//! Two on-disk formats are supported, chosen by file extension:
//!
//! - JSON (default): one object keyed by presenter name.
//! - SQLite (`.db`, `.sqlite`, `.sqlite3`): `presenters` and `genre_counts`
//!   tables.
//!
//! Both write the derived `score` and `classification` for readability, and
//! both ignore them on load: they are always recomputed from the counters.
//!
//! A store that exists but cannot be read is moved aside to
//! `<path>.corrupt` before the run continues from empty statistics, so the
//! next save never overwrites it.
//!
//! There is no locking. Two runs saving the same store concurrently lose one
//! run's contribution (last writer wins).

use crate::stats::{Classification, ClassificationContext, DjStats};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use rusqlite::Connection;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// All known presenters and their statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsStore {
    presenters: BTreeMap<String, DjStats>,
}

impl StatsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.presenters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.presenters.len()
    }

    pub fn get(&self, presenter: &str) -> Option<&DjStats> {
        self.presenters.get(presenter)
    }

    /// Statistics for `presenter`, created empty on first use.
    pub fn entry(&mut self, presenter: &str) -> &mut DjStats {
        self.presenters.entry(presenter.to_string()).or_default()
    }

    /// Record one analysed song for `presenter`.
    pub fn record_song<I, S>(&mut self, presenter: &str, genres: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.entry(presenter).record_song(genres);
    }

    pub fn insert(&mut self, presenter: impl Into<String>, stats: DjStats) {
        self.presenters.insert(presenter.into(), stats);
    }

    /// Add every presenter's counters from `other` into this store.
    pub fn merge(&mut self, other: &StatsStore) {
        for (presenter, stats) in &other.presenters {
            self.entry(presenter).merge(stats);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DjStats)> {
        self.presenters.iter().map(|(name, stats)| (name.as_str(), stats))
    }

    /// Presenters by descending score; equal scores by name.
    #[must_use]
    pub fn ranked(&self) -> Vec<(&str, &DjStats)> {
        let mut ranked: Vec<(&str, &DjStats)> = self.iter().collect();
        // iter() is name-ordered and the sort is stable
        ranked.sort_by(|(_, a), (_, b)| {
            b.score()
                .partial_cmp(&a.score())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }

    /// Names of the `n` best-scoring presenters.
    #[must_use]
    pub fn top_presenters(&self, n: usize) -> Vec<&str> {
        self.ranked().into_iter().take(n).map(|(name, _)| name).collect()
    }
}

/// Persistence seam for the stats store.
pub trait StatsBackend {
    /// Load the store. A missing store is an empty one, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read or parsed.
    fn load(&self) -> Result<StatsStore>;

    /// Replace the persisted store with `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written.
    fn save(&self, store: &StatsStore, context: &ClassificationContext) -> Result<()>;

    fn path(&self) -> &Path;
}

/// Pick a backend from the file extension.
#[must_use]
pub fn open_backend(path: &Path) -> Box<dyn StatsBackend> {
    let is_sqlite = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "db" | "sqlite" | "sqlite3"));

    if is_sqlite {
        debug!("Using SQLite stats store at {}", path.display());
        Box::new(SqliteBackend::new(path))
    } else {
        debug!("Using JSON stats store at {}", path.display());
        Box::new(JsonBackend::new(path))
    }
}

/// How loading the store went.
#[derive(Debug)]
pub enum LoadStatus {
    /// The store was read, or there was none yet.
    Loaded,
    /// The store could not be read and now lives at `moved_to`.
    SetAside { error: anyhow::Error, moved_to: PathBuf },
}

/// Load the store, falling back to an empty one when it cannot be read.
///
/// An unreadable store is renamed out of the way first, so saving the
/// fresh statistics later cannot destroy what it held.
///
/// # Errors
///
/// Returns an error only if an unreadable store cannot be moved aside.
pub fn load_or_empty(backend: &dyn StatsBackend) -> Result<(StatsStore, LoadStatus)> {
    let path = backend.path();
    match backend.load() {
        Ok(store) => {
            info!("Loaded statistics for {} presenters from {}", store.len(), path.display());
            Ok((store, LoadStatus::Loaded))
        }
        Err(error) => {
            let moved_to = set_aside(path).with_context(|| {
                format!("Stats store {} is unreadable ({error:#})", path.display())
            })?;
            warn!(
                "Could not load stats from {}: {error:#}. Moved it to {} and starting with empty statistics.",
                path.display(),
                moved_to.display()
            );
            Ok((StatsStore::new(), LoadStatus::SetAside { error, moved_to }))
        }
    }
}

/// Rename `path` to the first free `<path>.corrupt`, `<path>.corrupt.1`, ...
fn set_aside(path: &Path) -> Result<PathBuf> {
    let target = (0..)
        .map(|n| {
            let mut name = path.as_os_str().to_os_string();
            name.push(".corrupt");
            if n > 0 {
                name.push(format!(".{n}"));
            }
            PathBuf::from(name)
        })
        .find(|candidate| !candidate.exists())
        .context("No free name to move the stats store to")?;

    fs::rename(path, &target)
        .with_context(|| format!("Failed to move {} to {}", path.display(), target.display()))?;
    Ok(target)
}

/// Serialized form of one presenter: counters plus derived values.
#[derive(Serialize)]
struct StoredStats<'a> {
    #[serde(flatten)]
    stats: &'a DjStats,
    score: f64,
    classification: Classification,
}

impl<'a> StoredStats<'a> {
    fn new(stats: &'a DjStats, context: &ClassificationContext) -> Self {
        Self {
            stats,
            score: stats.score(),
            classification: stats.classification(context),
        }
    }
}

/// JSON file backend.
#[derive(Debug, Clone)]
pub struct JsonBackend {
    path: PathBuf,
}

impl JsonBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StatsBackend for JsonBackend {
    fn load(&self) -> Result<StatsStore> {
        if !self.path.exists() {
            debug!("No stats file at {}", self.path.display());
            return Ok(StatsStore::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read stats file {}", self.path.display()))?;
        // derived fields in the file are ignored here
        let presenters: BTreeMap<String, DjStats> = serde_json::from_str(&content)
            .with_context(|| format!("Stats file {} is not valid", self.path.display()))?;

        Ok(StatsStore { presenters })
    }

    fn save(&self, store: &StatsStore, context: &ClassificationContext) -> Result<()> {
        let dir = parent_dir(&self.path);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;

        let stored: BTreeMap<&str, StoredStats<'_>> = store
            .iter()
            .map(|(name, stats)| (name, StoredStats::new(stats, context)))
            .collect();

        // write next to the target and rename, so a failed save leaves the old file intact
        let tmp = tempfile::NamedTempFile::new_in(&dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(&mut writer, &stored)
                .context("Failed to serialize stats")?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to write stats file {}", self.path.display()))?;

        info!("Saved statistics for {} presenters to {}", store.len(), self.path.display());
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// SQLite database backend.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    path: PathBuf,
}

impl SqliteBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.path)
            .with_context(|| format!("Failed to open stats database {}", self.path.display()))
    }
}

const CREATE_TABLES: &str = "
    CREATE TABLE IF NOT EXISTS presenters (
        name            TEXT    PRIMARY KEY,
        songs_count     INTEGER NOT NULL,
        preferred_score INTEGER NOT NULL,
        avoided_score   INTEGER NOT NULL,
        score           REAL    NOT NULL,
        classification  TEXT    NOT NULL
    );
    CREATE TABLE IF NOT EXISTS genre_counts (
        presenter TEXT    NOT NULL REFERENCES presenters(name),
        genre     TEXT    NOT NULL,
        count     INTEGER NOT NULL,
        position  INTEGER NOT NULL,
        PRIMARY KEY (presenter, genre)
    );
";

impl StatsBackend for SqliteBackend {
    fn load(&self) -> Result<StatsStore> {
        if !self.path.exists() {
            debug!("No stats database at {}", self.path.display());
            return Ok(StatsStore::new());
        }

        let conn = self.connect()?;
        let mut store = StatsStore::new();

        let mut stmt = conn
            .prepare("SELECT name, songs_count, preferred_score, avoided_score FROM presenters")
            .context("Invalid SQL statement when SELECTing presenters.")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)?,
            ))
        })?;
        for row in rows {
            let (name, songs, preferred, avoided) = row.context("Queried presenter row failed.")?;
            let stats = store.entry(&name);
            stats.songs_count = to_count(songs)?;
            stats.preferred_score = to_count(preferred)?;
            stats.avoided_score = to_count(avoided)?;
        }

        let mut stmt = conn
            .prepare("SELECT presenter, genre, count FROM genre_counts ORDER BY presenter, position")
            .context("Invalid SQL statement when SELECTing genre counts.")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;
        for row in rows {
            let (presenter, genre, count) = row.context("Queried genre row failed.")?;
            store.entry(&presenter).genre_counts.insert(genre, to_count(count)?);
        }

        Ok(store)
    }

    fn save(&self, store: &StatsStore, context: &ClassificationContext) -> Result<()> {
        let dir = parent_dir(&self.path);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute_batch(CREATE_TABLES)
            .context("Invalid SQL command when CREATEing stats tables.")?;
        tx.execute("DELETE FROM genre_counts", ())?;
        tx.execute("DELETE FROM presenters", ())?;

        {
            let mut presenter_stmt = tx.prepare(
                "INSERT INTO presenters (name, songs_count, preferred_score, avoided_score, score, classification)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            let mut genre_stmt = tx.prepare(
                "INSERT INTO genre_counts (presenter, genre, count, position) VALUES (?1, ?2, ?3, ?4)",
            )?;

            for (name, stats) in store.iter() {
                presenter_stmt
                    .execute((
                        name,
                        to_sql_int(stats.songs_count)?,
                        to_sql_int(stats.preferred_score)?,
                        to_sql_int(stats.avoided_score)?,
                        stats.score(),
                        stats.classification(context).as_str(),
                    ))
                    .with_context(|| format!("Failed to INSERT presenter `{name}'"))?;

                for (position, (genre, count)) in stats.genre_counts.iter().enumerate() {
                    genre_stmt
                        .execute((name, genre, to_sql_int(*count)?, to_sql_int(position as u64)?))
                        .with_context(|| format!("Failed to INSERT genre `{genre}' for `{name}'"))?;
                }
            }
        }

        tx.commit().context("Committing SQL transaction failed.")?;
        info!("Saved statistics for {} presenters to {}", store.len(), self.path.display());
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

fn to_count(value: i64) -> Result<u64> {
    u64::try_from(value).with_context(|| format!("Negative counter {value} in stats database"))
}

fn to_sql_int(value: u64) -> Result<i64> {
    i64::try_from(value).with_context(|| format!("Counter {value} too large for stats database"))
}

/// Directory holding `path`, `.` for bare file names.
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
