//! Genre lookup and per-run analysis.
//!
//! Genres come from outside the pipeline. [`GenreLookup`] is the seam, and
//! [`GenreCatalog`] is the file-backed implementation used by the CLI: a JSON
//! object mapping `"Artist"` or `"Artist - Title"` to a list of genre tags,
//! for example exported from a streaming service's artist metadata.
//!
//! ```json
//! {
//!   "Queen": ["classic rock", "glam rock"],
//!   "Dua Lipa - Levitating": ["dance pop"]
//! }
//! ```

use crate::song::SongRecord;
use crate::store::StatsStore;
use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Source of genre tags for a song.
pub trait GenreLookup {
    /// Genre tags for a song, lower-cased, in source order.
    ///
    /// `Ok` with an empty list means the song was found but has no genres;
    /// it still counts as analysed.
    ///
    /// # Errors
    ///
    /// Returns an error when the song cannot be looked up at all.
    fn genres(&self, artist: &str, title: &str) -> Result<Vec<String>>;
}

impl<F> GenreLookup for F
where
    F: Fn(&str, &str) -> Result<Vec<String>>,
{
    fn genres(&self, artist: &str, title: &str) -> Result<Vec<String>> {
        self(artist, title)
    }
}

/// Genre tags keyed by lower-cased artist or `artist - title`.
#[derive(Debug, Clone, Default)]
pub struct GenreCatalog {
    entries: HashMap<String, Vec<String>>,
}

impl GenreCatalog {
    /// Read a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON object of
    /// string lists.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read genre catalog {}", path.display()))?;
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(&content)
            .with_context(|| format!("Genre catalog {} is not valid", path.display()))?;

        let catalog = Self::from_entries(raw);
        info!("Loaded genre catalog with {} entries from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn from_entries<I, K, V, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(key, genres)| {
                let genres = genres
                    .into_iter()
                    .map(|g| g.as_ref().trim().to_lowercase())
                    .filter(|g| !g.is_empty())
                    .collect();
                (key.as_ref().trim().to_lowercase(), genres)
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl GenreLookup for GenreCatalog {
    fn genres(&self, artist: &str, title: &str) -> Result<Vec<String>> {
        let artist_key = artist.trim().to_lowercase();
        let track_key = format!("{artist_key} - {}", title.trim().to_lowercase());

        match self.entries.get(&track_key).or_else(|| self.entries.get(&artist_key)) {
            Some(genres) => Ok(genres.clone()),
            None => bail!("No genres known for `{artist} - {title}'"),
        }
    }
}

/// Outcome of analysing one run's songs.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// Statistics gathered in this run only.
    pub stats: StatsStore,
    pub analysed: usize,
    pub failed: usize,
}

/// Look up genres for every record and aggregate them per presenter.
///
/// A failed lookup skips that song and nothing else.
pub fn analyze(records: &[SongRecord], lookup: &dyn GenreLookup) -> Analysis {
    let mut analysis = Analysis::default();

    for record in records {
        match lookup.genres(record.artist(), record.title()) {
            Ok(genres) => {
                debug!("{} [{}]: {}", record.song, record.presenter, genres.join(", "));
                analysis.stats.record_song(&record.presenter, &genres);
                analysis.analysed += 1;
            }
            Err(e) => {
                warn!("Genre lookup failed for `{}': {e:#}. Skipping.", record.song);
                analysis.failed += 1;
            }
        }
    }

    info!(
        "Analysed {} songs for {} presenters ({} lookups failed)",
        analysis.analysed,
        analysis.stats.len(),
        analysis.failed
    );
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::Song;
    use anyhow::anyhow;
    use tempfile::TempDir;

    fn record(artist: &str, title: &str, presenter: &str) -> SongRecord {
        SongRecord::new(Song::new(artist, title), presenter)
    }

    fn catalog() -> GenreCatalog {
        GenreCatalog::from_entries([
            ("Queen", vec!["Classic Rock", "glam rock"]),
            ("Dua Lipa", vec!["dance pop"]),
            ("Dua Lipa - Levitating", vec!["disco", "  "]),
            ("Unknown Mortal Orchestra", vec![]),
        ])
    }

    #[test]
    fn test_catalog_matches_artist_case_insensitively() -> Result<()> {
        assert_eq!(catalog().genres("QUEEN", "Anything")?, vec!["classic rock", "glam rock"]);
        Ok(())
    }

    #[test]
    fn test_catalog_prefers_track_entries() -> Result<()> {
        let c = catalog();
        assert_eq!(c.genres("Dua Lipa", "levitating")?, vec!["disco"]);
        assert_eq!(c.genres("Dua Lipa", "New Rules")?, vec!["dance pop"]);
        Ok(())
    }

    #[test]
    fn test_catalog_unknown_artist_fails() {
        assert!(catalog().genres("Nobody", "Nothing").is_err());
    }

    #[test]
    fn test_catalog_known_artist_without_genres() -> Result<()> {
        assert!(catalog().genres("Unknown Mortal Orchestra", "Multi-Love")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_catalog_load_from_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("genres.json");
        fs::write(&path, r#"{"Queen": ["Classic Rock"], "Blur - Song 2": ["britpop"]}"#)?;

        let c = GenreCatalog::load(&path)?;
        assert_eq!(c.len(), 2);
        assert_eq!(c.genres("blur", "song 2")?, vec!["britpop"]);
        Ok(())
    }

    #[test]
    fn test_catalog_load_invalid_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("genres.json");
        fs::write(&path, r#"["not", "an", "object"]"#)?;
        assert!(GenreCatalog::load(&path).is_err());
        assert!(GenreCatalog::load(&dir.path().join("missing.json")).is_err());
        Ok(())
    }

    #[test]
    fn test_analyze_aggregates_per_presenter() {
        let records = vec![
            record("Queen", "Bohemian Rhapsody", "Jane Doe"),
            record("Dua Lipa", "Levitating", "John Roe"),
            record("Queen", "Under Pressure", "Jane Doe"),
        ];
        let analysis = analyze(&records, &catalog());

        assert_eq!(analysis.analysed, 3);
        assert_eq!(analysis.failed, 0);
        let jane = analysis.stats.get("Jane Doe").unwrap();
        assert_eq!(jane.songs_count, 2);
        assert_eq!(jane.preferred_score, 4);
        assert_eq!(jane.genre_counts.get("glam rock"), Some(&2));
        assert_eq!(analysis.stats.get("John Roe").unwrap().score(), 0.0);
    }

    #[test]
    fn test_analyze_skips_failed_lookups_only() {
        let records = vec![
            record("Nobody", "Nothing", "Jane Doe"),
            record("Queen", "Bohemian Rhapsody", "Jane Doe"),
            record("Nobody", "Else", "John Roe"),
        ];
        let analysis = analyze(&records, &catalog());

        assert_eq!(analysis.analysed, 1);
        assert_eq!(analysis.failed, 2);
        assert_eq!(analysis.stats.get("Jane Doe").unwrap().songs_count, 1);
        assert!(analysis.stats.get("John Roe").is_none());
    }

    #[test]
    fn test_analyze_counts_songs_without_genres() {
        let records = vec![record("Unknown Mortal Orchestra", "Multi-Love", "Jane Doe")];
        let analysis = analyze(&records, &catalog());
        let jane = analysis.stats.get("Jane Doe").unwrap();
        assert_eq!(jane.songs_count, 1);
        assert!(jane.genre_counts.is_empty());
    }

    #[test]
    fn test_closure_lookup() {
        let lookup = |artist: &str, _title: &str| -> Result<Vec<String>> {
            if artist == "Skepta" {
                Ok(vec!["grime".to_string(), "uk hip hop".to_string()])
            } else {
                Err(anyhow!("offline"))
            }
        };
        let records = vec![
            record("Skepta", "Shutdown", "MC"),
            record("Queen", "Bohemian Rhapsody", "MC"),
        ];
        let analysis = analyze(&records, &lookup);
        let mc = analysis.stats.get("MC").unwrap();
        assert_eq!(mc.avoided_score, 2);
        assert_eq!(mc.score(), -2.0);
        assert_eq!(analysis.failed, 1);
    }
}
