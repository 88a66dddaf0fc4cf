//! Human-readable presenter summary.

use crate::stats::ClassificationContext;
use crate::store::StatsStore;

/// Render every presenter with classification, score, songs analysed and
/// top genres, best-scoring presenter first.
#[must_use]
pub fn render_report(store: &StatsStore, context: &ClassificationContext, top_genres: usize) -> String {
    if store.is_empty() {
        return "No presenter statistics recorded yet.\n".to_string();
    }

    let mut out = format!("DJ statistics ({} presenters)\n", store.len());

    for (name, stats) in store.ranked() {
        let genres = stats
            .top_genres(top_genres)
            .into_iter()
            .map(|(genre, count)| format!("{genre} ({count})"))
            .collect::<Vec<_>>();
        let genres = if genres.is_empty() {
            "-".to_string()
        } else {
            genres.join(", ")
        };

        out.push_str(&format!(
            "\n{name}\n  classification: {}\n  score:          {:.3}\n  songs analysed: {}\n  top genres:     {genres}\n",
            stats.classification(context),
            stats.score(),
            stats.songs_count,
        ));
    }

    out
}
