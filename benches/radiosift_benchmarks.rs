//! # radiosift Performance Benchmarks
//!
//! Benchmarks for the per-line work and the per-run aggregation.
//!
//! ## Benchmark Categories
//!
//! - **Classification**: Song and header recognition on single lines
//! - **Pipeline**: Scanning and deduplicating whole pages
//! - **Learning**: Genre aggregation, ranking and persistence
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark group
//! cargo bench classification
//! cargo bench pipeline
//! ```

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use radiosift::genres::{self, GenreCatalog};
use radiosift::stats::ClassificationContext;
use radiosift::store::{JsonBackend, SqliteBackend, StatsBackend};
use radiosift::{classifier, dedupe, filter, header, scanner};
use std::hint::black_box;
use tempfile::TempDir;

const ARTISTS: &[&str] = &["Queen", "Radiohead", "Dua Lipa", "Drake", "Pixies", "Burial"];

/// Helper building a page with `slots` presenters and `songs` lines per slot,
/// with some repeats and noise in between
fn create_test_page(slots: usize, songs: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(slots * (songs * 2 + 1));
    for slot in 0..slots {
        let hour = slot % 24;
        lines.push(format!("{hour:02}.00 - {:02}.00 Show / Presenter {slot}", (hour + 1) % 24));
        for song in 0..songs {
            let artist = ARTISTS[(slot + song) % ARTISTS.len()];
            lines.push(format!("{artist} - Track {}", song % (songs / 2 + 1)));
            lines.push(format!("{hour:02}:{:02}", song % 60));
        }
    }
    lines
}

fn create_test_catalog() -> GenreCatalog {
    GenreCatalog::from_entries([
        ("queen", vec!["classic rock", "glam rock"]),
        ("radiohead", vec!["alternative rock", "art rock"]),
        ("dua lipa", vec!["dance pop"]),
        ("drake", vec!["rap", "hip hop"]),
        ("pixies", vec!["indie rock", "alternative"]),
        ("burial", vec!["electronic", "dubstep"]),
    ])
}

/// Benchmark single-line recognition
fn benchmark_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");

    group.bench_function("song_line", |b| {
        b.iter(|| classifier::classify_line(black_box("Queen - Bohemian Rhapsody")))
    });

    group.bench_function("noise_line", |b| {
        b.iter(|| classifier::classify_line(black_box("https://example.com/a - b")))
    });

    group.bench_function("slot_header", |b| {
        b.iter(|| header::inspect_header(black_box("06.00 - 09.00 Ranní show / Jane Doe")))
    });

    group.finish();
}

/// Benchmark whole-page scanning and deduplication
fn benchmark_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for slots in [1, 10, 50].iter() {
        let page = create_test_page(*slots, 40);

        group.bench_with_input(BenchmarkId::new("scan", slots), &page, |b, page| {
            b.iter(|| scanner::scan(black_box(page)))
        });

        let records = scanner::scan(&page);
        group.bench_with_input(BenchmarkId::new("dedupe", slots), &records, |b, records| {
            b.iter_batched(|| records.clone(), dedupe::dedupe, BatchSize::SmallInput)
        });
    }

    group.finish();
}

/// Benchmark genre aggregation, presenter ranking and store writes
fn benchmark_learning(c: &mut Criterion) {
    let mut group = c.benchmark_group("learning");
    let catalog = create_test_catalog();
    let context = ClassificationContext::default();
    let records = dedupe::dedupe(scanner::scan(create_test_page(50, 40)));

    group.bench_function("analyze", |b| {
        b.iter(|| genres::analyze(black_box(&records), &catalog))
    });

    let stats = genres::analyze(&records, &catalog).stats;

    group.bench_function("top_5_filter", |b| {
        b.iter_batched(
            || records.clone(),
            |records| filter::filter_top_n(records, black_box(&stats), 5),
            BatchSize::SmallInput,
        )
    });

    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let json = JsonBackend::new(temp_dir.path().join("dj_stats.json"));
    let sqlite = SqliteBackend::new(temp_dir.path().join("dj_stats.db"));

    group.bench_function("json_save", |b| {
        b.iter(|| json.save(black_box(&stats), &context).expect("save failed"))
    });

    group.bench_function("sqlite_save", |b| {
        b.iter(|| sqlite.save(black_box(&stats), &context).expect("save failed"))
    });

    group.finish();
}

// Group all benchmarks
criterion_group!(benches, benchmark_classification, benchmark_pipeline, benchmark_learning);

criterion_main!(benches);
