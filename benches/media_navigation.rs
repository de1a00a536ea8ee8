// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for media navigation operations.
//!
//! Measures the performance of:
//! - Cursor navigation (next/previous with wrap-around)
//! - Refreshing an open cursor with a new listing
//! - Claiming neighbor previews in the rendition cache

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use drive_lens::application::query::MediaCursor;
use drive_lens::domain::media::MediaItem;
use drive_lens::media::prefetch::{prefetch_targets, preview_requests};
use drive_lens::media::{PrefetchConfig, Rendition, RenditionCache};
use std::hint::black_box;

fn listing(len: usize) -> Vec<MediaItem> {
    (0..len)
        .filter_map(|i| MediaItem::new(format!("id-{i}"), format!("IMG_{i:05}.jpg"), "image/jpeg"))
        .collect()
}

fn preview_url(item: &MediaItem) -> Option<String> {
    Some(format!(
        "http://localhost:8000/drive/file/{}/preview?w=1600",
        item.id
    ))
}

/// Benchmark a full lap around the collection.
fn bench_navigate(c: &mut Criterion) {
    let mut group = c.benchmark_group("media_navigation");

    for len in [100usize, 5_000] {
        let items = listing(len);
        group.bench_with_input(BenchmarkId::new("next_full_lap", len), &items, |b, items| {
            b.iter(|| {
                let mut cursor = MediaCursor::new();
                cursor.open(items.clone(), 0);
                for _ in 0..items.len() {
                    black_box(cursor.next());
                }
                black_box(cursor.index());
            });
        });
    }

    let items = listing(1_000);
    let mut cursor = MediaCursor::new();
    cursor.open(items, 500);

    group.bench_function("previous_and_neighbors", |b| {
        b.iter(|| {
            let mut nav = cursor.clone();
            black_box(nav.previous());
            black_box(nav.neighbor_indices());
        });
    });

    group.finish();
}

/// Benchmark refreshing an open cursor, keeping focus by identifier.
fn bench_replace_items(c: &mut Criterion) {
    let mut group = c.benchmark_group("media_navigation");

    let items = listing(5_000);
    let mut refreshed = items.clone();
    refreshed.reverse();

    group.bench_function("replace_items_keeps_focus", |b| {
        b.iter(|| {
            let mut cursor = MediaCursor::new();
            cursor.open(items.clone(), 4_000);
            cursor.replace_items(refreshed.clone());
            black_box(cursor.index());
        });
    });

    group.finish();
}

/// Benchmark the per-step prefetch bookkeeping of the lightbox.
fn bench_prefetch_claims(c: &mut Criterion) {
    let mut group = c.benchmark_group("media_navigation");

    let items = listing(1_000);
    let rendition = Rendition::from_bytes(vec![0u8; 64 * 1024]);

    group.bench_function("navigate_and_claim_neighbors", |b| {
        b.iter(|| {
            let mut cache = RenditionCache::new(PrefetchConfig::new(32 * 1024 * 1024, 64));
            let mut cursor = MediaCursor::new();
            cursor.open(items.clone(), 0);
            for _ in 0..200 {
                cursor.next();
                let targets = prefetch_targets(&cursor, preview_url);
                let focused = targets.first().cloned();
                for url in preview_requests(&mut cache, focused.as_deref(), &targets) {
                    cache.insert(url, rendition.clone());
                }
            }
            black_box(cache.stats());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_navigate,
    bench_replace_items,
    bench_prefetch_claims
);
criterion_main!(benches);
