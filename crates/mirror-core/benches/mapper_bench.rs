//! Criterion benchmarks for [`PositionMapper::map`] on the input hot path.
//!
//! Every touch-move event goes through `map`, so it should stay in the
//! tens-of-nanoseconds range with or without a matrix and on the rescale path.
//!
//! Run with:
//! ```bash
//! cargo bench --package mirror-core --bench mapper_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mirror_core::{AffineMatrix, Point, Position, PositionMapper, Size};

// ── Fixtures ──────────────────────────────────────────────────────────────────

fn size(w: u32, h: u32) -> Size {
    Size::new(w, h).expect("benchmark sizes are non-zero")
}

/// Mapper variants covering the three branches of `map`.
fn mappers() -> Vec<(&'static str, PositionMapper)> {
    vec![
        (
            "passthrough",
            PositionMapper::create(size(1920, 1080), None, size(1920, 1080)),
        ),
        (
            "size_change",
            PositionMapper::create(size(1920, 1080), None, size(1280, 720)),
        ),
        (
            "rotation",
            PositionMapper::create(
                size(1920, 1080),
                Some(AffineMatrix::rotate_quarter_turns(1)),
                size(1080, 1920),
            ),
        ),
    ]
}

// ── Benchmarks: map ───────────────────────────────────────────────────────────

/// Benchmarks [`PositionMapper::map`] when the claimed size matches.
fn bench_map_matching_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_matching_size");
    let position = Position::new(Point::new(960, 540), size(1920, 1080));

    for (name, mapper) in mappers() {
        group.bench_with_input(BenchmarkId::new("mapper", name), &mapper, |b, mapper| {
            b.iter(|| mapper.map(black_box(&position)))
        });
    }

    group.finish();
}

/// Benchmarks [`PositionMapper::map`] on the stale-size rescale path.
fn bench_map_stale_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_stale_size");
    let position = Position::new(Point::new(540, 960), size(1080, 1920));

    for (name, mapper) in mappers() {
        group.bench_with_input(BenchmarkId::new("mapper", name), &mapper, |b, mapper| {
            b.iter(|| mapper.map(black_box(&position)))
        });
    }

    group.finish();
}

// ── Benchmarks: create ────────────────────────────────────────────────────────

/// Benchmarks building a mapper, which happens once per geometry change.
fn bench_create(c: &mut Criterion) {
    let filter = AffineMatrix::rotate_quarter_turns(1);

    c.bench_function("create_with_filter", |b| {
        b.iter(|| {
            PositionMapper::create(
                black_box(size(1920, 1080)),
                black_box(Some(filter)),
                black_box(size(1080, 1920)),
            )
        })
    });
}

criterion_group!(benches, bench_map_matching_size, bench_map_stale_size, bench_create);
criterion_main!(benches);
