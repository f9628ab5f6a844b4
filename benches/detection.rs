//! Performance benchmarks for trail-milestones
//!
//! Run with: cargo bench --bench detection

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use trail_milestones::{MilestoneConfig, TrackPoint, detect_milestones, smooth_elevations};

/// Generate a hilly track with roughly 5m between points.
fn generate_track(num_points: usize) -> Vec<TrackPoint> {
    (0..num_points)
        .map(|i| {
            let t = i as f64;
            TrackPoint {
                index: i as u32,
                latitude: 45.0 + t * 0.000045,
                longitude: 6.0,
                elevation: 1000.0 + (t / 400.0).sin() * 250.0 + (t * 0.7).sin() * 2.0,
                cumulative_distance: t * 5.0,
            }
        })
        .collect()
}

fn bench_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("smoothing");

    for size in [1_000, 10_000, 50_000] {
        let points = generate_track(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &points, |b, points| {
            b.iter(|| smooth_elevations(points, 200.0))
        });
    }

    group.finish();
}

fn bench_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect");
    let config = MilestoneConfig::default();

    for size in [1_000, 10_000, 50_000] {
        let points = generate_track(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &points, |b, points| {
            b.iter(|| detect_milestones(points, 1, &config))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_smoothing, bench_detection);
criterion_main!(benches);
