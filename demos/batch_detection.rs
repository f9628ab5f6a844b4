//! Batch milestone detection over many tracks.
//!
//! Run with: cargo run --example batch_detection --features parallel

use std::time::Instant;

use trail_milestones::{MilestoneConfig, RawPoint, TrackPoint, detect_batch, parse_track};

/// A rolling profile with `hills` climbs of `height` meters.
fn synthetic_track(seed: usize, hills: usize, height: f64) -> Vec<TrackPoint> {
    let n = hills * 120;
    let raw: Vec<RawPoint> = (0..n)
        .map(|i| {
            let phase = (i % 120) as f64 / 120.0;
            let elevation = 500.0 + height * (phase * std::f64::consts::PI).sin();
            RawPoint::new(44.0 + seed as f64 * 0.01 + i as f64 * 0.0004, 4.0, elevation)
        })
        .collect();
    parse_track(&raw).map(|t| t.points).unwrap_or_default()
}

fn main() {
    let tracks: Vec<(i64, Vec<TrackPoint>)> = (0..200)
        .map(|i| (i as i64, synthetic_track(i, 3 + i % 5, 80.0 + (i % 7) as f64 * 40.0)))
        .collect();

    let config = MilestoneConfig::default();
    let start = Instant::now();
    let results = detect_batch(&tracks, &config);
    let elapsed = start.elapsed();

    let total: usize = results.iter().map(|r| r.len()).sum();
    println!("Batch Detection\n");
    println!("  Tracks:     {}", tracks.len());
    println!("  Milestones: {}", total);
    println!("  Time:       {:?}", elapsed);

    for ((trail_id, _), milestones) in tracks.iter().zip(&results).take(3) {
        println!("\nTrail {}:", trail_id);
        for m in milestones {
            println!("  {:>6.0}m  {}", m.distance, m.message);
        }
    }
}
