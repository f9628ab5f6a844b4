//! Detect milestones on a synthetic mountain stage.
//!
//! Run with: cargo run --example detect_milestones

use trail_milestones::{
    MilestoneConfig, MilestoneType, RawPoint, TrackIndex, detect_milestones, parse_track,
};

fn main() {
    // A col and a descent into the next valley, ~40m between fixes
    let raw: Vec<RawPoint> = (0..300)
        .map(|i| {
            let t = i as f64;
            let elevation = match i {
                0..=49 => 720.0,
                50..=149 => 720.0 + (t - 49.0) * 6.5,
                150..=179 => 1370.0,
                180..=259 => 1370.0 - (t - 179.0) * 8.0,
                _ => 730.0,
            };
            // A little sensor noise
            let noise = ((t * 12.9898).sin() * 43758.5453).fract() * 3.0;
            RawPoint::new(45.05 + t * 0.00036, 6.05, elevation + noise)
        })
        .collect();

    let track = match parse_track(&raw) {
        Ok(track) => track,
        Err(e) => {
            eprintln!("Cannot parse track: {}", e);
            return;
        }
    };

    let summary = track.summary();
    println!("Track: {} points, {:.1} km, D+ {}m, D- {}m\n",
        summary.point_count,
        summary.total_distance / 1000.0,
        summary.total_elevation_gain,
        summary.total_elevation_loss);

    let config = MilestoneConfig::default();
    println!("Config: min_climb={}m, min_descent={}m, min_spacing={}m, smoothing={}m\n",
        config.min_climb, config.min_descent, config.min_spacing, config.smoothing_window);

    let mut milestones = detect_milestones(&track.points, 1, &config);

    // A user-placed water point near the col
    let index = TrackIndex::new(&track.points);
    if let Some(supply) = index.anchor_milestone(
        1,
        45.104,
        6.0502,
        MilestoneType::Supply,
        "Point d'eau au col".to_string(),
        Some("Fontaine".to_string()),
    ) {
        milestones.push(supply);
        milestones.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    }

    println!("Milestones:");
    for m in &milestones {
        println!("  {:>6.0}m  {:<8} {}", m.distance, format!("{:?}", m.milestone_type), m.message);
    }
}
