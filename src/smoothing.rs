//! # Elevation Smoothing
//!
//! Centered moving average of elevation, windowed by physical distance rather
//! than point count, so that dense and sparse stretches of a recording are
//! smoothed alike.
//!
//! A point `j` is in the window of point `i` when
//! `|d_j - d_i| <= window / 2` (inclusive on both sides). Because cumulative
//! distance never decreases, each window is a contiguous index range; two
//! pointers track it in a single pass, and the window is summed in index order
//! so the result matches a brute-force scan bit for bit.

use crate::TrackPoint;

/// Default smoothing window in meters.
pub const DEFAULT_SMOOTHING_WINDOW: f64 = 200.0;

/// Smooth elevations over a distance window (meters).
///
/// Returns one value per input point. A point whose window is empty (only
/// possible with a negative or NaN window) keeps its raw elevation.
///
/// # Example
/// ```
/// use trail_milestones::{RawPoint, parse_track, smooth_elevations};
///
/// let raw: Vec<RawPoint> = (0..10)
///     .map(|i| RawPoint::new(45.0 + i as f64 * 0.0005, 5.0, if i == 5 { 130.0 } else { 100.0 }))
///     .collect();
/// let track = parse_track(&raw).unwrap();
/// let smoothed = smooth_elevations(&track.points, 200.0);
/// assert_eq!(smoothed.len(), 10);
/// assert!(smoothed[5] < 130.0);
/// ```
pub fn smooth_elevations(points: &[TrackPoint], window_meters: f64) -> Vec<f64> {
    let n = points.len();
    let half_window = window_meters / 2.0;

    let in_window = |center: f64, j: usize| {
        (points[j].cumulative_distance - center).abs() <= half_window
    };

    let mut smoothed = Vec::with_capacity(n);
    let mut lo = 0;
    let mut hi = 0;

    for (i, p) in points.iter().enumerate() {
        let center = p.cumulative_distance;

        if !in_window(center, i) {
            smoothed.push(p.elevation);
            continue;
        }

        while lo < i && !in_window(center, lo) {
            lo += 1;
        }
        hi = hi.max(i);
        while hi + 1 < n && in_window(center, hi + 1) {
            hi += 1;
        }

        let window = &points[lo..=hi];
        let sum: f64 = window.iter().map(|q| q.elevation).sum();
        smoothed.push(sum / window.len() as f64);
    }

    smoothed
}
