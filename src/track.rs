//! # Track Parsing
//!
//! Turns raw GPS readings into [`TrackPoint`]s annotated with cumulative
//! distance, and totals the positive elevation gain (D+).
//!
//! D+ is summed from per-step positive deltas, each truncated toward zero
//! before being added. Summing truncated steps gives a smaller total than
//! truncating the float sum; stored tracks rely on the former.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{MilestoneError, Result};
use crate::geo_utils::{compute_bounds, haversine_distance};
use crate::{Bounds, RawPoint, TrackPoint};

/// Minimum number of raw readings needed to build a track.
pub const MIN_TRACK_POINTS: usize = 2;

/// A parsed track: annotated points plus total D+.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct ParsedTrack {
    pub points: Vec<TrackPoint>,
    /// Positive elevation gain in whole meters
    pub total_elevation_gain: u32,
}

/// Aggregate statistics of a parsed track, for storage and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct TrackSummary {
    pub point_count: u32,
    /// Total length in meters
    pub total_distance: f64,
    /// D+ in whole meters
    pub total_elevation_gain: u32,
    /// D- in whole meters, same per-step truncation as D+
    pub total_elevation_loss: u32,
    pub min_elevation: f64,
    pub max_elevation: f64,
    pub bounds: Bounds,
}

/// Parse raw readings into a distance-annotated track.
///
/// Fails with [`MilestoneError::NotEnoughPoints`] for fewer than 2 readings.
///
/// # Example
/// ```
/// use trail_milestones::{RawPoint, parse_track};
///
/// let raw = vec![
///     RawPoint::new(45.0, 5.0, 100.0),
///     RawPoint::new(45.001, 5.0, 110.7),
///     RawPoint::new(45.002, 5.0, 105.0),
/// ];
/// let track = parse_track(&raw).unwrap();
/// assert_eq!(track.points.len(), 3);
/// assert_eq!(track.total_elevation_gain, 10);
/// assert!(track.points[2].cumulative_distance > 200.0);
/// ```
pub fn parse_track(raw_points: &[RawPoint]) -> Result<ParsedTrack> {
    if raw_points.len() < MIN_TRACK_POINTS {
        return Err(MilestoneError::NotEnoughPoints {
            point_count: raw_points.len() as u32,
            minimum_required: MIN_TRACK_POINTS as u32,
        });
    }

    let invalid = raw_points.iter().filter(|p| !p.is_valid()).count();
    if invalid > 0 {
        warn!(
            "[TrackParser] {} of {} points have out-of-range coordinates",
            invalid,
            raw_points.len()
        );
    }

    let mut points = Vec::with_capacity(raw_points.len());
    let mut cumulative_distance = 0.0;
    let mut elevation_gain: u32 = 0;
    let mut prev: Option<&RawPoint> = None;

    for (index, raw) in raw_points.iter().enumerate() {
        if let Some(prev) = prev {
            cumulative_distance += haversine_distance(prev, raw);
            let delta = raw.elevation - prev.elevation;
            if delta > 0.0 {
                elevation_gain = elevation_gain.saturating_add(delta as u32);
            }
        }

        points.push(TrackPoint {
            index: index as u32,
            latitude: raw.latitude,
            longitude: raw.longitude,
            elevation: raw.elevation,
            cumulative_distance,
        });
        prev = Some(raw);
    }

    debug!(
        "[TrackParser] Parsed {} points, {:.0}m, D+ {}m",
        points.len(),
        cumulative_distance,
        elevation_gain
    );

    Ok(ParsedTrack {
        points,
        total_elevation_gain: elevation_gain,
    })
}

impl ParsedTrack {
    /// Total track length in meters.
    pub fn total_distance(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.cumulative_distance)
    }

    /// Compute aggregate statistics for the track.
    pub fn summary(&self) -> TrackSummary {
        let mut loss: u32 = 0;
        for w in self.points.windows(2) {
            let delta = w[1].elevation - w[0].elevation;
            if delta < 0.0 {
                loss = loss.saturating_add((-delta) as u32);
            }
        }

        let min_elevation = self
            .points
            .iter()
            .map(|p| p.elevation)
            .fold(f64::INFINITY, f64::min);
        let max_elevation = self
            .points
            .iter()
            .map(|p| p.elevation)
            .fold(f64::NEG_INFINITY, f64::max);

        // A ParsedTrack always holds at least MIN_TRACK_POINTS points
        let bounds = compute_bounds(&self.points).unwrap_or(Bounds {
            min_lat: 0.0,
            max_lat: 0.0,
            min_lng: 0.0,
            max_lng: 0.0,
        });

        TrackSummary {
            point_count: self.points.len() as u32,
            total_distance: self.total_distance(),
            total_elevation_gain: self.total_elevation_gain,
            total_elevation_loss: loss,
            min_elevation,
            max_elevation,
            bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_parse_empty_fails() {
        let result = parse_track(&[]);
        assert_eq!(
            result,
            Err(MilestoneError::NotEnoughPoints {
                point_count: 0,
                minimum_required: 2,
            })
        );
    }

    #[test]
    fn test_parse_single_point_fails() {
        let result = parse_track(&[RawPoint::new(45.0, 5.0, 100.0)]);
        assert!(matches!(
            result,
            Err(MilestoneError::NotEnoughPoints { point_count: 1, .. })
        ));
    }

    #[test]
    fn test_parse_two_points_succeeds() {
        let raw = vec![RawPoint::new(45.0, 5.0, 100.0), RawPoint::new(45.0, 5.001, 100.0)];
        let track = parse_track(&raw).unwrap();
        assert_eq!(track.points.len(), 2);
        assert_eq!(track.points[0].cumulative_distance, 0.0);
        assert!(track.points[1].cumulative_distance > 0.0);
    }

    #[test]
    fn test_indices_and_order_preserved() {
        let raw: Vec<RawPoint> = (0..5)
            .map(|i| RawPoint::new(45.0 + i as f64 * 0.001, 5.0, i as f64))
            .collect();
        let track = parse_track(&raw).unwrap();
        for (i, p) in track.points.iter().enumerate() {
            assert_eq!(p.index, i as u32);
            assert_eq!(p.latitude, raw[i].latitude);
            assert_eq!(p.elevation, raw[i].elevation);
        }
    }

    #[test]
    fn test_cumulative_distance_non_decreasing() {
        let raw = vec![
            RawPoint::new(45.0, 5.0, 0.0),
            RawPoint::new(45.0, 5.0, 0.0), // duplicate fix
            RawPoint::new(45.001, 5.0, 0.0),
            RawPoint::new(45.0, 5.0, 0.0), // back-tracking still adds distance
        ];
        let track = parse_track(&raw).unwrap();
        let d: Vec<f64> = track.points.iter().map(|p| p.cumulative_distance).collect();
        assert_eq!(d[0], 0.0);
        assert_eq!(d[1], 0.0);
        assert!(d[2] > 100.0);
        assert!(approx_eq(d[3], 2.0 * d[2], 1e-6));
    }

    #[test]
    fn test_elevation_gain_truncates_each_step() {
        // Three steps of +0.9m: truncated steps sum to 0, not 2
        let raw = vec![
            RawPoint::new(45.0, 5.0, 100.0),
            RawPoint::new(45.0001, 5.0, 100.9),
            RawPoint::new(45.0002, 5.0, 101.8),
            RawPoint::new(45.0003, 5.0, 102.7),
        ];
        let track = parse_track(&raw).unwrap();
        assert_eq!(track.total_elevation_gain, 0);
    }

    #[test]
    fn test_elevation_gain_ignores_descents() {
        let raw = vec![
            RawPoint::new(45.0, 5.0, 100.0),
            RawPoint::new(45.0001, 5.0, 112.5), // +12
            RawPoint::new(45.0002, 5.0, 90.0),  // descent
            RawPoint::new(45.0003, 5.0, 93.2),  // +3
        ];
        let track = parse_track(&raw).unwrap();
        assert_eq!(track.total_elevation_gain, 15);
    }

    #[test]
    fn test_huge_elevation_steps_saturate() {
        let raw = vec![
            RawPoint::new(45.0, 5.0, 0.0),
            RawPoint::new(45.0001, 5.0, 3e9),
            RawPoint::new(45.0002, 5.0, 0.0),
            RawPoint::new(45.0003, 5.0, 3e9),
        ];
        let track = parse_track(&raw).unwrap();
        assert_eq!(track.total_elevation_gain, u32::MAX);

        let raw: Vec<RawPoint> = raw.into_iter().rev().collect();
        let summary = parse_track(&raw).unwrap().summary();
        assert_eq!(summary.total_elevation_loss, u32::MAX);
    }

    #[test]
    fn test_summary() {
        let raw = vec![
            RawPoint::new(45.0, 5.0, 100.0),
            RawPoint::new(45.001, 5.0, 150.0),
            RawPoint::new(45.002, 5.001, 120.5),
        ];
        let track = parse_track(&raw).unwrap();
        let summary = track.summary();
        assert_eq!(summary.point_count, 3);
        assert_eq!(summary.total_elevation_gain, 50);
        assert_eq!(summary.total_elevation_loss, 29);
        assert_eq!(summary.min_elevation, 100.0);
        assert_eq!(summary.max_elevation, 150.0);
        assert_eq!(summary.total_distance, track.total_distance());
        assert_eq!(summary.bounds.min_lat, 45.0);
        assert_eq!(summary.bounds.max_lng, 5.001);
    }
}
