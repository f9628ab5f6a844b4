//! # Climb/Descent Segment Detection
//!
//! Splits a smoothed elevation profile into climbing and descending stretches
//! whose accumulated elevation change reaches a significance threshold.
//!
//! ## Algorithm
//! 1. Walk the profile left to right, classifying each step delta as
//!    climbing (`> step_noise_threshold`), descending (`< -step_noise_threshold`)
//!    or flat.
//! 2. The first non-flat step opens a segment at the previous sample.
//! 3. Same-direction steps accumulate into the open segment; flat steps are
//!    absorbed without accumulating.
//! 4. An opposite-direction step closes the segment at the previous sample and
//!    opens a new one starting at that same sample, so consecutive segments
//!    share their pivot point.
//! 5. A closed segment is kept only if `|accumulated change|` reaches
//!    `min_climb` (climbing) or `min_descent` (descending).
//!
//! Stretches that are flat or never reach the threshold are not covered by
//! any segment.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::detection::MilestoneConfig;
use crate::TrackPoint;

/// Direction of a stretch of track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Climbing,
    Descending,
    Flat,
}

impl Trend {
    /// Classify a single elevation step.
    fn of_step(delta: f64, noise_threshold: f64) -> Self {
        if delta > noise_threshold {
            Trend::Climbing
        } else if delta < -noise_threshold {
            Trend::Descending
        } else {
            Trend::Flat
        }
    }
}

/// A significant climbing or descending stretch of a track.
///
/// Elevations are smoothed values, distances are cumulative track distances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub start_index: usize,
    pub end_index: usize,
    pub trend: Trend,
    pub start_distance: f64,
    pub end_distance: f64,
    pub start_elevation: f64,
    pub end_elevation: f64,
}

impl Segment {
    /// Length of the segment in meters.
    pub fn distance(&self) -> f64 {
        self.end_distance - self.start_distance
    }

    /// Absolute elevation difference between the endpoints.
    pub fn elevation_change(&self) -> f64 {
        (self.end_elevation - self.start_elevation).abs()
    }

    /// Signed slope (rise over run); 0 for a zero-length segment.
    pub fn average_slope(&self) -> f64 {
        let distance = self.distance();
        if distance > 0.0 {
            (self.end_elevation - self.start_elevation) / distance
        } else {
            0.0
        }
    }
}

/// Running state of one left-to-right scan.
struct SegmentScan<'a> {
    points: &'a [TrackPoint],
    smoothed: &'a [f64],
    config: &'a MilestoneConfig,
    segment_start: usize,
    current_trend: Trend,
    cumulative_change: f64,
    last_elevation: f64,
    segments: Vec<Segment>,
}

impl<'a> SegmentScan<'a> {
    fn new(points: &'a [TrackPoint], smoothed: &'a [f64], config: &'a MilestoneConfig) -> Self {
        Self {
            points,
            smoothed,
            config,
            segment_start: 0,
            current_trend: Trend::Flat,
            cumulative_change: 0.0,
            last_elevation: smoothed[0],
            segments: Vec::new(),
        }
    }

    fn step(&mut self, i: usize) {
        let elevation = self.smoothed[i];
        let delta = elevation - self.last_elevation;
        let delta_trend = Trend::of_step(delta, self.config.step_noise_threshold);

        let trend_changed = delta_trend != Trend::Flat
            && delta_trend != self.current_trend
            && self.current_trend != Trend::Flat;

        if trend_changed {
            self.close_segment(i - 1);
            self.segment_start = i - 1;
            self.current_trend = delta_trend;
            self.cumulative_change = delta;
        } else if delta_trend != Trend::Flat {
            if self.current_trend == Trend::Flat {
                self.current_trend = delta_trend;
                self.segment_start = i - 1;
            }
            self.cumulative_change += delta;
        }

        self.last_elevation = elevation;
    }

    /// Emit the open segment ending at `end` if it is significant.
    fn close_segment(&mut self, end: usize) {
        let threshold = match self.current_trend {
            Trend::Climbing => self.config.min_climb,
            Trend::Descending => self.config.min_descent,
            Trend::Flat => return,
        };

        if self.cumulative_change.abs() < threshold {
            return;
        }

        let start = self.segment_start;
        let segment = Segment {
            start_index: start,
            end_index: end,
            trend: self.current_trend,
            start_distance: self.points[start].cumulative_distance,
            end_distance: self.points[end].cumulative_distance,
            start_elevation: self.smoothed[start],
            end_elevation: self.smoothed[end],
        };
        debug!(
            "[Milestones] {:?} segment {}..={} ({:.0}m -> {:.0}m, change {:.1}m)",
            segment.trend,
            start,
            end,
            segment.start_distance,
            segment.end_distance,
            self.cumulative_change
        );
        self.segments.push(segment);
    }

    fn finish(mut self) -> Vec<Segment> {
        let last = self.smoothed.len() - 1;
        self.close_segment(last);
        self.segments
    }
}

/// Detect significant climb and descent segments in a smoothed profile.
///
/// `smoothed` holds one smoothed elevation per point (see
/// [`smooth_elevations`](crate::smooth_elevations)). Thresholds come from
/// `config`: `min_climb`, `min_descent` and `step_noise_threshold`.
///
/// Segments are returned in track order. Consecutive segments may share one
/// boundary sample.
pub fn detect_segments(
    points: &[TrackPoint],
    smoothed: &[f64],
    config: &MilestoneConfig,
) -> Vec<Segment> {
    debug_assert_eq!(points.len(), smoothed.len());
    let n = points.len().min(smoothed.len());
    if n == 0 {
        return vec![];
    }

    let points = &points[..n];
    let smoothed = &smoothed[..n];

    let mut scan = SegmentScan::new(points, smoothed, config);
    for i in 1..n {
        scan.step(i);
    }
    scan.finish()
}
