//! # Milestone Detection
//!
//! Wires the pipeline together:
//!
//! ```text
//! points -> smooth_elevations -> detect_segments -> generate_milestones
//!        -> filter_by_minimum_distance -> milestones (sorted by distance)
//! ```
//!
//! Every stage is a pure function of its inputs, so concurrent calls on
//! different tracks need no locking.

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{MilestoneError, Result};
use crate::messages::{FrenchMessages, MessageFormatter};
use crate::milestones::generate_milestones;
use crate::proximity::filter_by_minimum_distance;
use crate::segments::detect_segments;
use crate::smoothing::{smooth_elevations, DEFAULT_SMOOTHING_WINDOW};
use crate::track::parse_track;
use crate::{Milestone, RawPoint, TrackPoint};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Configuration for milestone detection.
///
/// Loads from JSON with missing fields taking their defaults:
///
/// ```
/// use trail_milestones::MilestoneConfig;
///
/// let config = MilestoneConfig::from_json(r#"{"minClimb": 120.0}"#).unwrap();
/// assert_eq!(config.min_climb, 120.0);
/// assert_eq!(config.min_spacing, 1000.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct MilestoneConfig {
    /// Minimum accumulated climb for a climb milestone (meters).
    /// Default: 75.0
    pub min_climb: f64,

    /// Minimum accumulated descent for a descent milestone (meters).
    /// Default: 75.0
    pub min_descent: f64,

    /// Minimum distance between consecutive milestones (meters).
    /// Default: 1000.0
    pub min_spacing: f64,

    /// Width of the elevation smoothing window (meters).
    /// Default: 200.0
    pub smoothing_window: f64,

    /// Per-step elevation change below which a step counts as flat (meters).
    /// Independent of the segment thresholds. Default: 5.0
    pub step_noise_threshold: f64,

    /// Tracks with fewer points yield no milestones.
    /// Default: 10
    pub min_detection_points: u32,
}

impl Default for MilestoneConfig {
    fn default() -> Self {
        Self {
            min_climb: 75.0,
            min_descent: 75.0,
            min_spacing: 1000.0,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            step_noise_threshold: 5.0,
            min_detection_points: 10,
        }
    }
}

impl MilestoneConfig {
    /// Check that every threshold is usable.
    ///
    /// Thresholds and spacing must be finite and non-negative; the smoothing
    /// window must be finite and positive.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("min_climb", self.min_climb),
            ("min_descent", self.min_descent),
            ("min_spacing", self.min_spacing),
            ("step_noise_threshold", self.step_noise_threshold),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(MilestoneError::InvalidConfig {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if !self.smoothing_window.is_finite() || self.smoothing_window <= 0.0 {
            return Err(MilestoneError::InvalidConfig {
                field: "smoothing_window".to_string(),
                value: self.smoothing_window,
            });
        }

        Ok(())
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Detect climb and descent milestones on a parsed track.
///
/// Returns an empty list for tracks shorter than
/// `config.min_detection_points`. The result is sorted by distance and no two
/// consecutive milestones are closer than `config.min_spacing`.
pub fn detect_milestones(
    points: &[TrackPoint],
    trail_id: i64,
    config: &MilestoneConfig,
) -> Vec<Milestone> {
    detect_milestones_with_formatter(points, trail_id, config, &FrenchMessages)
}

/// Same as [`detect_milestones`] with custom message templates.
pub fn detect_milestones_with_formatter(
    points: &[TrackPoint],
    trail_id: i64,
    config: &MilestoneConfig,
    formatter: &dyn MessageFormatter,
) -> Vec<Milestone> {
    if points.len() < config.min_detection_points as usize || points.is_empty() {
        info!(
            "[Milestones] Trail {}: {} points, too few for detection",
            trail_id,
            points.len()
        );
        return vec![];
    }

    let smoothed = smooth_elevations(points, config.smoothing_window);
    let segments = detect_segments(points, &smoothed, config);
    let milestones = generate_milestones(&segments, points, trail_id, formatter);
    let candidates = milestones.len();
    let filtered = filter_by_minimum_distance(milestones, config.min_spacing);

    info!(
        "[Milestones] Trail {}: {} points, {} segments, {} milestones ({} before spacing filter)",
        trail_id,
        points.len(),
        segments.len(),
        filtered.len(),
        candidates
    );

    filtered
}

/// Parse raw readings and detect milestones in one step.
///
/// Fails on an invalid configuration or fewer than 2 readings.
pub fn detect_from_raw(
    raw_points: &[RawPoint],
    trail_id: i64,
    config: &MilestoneConfig,
) -> Result<Vec<Milestone>> {
    config.validate()?;
    let track = parse_track(raw_points)?;
    Ok(detect_milestones(&track.points, trail_id, config))
}

/// Detect milestones for many tracks. Output order matches input order.
///
/// Runs on the rayon thread pool when the `parallel` feature is enabled.
pub fn detect_batch(
    tracks: &[(i64, Vec<TrackPoint>)],
    config: &MilestoneConfig,
) -> Vec<Vec<Milestone>> {
    info!("[Milestones] Batch detection over {} tracks", tracks.len());

    #[cfg(feature = "parallel")]
    let results: Vec<Vec<Milestone>> = tracks
        .par_iter()
        .map(|(trail_id, points)| detect_milestones(points, *trail_id, config))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<Vec<Milestone>> = tracks
        .iter()
        .map(|(trail_id, points)| detect_milestones(points, *trail_id, config))
        .collect();

    results
}
