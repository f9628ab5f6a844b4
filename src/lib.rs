//! # Trail Milestones
//!
//! Automatic climb/descent milestone detection for recorded GPS tracks.
//!
//! This library provides:
//! - Track parsing into distance-annotated points with cumulative D+
//! - Distance-windowed elevation smoothing
//! - Climb/descent segment detection with voice-guidance messages
//! - Minimum-spacing filtering of the resulting milestones
//!
//! ## Features
//!
//! - **`parallel`** - Enable batch detection with rayon
//! - **`gpx`** - Enable the GPX file reader
//! - **`ffi`** - Enable FFI bindings for mobile platforms (iOS/Android)
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use trail_milestones::{RawPoint, MilestoneConfig, parse_track, detect_milestones};
//!
//! // 60 points heading north, ~55m apart, with a 120m climb in the middle
//! let raw: Vec<RawPoint> = (0..60)
//!     .map(|i| {
//!         let elevation = match i {
//!             0..=19 => 1000.0,
//!             20..=39 => 1000.0 + (i - 19) as f64 * 6.0,
//!             _ => 1120.0,
//!         };
//!         RawPoint::new(45.0 + i as f64 * 0.0005, 6.0, elevation)
//!     })
//!     .collect();
//!
//! let track = parse_track(&raw).unwrap();
//! let milestones = detect_milestones(&track.points, 42, &MilestoneConfig::default());
//!
//! for m in &milestones {
//!     println!("{:.0}m: {}", m.distance, m.message);
//! }
//! ```

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{MilestoneError, Result};

pub mod geo_utils;
pub use geo_utils::LatLng;

// Raw points -> distance-annotated track points
pub mod track;
pub use track::{ParsedTrack, TrackSummary, parse_track};

pub mod smoothing;
pub use smoothing::{smooth_elevations, DEFAULT_SMOOTHING_WINDOW};

// Climb/descent segmentation of the smoothed profile
pub mod segments;
pub use segments::{Segment, Trend, detect_segments};

pub mod messages;
pub use messages::{ClimbStats, FrenchMessages, MessageFormatter};

pub mod milestones;
pub use milestones::{generate_milestones, milestones_from_json, milestones_to_json};

pub mod proximity;
pub use proximity::filter_by_minimum_distance;

// Orchestrator wiring the whole pipeline
pub mod detection;
pub use detection::{
    MilestoneConfig, detect_batch, detect_from_raw, detect_milestones,
    detect_milestones_with_formatter,
};

// Nearest-point anchoring for user-created milestones
pub mod anchor;
pub use anchor::TrackIndex;

#[cfg(feature = "gpx")]
pub mod gpx_reader;

#[cfg(feature = "gpx")]
pub use gpx_reader::read_gpx;

#[cfg(feature = "ffi")]
uniffi::setup_scaffolding!();

/// Initialize logging for Android (only used in FFI)
#[cfg(all(feature = "ffi", target_os = "android"))]
fn init_logging() {
    use android_logger::Config;
    use log::LevelFilter;

    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag("TrailMilestonesRust")
    );
}

#[cfg(all(feature = "ffi", not(target_os = "android")))]
fn init_logging() {
    // No-op on non-Android platforms
}

// ============================================================================
// Core Types
// ============================================================================

/// A raw GPS reading as delivered by a track file reader.
///
/// # Example
/// ```
/// use trail_milestones::RawPoint;
/// let point = RawPoint::new(45.8326, 6.8652, 4808.0); // Mont Blanc summit
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct RawPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in meters
    pub elevation: f64,
}

impl RawPoint {
    /// Create a new raw point.
    pub fn new(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self { latitude, longitude, elevation }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// A track point annotated with its position along the track.
///
/// Built once by [`parse_track`] and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct TrackPoint {
    /// 0-based position in the track
    pub index: u32,
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in meters
    pub elevation: f64,
    /// Distance from the track start along the path, in meters
    pub cumulative_distance: f64,
}

/// Bounding box of a track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

/// Kind of milestone.
///
/// Only `Climb` and `Descent` are produced by detection; the others are
/// created by users through [`Milestone::user_defined`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
pub enum MilestoneType {
    Climb,
    Descent,
    Flat,
    Supply,
    Danger,
    Info,
}

/// A waypoint with a voice-guidance message, anchored to one track point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct Milestone {
    /// Storage ID, `None` until persisted
    pub id: Option<i64>,
    /// Owning trail (opaque to this library)
    pub trail_id: i64,
    /// Index of the anchor point in the track
    pub point_index: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    /// Cumulative distance of the anchor point, in meters
    pub distance: f64,
    #[serde(rename = "type")]
    pub milestone_type: MilestoneType,
    /// Voice-guidance text
    pub message: String,
    /// User-assigned label
    pub name: Option<String>,
}

impl Milestone {
    /// Create a milestone anchored to `point`, copying its position.
    pub fn at_point(
        trail_id: i64,
        point: &TrackPoint,
        milestone_type: MilestoneType,
        message: String,
    ) -> Self {
        Self {
            id: None,
            trail_id,
            point_index: point.index,
            latitude: point.latitude,
            longitude: point.longitude,
            elevation: point.elevation,
            distance: point.cumulative_distance,
            milestone_type,
            message,
            name: None,
        }
    }

    /// Create a user-authored milestone (supply point, danger, note...).
    ///
    /// # Example
    /// ```
    /// use trail_milestones::{Milestone, MilestoneType, TrackPoint};
    ///
    /// let point = TrackPoint {
    ///     index: 12,
    ///     latitude: 45.9,
    ///     longitude: 6.8,
    ///     elevation: 1850.0,
    ///     cumulative_distance: 4200.0,
    /// };
    /// let m = Milestone::user_defined(
    ///     7,
    ///     &point,
    ///     MilestoneType::Supply,
    ///     "Fontaine".to_string(),
    ///     Some("Refuge".to_string()),
    /// );
    /// assert_eq!(m.point_index, 12);
    /// assert_eq!(m.distance, 4200.0);
    /// ```
    pub fn user_defined(
        trail_id: i64,
        point: &TrackPoint,
        milestone_type: MilestoneType,
        message: String,
        name: Option<String>,
    ) -> Self {
        Self {
            name,
            ..Self::at_point(trail_id, point, milestone_type, message)
        }
    }
}

// ============================================================================
// FFI Exports (only when feature enabled)
// ============================================================================

#[cfg(feature = "ffi")]
mod ffi {
    use super::*;
    use log::info;

    /// Default detection thresholds for mobile callers.
    #[uniffi::export]
    pub fn default_milestone_config() -> MilestoneConfig {
        MilestoneConfig::default()
    }

    /// Parse raw readings into a distance-annotated track.
    #[uniffi::export]
    pub fn ffi_parse_track(
        raw_points: Vec<RawPoint>,
    ) -> std::result::Result<ParsedTrack, MilestoneError> {
        init_logging();
        info!("[TrailMilestonesRust] parse_track called with {} points", raw_points.len());
        parse_track(&raw_points)
    }

    /// Detect milestones on an already parsed track.
    #[uniffi::export]
    pub fn ffi_detect_milestones(
        points: Vec<TrackPoint>,
        trail_id: i64,
        config: MilestoneConfig,
    ) -> Vec<Milestone> {
        init_logging();
        let start = std::time::Instant::now();
        let milestones = detect_milestones(&points, trail_id, &config);
        info!(
            "[TrailMilestonesRust] Detected {} milestones for trail {} in {:?}",
            milestones.len(),
            trail_id,
            start.elapsed()
        );
        milestones
    }

    /// Parse raw readings and detect milestones in one call.
    #[uniffi::export]
    pub fn ffi_detect_from_raw(
        raw_points: Vec<RawPoint>,
        trail_id: i64,
        config: MilestoneConfig,
    ) -> std::result::Result<Vec<Milestone>, MilestoneError> {
        init_logging();
        detect_from_raw(&raw_points, trail_id, &config)
    }

    /// Find the index of the track point closest to a map location.
    #[uniffi::export]
    pub fn ffi_nearest_point_index(
        points: Vec<TrackPoint>,
        latitude: f64,
        longitude: f64,
    ) -> Option<u32> {
        init_logging();
        TrackIndex::new(&points)
            .nearest_point(latitude, longitude)
            .map(|p| p.index)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_point() -> TrackPoint {
        TrackPoint {
            index: 3,
            latitude: 45.1,
            longitude: 5.7,
            elevation: 1200.0,
            cumulative_distance: 850.0,
        }
    }

    #[test]
    fn test_raw_point_validation() {
        assert!(RawPoint::new(45.0, 5.0, 300.0).is_valid());
        assert!(!RawPoint::new(91.0, 0.0, 0.0).is_valid());
        assert!(!RawPoint::new(0.0, 181.0, 0.0).is_valid());
        assert!(!RawPoint::new(f64::NAN, 0.0, 0.0).is_valid());
    }

    #[test]
    fn test_milestone_at_point_copies_anchor() {
        let p = sample_point();
        let m = Milestone::at_point(9, &p, MilestoneType::Climb, "Montée".to_string());
        assert_eq!(m.id, None);
        assert_eq!(m.trail_id, 9);
        assert_eq!(m.point_index, 3);
        assert_eq!(m.latitude, 45.1);
        assert_eq!(m.longitude, 5.7);
        assert_eq!(m.elevation, 1200.0);
        assert_eq!(m.distance, 850.0);
        assert_eq!(m.name, None);
    }

    #[test]
    fn test_user_defined_keeps_name() {
        let p = sample_point();
        let m = Milestone::user_defined(
            9,
            &p,
            MilestoneType::Danger,
            "Passage exposé".to_string(),
            Some("Crête".to_string()),
        );
        assert_eq!(m.milestone_type, MilestoneType::Danger);
        assert_eq!(m.name.as_deref(), Some("Crête"));
        assert_eq!(m.distance, p.cumulative_distance);
    }

    #[test]
    fn test_milestone_json_field_names() {
        let m = Milestone::at_point(1, &sample_point(), MilestoneType::Descent, "x".to_string());
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["type"], "descent");
        assert_eq!(json["pointIndex"], 3);
        assert_eq!(json["trailId"], 1);
        assert!(json["id"].is_null());
    }
}
