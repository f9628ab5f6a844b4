//! GPX file reading.
//!
//! Flattens all track segments of a GPX document, in file order, into
//! [`RawPoint`]s ready for [`parse_track`](crate::parse_track). Documents with
//! no tracks fall back to their routes. Points without an `<ele>` read as 0 m.

use std::io::Read;

use log::{debug, warn};

use crate::error::Result;
use crate::RawPoint;

/// Read raw points from a GPX document.
///
/// Malformed documents fail with
/// [`MilestoneError::InvalidFormat`](crate::MilestoneError::InvalidFormat).
pub fn read_gpx<R: Read>(reader: R) -> Result<Vec<RawPoint>> {
    let gpx = gpx::read(reader)?;

    let to_raw = |wpt: &gpx::Waypoint| {
        let point = wpt.point();
        RawPoint::new(point.y(), point.x(), wpt.elevation.unwrap_or(0.0))
    };

    let mut points: Vec<RawPoint> = gpx
        .tracks
        .iter()
        .flat_map(|track| track.segments.iter())
        .flat_map(|segment| segment.points.iter())
        .map(to_raw)
        .collect();

    if points.is_empty() {
        points = gpx
            .routes
            .iter()
            .flat_map(|route| route.points.iter())
            .map(to_raw)
            .collect();
    }

    let missing_elevation = gpx
        .tracks
        .iter()
        .flat_map(|track| track.segments.iter())
        .flat_map(|segment| segment.points.iter())
        .filter(|wpt| wpt.elevation.is_none())
        .count();
    if missing_elevation > 0 {
        warn!("[GpxReader] {} track points have no elevation", missing_elevation);
    }

    debug!(
        "[GpxReader] Read {} points from {} tracks, {} routes",
        points.len(),
        gpx.tracks.len(),
        gpx.routes.len()
    );

    Ok(points)
}
