//! # Geographic Utilities
//!
//! Core geographic computations for track analysis.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`haversine_distance`] | Great-circle distance between two GPS points |
//! | [`compute_bounds`] | Bounding box of a GPS track |
//!
//! ## Example
//!
//! ```rust
//! use trail_milestones::{RawPoint, geo_utils};
//!
//! let track = vec![
//!     RawPoint::new(45.8326, 6.8652, 4808.0),
//!     RawPoint::new(45.8330, 6.8660, 4790.0),
//!     RawPoint::new(45.8340, 6.8670, 4760.0),
//! ];
//!
//! let dist = geo_utils::haversine_distance(&track[0], &track[2]);
//! println!("Start to end: {:.0}m", dist);
//! ```
//!
//! ## Algorithm Notes
//!
//! The haversine formula gives the great-circle distance on a sphere of mean
//! Earth radius (~6,371 km). All functions expect WGS84 latitude/longitude in
//! degrees.

use geo::{Distance, Haversine, Point};
use crate::{Bounds, RawPoint, TrackPoint};

/// Anything carrying a WGS84 latitude/longitude in degrees.
pub trait LatLng {
    fn lat(&self) -> f64;
    fn lng(&self) -> f64;
}

impl LatLng for RawPoint {
    #[inline]
    fn lat(&self) -> f64 {
        self.latitude
    }

    #[inline]
    fn lng(&self) -> f64 {
        self.longitude
    }
}

impl LatLng for TrackPoint {
    #[inline]
    fn lat(&self) -> f64 {
        self.latitude
    }

    #[inline]
    fn lng(&self) -> f64 {
        self.longitude
    }
}

impl LatLng for (f64, f64) {
    #[inline]
    fn lat(&self) -> f64 {
        self.0
    }

    #[inline]
    fn lng(&self) -> f64 {
        self.1
    }
}

// =============================================================================
// Distance Functions
// =============================================================================

/// Calculate the great-circle distance between two GPS points using the Haversine formula.
///
/// Returns the distance in meters along the Earth's surface. Symmetric, and
/// exactly 0 for identical points.
///
/// # Example
///
/// ```rust
/// use trail_milestones::geo_utils::haversine_distance;
///
/// // One degree of longitude at the equator
/// let d = haversine_distance(&(0.0, 0.0), &(0.0, 1.0));
/// assert!((d - 111_195.0).abs() < 1_112.0);
/// ```
#[inline]
pub fn haversine_distance<A: LatLng, B: LatLng>(p1: &A, p2: &B) -> f64 {
    let point1 = Point::new(p1.lng(), p1.lat());
    let point2 = Point::new(p2.lng(), p2.lat());
    Haversine::distance(point1, point2)
}

// =============================================================================
// Bounding Box Functions
// =============================================================================

/// Compute the bounding box of a GPS track.
///
/// Returns `None` for empty input.
pub fn compute_bounds<P: LatLng>(points: &[P]) -> Option<Bounds> {
    if points.is_empty() {
        return None;
    }

    let mut min_lat = f64::MAX;
    let mut max_lat = f64::MIN;
    let mut min_lng = f64::MAX;
    let mut max_lng = f64::MIN;

    for p in points {
        min_lat = min_lat.min(p.lat());
        max_lat = max_lat.max(p.lat());
        min_lng = min_lng.min(p.lng());
        max_lng = max_lng.max(p.lng());
    }

    Some(Bounds { min_lat, max_lat, min_lng, max_lng })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_haversine_distance_same_point() {
        let p = (45.0, 5.0);
        assert_eq!(haversine_distance(&p, &p), 0.0);
    }

    #[test]
    fn test_haversine_one_degree_longitude_at_equator() {
        let dist = haversine_distance(&(0.0, 0.0), &(0.0, 1.0));
        // 111,195m within 1%
        assert!(approx_eq(dist, 111_195.0, 1_112.0));
    }

    #[test]
    fn test_haversine_is_symmetric() {
        let a = RawPoint::new(45.1885, 5.7245, 212.0);
        let b = RawPoint::new(45.8992, 6.1294, 448.0);
        assert_eq!(haversine_distance(&a, &b), haversine_distance(&b, &a));
    }

    #[test]
    fn test_haversine_known_value() {
        // Grenoble to Annecy is about 84 km as the crow flies
        let grenoble = (45.1885, 5.7245);
        let annecy = (45.8992, 6.1294);
        let dist = haversine_distance(&grenoble, &annecy);
        assert!(dist > 80_000.0 && dist < 90_000.0);
    }

    #[test]
    fn test_compute_bounds() {
        let track = vec![(45.50, 5.13), (45.51, 5.12), (45.505, 5.125)];
        let bounds = compute_bounds(&track).unwrap();
        assert_eq!(bounds.min_lat, 45.50);
        assert_eq!(bounds.max_lat, 45.51);
        assert_eq!(bounds.min_lng, 5.12);
        assert_eq!(bounds.max_lng, 5.13);
    }

    #[test]
    fn test_compute_bounds_empty() {
        let empty: Vec<RawPoint> = vec![];
        assert!(compute_bounds(&empty).is_none());
    }
}
