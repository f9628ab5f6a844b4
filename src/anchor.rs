//! # Milestone Anchoring
//!
//! User-created milestones (supply points, dangers, notes) are placed by
//! tapping a map, but every milestone must sit on a track point so its
//! `distance` and `point_index` stay consistent with the track. [`TrackIndex`]
//! finds the closest track point with an R-tree.
//!
//! Coordinates are indexed in an equirectangular projection around the
//! track's mean latitude, so longitude differences shrink with `cos(lat)` the
//! way ground distances do.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::geo_utils::haversine_distance;
use crate::{Milestone, MilestoneType, TrackPoint};

/// A track point position for R-tree queries
#[derive(Debug, Clone, Copy)]
struct IndexedPoint {
    idx: usize,
    x: f64,
    y: f64,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over the points of one track.
pub struct TrackIndex<'a> {
    points: &'a [TrackPoint],
    tree: RTree<IndexedPoint>,
    lng_scale: f64,
}

impl<'a> TrackIndex<'a> {
    /// Build the index. An empty track gives an index that never matches.
    pub fn new(points: &'a [TrackPoint]) -> Self {
        let mean_lat = if points.is_empty() {
            0.0
        } else {
            points.iter().map(|p| p.latitude).sum::<f64>() / points.len() as f64
        };
        let lng_scale = mean_lat.to_radians().cos().max(0.01);

        let indexed: Vec<IndexedPoint> = points
            .iter()
            .enumerate()
            .map(|(i, p)| IndexedPoint {
                idx: i,
                x: p.longitude * lng_scale,
                y: p.latitude,
            })
            .collect();

        Self {
            points,
            tree: RTree::bulk_load(indexed),
            lng_scale,
        }
    }

    /// Closest track point to a location.
    ///
    /// Ties between points at the same position (e.g. an out-and-back route)
    /// resolve to whichever the tree returns first; use
    /// [`nearest_point_after`](Self::nearest_point_after) to disambiguate by distance.
    pub fn nearest_point(&self, latitude: f64, longitude: f64) -> Option<&'a TrackPoint> {
        let query = [longitude * self.lng_scale, latitude];
        self.tree
            .nearest_neighbor(&query)
            .map(|ip| &self.points[ip.idx])
    }

    /// Closest track point to a location, only if within `max_meters`.
    pub fn nearest_point_within(
        &self,
        latitude: f64,
        longitude: f64,
        max_meters: f64,
    ) -> Option<&'a TrackPoint> {
        self.nearest_point(latitude, longitude)
            .filter(|p| haversine_distance(*p, &(latitude, longitude)) <= max_meters)
    }

    /// Closest track point to a location among points at or beyond
    /// `min_distance` meters along the track.
    ///
    /// On routes that pass the same place twice this picks the later pass.
    pub fn nearest_point_after(
        &self,
        latitude: f64,
        longitude: f64,
        min_distance: f64,
    ) -> Option<&'a TrackPoint> {
        let query = [longitude * self.lng_scale, latitude];
        self.tree
            .nearest_neighbor_iter(&query)
            .map(|ip| &self.points[ip.idx])
            .find(|p| p.cumulative_distance >= min_distance)
    }

    /// Build a user milestone anchored at the track point closest to a location.
    pub fn anchor_milestone(
        &self,
        trail_id: i64,
        latitude: f64,
        longitude: f64,
        milestone_type: MilestoneType,
        message: String,
        name: Option<String>,
    ) -> Option<Milestone> {
        self.nearest_point(latitude, longitude)
            .map(|p| Milestone::user_defined(trail_id, p, milestone_type, message, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_track, RawPoint};

    fn northbound_track() -> Vec<TrackPoint> {
        let raw: Vec<RawPoint> = (0..50)
            .map(|i| RawPoint::new(60.0 + i as f64 * 0.001, 10.0, 100.0 + i as f64))
            .collect();
        parse_track(&raw).unwrap().points
    }

    #[test]
    fn test_nearest_point() {
        let points = northbound_track();
        let index = TrackIndex::new(&points);
        let p = index.nearest_point(60.0201, 10.0003).unwrap();
        assert_eq!(p.index, 20);
    }

    #[test]
    fn test_empty_track_never_matches() {
        let index = TrackIndex::new(&[]);
        assert!(index.nearest_point(45.0, 5.0).is_none());
    }

    #[test]
    fn test_nearest_point_within() {
        let points = northbound_track();
        let index = TrackIndex::new(&points);
        // ~17m east of point 10 at 60N
        assert!(index.nearest_point_within(60.010, 10.0003, 50.0).is_some());
        // ~1.1km east
        assert!(index.nearest_point_within(60.010, 10.02, 50.0).is_none());
    }

    #[test]
    fn test_longitude_scaled_by_latitude() {
        // Two candidate points: one 0.002° east, one 0.0015° north.
        // At 60N, 0.002° of longitude (~111m) is closer than 0.0015° of latitude (~167m).
        let points = vec![
            TrackPoint { index: 0, latitude: 60.0, longitude: 10.002, elevation: 0.0, cumulative_distance: 0.0 },
            TrackPoint { index: 1, latitude: 60.0015, longitude: 10.0, elevation: 0.0, cumulative_distance: 200.0 },
        ];
        let index = TrackIndex::new(&points);
        assert_eq!(index.nearest_point(60.0, 10.0).unwrap().index, 0);
    }

    #[test]
    fn test_nearest_point_after_picks_later_pass() {
        // Out and back on the same line
        let mut raw: Vec<RawPoint> = (0..20)
            .map(|i| RawPoint::new(45.0 + i as f64 * 0.001, 5.0, 0.0))
            .collect();
        raw.extend((0..20).rev().map(|i| RawPoint::new(45.0 + i as f64 * 0.001, 5.0, 0.0)));
        let points = parse_track(&raw).unwrap().points;
        let index = TrackIndex::new(&points);

        let halfway = points[19].cumulative_distance;
        let p = index.nearest_point_after(45.005, 5.0, halfway).unwrap();
        assert!(p.index >= 20);
        assert_eq!(p.latitude, 45.005);
    }

    #[test]
    fn test_anchor_milestone() {
        let points = northbound_track();
        let index = TrackIndex::new(&points);
        let m = index
            .anchor_milestone(4, 60.0301, 9.9999, MilestoneType::Supply, "Eau".to_string(), None)
            .unwrap();
        assert_eq!(m.point_index, 30);
        assert_eq!(m.distance, points[30].cumulative_distance);
        assert_eq!(m.latitude, points[30].latitude);
        assert_eq!(m.milestone_type, MilestoneType::Supply);
        assert_eq!(m.trail_id, 4);
    }
}
