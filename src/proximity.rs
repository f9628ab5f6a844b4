//! Minimum-spacing filter for milestone lists.

use crate::Milestone;

/// Drop milestones closer than `min_spacing` meters to the previously kept one.
///
/// Expects input sorted by distance. Single greedy pass: the earlier of two
/// close milestones always wins, and the first milestone is always kept.
///
/// # Example
/// ```
/// use trail_milestones::{Milestone, MilestoneType, TrackPoint, filter_by_minimum_distance};
///
/// let at = |d: f64| {
///     let p = TrackPoint { index: 0, latitude: 0.0, longitude: 0.0, elevation: 0.0, cumulative_distance: d };
///     Milestone::at_point(1, &p, MilestoneType::Climb, String::new())
/// };
/// let kept = filter_by_minimum_distance(vec![at(0.0), at(400.0), at(1000.0), at(1900.0)], 1000.0);
/// let distances: Vec<f64> = kept.iter().map(|m| m.distance).collect();
/// assert_eq!(distances, vec![0.0, 1000.0]);
/// ```
pub fn filter_by_minimum_distance(milestones: Vec<Milestone>, min_spacing: f64) -> Vec<Milestone> {
    let mut last_kept_distance = -min_spacing;

    milestones
        .into_iter()
        .filter(|m| {
            let keep = m.distance - last_kept_distance >= min_spacing;
            if keep {
                last_kept_distance = m.distance;
            }
            keep
        })
        .collect()
}
