//! # Milestone Generation
//!
//! Maps significant segments to climb/descent milestones anchored at the
//! segment start, with a generated voice-guidance message.

use crate::error::Result;
use crate::messages::{ClimbStats, MessageFormatter};
use crate::segments::{Segment, Trend};
use crate::{Milestone, MilestoneType, TrackPoint};

/// Generate milestones for climbing and descending segments.
///
/// Flat segments produce nothing. The result is sorted by distance; the sort
/// is stable, so milestones at the same distance keep segment order.
pub fn generate_milestones(
    segments: &[Segment],
    points: &[TrackPoint],
    trail_id: i64,
    formatter: &dyn MessageFormatter,
) -> Vec<Milestone> {
    let mut milestones: Vec<Milestone> = segments
        .iter()
        .filter_map(|segment| {
            let anchor = points.get(segment.start_index)?;
            let stats = ClimbStats::from_segment(segment);
            let (milestone_type, message) = match segment.trend {
                Trend::Climbing => (MilestoneType::Climb, formatter.climb_message(&stats)),
                Trend::Descending => (MilestoneType::Descent, formatter.descent_message(&stats)),
                Trend::Flat => return None,
            };
            Some(Milestone::at_point(trail_id, anchor, milestone_type, message))
        })
        .collect();

    milestones.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    milestones
}

/// Serialize milestones to JSON for the storage layer.
pub fn milestones_to_json(milestones: &[Milestone]) -> Result<String> {
    Ok(serde_json::to_string(milestones)?)
}

/// Load milestones previously written by [`milestones_to_json`].
pub fn milestones_from_json(json: &str) -> Result<Vec<Milestone>> {
    Ok(serde_json::from_str(json)?)
}
