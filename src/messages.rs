//! Voice-guidance message templates.
//!
//! Generation computes the numbers ([`ClimbStats`]); a [`MessageFormatter`]
//! turns them into text. [`FrenchMessages`] is the built-in template set.

use crate::segments::Segment;

/// Whole-number figures quoted in a climb or descent message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimbStats {
    /// Elevation gained (climb) or lost (descent), whole meters, never negative
    pub elevation_change: i64,
    /// Segment length in meters
    pub distance_meters: f64,
    /// Average slope in whole percent, never negative
    pub slope_percent: i64,
}

impl ClimbStats {
    /// Compute message figures for a segment. All roundings truncate toward zero.
    pub fn from_segment(segment: &Segment) -> Self {
        let signed_change = segment.end_elevation - segment.start_elevation;
        let elevation_change = match segment.trend {
            crate::Trend::Descending => signed_change.abs().trunc() as i64,
            _ => (signed_change.trunc() as i64).max(0),
        };

        Self {
            elevation_change,
            distance_meters: segment.distance(),
            slope_percent: (segment.average_slope().abs() * 100.0).trunc() as i64,
        }
    }

    /// Segment length in kilometers.
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }
}

/// Renders the text spoken when a milestone is reached.
pub trait MessageFormatter: Send + Sync {
    fn climb_message(&self, stats: &ClimbStats) -> String;
    fn descent_message(&self, stats: &ClimbStats) -> String;
}

/// French templates.
///
/// Distances of a kilometer or more are spoken in kilometers with one
/// decimal, shorter ones in whole meters.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrenchMessages;

impl FrenchMessages {
    fn distance_phrase(stats: &ClimbStats) -> String {
        let km = stats.distance_km();
        if km >= 1.0 {
            format!("{:.1} kilomètres", km)
        } else {
            format!("{} mètres", stats.distance_meters.trunc() as i64)
        }
    }
}

impl MessageFormatter for FrenchMessages {
    fn climb_message(&self, stats: &ClimbStats) -> String {
        format!(
            "Montée de {} mètres sur {} — {}% moyen",
            stats.elevation_change,
            Self::distance_phrase(stats),
            stats.slope_percent
        )
    }

    fn descent_message(&self, stats: &ClimbStats) -> String {
        format!(
            "Descente de {} mètres sur {}",
            stats.elevation_change,
            Self::distance_phrase(stats)
        )
    }
}
