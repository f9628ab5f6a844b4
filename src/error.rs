//! Error handling for the trail-milestones library.
//!
//! Errors here are structural: the pipeline is deterministic, so retrying the
//! same input always fails the same way.

/// Unified error type for milestone operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "ffi", derive(uniffi::Error))]
#[cfg_attr(feature = "ffi", uniffi(flat_error))]
pub enum MilestoneError {
    /// Track has too few points to compute distances
    #[error("Track has {point_count} points, minimum {minimum_required} required")]
    NotEnoughPoints {
        point_count: u32,
        minimum_required: u32,
    },

    /// Raw track file could not be read
    #[error("Invalid track format: {0}")]
    InvalidFormat(String),

    /// Configuration value out of range
    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: f64 },
}

/// Result type alias for milestone operations.
pub type Result<T> = std::result::Result<T, MilestoneError>;

#[cfg(feature = "gpx")]
impl From<gpx::errors::GpxError> for MilestoneError {
    fn from(e: gpx::errors::GpxError) -> Self {
        MilestoneError::InvalidFormat(e.to_string())
    }
}

impl From<serde_json::Error> for MilestoneError {
    fn from(e: serde_json::Error) -> Self {
        MilestoneError::InvalidFormat(e.to_string())
    }
}
