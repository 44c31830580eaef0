//! Error types for scenecam.

use thiserror::Error;

/// The main error type for scenecam operations.
#[derive(Error, Debug)]
pub enum ScenecamError {
    /// Trajectory interpolation needs at least two keypoint cameras.
    #[error("trajectory interpolation needs at least 2 cameras, got {0}")]
    InsufficientKeypoints(usize),

    /// A room node does not expose the canonical walls/floor/ceiling children.
    #[error("room node {0} is missing the walls/floor/ceiling structure")]
    MalformedRoom(usize),

    /// A viewpoint-mask grid would be too coarse to be meaningful.
    #[error("viewpoint mask resolution {xres}x{yres} is below the 3x3 minimum")]
    MaskResolutionTooSmall { xres: usize, yres: usize },
}

/// A specialized Result type for scenecam operations.
pub type Result<T> = std::result::Result<T, ScenecamError>;
