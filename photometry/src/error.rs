//! Error types for aperture photometry.

use thiserror::Error;

/// Errors from statistical helpers.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StatsError {
    /// Median of an empty sample is undefined.
    #[error("cannot take the median of an empty sample")]
    EmptyInput,
}

/// Errors from region projection and flux measurement.
#[derive(Debug, Error)]
pub enum PhotometryError {
    /// Aperture contains no pixels at the given position.
    #[error("aperture '{name}' contains no pixels at ({x:.1}, {y:.1}) with radius {radius:.1}")]
    EmptyAperture {
        /// Region name.
        name: String,
        /// X coordinate of the aperture center.
        x: f64,
        /// Y coordinate of the aperture center.
        y: f64,
        /// Aperture radius in pixels.
        radius: f64,
    },

    /// Background annulus holds too few pixels for a stable median.
    #[error(
        "annulus of '{name}' holds {count} background pixels at ({x:.1}, {y:.1}), need at least {needed}"
    )]
    InsufficientBackground {
        /// Region name.
        name: String,
        /// Number of background pixels found.
        count: usize,
        /// Minimum acceptable count.
        needed: usize,
        /// X coordinate of the annulus center.
        x: f64,
        /// Y coordinate of the annulus center.
        y: f64,
    },

    /// The plate solution could not place the region on the frame.
    #[error("plate solution has no pixel position for region '{name}'")]
    UnsolvedRegion {
        /// Region name.
        name: String,
    },

    /// Statistical computation failed.
    #[error(transparent)]
    Stats(#[from] StatsError),
}
