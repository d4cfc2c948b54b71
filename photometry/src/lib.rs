//! Aperture photometry for calibrated telescope frames.
//!
//! Given a calibrated pixel array, a plate solution, and a catalog of
//! named (aperture, annulus) pairs, this crate measures the
//! background-subtracted flux of every star on the frame. Image loading,
//! astrometric solving, and catalog persistence all live with external
//! collaborators; this crate is pure arithmetic over pixel values.

pub mod aperture;
pub mod error;
pub mod measure;
pub mod regions;
pub mod stats;

// Re-exports for easier access
pub use aperture::{annulus_pixels, aperture_pixels};
pub use error::{PhotometryError, StatsError};
pub use measure::{
    measure_frame, measure_region, FluxMeasurement, NamedMeasurement, MIN_BACKGROUND_PIXELS,
};
pub use regions::{CircularAnnulus, CircularAperture, PixelRegion, PlateSolution, SkyRegion};
pub use stats::median;
