//! Limb-darkened exoplanet transit light curve modeling.
//!
//! This crate computes the fractional dimming of a star as a planet
//! crosses its disk, using the four-coefficient nonlinear limb darkening
//! law of Mandel & Agol (ApJ 580, 2002) and adaptive quadrature over the
//! occulted radiance. A linear ephemeris maps observation times onto the
//! projected separation, so a whole observation timeline turns into a
//! model light curve in one call.
//!
//! Everything is a value type computed per call: no caches, no globals,
//! no I/O. Batch evaluation is embarrassingly parallel and can fan out
//! across rayon workers.

pub mod algo;
pub mod error;
pub mod flux;
pub mod geometry;
pub mod lightcurve;
pub mod limb_darkening;

// Re-exports for easier access
pub use error::TransitError;
pub use flux::{transit_flux, transit_flux_series};
pub use geometry::Occlusion;
pub use lightcurve::{transit_curve, CurveOptions, FluxSample, TransitEphemeris};
pub use limb_darkening::{LimbDarkening, TEFF_5250, TEFF_5500};
