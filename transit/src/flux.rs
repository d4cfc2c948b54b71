//! Limb-darkened transit flux at a single projected separation.
//!
//! Implements the small-planet flux of Mandel & Agol (ApJ 580, 2002): the
//! star's radial radiance profile is integrated over the occulted region
//! and normalized by the full-disk integral, so the unocculted flux is
//! exactly 1 and a transit appears as a fractional dimming.
//!
//! The radial integrand is `I(r)·2r` (disk-area measure in polar radius).
//! In the interior regime the integral runs across the planet's footprint
//! `[z−p, z+p]`; when the planet straddles the limb it runs from the inner
//! footprint edge to the limb itself, `[z−p, 1]`, and the geometric overlap
//! correction takes over outside.

use std::f64::consts::PI;

use rayon::prelude::*;

use crate::algo::quadrature::{adaptive_simpson, QuadratureError, DEFAULT_TOLERANCE};
use crate::error::TransitError;
use crate::geometry::{limb_overlap_term, Occlusion};
use crate::limb_darkening::LimbDarkening;

/// Relative stellar flux at projected separation `z` for radius ratio `p`.
///
/// Returns a value in `(0, 1]`: exactly 1 outside the transit, dipping as
/// the planet covers brighter parts of the disk. The profile's own
/// normalization keeps the out-of-transit baseline at unity regardless of
/// the coefficient set.
///
/// # Errors
///
/// Domain guards from [`Occlusion::classify`] (central alignment, p or z
/// out of range) and [`TransitError::Integration`] when the radiance
/// quadrature fails to converge.
pub fn transit_flux(z: f64, p: f64, profile: &LimbDarkening) -> Result<f64, TransitError> {
    match Occlusion::classify(z, p)? {
        Occlusion::Clear => Ok(1.0),
        Occlusion::Interior => {
            // Mean radiance under the planet footprint, normalized by the
            // footprint's own area measure 4zp.
            let integral = integrate_radiance(z - p, z + p, profile)
                .map_err(|source| TransitError::Integration { z, p, source })?;
            let istar = integral / (4.0 * z * p);
            Ok(1.0 - p * p * istar / (4.0 * profile.normalization()))
        }
        Occlusion::LimbCrossing { .. } => {
            let lower = z - p;
            let integral = integrate_radiance(lower, 1.0, profile)
                .map_err(|source| TransitError::Integration { z, p, source })?;
            let istar = integral / (1.0 - lower * lower);
            let occulted = istar / (4.0 * PI * profile.normalization()) * limb_overlap_term(z, p);
            Ok(1.0 - occulted)
        }
    }
}

/// Flux for a whole sequence of separations, in input order.
///
/// Each point is independent (no shared state), so the batch may fan out
/// across rayon workers; results are collected back into input order either
/// way. The first failing point aborts the batch with its error.
pub fn transit_flux_series(
    zs: &[f64],
    p: f64,
    profile: &LimbDarkening,
    parallel: bool,
) -> Result<Vec<f64>, TransitError> {
    if parallel {
        zs.par_iter()
            .map(|&z| transit_flux(z, p, profile))
            .collect()
    } else {
        zs.iter().map(|&z| transit_flux(z, p, profile)).collect()
    }
}

fn integrate_radiance(
    lower: f64,
    upper: f64,
    profile: &LimbDarkening,
) -> Result<f64, QuadratureError> {
    adaptive_simpson(
        |r| profile.radiance_at_radius(r) * 2.0 * r,
        lower,
        upper,
        DEFAULT_TOLERANCE,
    )
}
