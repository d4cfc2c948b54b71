//! Occultation geometry of two disks on the plane of the sky.
//!
//! The planet's disk (radius `p`, in units of the stellar radius) sits at
//! projected center-to-center separation `z` from the stellar disk (radius
//! 1). Three regimes follow from the triangle inequality:
//!
//! - `z ≥ 1 + p`: the disks are clear of each other;
//! - `z < 1 − p`: the planet disk lies entirely on the stellar disk;
//! - otherwise: the planet straddles the stellar limb.
//!
//! In the limb-crossing regime the two intersection half-angles `kappa0`
//! (at the planet center) and `kappa1` (at the star center) parameterize
//! the lens-shaped overlap.

use crate::error::TransitError;

/// Separations below this are treated as exact central alignment, which is
/// singular (the intersection angles and the interior normalization both
/// divide by `z`).
pub const MIN_SEPARATION: f64 = 1e-12;

/// Occultation regime for one `(z, p)` evaluation point.
///
/// Ephemeral: classified fresh for every flux sample, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Occlusion {
    /// No overlap; the star is unobscured.
    Clear,
    /// Planet disk entirely within the stellar disk, away from the limb.
    Interior,
    /// Planet disk straddles the stellar limb.
    LimbCrossing {
        /// Half-angle of the overlap lens at the planet center,
        /// `arccos((p² + z² − 1)/(2zp))`.
        kappa0: f64,
        /// Half-angle of the overlap lens at the star center,
        /// `arccos((1 − p² + z²)/(2z))`.
        kappa1: f64,
    },
}

impl Occlusion {
    /// Classify the occultation regime for separation `z` and radius ratio
    /// `p`.
    ///
    /// # Errors
    ///
    /// - [`TransitError::RadiusRatioOutOfRange`] unless `0 < p < 1`;
    /// - [`TransitError::SeparationOutOfRange`] for negative or non-finite
    ///   `z`;
    /// - [`TransitError::CenterAligned`] for `z` below [`MIN_SEPARATION`].
    pub fn classify(z: f64, p: f64) -> Result<Self, TransitError> {
        if !p.is_finite() || p <= 0.0 || p >= 1.0 {
            return Err(TransitError::RadiusRatioOutOfRange { p });
        }
        if !z.is_finite() || z < 0.0 {
            return Err(TransitError::SeparationOutOfRange { z });
        }
        if z < MIN_SEPARATION {
            return Err(TransitError::CenterAligned { z, p });
        }

        if z >= 1.0 + p {
            return Ok(Occlusion::Clear);
        }
        if z < 1.0 - p {
            return Ok(Occlusion::Interior);
        }

        // Rounding can push the arccos arguments a few ulps past ±1 right
        // at the regime boundaries.
        let kappa1 = ((1.0 - p * p + z * z) / (2.0 * z)).clamp(-1.0, 1.0).acos();
        let kappa0 = ((p * p + z * z - 1.0) / (2.0 * z * p))
            .clamp(-1.0, 1.0)
            .acos();

        Ok(Occlusion::LimbCrossing { kappa0, kappa1 })
    }
}

/// Closed-form area correction for the limb-crossing flux,
/// `p²·arccos((z−1)/p) − (z−1)·sqrt(p² − (z−1)²)`.
///
/// Deliberately kept in this parameterization rather than rewritten
/// through `kappa1`; the two forms are not interchangeable off the exact
/// intersection circle, and this is the one the flux formula wants.
pub fn limb_overlap_term(z: f64, p: f64) -> f64 {
    let u = ((z - 1.0) / p).clamp(-1.0, 1.0);
    let s = (p * p - (z - 1.0) * (z - 1.0)).max(0.0).sqrt();
    p * p * u.acos() - (z - 1.0) * s
}
