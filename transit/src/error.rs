//! Error types for the transit flux model.

use thiserror::Error;

use crate::algo::quadrature::QuadratureError;

/// Errors from transit flux and light curve evaluation.
///
/// Every variant carries the offending values so a failure deep inside a
/// batch evaluation can be traced back to the sample that caused it. The
/// model never retries and never substitutes partial results; the one
/// documented approximation (midpoint averaging) is flagged on the sample
/// itself, not hidden behind an error.
#[derive(Debug, Error)]
pub enum TransitError {
    /// The planet center is (numerically) on top of the stellar disk center.
    ///
    /// Both intersection-angle formulas and the interior-regime
    /// normalization divide by the separation, so an exactly central
    /// alignment has no finite evaluation.
    #[error(
        "separation z={z:.3e} is below the central-alignment limit for radius ratio p={p}; \
         the occultation geometry is singular at z=0"
    )]
    CenterAligned {
        /// Center-to-center separation in stellar radii.
        z: f64,
        /// Planet-to-star radius ratio.
        p: f64,
    },

    /// Separation must be a finite, non-negative number of stellar radii.
    #[error("separation z={z} must be finite and non-negative")]
    SeparationOutOfRange {
        /// The rejected separation.
        z: f64,
    },

    /// Radius ratios at or beyond unity (planet as large as the star) are
    /// outside the supported geometry, as are non-positive ratios.
    #[error("radius ratio p={p} is outside the supported open interval (0, 1)")]
    RadiusRatioOutOfRange {
        /// The rejected radius ratio.
        p: f64,
    },

    /// Limb darkening coefficients must all be finite.
    #[error("limb darkening coefficients must be finite, got ({c1}, {c2}, {c3}, {c4})")]
    NonFiniteCoefficients { c1: f64, c2: f64, c3: f64, c4: f64 },

    /// Ephemeris with a non-finite center or non-positive duration.
    #[error("invalid ephemeris: t_center={t_center}, duration={duration} (duration must be finite and > 0)")]
    InvalidEphemeris { t_center: f64, duration: f64 },

    /// The radiance integral did not converge within the subdivision budget.
    #[error("radiance integration failed at z={z}, p={p}: {source}")]
    Integration {
        /// Separation at the failing sample.
        z: f64,
        /// Radius ratio at the failing sample.
        p: f64,
        /// The underlying quadrature failure.
        source: QuadratureError,
    },

    /// A mid-transit sample (exactly zero progress) has no computed
    /// neighbor on one side, so the averaging fill cannot reconstruct a
    /// curve of the input length.
    #[error(
        "cannot fill mid-transit sample at index {index} (time {time}): \
         no computed flux on both sides to average"
    )]
    UnbracketedMidpoint {
        /// Index of the sample in the caller's time sequence.
        index: usize,
        /// The caller-visible timestamp of the sample.
        time: f64,
    },
}
