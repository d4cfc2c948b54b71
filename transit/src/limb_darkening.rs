//! Nonlinear limb darkening profiles for stellar disks.
//!
//! A star is not uniformly bright: the disk dims from center to limb because
//! lines of sight near the edge traverse higher, cooler layers of the
//! photosphere. This module implements the four-coefficient nonlinear law of
//! Mandel & Agol (ApJ 580, 2002),
//!
//! ```text
//! I(mu) = 1 − Σ_{k=1..4} c_k · (1 − mu^(k/2))
//! ```
//!
//! where `mu = cos(theta) = sqrt(1 − r²)` is the foreshortening cosine at
//! fractional disk radius `r`. The zeroth weight is fixed by the center
//! condition `I(1) = 1`, i.e. `c0 = 1 − c1 − c2 − c3 − c4`, and the profile
//! carries its own disk-integral normalization
//!
//! ```text
//! Ω = Σ_{n=0..4} c_n / (n + 4)
//! ```
//!
//! so that an unocculted star always integrates to unit flux.
//!
//! Coefficient sets are tabulated per star from atmosphere models keyed by
//! effective temperature, metallicity, surface gravity, and turbulent
//! velocity (e.g. the VizieR J/A+A/363/1081 tables); this module only
//! consumes them.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::TransitError;

/// A four-coefficient nonlinear limb darkening profile.
///
/// Value type: the derived center weight `c0` and the disk normalization Ω
/// are computed once at construction and never change. Cheap to copy, safe
/// to share across threads.
///
/// The constructor does **not** check physical plausibility: a coefficient
/// set that goes negative somewhere on `mu ∈ [0, 1]` is accepted and will
/// produce a negative radiance there. Catching that is the caller's
/// responsibility, the same as for the tabulated sources these sets come
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimbDarkening {
    /// Ordered weights `[c0, c1, c2, c3, c4]`, with `c0` derived.
    weights: [f64; 5],
    /// Cached disk-integral normalization Ω.
    omega: f64,
}

impl LimbDarkening {
    /// Build a profile from the four tabulated coefficients.
    ///
    /// Derives `c0 = 1 − c1 − c2 − c3 − c4` and caches
    /// `Ω = Σ c_n/(n+4)`.
    ///
    /// # Errors
    ///
    /// [`TransitError::NonFiniteCoefficients`] if any input is NaN or
    /// infinite.
    pub fn new(c1: f64, c2: f64, c3: f64, c4: f64) -> Result<Self, TransitError> {
        if !(c1.is_finite() && c2.is_finite() && c3.is_finite() && c4.is_finite()) {
            return Err(TransitError::NonFiniteCoefficients { c1, c2, c3, c4 });
        }

        let c0 = 1.0 - c1 - c2 - c3 - c4;
        let weights = [c0, c1, c2, c3, c4];

        let mut omega = 0.0;
        for (n, &c) in weights.iter().enumerate() {
            omega += c / (n as f64 + 4.0);
        }

        Ok(Self { weights, omega })
    }

    /// A uniformly bright disk (all limb coefficients zero).
    ///
    /// Useful as an analytic anchor: occultation of a uniform source has
    /// closed-form flux, so numerical paths can be checked exactly.
    pub fn uniform() -> Self {
        Self {
            weights: [1.0, 0.0, 0.0, 0.0, 0.0],
            omega: 0.25,
        }
    }

    /// Surface brightness at foreshortening cosine `mu`, normalized so the
    /// disk center (`mu = 1`) is exactly 1.
    pub fn radiance(&self, mu: f64) -> f64 {
        let mut result = 1.0;
        for k in 1..=4 {
            let term = 1.0 - mu.powf(k as f64 / 2.0);
            result -= self.weights[k] * term;
        }
        result
    }

    /// Surface brightness at fractional disk radius `r`, via
    /// `mu = sqrt(1 − r²)`.
    ///
    /// The radius enters only squared, so negative `r` (which arises when an
    /// integration interval straddles the disk center) is handled naturally.
    pub fn radiance_at_radius(&self, r: f64) -> f64 {
        // max() guards the representable edge r = 1 against rounding below
        // zero under the square root.
        let mu = (1.0 - r * r).max(0.0).sqrt();
        self.radiance(mu)
    }

    /// The cached disk-integral normalization Ω.
    pub fn normalization(&self) -> f64 {
        self.omega
    }

    /// All five weights in order `[c0, c1, c2, c3, c4]`.
    pub fn weights(&self) -> [f64; 5] {
        self.weights
    }

    /// The derived center weight `c0`.
    pub fn c0(&self) -> f64 {
        self.weights[0]
    }

    /// Tabulated weight `c1`.
    pub fn c1(&self) -> f64 {
        self.weights[1]
    }

    /// Tabulated weight `c2`.
    pub fn c2(&self) -> f64 {
        self.weights[2]
    }

    /// Tabulated weight `c3`.
    pub fn c3(&self) -> f64 {
        self.weights[3]
    }

    /// Tabulated weight `c4`.
    pub fn c4(&self) -> f64 {
        self.weights[4]
    }
}

/// V-band profile for a Teff = 5250 K star
/// (log[M/H] = −1.0, v = 2 km/s, log g = 4.5).
pub static TEFF_5250: Lazy<LimbDarkening> = Lazy::new(|| {
    LimbDarkening::new(0.2621, 0.6838, -0.0214, -0.1504)
        .expect("tabulated 5250 K coefficients are finite")
});

/// V-band profile for a Teff = 5500 K star
/// (log[M/H] = −1.0, v = 2 km/s, log g = 4.5).
pub static TEFF_5500: Lazy<LimbDarkening> = Lazy::new(|| {
    LimbDarkening::new(0.1551, 1.2391, -0.8769, 0.2287)
        .expect("tabulated 5500 K coefficients are finite")
});
