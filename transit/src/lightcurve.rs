//! Transit light curve assembly over an observation timeline.
//!
//! Observation times map to a signed transit progress through a linear
//! ephemeris: `progress = (t − t_center)/duration`, negative before
//! mid-transit and positive after. The magnitude of the progress plays the
//! role of the projected separation `z`, so ingress and egress at equal
//! |progress| dim the star equally and each sample can be evaluated
//! independently.
//!
//! Samples that land exactly on mid-transit (progress 0) sit on the
//! singular point of the occultation geometry. They are filled with the
//! mean of the nearest computed neighbors and flagged: an approximation by
//! construction, never passed off as a computed value.

use serde::{Deserialize, Serialize};

use crate::error::TransitError;
use crate::flux::transit_flux_series;
use crate::limb_darkening::LimbDarkening;

/// Linear transit ephemeris: mid-transit epoch and progress timescale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitEphemeris {
    /// Mid-transit epoch, in the caller's time units.
    pub t_center: f64,
    /// Time for the progress coordinate to change by one, in the same
    /// units.
    pub duration: f64,
}

impl TransitEphemeris {
    /// Build an ephemeris, rejecting non-finite centers and non-positive
    /// durations.
    pub fn new(t_center: f64, duration: f64) -> Result<Self, TransitError> {
        if !t_center.is_finite() || !duration.is_finite() || duration <= 0.0 {
            return Err(TransitError::InvalidEphemeris { t_center, duration });
        }
        Ok(Self { t_center, duration })
    }

    /// Signed transit progress at `time`.
    pub fn progress(&self, time: f64) -> f64 {
        (time - self.t_center) / self.duration
    }

    /// Inverse mapping: the time at which the given progress is reached.
    pub fn time_at(&self, progress: f64) -> f64 {
        progress * self.duration + self.t_center
    }
}

/// One point of a modeled light curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluxSample {
    /// The caller's timestamp, unchanged.
    pub time: f64,
    /// Modeled relative flux at that time.
    pub flux: f64,
    /// True when this value is the mid-transit neighbor average rather
    /// than a computed flux.
    pub averaged: bool,
}

/// Knobs for curve evaluation.
#[derive(Debug, Clone, Copy)]
pub struct CurveOptions {
    /// Out-of-transit flux level; the whole curve scales linearly with it.
    pub baseline: f64,
    /// Fan the per-sample evaluations out across rayon workers.
    pub parallel: bool,
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self {
            baseline: 1.0,
            parallel: true,
        }
    }
}

/// Model the light curve for a sequence of observation times.
///
/// The output has exactly one sample per input time, in input order, each
/// carrying its original timestamp. Every sample with non-zero progress is
/// computed independently at `z = |progress|`; exact mid-transit samples
/// are filled by neighbor averaging and flagged (see module docs).
///
/// An empty `times` slice yields an empty curve.
///
/// # Errors
///
/// Propagates per-sample domain errors from the flux model, and raises
/// [`TransitError::UnbracketedMidpoint`] when a mid-transit sample has no
/// computed neighbor on both sides (e.g. a timeline that never leaves
/// mid-transit).
pub fn transit_curve(
    times: &[f64],
    ephemeris: &TransitEphemeris,
    p: f64,
    profile: &LimbDarkening,
    options: &CurveOptions,
) -> Result<Vec<FluxSample>, TransitError> {
    // Index-tagged partition: each sample keeps its slot, mid-transit
    // samples are left open for the averaging pass.
    let mut separations = Vec::with_capacity(times.len());
    let mut computed_slots = Vec::with_capacity(times.len());
    for (index, &time) in times.iter().enumerate() {
        let progress = ephemeris.progress(time);
        if progress != 0.0 {
            separations.push(progress.abs());
            computed_slots.push(index);
        }
    }

    let fluxes = transit_flux_series(&separations, p, profile, options.parallel)?;

    let mut slots: Vec<Option<f64>> = vec![None; times.len()];
    for (&index, &flux) in computed_slots.iter().zip(fluxes.iter()) {
        slots[index] = Some(flux);
    }

    let mut curve = Vec::with_capacity(times.len());
    for (index, &time) in times.iter().enumerate() {
        let sample = match slots[index] {
            Some(flux) => FluxSample {
                time,
                flux: flux * options.baseline,
                averaged: false,
            },
            None => {
                let flux = average_neighbors(&slots, index)
                    .ok_or(TransitError::UnbracketedMidpoint { index, time })?;
                log::debug!(
                    "mid-transit sample at index {index} (time {time}) filled by neighbor average"
                );
                FluxSample {
                    time,
                    flux: flux * options.baseline,
                    averaged: true,
                }
            }
        };
        curve.push(sample);
    }

    Ok(curve)
}

/// Mean of the nearest computed fluxes before and after `index`, or `None`
/// when either side has none.
fn average_neighbors(slots: &[Option<f64>], index: usize) -> Option<f64> {
    let earlier = slots[..index].iter().rev().find_map(|slot| *slot)?;
    let later = slots[index + 1..].iter().find_map(|slot| *slot)?;
    Some(0.5 * (earlier + later))
}
