//! Background-subtracted flux measurement for named regions.
//!
//! The measurement follows standard aperture photometry practice:
//!
//! 1. **Raw sum**: total of all pixel values inside the aperture.
//! 2. **Background level**: median of the annulus pixels; the median is
//!    robust against neighboring stars and cosmic rays in the ring.
//! 3. **Background estimate**: median level times the aperture area.
//! 4. **Net sum**: raw sum minus the background estimate; this is the
//!    calibrated stellar flux handed downstream.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use crate::aperture::{annulus_pixels, aperture_pixels};
use crate::error::PhotometryError;
use crate::regions::PixelRegion;
use crate::stats::median;

/// Fewest annulus pixels accepted for a background median.
pub const MIN_BACKGROUND_PIXELS: usize = 10;

/// One region's photometry on one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluxMeasurement {
    /// Total of all pixel values inside the aperture.
    pub raw_sum: f64,
    /// Aperture area in pixels (center-method count).
    pub area: f64,
    /// Median pixel value of the background annulus.
    pub background_median: f64,
    /// Background contribution inside the aperture, `area × median`.
    pub background_estimate: f64,
    /// Background-subtracted flux, `raw_sum − background_estimate`.
    pub net_sum: f64,
}

/// A [`FluxMeasurement`] tagged with its region name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedMeasurement {
    /// Region name carried through from the catalog.
    pub name: String,
    /// The measurement itself.
    pub measurement: FluxMeasurement,
}

/// Measure one region on a frame.
///
/// # Errors
///
/// [`PhotometryError::EmptyAperture`] when no pixel center falls inside
/// the aperture (region off the frame or radius below the pixel pitch),
/// [`PhotometryError::InsufficientBackground`] when the annulus holds
/// fewer than [`MIN_BACKGROUND_PIXELS`] pixels.
pub fn measure_region(
    image: &ArrayView2<f64>,
    region: &PixelRegion,
) -> Result<FluxMeasurement, PhotometryError> {
    let aperture = aperture_pixels(image, &region.aperture);
    if aperture.is_empty() {
        return Err(PhotometryError::EmptyAperture {
            name: region.name.clone(),
            x: region.aperture.x,
            y: region.aperture.y,
            radius: region.aperture.radius,
        });
    }

    let background = annulus_pixels(image, &region.annulus);
    if background.len() < MIN_BACKGROUND_PIXELS {
        return Err(PhotometryError::InsufficientBackground {
            name: region.name.clone(),
            count: background.len(),
            needed: MIN_BACKGROUND_PIXELS,
            x: region.annulus.x,
            y: region.annulus.y,
        });
    }

    let raw_sum: f64 = aperture.iter().sum();
    let area = aperture.len() as f64;
    let background_median = median(&background)?;
    let background_estimate = area * background_median;
    let net_sum = raw_sum - background_estimate;

    if net_sum < 0.0 {
        log::warn!(
            "negative net flux {net_sum:.1} for '{}' at ({:.1}, {:.1}); \
             background {background_median:.2} over {area} pixels exceeds the aperture sum",
            region.name,
            region.aperture.x,
            region.aperture.y,
        );
    }

    Ok(FluxMeasurement {
        raw_sum,
        area,
        background_median,
        background_estimate,
        net_sum,
    })
}

/// Measure every named region of one frame, preserving catalog order.
///
/// Fails fast: the first defective region aborts the frame with its error,
/// so a truncated result can never be mistaken for a complete one.
pub fn measure_frame(
    image: &ArrayView2<f64>,
    regions: &[PixelRegion],
) -> Result<Vec<NamedMeasurement>, PhotometryError> {
    let mut measurements = Vec::with_capacity(regions.len());
    for region in regions {
        let measurement = measure_region(image, region)?;
        measurements.push(NamedMeasurement {
            name: region.name.clone(),
            measurement,
        });
    }
    log::debug!("measured {} regions on frame", measurements.len());
    Ok(measurements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::{CircularAnnulus, CircularAperture};
    use approx::assert_relative_eq;
    use ndarray::Array2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    fn region_at(x: f64, y: f64, r: f64, r_in: f64, r_out: f64) -> PixelRegion {
        PixelRegion {
            name: "star".to_string(),
            aperture: CircularAperture { x, y, radius: r },
            annulus: CircularAnnulus { x, y, r_in, r_out },
        }
    }

    #[test]
    fn test_flat_background_cancels_exactly() {
        // Uniform frame: the net flux must vanish identically, whatever
        // the aperture size.
        let image = Array2::<f64>::from_elem((30, 30), 250.0);
        let region = region_at(15.0, 15.0, 3.0, 6.0, 9.0);

        let m = measure_region(&image.view(), &region).unwrap();
        assert_relative_eq!(m.background_median, 250.0);
        assert_relative_eq!(m.background_estimate, m.area * 250.0);
        assert_relative_eq!(m.net_sum, 0.0, epsilon = 1e-9);
        assert_relative_eq!(m.raw_sum, m.area * 250.0);
    }

    #[test]
    fn test_isolated_star_on_zero_background() {
        let mut image = Array2::<f64>::zeros((30, 30));
        image[[15, 15]] = 1000.0;
        image[[15, 16]] = 600.0;
        image[[16, 15]] = 400.0;

        let region = region_at(15.0, 15.0, 3.0, 6.0, 9.0);
        let m = measure_region(&image.view(), &region).unwrap();

        assert_relative_eq!(m.raw_sum, 2000.0);
        assert_relative_eq!(m.background_median, 0.0);
        assert_relative_eq!(m.net_sum, 2000.0);
    }

    #[test]
    fn test_background_offset_is_removed() {
        let mut image = Array2::<f64>::from_elem((30, 30), 80.0);
        image[[15, 15]] = 80.0 + 500.0;

        let region = region_at(15.0, 15.0, 2.0, 5.0, 8.0);
        let m = measure_region(&image.view(), &region).unwrap();

        assert_relative_eq!(m.background_median, 80.0);
        assert_relative_eq!(m.net_sum, 500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_noisy_background_recovers_known_flux() {
        const BACKGROUND: f64 = 1000.0;
        const NOISE_SIGMA: f64 = 5.0;
        const STAR_FLUX: f64 = 20_000.0;
        const SEED: u64 = 42;

        let mut rng = StdRng::seed_from_u64(SEED);
        let noise = Normal::new(0.0, NOISE_SIGMA).unwrap();

        let mut image = Array2::<f64>::zeros((60, 60));
        for value in image.iter_mut() {
            *value = BACKGROUND + noise.sample(&mut rng);
        }
        // Compact synthetic star: all flux inside a 2-pixel box
        image[[30, 30]] += STAR_FLUX * 0.6;
        image[[30, 31]] += STAR_FLUX * 0.2;
        image[[31, 30]] += STAR_FLUX * 0.15;
        image[[31, 31]] += STAR_FLUX * 0.05;

        let region = region_at(30.0, 30.0, 4.0, 8.0, 12.0);
        let m = measure_region(&image.view(), &region).unwrap();

        // Median background over ~250 ring pixels has a standard error of
        // a fraction of a count; net flux error is dominated by aperture
        // noise ~ sigma·sqrt(area) ≈ 36 counts.
        assert_relative_eq!(m.net_sum, STAR_FLUX, max_relative = 0.02);
        assert_relative_eq!(m.background_median, BACKGROUND, max_relative = 0.01);
    }

    #[test]
    fn test_empty_aperture_is_error() {
        let image = Array2::<f64>::ones((30, 30));
        let region = region_at(200.0, 200.0, 2.0, 5.0, 8.0);
        let result = measure_region(&image.view(), &region);
        assert!(matches!(
            result,
            Err(PhotometryError::EmptyAperture { .. })
        ));
    }

    #[test]
    fn test_insufficient_background_is_error() {
        // Annulus entirely off the frame corner
        let image = Array2::<f64>::ones((6, 6));
        let region = region_at(1.0, 1.0, 1.0, 6.0, 7.0);
        let result = measure_region(&image.view(), &region);
        match result {
            Err(PhotometryError::InsufficientBackground { count, needed, .. }) => {
                assert!(count < needed);
            }
            other => panic!("expected insufficient background, got {:?}", other),
        }
    }

    #[test]
    fn test_frame_preserves_catalog_order() {
        let mut image = Array2::<f64>::from_elem((40, 40), 10.0);
        image[[10, 10]] = 510.0;
        image[[28, 30]] = 260.0;

        let regions = vec![
            PixelRegion {
                name: "target".to_string(),
                ..region_at(10.0, 10.0, 2.0, 5.0, 8.0)
            },
            PixelRegion {
                name: "comparison".to_string(),
                ..region_at(30.0, 28.0, 2.0, 5.0, 8.0)
            },
        ];

        let frame = measure_frame(&image.view(), &regions).unwrap();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame[0].name, "target");
        assert_eq!(frame[1].name, "comparison");
        assert_relative_eq!(frame[0].measurement.net_sum, 500.0, epsilon = 1e-9);
        assert_relative_eq!(frame[1].measurement.net_sum, 250.0, epsilon = 1e-9);
    }

    #[test]
    fn test_frame_fails_fast_on_defective_region() {
        let image = Array2::<f64>::ones((40, 40));
        let regions = vec![
            region_at(20.0, 20.0, 2.0, 5.0, 8.0),
            region_at(500.0, 500.0, 2.0, 5.0, 8.0), // off the frame
        ];
        let result = measure_frame(&image.view(), &regions);
        assert!(result.is_err());
    }
}
