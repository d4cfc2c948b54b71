//! Measurement regions: circular apertures and background annuli.
//!
//! Source catalogs describe stars on the sky (right ascension, declination,
//! angular radii); photometry happens on pixels. The [`PlateSolution`]
//! trait is the seam to the astrometric collaborator that bridges the two:
//! anything that can place a sky position on the frame and report the
//! plate scale can project a [`SkyRegion`] into a [`PixelRegion`] ready
//! for measurement. How the solution is obtained (FITS WCS headers, a
//! plate solver, a fixed test transform) is outside this crate.

use serde::{Deserialize, Serialize};

use crate::error::PhotometryError;

/// Circular measurement aperture in pixel coordinates.
///
/// Subpixel centers are expected; catalog positions rarely land on a pixel
/// grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularAperture {
    /// X coordinate (column) of the center.
    pub x: f64,
    /// Y coordinate (row) of the center.
    pub y: f64,
    /// Radius in pixels.
    pub radius: f64,
}

/// Circular background annulus in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularAnnulus {
    /// X coordinate (column) of the center.
    pub x: f64,
    /// Y coordinate (row) of the center.
    pub y: f64,
    /// Inner radius in pixels.
    pub r_in: f64,
    /// Outer radius in pixels.
    pub r_out: f64,
}

/// A named star with its measurement aperture and background annulus on
/// the sky, i.e. one row of an aperture catalog
/// (`Name | RA | DEC | r | r_in | r_out`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyRegion {
    /// Catalog name assigned to the star.
    pub name: String,
    /// Right ascension of the center, degrees (ICRS).
    pub ra_deg: f64,
    /// Declination of the center, degrees (ICRS).
    pub dec_deg: f64,
    /// Aperture radius, arcseconds.
    pub aperture_arcsec: f64,
    /// Inner annulus radius, arcseconds.
    pub annulus_inner_arcsec: f64,
    /// Outer annulus radius, arcseconds.
    pub annulus_outer_arcsec: f64,
}

/// Astrometric collaborator: places sky positions on the frame.
pub trait PlateSolution {
    /// Pixel position of a sky coordinate, or `None` when it does not land
    /// on the solved frame.
    fn sky_to_pixel(&self, ra_deg: f64, dec_deg: f64) -> Option<(f64, f64)>;

    /// Plate scale in arcseconds per pixel.
    fn arcsec_per_pixel(&self) -> f64;
}

/// A [`SkyRegion`] projected onto one frame: name plus pixel-space
/// aperture and annulus, sharing the star's projected center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelRegion {
    /// Catalog name carried through from the sky region.
    pub name: String,
    /// Measurement aperture in pixels.
    pub aperture: CircularAperture,
    /// Background annulus in pixels.
    pub annulus: CircularAnnulus,
}

impl SkyRegion {
    /// Project this region onto a frame through its plate solution.
    ///
    /// # Errors
    ///
    /// [`PhotometryError::UnsolvedRegion`] when the solution cannot place
    /// the region's center on the frame.
    pub fn to_pixel<W: PlateSolution>(&self, wcs: &W) -> Result<PixelRegion, PhotometryError> {
        let (x, y) = wcs
            .sky_to_pixel(self.ra_deg, self.dec_deg)
            .ok_or_else(|| PhotometryError::UnsolvedRegion {
                name: self.name.clone(),
            })?;

        let scale = wcs.arcsec_per_pixel();
        Ok(PixelRegion {
            name: self.name.clone(),
            aperture: CircularAperture {
                x,
                y,
                radius: self.aperture_arcsec / scale,
            },
            annulus: CircularAnnulus {
                x,
                y,
                r_in: self.annulus_inner_arcsec / scale,
                r_out: self.annulus_outer_arcsec / scale,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Flat test transform: RA/Dec offsets map linearly to pixels at a
    /// fixed plate scale, positions outside the frame are unsolved.
    struct FlatPlate {
        ra0: f64,
        dec0: f64,
        arcsec_per_pixel: f64,
        width: f64,
        height: f64,
    }

    impl PlateSolution for FlatPlate {
        fn sky_to_pixel(&self, ra_deg: f64, dec_deg: f64) -> Option<(f64, f64)> {
            let x = self.width / 2.0 + (ra_deg - self.ra0) * 3600.0 / self.arcsec_per_pixel;
            let y = self.height / 2.0 + (dec_deg - self.dec0) * 3600.0 / self.arcsec_per_pixel;
            if x < 0.0 || y < 0.0 || x >= self.width || y >= self.height {
                return None;
            }
            Some((x, y))
        }

        fn arcsec_per_pixel(&self) -> f64 {
            self.arcsec_per_pixel
        }
    }

    fn test_plate() -> FlatPlate {
        FlatPlate {
            ra0: 150.0,
            dec0: 20.0,
            arcsec_per_pixel: 2.0,
            width: 100.0,
            height: 100.0,
        }
    }

    fn test_region(name: &str, ra_deg: f64, dec_deg: f64) -> SkyRegion {
        SkyRegion {
            name: name.to_string(),
            ra_deg,
            dec_deg,
            aperture_arcsec: 6.0,
            annulus_inner_arcsec: 12.0,
            annulus_outer_arcsec: 18.0,
        }
    }

    #[test]
    fn test_projection_centers_and_scales() {
        let region = test_region("target", 150.0, 20.0);
        let pixel = region.to_pixel(&test_plate()).unwrap();

        assert_eq!(pixel.name, "target");
        assert_relative_eq!(pixel.aperture.x, 50.0);
        assert_relative_eq!(pixel.aperture.y, 50.0);
        // 6 arcsec at 2 arcsec/pixel
        assert_relative_eq!(pixel.aperture.radius, 3.0);
        assert_relative_eq!(pixel.annulus.r_in, 6.0);
        assert_relative_eq!(pixel.annulus.r_out, 9.0);
        // aperture and annulus share the star's center
        assert_eq!(pixel.annulus.x, pixel.aperture.x);
        assert_eq!(pixel.annulus.y, pixel.aperture.y);
    }

    #[test]
    fn test_offset_star_lands_off_center() {
        // 20 arcsec east at 2 arcsec/pixel is 10 pixels in x
        let region = test_region("comp", 150.0 + 20.0 / 3600.0, 20.0);
        let pixel = region.to_pixel(&test_plate()).unwrap();
        assert_relative_eq!(pixel.aperture.x, 60.0, epsilon = 1e-9);
        assert_relative_eq!(pixel.aperture.y, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unsolved_region_is_error() {
        let region = test_region("far", 151.0, 20.0); // a degree off the frame
        let result = region.to_pixel(&test_plate());
        match result {
            Err(PhotometryError::UnsolvedRegion { name }) => assert_eq!(name, "far"),
            other => panic!("expected unsolved region, got {:?}", other),
        }
    }
}
