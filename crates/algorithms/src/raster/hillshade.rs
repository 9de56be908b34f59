//! Hillshade (shaded relief) from elevation grids
//!
//! Lambertian illumination from a configurable sun position.

use crate::maybe_rayon::*;
use crate::raster::horn_gradients;
use kartos_core::{Error, Grid, Result};
use ndarray::Array2;
use std::f64::consts::PI;

/// Parameters for hillshade calculation
#[derive(Debug, Clone)]
pub struct HillshadeParams {
    /// Sun azimuth in degrees (0 = North, clockwise)
    pub azimuth: f64,
    /// Sun altitude in degrees above the horizon (0-90)
    pub altitude: f64,
    /// Z-factor for vertical exaggeration
    pub z_factor: f64,
}

impl Default for HillshadeParams {
    fn default() -> Self {
        Self {
            azimuth: 315.0,
            altitude: 45.0,
            z_factor: 1.0,
        }
    }
}

/// Calculate shaded relief from an elevation grid.
///
/// ```text
/// shade = cos(zenith)cos(slope) + sin(zenith)sin(slope)cos(azimuth - aspect)
/// ```
/// clamped to [0, 1] and scaled to [0, 255]. Edge cells and nodata
/// neighborhoods emit 0.
pub fn hillshade(dem: &Grid<f64>, params: HillshadeParams) -> Result<Grid<f64>> {
    let (rows, cols) = dem.shape();
    let eight_cell_size = 8.0 * dem.cell_size() * params.z_factor;

    let azimuth_rad = (360.0 - params.azimuth + 90.0).to_radians();
    let zenith_rad = (90.0 - params.altitude).to_radians();
    let cos_zenith = zenith_rad.cos();
    let sin_zenith = zenith_rad.sin();

    let output_data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![0.0; cols];

            for col in 0..cols {
                if let Some((dz_dx, dz_dy)) = horn_gradients(dem, row, col, eight_cell_size) {
                    let slope_rad = (dz_dx * dz_dx + dz_dy * dz_dy).sqrt().atan();

                    let aspect_rad = if dz_dx.abs() < 1e-10 && dz_dy.abs() < 1e-10 {
                        0.0
                    } else {
                        let a = dz_dy.atan2(-dz_dx);
                        if a < 0.0 {
                            2.0 * PI + a
                        } else {
                            a
                        }
                    };

                    let shade = cos_zenith * slope_rad.cos()
                        + sin_zenith * slope_rad.sin() * (azimuth_rad - aspect_rad).cos();

                    row_data[col] = (shade.clamp(0.0, 1.0) * 255.0).round();
                }
            }

            row_data
        })
        .collect();

    let mut output = dem.with_same_meta::<f64>();
    output.set_nodata(Some(0.0));
    *output.data_mut() = Array2::from_shape_vec((rows, cols), output_data)
        .map_err(|e| Error::Other(e.to_string()))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::test_support::{flat_dem, tilted_dem};

    #[test]
    fn test_hillshade_range() {
        let result = hillshade(&tilted_dem(), HillshadeParams::default()).unwrap();
        for row in 0..10 {
            for col in 0..10 {
                let val = result.get(row, col).unwrap();
                assert!((0.0..=255.0).contains(&val), "shade {val} out of range");
            }
        }
    }

    #[test]
    fn test_hillshade_flat() {
        let result = hillshade(&flat_dem(100.0), HillshadeParams::default()).unwrap();
        // Flat surface lit from 45° altitude: shade ≈ cos(45°) → ~180
        let val = result.get(5, 5).unwrap();
        assert!((val - 180.0).abs() < 20.0, "expected ~180, got {val}");
    }

    #[test]
    fn test_hillshade_facing_sun_brighter() {
        // Plane rising to the southeast, lit from the northwest: the
        // northwest-facing side of each cell catches the light
        let dem = tilted_dem();
        let lit = hillshade(
            &dem,
            HillshadeParams {
                azimuth: 315.0,
                ..Default::default()
            },
        )
        .unwrap();
        let opposed = hillshade(
            &dem,
            HillshadeParams {
                azimuth: 135.0,
                ..Default::default()
            },
        )
        .unwrap();

        assert!(lit.get(5, 5).unwrap() > opposed.get(5, 5).unwrap());
    }

    #[test]
    fn test_hillshade_agrees_with_aspect() {
        // Shade must peak when the sun faces the slope direction reported by
        // the aspect module and bottom out 180 degrees away; the compass
        // azimuth for an aspect angle a is (450 - a) mod 360
        let dem = tilted_dem();
        let cell_aspect = crate::raster::aspect(&dem).unwrap().get(5, 5).unwrap();

        let toward = (450.0 - cell_aspect) % 360.0;
        let away = (toward + 180.0) % 360.0;

        let altitude = 45.0;
        let facing = hillshade(
            &dem,
            HillshadeParams {
                azimuth: toward,
                altitude,
                z_factor: 1.0,
            },
        )
        .unwrap();
        let shadowed = hillshade(
            &dem,
            HillshadeParams {
                azimuth: away,
                altitude,
                z_factor: 1.0,
            },
        )
        .unwrap();

        // Interior cells of the plane all tilt the same way
        for row in 1..9 {
            for col in 1..9 {
                assert!(facing.get(row, col).unwrap() > shadowed.get(row, col).unwrap());
            }
        }
    }
}
