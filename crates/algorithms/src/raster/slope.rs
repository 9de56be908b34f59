//! Slope from elevation grids
//!
//! Rate of change of elevation using the Horn (1981) method over a 3x3
//! neighborhood.

use crate::maybe_rayon::*;
use crate::raster::horn_gradients;
use kartos_core::{Error, Grid, Result};
use ndarray::Array2;

/// Units for slope output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlopeUnits {
    /// Degrees (0-90)
    #[default]
    Degrees,
    /// Percent rise
    Percent,
    /// Radians (0-π/2)
    Radians,
}

/// Parameters for slope calculation
#[derive(Debug, Clone)]
pub struct SlopeParams {
    /// Output units
    pub units: SlopeUnits,
    /// Z-factor for vertical unit conversion (default 1.0).
    /// Use ~111320 for degree grids carrying meter elevations.
    pub z_factor: f64,
}

impl Default for SlopeParams {
    fn default() -> Self {
        Self {
            units: SlopeUnits::Degrees,
            z_factor: 1.0,
        }
    }
}

/// Calculate slope from an elevation grid.
///
/// ```text
/// dz/dx = ((c + 2f + i) - (a + 2d + g)) / (8 * cellsize)
/// dz/dy = ((g + 2h + i) - (a + 2b + c)) / (8 * cellsize)
/// slope = atan(sqrt(dz/dx² + dz/dy²))
/// ```
///
/// Edge cells and cells with nodata in their neighborhood become NaN.
pub fn slope(dem: &Grid<f64>, params: SlopeParams) -> Result<Grid<f64>> {
    let (rows, cols) = dem.shape();
    let eight_cell_size = 8.0 * dem.cell_size() * params.z_factor;

    let output_data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![f64::NAN; cols];

            for col in 0..cols {
                if let Some((dz_dx, dz_dy)) = horn_gradients(dem, row, col, eight_cell_size) {
                    let slope_rad = (dz_dx * dz_dx + dz_dy * dz_dy).sqrt().atan();
                    row_data[col] = match params.units {
                        SlopeUnits::Degrees => slope_rad.to_degrees(),
                        SlopeUnits::Percent => slope_rad.tan() * 100.0,
                        SlopeUnits::Radians => slope_rad,
                    };
                }
            }

            row_data
        })
        .collect();

    let mut output = dem.with_same_meta::<f64>();
    output.set_nodata(Some(f64::NAN));
    *output.data_mut() = Array2::from_shape_vec((rows, cols), output_data)
        .map_err(|e| Error::Other(e.to_string()))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::test_support::{flat_dem, tilted_dem};

    #[test]
    fn test_slope_flat() {
        let result = slope(&flat_dem(100.0), SlopeParams::default()).unwrap();
        let val = result.get(5, 5).unwrap();
        assert!(val.abs() < 0.001, "expected ~0 slope, got {val}");
    }

    #[test]
    fn test_slope_uniform_on_tilted_plane() {
        let result = slope(&tilted_dem(), SlopeParams::default()).unwrap();
        let val1 = result.get(3, 3).unwrap();
        let val2 = result.get(5, 5).unwrap();
        assert!((val1 - val2).abs() < 0.001);
    }

    #[test]
    fn test_slope_edges_are_nan() {
        let result = slope(&tilted_dem(), SlopeParams::default()).unwrap();
        assert!(result.get(0, 5).unwrap().is_nan());
        assert!(result.get(5, 0).unwrap().is_nan());
        assert!(result.get(9, 9).unwrap().is_nan());
    }

    #[test]
    fn test_slope_units_consistent() {
        let dem = tilted_dem();
        let deg = slope(
            &dem,
            SlopeParams {
                units: SlopeUnits::Degrees,
                z_factor: 1.0,
            },
        )
        .unwrap();
        let rad = slope(
            &dem,
            SlopeParams {
                units: SlopeUnits::Radians,
                z_factor: 1.0,
            },
        )
        .unwrap();
        let pct = slope(
            &dem,
            SlopeParams {
                units: SlopeUnits::Percent,
                z_factor: 1.0,
            },
        )
        .unwrap();

        let r = rad.get(5, 5).unwrap();
        assert!((deg.get(5, 5).unwrap() - r.to_degrees()).abs() < 1e-9);
        assert!((pct.get(5, 5).unwrap() - r.tan() * 100.0).abs() < 1e-9);
    }
}
