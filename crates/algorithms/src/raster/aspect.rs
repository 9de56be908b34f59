//! Aspect (downslope direction) from elevation grids

use crate::maybe_rayon::*;
use crate::raster::horn_gradients;
use kartos_core::{Error, Grid, Result};
use ndarray::Array2;
use std::f64::consts::PI;

/// Gradient magnitude below which a cell is considered flat
const FLAT_THRESHOLD: f64 = 1e-10;

/// Calculate aspect in degrees from an elevation grid.
///
/// ```text
/// aspect = atan2(dz/dy, -dz/dx)
/// ```
/// normalized to [0, 360). Flat cells get -1.0; edge cells and cells with
/// nodata in their neighborhood get NaN.
pub fn aspect(dem: &Grid<f64>) -> Result<Grid<f64>> {
    let (rows, cols) = dem.shape();
    let eight_cell_size = 8.0 * dem.cell_size();

    let output_data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![f64::NAN; cols];

            for col in 0..cols {
                if let Some((dz_dx, dz_dy)) = horn_gradients(dem, row, col, eight_cell_size) {
                    if dz_dx.abs() < FLAT_THRESHOLD && dz_dy.abs() < FLAT_THRESHOLD {
                        row_data[col] = -1.0;
                        continue;
                    }

                    let mut a = dz_dy.atan2(-dz_dx);
                    if a < 0.0 {
                        a += 2.0 * PI;
                    }
                    row_data[col] = a.to_degrees() % 360.0;
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
    fn test_aspect_in_range() {
        let result = aspect(&tilted_dem()).unwrap();
        for row in 1..9 {
            for col in 1..9 {
                let val = result.get(row, col).unwrap();
                assert!((0.0..360.0).contains(&val), "aspect {val} out of range");
            }
        }
    }

    #[test]
    fn test_aspect_flat_sentinel() {
        let result = aspect(&flat_dem(42.0)).unwrap();
        assert_eq!(result.get(5, 5).unwrap(), -1.0);
    }

    #[test]
    fn test_aspect_edges_are_nan() {
        let result = aspect(&tilted_dem()).unwrap();
        assert!(result.get(0, 0).unwrap().is_nan());
        assert!(result.get(9, 5).unwrap().is_nan());
    }

    #[test]
    fn test_aspect_uniform_on_tilted_plane() {
        let result = aspect(&tilted_dem()).unwrap();
        let a1 = result.get(3, 4).unwrap();
        let a2 = result.get(6, 6).unwrap();
        assert!((a1 - a2).abs() < 1e-9);
    }
}
