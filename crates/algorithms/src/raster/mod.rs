//! Raster analysis: band math, terrain derivatives, convolution and
//! supervised classification
//!
//! Terrain functions share the Horn (1981) 3x3 gradient stencil. Edge cells
//! lack a full neighborhood and are emitted as NaN.

mod aspect;
mod classify;
mod convolve;
mod hillshade;
mod indices;
mod slope;

pub use aspect::aspect;
pub use classify::{maximum_likelihood, ClassSignature, MaxLikelihoodParams, UNCLASSIFIED};
pub use convolve::{convolve, Kernel};
pub use hillshade::{hillshade, HillshadeParams};
pub use indices::{dvi, ndsi, ndvi, ndwi, normalized_difference, IndexParams};
pub use slope::{slope, SlopeParams, SlopeUnits};

use kartos_core::Grid;

/// Horn 3x3 gradients at (row, col), already divided by 8 * cell_size.
///
/// Returns `None` for edge cells and for neighborhoods containing NaN or the
/// grid's nodata value.
pub(crate) fn horn_gradients(
    dem: &Grid<f64>,
    row: usize,
    col: usize,
    eight_cell_size: f64,
) -> Option<(f64, f64)> {
    let (rows, cols) = dem.shape();
    if row == 0 || row == rows - 1 || col == 0 || col == cols - 1 {
        return None;
    }

    // a b c
    // d e f
    // g h i
    let a = unsafe { dem.get_unchecked(row - 1, col - 1) };
    let b = unsafe { dem.get_unchecked(row - 1, col) };
    let c = unsafe { dem.get_unchecked(row - 1, col + 1) };
    let d = unsafe { dem.get_unchecked(row, col - 1) };
    let e = unsafe { dem.get_unchecked(row, col) };
    let f = unsafe { dem.get_unchecked(row, col + 1) };
    let g = unsafe { dem.get_unchecked(row + 1, col - 1) };
    let h = unsafe { dem.get_unchecked(row + 1, col) };
    let i = unsafe { dem.get_unchecked(row + 1, col + 1) };

    if [a, b, c, d, e, f, g, h, i]
        .iter()
        .any(|&v| v.is_nan() || dem.is_nodata(v))
    {
        return None;
    }

    let dz_dx = ((c + 2.0 * f + i) - (a + 2.0 * d + g)) / eight_cell_size;
    let dz_dy = ((g + 2.0 * h + i) - (a + 2.0 * b + c)) / eight_cell_size;
    Some((dz_dx, dz_dy))
}

#[cfg(test)]
pub(crate) mod test_support {
    use kartos_core::{Grid, GridExtent};

    /// A 10x10 tilted plane z = row + col with unit cells
    pub fn tilted_dem() -> Grid<f64> {
        let mut dem =
            Grid::<f64>::from_extent(GridExtent::new(0.0, 0.0, 10.0, 10.0), 1.0).unwrap();
        for row in 0..10 {
            for col in 0..10 {
                dem.set(row, col, (row + col) as f64).unwrap();
            }
        }
        dem
    }

    /// A 10x10 constant surface with unit cells
    pub fn flat_dem(value: f64) -> Grid<f64> {
        let mut dem =
            Grid::<f64>::from_extent(GridExtent::new(0.0, 0.0, 10.0, 10.0), 1.0).unwrap();
        for row in 0..10 {
            for col in 0..10 {
                dem.set(row, col, value).unwrap();
            }
        }
        dem
    }
}
