//! Grid convolution with preset kernels
//!
//! Edge handling clamps the window to the grid: out-of-bounds taps
//! contribute nothing and the result is renormalized by the sum of in-bounds
//! weights, so borders keep a consistent magnitude instead of darkening.

use crate::maybe_rayon::*;
use kartos_core::{Error, Grid, Result};
use ndarray::Array2;

/// A convolution kernel of odd dimensions
#[derive(Debug, Clone)]
pub struct Kernel {
    weights: Array2<f64>,
}

impl Kernel {
    /// Build a kernel from row-major weights.
    ///
    /// # Errors
    /// `InvalidDimensions` unless both dimensions are odd.
    pub fn new(weights: Array2<f64>) -> Result<Self> {
        let (rows, cols) = weights.dim();
        if rows % 2 == 0 || cols % 2 == 0 || rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        Ok(Self { weights })
    }

    /// 3x3 Gaussian blur (σ ≈ 0.85)
    pub fn gaussian3x3() -> Self {
        Self {
            weights: ndarray::arr2(&[
                [1.0, 2.0, 1.0],
                [2.0, 4.0, 2.0],
                [1.0, 2.0, 1.0],
            ]) / 16.0,
        }
    }

    /// Sobel horizontal-gradient operator
    pub fn sobel_x() -> Self {
        Self {
            weights: ndarray::arr2(&[
                [-1.0, 0.0, 1.0],
                [-2.0, 0.0, 2.0],
                [-1.0, 0.0, 1.0],
            ]),
        }
    }

    /// Sobel vertical-gradient operator
    pub fn sobel_y() -> Self {
        Self {
            weights: ndarray::arr2(&[
                [-1.0, -2.0, -1.0],
                [0.0, 0.0, 0.0],
                [1.0, 2.0, 1.0],
            ]),
        }
    }

    /// 4-connected Laplacian
    pub fn laplacian() -> Self {
        Self {
            weights: ndarray::arr2(&[
                [0.0, 1.0, 0.0],
                [1.0, -4.0, 1.0],
                [0.0, 1.0, 0.0],
            ]),
        }
    }

    /// Mean box filter of the given odd size
    ///
    /// # Errors
    /// `InvalidDimensions` for an even or zero size.
    pub fn mean_box(size: usize) -> Result<Self> {
        if size % 2 == 0 || size == 0 {
            return Err(Error::InvalidDimensions {
                rows: size,
                cols: size,
            });
        }
        let w = 1.0 / (size * size) as f64;
        Ok(Self {
            weights: Array2::from_elem((size, size), w),
        })
    }

    /// Kernel weights
    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }
}

/// Convolve a grid with a kernel.
///
/// For each cell, out-of-bounds and NaN/nodata taps are skipped and the
/// accumulated sum is renormalized by the in-bounds weight sum. Windows with
/// zero total weight (differencing kernels) keep the raw sum; cells whose
/// center is nodata become NaN.
pub fn convolve(grid: &Grid<f64>, kernel: &Kernel) -> Result<Grid<f64>> {
    let (rows, cols) = grid.shape();
    let (krows, kcols) = kernel.weights.dim();
    let half_r = (krows / 2) as isize;
    let half_c = (kcols / 2) as isize;
    let weights = &kernel.weights;

    let output_data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![f64::NAN; cols];

            for col in 0..cols {
                let center = unsafe { grid.get_unchecked(row, col) };
                if center.is_nan() || grid.is_nodata(center) {
                    continue;
                }

                let mut sum = 0.0;
                let mut weight_sum = 0.0;

                for kr in 0..krows {
                    for kc in 0..kcols {
                        let w = weights[(kr, kc)];

                        let r = row as isize + kr as isize - half_r;
                        let c = col as isize + kc as isize - half_c;
                        if r < 0 || c < 0 || r >= rows as isize || c >= cols as isize {
                            continue;
                        }

                        let v = unsafe { grid.get_unchecked(r as usize, c as usize) };
                        if v.is_nan() || grid.is_nodata(v) {
                            continue;
                        }
                        sum += w * v;
                        weight_sum += w;
                    }
                }

                // Zero-sum windows (Sobel, Laplacian interiors) keep the raw
                // accumulated response; otherwise renormalize by the
                // in-bounds weight sum.
                row_data[col] = if weight_sum.abs() < f64::EPSILON {
                    sum
                } else {
                    sum / weight_sum
                };
            }

            row_data
        })
        .collect();

    let mut output = grid.with_same_meta::<f64>();
    output.set_nodata(Some(f64::NAN));
    *output.data_mut() = Array2::from_shape_vec((rows, cols), output_data)
        .map_err(|e| Error::Other(e.to_string()))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::test_support::flat_dem;

    #[test]
    fn test_gaussian_preserves_constant() {
        let grid = flat_dem(7.0);
        let result = convolve(&grid, &Kernel::gaussian3x3()).unwrap();
        // Renormalization keeps edges at the constant too
        for row in 0..10 {
            for col in 0..10 {
                assert!((result.get(row, col).unwrap() - 7.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_mean_box_preserves_constant() {
        let grid = flat_dem(3.0);
        let result = convolve(&grid, &Kernel::mean_box(5).unwrap()).unwrap();
        assert!((result.get(0, 0).unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_sobel_zero_on_constant() {
        let grid = flat_dem(5.0);
        let result = convolve(&grid, &Kernel::sobel_x()).unwrap();
        assert!(result.get(5, 5).unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_sobel_detects_gradient() {
        let mut grid = flat_dem(0.0);
        for row in 0..10 {
            for col in 0..10 {
                grid.set(row, col, col as f64).unwrap();
            }
        }
        let result = convolve(&grid, &Kernel::sobel_x()).unwrap();
        // Constant unit gradient in x: Sobel responds with 8
        assert!((result.get(5, 5).unwrap() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_laplacian_zero_on_plane() {
        let mut grid = flat_dem(0.0);
        for row in 0..10 {
            for col in 0..10 {
                grid.set(row, col, (row + col) as f64).unwrap();
            }
        }
        let result = convolve(&grid, &Kernel::laplacian()).unwrap();
        assert!(result.get(5, 5).unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_even_kernel_rejected() {
        assert!(Kernel::new(Array2::zeros((2, 3))).is_err());
        assert!(Kernel::mean_box(4).is_err());
    }
}
