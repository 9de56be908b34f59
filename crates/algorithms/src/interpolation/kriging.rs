//! Ordinary kriging
//!
//! Covariance-matrix formulation: the sample covariance matrix is built from
//! a fitted spherical variogram (`C(h) = sill - gamma(h)`), inverted once
//! with Gauss-Jordan elimination, and reused for every grid cell. Per-cell
//! weights are the inverse times the sample-to-cell covariance vector,
//! normalized by their sum so a constant field is reproduced exactly.
//!
//! Reference:
//! Matheron, G. (1963). Principles of geostatistics. Economic Geology.

use crate::maybe_rayon::*;
use kartos_core::{linalg, Error, Grid, GridExtent, Result};
use ndarray::{Array1, Array2};

use super::{SamplePoint, VariogramModel};

/// Parameters for ordinary kriging
#[derive(Debug, Clone)]
pub struct KrigingParams {
    /// Output grid extent
    pub extent: GridExtent,
    /// Output grid cell size
    pub cell_size: f64,
}

/// Distance below which a cell center counts as coinciding with a sample
const SNAP_EPSILON: f64 = 1e-10;

/// Weight sums below this are treated as degenerate and fall back to the
/// sample mean
const WEIGHT_SUM_EPSILON: f64 = 1e-12;

/// Krige scattered samples onto a grid using a fitted variogram model.
///
/// A cell center coinciding with a sample takes that sample's value. If the
/// normalized weights degenerate (weight sum near zero, which happens when
/// every sample lies beyond the variogram range) the cell falls back to the
/// sample mean.
///
/// # Errors
/// - `InsufficientPoints` for fewer than 2 samples
/// - `NonInvertibleMatrix` when the sample covariance matrix is singular,
///   typically caused by duplicate sample locations
pub fn ordinary_kriging(
    points: &[SamplePoint],
    model: &VariogramModel,
    params: KrigingParams,
) -> Result<Grid<f64>> {
    if points.len() < 2 {
        return Err(Error::InsufficientPoints {
            needed: 2,
            got: points.len(),
        });
    }

    let n = points.len();
    let mut cov = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            let h = points[i].dist(points[j].x, points[j].y);
            cov[(i, j)] = model.covariance(h);
        }
    }
    let cov_inv = linalg::invert(&cov)?;

    let mean = points.iter().map(|p| p.value).sum::<f64>() / n as f64;

    let mut output = Grid::<f64>::from_extent(params.extent, params.cell_size)?;
    let (rows, cols) = output.shape();
    let extent = params.extent;
    let cell_size = params.cell_size;

    let data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![f64::NAN; cols];

            for col in 0..cols {
                let (cx, cy) = extent.cell_center(row, col, cell_size);

                let mut snapped = None;
                let mut cov_vec = Array1::<f64>::zeros(n);
                for (i, pt) in points.iter().enumerate() {
                    let dsq = pt.dist_sq(cx, cy);
                    if dsq < SNAP_EPSILON * SNAP_EPSILON {
                        snapped = Some(pt.value);
                        break;
                    }
                    cov_vec[i] = model.covariance(dsq.sqrt());
                }

                if let Some(val) = snapped {
                    row_data[col] = val;
                    continue;
                }

                let weights = cov_inv.dot(&cov_vec);
                let weight_sum: f64 = weights.iter().sum();

                row_data[col] = if weight_sum.abs() < WEIGHT_SUM_EPSILON {
                    mean
                } else {
                    let mut estimate = 0.0;
                    for (i, pt) in points.iter().enumerate() {
                        estimate += weights[i] / weight_sum * pt.value;
                    }
                    estimate
                };
            }

            row_data
        })
        .collect();

    *output.data_mut() =
        Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))?;
    output.set_nodata(Some(f64::NAN));

    Ok(output)
}
