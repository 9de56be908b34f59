//! Inverse Distance Weighting (IDW) interpolation
//!
//! Estimates values at grid cell centers as a weighted average of sample
//! points, where weights are inversely proportional to distance raised to a
//! power parameter.
//!
//! Reference:
//! Shepard, D. (1968). A two-dimensional interpolation function for
//! irregularly-spaced data. ACM National Conference.

use crate::maybe_rayon::*;
use kartos_core::{Error, Grid, GridExtent, Result};
use ndarray::Array2;

use super::SamplePoint;

/// Parameters for IDW interpolation
#[derive(Debug, Clone)]
pub struct IdwParams {
    /// Power parameter (default: 2.0). Higher values give more weight to
    /// nearby points.
    pub power: f64,
    /// Cutoff radius. Samples beyond this distance are excluded; `None`
    /// uses every sample (global IDW).
    pub max_radius: Option<f64>,
    /// Output grid extent
    pub extent: GridExtent,
    /// Output grid cell size
    pub cell_size: f64,
}

impl Default for IdwParams {
    fn default() -> Self {
        Self {
            power: 2.0,
            max_radius: None,
            extent: GridExtent::new(0.0, 0.0, 100.0, 100.0),
            cell_size: 1.0,
        }
    }
}

/// Distance below which a cell center counts as coinciding with a sample
const SNAP_EPSILON: f64 = 1e-10;

/// Interpolate scattered points onto a grid with IDW.
///
/// For each cell center:
/// ```text
/// z = Σ(wᵢ·zᵢ) / Σ(wᵢ)   with   wᵢ = 1 / dᵢ^power
/// ```
///
/// A cell center coinciding with a sample (distance < 1e-10) takes that
/// sample's value directly, not a weighted average with the remaining
/// samples. Cells with no sample inside the cutoff radius become NaN (the
/// grid's nodata).
///
/// # Errors
/// - `EmptyInput` when no samples are given
/// - `InvalidParameter` for a non-positive power or cell size
pub fn idw(points: &[SamplePoint], params: IdwParams) -> Result<Grid<f64>> {
    if points.is_empty() {
        return Err(Error::EmptyInput);
    }
    if !(params.power > 0.0) {
        return Err(Error::invalid_parameter(
            "power",
            params.power,
            "must be > 0",
        ));
    }

    let mut output = Grid::<f64>::from_extent(params.extent, params.cell_size)?;
    let (rows, cols) = output.shape();
    let power = params.power;
    let max_radius_sq = params.max_radius.map(|r| r * r);
    let extent = params.extent;
    let cell_size = params.cell_size;

    let data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![f64::NAN; cols];

            for col in 0..cols {
                let (cx, cy) = extent.cell_center(row, col, cell_size);

                let mut sum_w = 0.0;
                let mut sum_wz = 0.0;
                let mut snapped = None;

                for pt in points {
                    let dsq = pt.dist_sq(cx, cy);

                    if dsq < SNAP_EPSILON * SNAP_EPSILON {
                        snapped = Some(pt.value);
                        break;
                    }

                    if let Some(max_sq) = max_radius_sq {
                        if dsq > max_sq {
                            continue;
                        }
                    }

                    let w = 1.0 / dsq.sqrt().powf(power);
                    sum_w += w;
                    sum_wz += w * pt.value;
                }

                if let Some(val) = snapped {
                    row_data[col] = val;
                } else if sum_w > 0.0 {
                    row_data[col] = sum_wz / sum_w;
                }
            }

            row_data
        })
        .collect();

    *output.data_mut() =
        Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))?;
    output.set_nodata(Some(f64::NAN));

    Ok(output)
}
