//! Main Grid type

use crate::error::{Error, Result};
use crate::raster::{GridElement, GridExtent};
use ndarray::{Array2, ArrayView2, ArrayViewMut2};

/// A georeferenced 2D grid of cell values.
///
/// `Grid<T>` stores values of type `T` in row-major order together with a
/// geographic extent and a square cell size. Row 0 is the top row.
///
/// The kernel never mutates caller-owned grids; every operation allocates
/// and returns a fresh grid.
#[derive(Debug, Clone)]
pub struct Grid<T: GridElement> {
    /// Cell values in row-major order (row, col)
    data: Array2<T>,
    /// Geographic extent
    extent: GridExtent,
    /// Square cell size in extent units
    cell_size: f64,
    /// No-data value
    nodata: Option<T>,
}

impl<T: GridElement> Grid<T> {
    /// Create a grid covering `extent` at `cell_size`, filled with zeros.
    ///
    /// Dimensions are `rows = ceil(height / cell_size)`,
    /// `cols = ceil(width / cell_size)`.
    ///
    /// # Errors
    /// `InvalidParameter` if `cell_size` is not strictly positive, or the
    /// extent is degenerate (non-positive width or height).
    pub fn from_extent(extent: GridExtent, cell_size: f64) -> Result<Self> {
        if !(cell_size > 0.0) {
            return Err(Error::invalid_parameter(
                "cell_size",
                cell_size,
                "must be > 0",
            ));
        }
        if extent.width() <= 0.0 || extent.height() <= 0.0 {
            return Err(Error::invalid_parameter(
                "extent",
                format!(
                    "[{}, {}, {}, {}]",
                    extent.min_x, extent.min_y, extent.max_x, extent.max_y
                ),
                "width and height must be > 0",
            ));
        }

        let (rows, cols) = extent.shape_for(cell_size);
        Ok(Self {
            data: Array2::zeros((rows, cols)),
            extent,
            cell_size,
            nodata: None,
        })
    }

    /// Create a grid from existing row-major data.
    pub fn from_vec(
        data: Vec<T>,
        rows: usize,
        cols: usize,
        extent: GridExtent,
        cell_size: f64,
    ) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions { rows, cols });
        }

        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self {
            data: array,
            extent,
            cell_size,
            nodata: None,
        })
    }

    /// Create a grid with the same shape and georeferencing, filled with a value
    pub fn like(&self, fill_value: T) -> Self {
        Self {
            data: Array2::from_elem(self.data.dim(), fill_value),
            extent: self.extent,
            cell_size: self.cell_size,
            nodata: self.nodata,
        }
    }

    /// Create a grid with the same georeferencing but a different cell type
    pub fn with_same_meta<U: GridElement>(&self) -> Grid<U> {
        Grid {
            data: Array2::zeros(self.data.dim()),
            extent: self.extent,
            cell_size: self.cell_size,
            nodata: None,
        }
    }

    // Dimensions

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Data access

    /// Get value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Get value at (row, col) without bounds checking
    ///
    /// # Safety
    /// Caller must ensure row < self.rows() and col < self.cols()
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> T {
        unsafe { *self.data.uget((row, col)) }
    }

    /// Set value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        self.data[(row, col)] = value;
        Ok(())
    }

    /// Get a view of the underlying data
    pub fn view(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    /// Get a mutable view of the underlying data
    pub fn view_mut(&mut self) -> ArrayViewMut2<'_, T> {
        self.data.view_mut()
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    /// Get a mutable reference to the underlying array
    pub fn data_mut(&mut self) -> &mut Array2<T> {
        &mut self.data
    }

    /// Consume the grid and return the underlying array
    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    // Metadata

    /// Geographic extent
    pub fn extent(&self) -> GridExtent {
        self.extent
    }

    /// Cell size in extent units
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// No-data value
    pub fn nodata(&self) -> Option<T> {
        self.nodata
    }

    /// Set the no-data value
    pub fn set_nodata(&mut self, nodata: Option<T>) {
        self.nodata = nodata;
    }

    // Coordinate conversion

    /// Coordinates of the center of cell (row, col)
    pub fn cell_center(&self, row: usize, col: usize) -> (f64, f64) {
        self.extent.cell_center(row, col, self.cell_size)
    }

    /// Fractional cell indices of a coordinate
    pub fn cell_of(&self, x: f64, y: f64) -> (f64, f64) {
        self.extent.cell_of(x, y, self.cell_size)
    }

    // Value checks

    /// Check if a value is no-data
    pub fn is_nodata(&self, value: T) -> bool {
        value.is_nodata(self.nodata)
    }

    // Statistics

    /// Basic statistics (min, max, mean, count of valid cells)
    pub fn statistics(&self) -> GridStatistics<T> {
        let mut min = None;
        let mut max = None;
        let mut sum: f64 = 0.0;
        let mut count: usize = 0;

        for &value in self.data.iter() {
            if self.is_nodata(value) {
                continue;
            }

            if min.is_none() || value < min.unwrap() {
                min = Some(value);
            }
            if max.is_none() || value > max.unwrap() {
                max = Some(value);
            }

            if let Some(v) = value.to_f64() {
                sum += v;
                count += 1;
            }
        }

        let mean = if count > 0 {
            Some(sum / count as f64)
        } else {
            None
        };

        GridStatistics {
            min,
            max,
            mean,
            valid_count: count,
            nodata_count: self.len() - count,
        }
    }
}

/// Basic statistics for a grid
#[derive(Debug, Clone)]
pub struct GridStatistics<T> {
    pub min: Option<T>,
    pub max: Option<T>,
    pub mean: Option<f64>,
    pub valid_count: usize,
    pub nodata_count: usize,
}
