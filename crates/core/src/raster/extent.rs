//! Grid extent: axis-aligned bounding box plus square cell size

use serde::{Deserialize, Serialize};

/// Axis-aligned geographic extent of a grid.
///
/// Grids are north-up with square cells; row 0 is the topmost row and the
/// conversion between cell indices and coordinates uses cell centers:
/// ```text
/// x = min_x + (col + 0.5) * cell_size
/// y = max_y - (row + 0.5) * cell_size
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridExtent {
    /// X coordinate of the left edge
    pub min_x: f64,
    /// Y coordinate of the bottom edge
    pub min_y: f64,
    /// X coordinate of the right edge
    pub max_x: f64,
    /// Y coordinate of the top edge
    pub max_y: f64,
}

impl GridExtent {
    /// Create a new extent from corner coordinates
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Extent width (X span)
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent height (Y span)
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Grid shape (rows, cols) for a given cell size.
    ///
    /// `rows = ceil(height / cell_size)`, `cols = ceil(width / cell_size)`.
    pub fn shape_for(&self, cell_size: f64) -> (usize, usize) {
        let rows = (self.height() / cell_size).ceil().max(0.0) as usize;
        let cols = (self.width() / cell_size).ceil().max(0.0) as usize;
        (rows, cols)
    }

    /// Coordinates of the center of cell (row, col) for a given cell size
    pub fn cell_center(&self, row: usize, col: usize, cell_size: f64) -> (f64, f64) {
        let x = self.min_x + (col as f64 + 0.5) * cell_size;
        let y = self.max_y - (row as f64 + 0.5) * cell_size;
        (x, y)
    }

    /// Fractional cell indices (row, col) of a coordinate for a given cell size.
    ///
    /// Use `.floor()` to get integer indices; values may fall outside the grid.
    pub fn cell_of(&self, x: f64, y: f64, cell_size: f64) -> (f64, f64) {
        let col = (x - self.min_x) / cell_size;
        let row = (self.max_y - y) / cell_size;
        (row, col)
    }

    /// Whether a coordinate lies inside the extent (edges inclusive)
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl Default for GridExtent {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}
