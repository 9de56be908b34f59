//! Spatial interpolation: scattered points onto regular grids
//!
//! - IDW: inverse distance weighting with exact-match snapping
//! - Variogram: experimental semivariance and spherical model fitting
//! - Ordinary kriging: covariance-matrix weights from a fitted variogram

mod idw;
mod kriging;
mod variogram;

pub use idw::{idw, IdwParams};
pub use kriging::{ordinary_kriging, KrigingParams};
pub use variogram::{
    empirical_variogram, fit_spherical_variogram, EmpiricalVariogram, VariogramModel,
    VariogramParams,
};

/// A sample point with x, y coordinates and a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl SamplePoint {
    pub fn new(x: f64, y: f64, value: f64) -> Self {
        Self { x, y, value }
    }

    /// Squared Euclidean distance to a coordinate
    #[inline]
    pub fn dist_sq(&self, other_x: f64, other_y: f64) -> f64 {
        let dx = self.x - other_x;
        let dy = self.y - other_y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to a coordinate
    #[inline]
    pub fn dist(&self, other_x: f64, other_y: f64) -> f64 {
        self.dist_sq(other_x, other_y).sqrt()
    }
}
