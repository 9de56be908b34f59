//! # Kartos Core
//!
//! Core types and shared numerics for the kartos spatial analysis kernel.
//!
//! This crate provides:
//! - `Grid<T>`: row-major raster grid with extent and cell size
//! - `Feature` / `FeatureCollection`: geometry plus attribute mapping
//! - `Crs`: projection registry and closed-form Web Mercator transforms
//! - WKT parsing and serialization for the seven geometry kinds
//! - Dense linear algebra shared by kriging and classification
//!
//! All kernel state is per call: functions take caller-owned inputs and
//! return freshly allocated outputs, with no caches or singletons.

pub mod crs;
pub mod error;
pub mod linalg;
pub mod raster;
pub mod vector;
pub mod wkt;

pub use crs::Crs;
pub use error::{Error, Result};
pub use raster::{Grid, GridElement, GridExtent};
pub use vector::{AttributeValue, Feature, FeatureCollection};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crs::Crs;
    pub use crate::error::{Error, Result};
    pub use crate::raster::{Grid, GridElement, GridExtent};
    pub use crate::vector::{AttributeValue, Feature, FeatureCollection};
}
