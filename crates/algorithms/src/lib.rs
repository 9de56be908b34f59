//! # Kartos Algorithms
//!
//! Spatial analysis algorithms for Kartos.
//!
//! ## Available Algorithm Categories
//!
//! - **vector**: Measurements, predicates, buffering, clipping, hulls
//! - **network**: Graph building, shortest paths, isochrones, tours, centrality
//! - **interpolation**: IDW, variogram fitting, ordinary kriging
//! - **raster**: Band indices, terrain derivatives, convolution, classification
//! - **generalize**: Simplification, smoothing, dissolve
//! - **classify**: Attribute filters, joins, aggregation, class breaks
//!
//! Every function is stateless: inputs are read-only and outputs are freshly
//! allocated. Long-running calls (betweenness centrality, kriging on large
//! grids) must be bounded or offloaded by the caller.

pub mod classify;
pub mod generalize;
pub mod interpolation;
mod maybe_rayon;
pub mod network;
pub mod raster;
pub mod vector;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classify::{
        aggregate, attribute_filter, bbox_filter, class_index, classify_breaks, normalize,
        spatial_join, AggregateOp, BreakMethod, FilterOp, NormalizeMethod, SpatialRelation,
    };
    pub use crate::generalize::{
        chaikin, dissolve_by_adjacency, dissolve_by_attribute, douglas_peucker, visvalingam,
    };
    pub use crate::interpolation::{
        empirical_variogram, fit_spherical_variogram, idw, ordinary_kriging, EmpiricalVariogram,
        IdwParams, KrigingParams, SamplePoint, VariogramModel, VariogramParams,
    };
    pub use crate::network::{
        betweenness_centrality, build_network, greedy_tour, isochrone, shortest_path, Network,
        NodeId, PathResult,
    };
    pub use crate::raster::{
        aspect, convolve, dvi, hillshade, maximum_likelihood, ndsi, ndvi, ndwi,
        normalized_difference, slope, ClassSignature, HillshadeParams, IndexParams, Kernel,
        MaxLikelihoodParams, SlopeParams, SlopeUnits, UNCLASSIFIED,
    };
    pub use crate::vector::{
        bounding_box, buffer_geometry, buffer_point, centroid, clip, convex_hull, distance,
        geometry_vertices, line_length, nearest_point, perimeter, point_in_polygon, ring_area,
        union, BoundingBox, DistanceMode, NearestPoint,
    };
    pub use kartos_core::prelude::*;
}
