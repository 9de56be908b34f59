//! Attribute classification: filters, joins, aggregation, normalization
//! and class breaks
//!
//! Spatial relations here compare axis-aligned bounding boxes only. That is
//! an approximation of the exact polygon predicates and is never silently
//! strengthened.

mod aggregate;
mod breaks;
mod filter;
mod join;
mod normalize;

pub use aggregate::{aggregate, AggregateOp};
pub use breaks::{class_index, classify_breaks, BreakMethod};
pub use filter::{attribute_filter, FilterOp};
pub use join::{bbox_filter, spatial_join, SpatialRelation};
pub use normalize::{normalize, NormalizeMethod};
