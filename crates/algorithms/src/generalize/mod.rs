//! Line and polygon generalization
//!
//! - Douglas-Peucker and Visvalingam-Whyatt simplification
//! - Chaikin corner-cutting smoothing
//! - Dissolve by attribute or adjacency
//!
//! Dissolve replaces each merged group with the convex hull of its combined
//! vertices. That loses concavities; it is an approximation of true
//! geometric union, not an equivalent.

mod dissolve;
mod simplify;
mod smooth;

pub use dissolve::{dissolve_by_adjacency, dissolve_by_attribute};
pub use simplify::{douglas_peucker, visvalingam};
pub use smooth::chaikin;
