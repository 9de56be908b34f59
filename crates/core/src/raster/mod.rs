//! Grid data structures

mod element;
mod extent;
mod grid;

pub use element::GridElement;
pub use extent::GridExtent;
pub use grid::{Grid, GridStatistics};
