//! Geometric measurements: distance, area, length, centroid, bounding box

use geo_types::{Coord, LineString, Polygon};
use kartos_core::{Error, Result};

/// Mean Earth radius in meters, used by the haversine distance
pub const EARTH_RADIUS_MEAN: f64 = 6_371_000.0;

/// Distance metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMode {
    /// Planar Euclidean distance in coordinate units
    #[default]
    Planar,
    /// Great-circle (haversine) distance in meters; coordinates are
    /// interpreted as lon/lat degrees
    Haversine,
}

/// Distance between two points.
///
/// Symmetric, and exactly zero for identical points in both modes.
pub fn distance(a: Coord<f64>, b: Coord<f64>, mode: DistanceMode) -> f64 {
    match mode {
        DistanceMode::Planar => {
            let dx = b.x - a.x;
            let dy = b.y - a.y;
            (dx * dx + dy * dy).sqrt()
        }
        DistanceMode::Haversine => {
            let lat1 = a.y.to_radians();
            let lat2 = b.y.to_radians();
            let dlat = (b.y - a.y).to_radians();
            let dlon = (b.x - a.x).to_radians();

            let h = (dlat / 2.0).sin().powi(2)
                + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
            2.0 * EARTH_RADIUS_MEAN * h.sqrt().asin()
        }
    }
}

/// Unsigned area of a ring via the shoelace formula.
///
/// The ring may be open or closed; fewer than 3 points yields 0.
pub fn ring_area(ring: &[Coord<f64>]) -> f64 {
    // Drop the closing duplicate if present
    let pts = closed_slice(ring);
    if pts.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..pts.len() {
        let j = (i + 1) % pts.len();
        sum += pts[i].x * pts[j].y - pts[j].x * pts[i].y;
    }
    (sum / 2.0).abs()
}

/// Length of an open polyline: the sum of consecutive segment distances.
pub fn line_length(line: &LineString<f64>, mode: DistanceMode) -> f64 {
    line.0
        .windows(2)
        .map(|w| distance(w[0], w[1], mode))
        .sum()
}

/// Perimeter of a polygon: exterior plus interior ring lengths, each ring
/// closed implicitly if its first and last points differ.
pub fn perimeter(polygon: &Polygon<f64>, mode: DistanceMode) -> f64 {
    let ring_len = |ring: &LineString<f64>| -> f64 {
        let pts = closed_slice(&ring.0);
        if pts.len() < 2 {
            return 0.0;
        }
        let mut total = 0.0;
        for i in 0..pts.len() {
            let j = (i + 1) % pts.len();
            total += distance(pts[i], pts[j], mode);
        }
        total
    };

    ring_len(polygon.exterior())
        + polygon.interiors().iter().map(ring_len).sum::<f64>()
}

/// Arithmetic mean of a point set.
///
/// This is the vertex mean, not the area-weighted polygon centroid; for
/// non-convex polygons the result can fall outside the shape.
///
/// # Errors
/// `EmptyInput` for an empty slice.
pub fn centroid(points: &[Coord<f64>]) -> Result<Coord<f64>> {
    if points.is_empty() {
        return Err(Error::EmptyInput);
    }
    let n = points.len() as f64;
    let sum = points.iter().fold((0.0, 0.0), |acc, p| (acc.0 + p.x, acc.1 + p.y));
    Ok(Coord {
        x: sum.0 / n,
        y: sum.1 / n,
    })
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Whether the other box lies entirely inside this one
    pub fn contains(&self, other: &BoundingBox) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Whether the boxes touch along an edge or corner without overlapping
    /// interior area
    pub fn touches(&self, other: &BoundingBox) -> bool {
        if !self.intersects(other) {
            return false;
        }
        self.min_x == other.max_x
            || self.max_x == other.min_x
            || self.min_y == other.max_y
            || self.max_y == other.min_y
    }
}

/// Min/max scan over a point set.
///
/// # Errors
/// `EmptyInput` for an empty slice.
pub fn bounding_box(points: &[Coord<f64>]) -> Result<BoundingBox> {
    if points.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut bb = BoundingBox::new(
        f64::INFINITY,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NEG_INFINITY,
    );
    for p in points {
        bb.min_x = bb.min_x.min(p.x);
        bb.min_y = bb.min_y.min(p.y);
        bb.max_x = bb.max_x.max(p.x);
        bb.max_y = bb.max_y.max(p.y);
    }
    Ok(bb)
}

/// View of a ring without its closing duplicate point
fn closed_slice(ring: &[Coord<f64>]) -> &[Coord<f64>] {
    if ring.len() >= 2 && ring.first() == ring.last() {
        &ring[..ring.len() - 1]
    } else {
        ring
    }
}
