//! Point-in-polygon and nearest-point queries

use super::measurements::{distance, DistanceMode};
use geo_types::{Coord, LineString, Polygon};

/// Ray-casting (even-odd) point-in-polygon test.
///
/// A horizontal ray is cast to the right and boundary crossings counted over
/// the exterior and every interior ring, so holes are excluded naturally.
/// Points exactly on an edge may land on either side of the boundary.
pub fn point_in_polygon(point: Coord<f64>, polygon: &Polygon<f64>) -> bool {
    let mut inside = ring_crossings(point, polygon.exterior()) % 2 == 1;
    for ring in polygon.interiors() {
        if ring_crossings(point, ring) % 2 == 1 {
            inside = !inside;
        }
    }
    inside
}

fn ring_crossings(point: Coord<f64>, ring: &LineString<f64>) -> usize {
    let pts = &ring.0;
    if pts.len() < 3 {
        return 0;
    }

    let mut crossings = 0;
    let n = pts.len();
    let mut j = n - 1;
    for i in 0..n {
        let pi = pts[i];
        let pj = pts[j];
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                crossings += 1;
            }
        }
        j = i;
    }
    crossings
}

/// Result of a nearest-point query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPoint {
    pub point: Coord<f64>,
    pub distance: f64,
    /// Index of the winning candidate in the input slice
    pub index: usize,
}

/// Linear scan for the candidate closest to `target`.
///
/// Empty candidates yield `None`, not an error. Ties keep the earliest
/// candidate.
pub fn nearest_point(
    target: Coord<f64>,
    candidates: &[Coord<f64>],
    mode: DistanceMode,
) -> Option<NearestPoint> {
    let mut best: Option<NearestPoint> = None;
    for (index, &point) in candidates.iter().enumerate() {
        let d = distance(target, point, mode);
        if best.map_or(true, |b| d < b.distance) {
            best = Some(NearestPoint {
                point,
                distance: d,
                index,
            });
        }
    }
    best
}
