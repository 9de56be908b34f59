//! Line simplification
//!
//! Douglas-Peucker keeps the vertices that deviate most from the chord;
//! Visvalingam-Whyatt repeatedly drops the vertex spanning the smallest
//! triangle with its neighbors until a target count remains.
//!
//! References:
//! Douglas & Peucker (1973), Cartographica 10(2).
//! Visvalingam & Whyatt (1993), The Cartographic Journal 30(1).

use geo_types::Coord;
use kartos_core::{Error, Result};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Perpendicular distance from `point` to the infinite line through
/// `start`-`end`; falls back to point distance for a degenerate chord
fn perpendicular_distance(point: Coord<f64>, start: Coord<f64>, end: Coord<f64>) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len < f64::EPSILON {
        let px = point.x - start.x;
        let py = point.y - start.y;
        return (px * px + py * py).sqrt();
    }
    ((end.x - start.x) * (start.y - point.y) - (start.x - point.x) * (end.y - start.y)).abs() / len
}

/// Simplify a polyline with Douglas-Peucker.
///
/// Recursively splits at the vertex of maximum perpendicular distance from
/// the chord; segments whose maximum deviation is within `tolerance`
/// collapse to their endpoints. Inputs of fewer than 3 points are returned
/// unchanged, and tolerance 0 preserves every point.
///
/// # Errors
/// `InvalidParameter` for a negative or non-finite tolerance.
pub fn douglas_peucker(points: &[Coord<f64>], tolerance: f64) -> Result<Vec<Coord<f64>>> {
    if !(tolerance >= 0.0) {
        return Err(Error::invalid_parameter(
            "tolerance",
            tolerance,
            "must be non-negative",
        ));
    }
    // Tolerance 0 preserves every point, collinear runs included
    if points.len() < 3 || tolerance == 0.0 {
        return Ok(points.to_vec());
    }

    let mut out = Vec::with_capacity(points.len());
    out.push(points[0]);
    dp_recurse(points, tolerance, &mut out);
    out.push(points[points.len() - 1]);
    Ok(out)
}

/// Append the kept interior vertices of `segment` (exclusive of both ends)
fn dp_recurse(segment: &[Coord<f64>], tolerance: f64, out: &mut Vec<Coord<f64>>) {
    if segment.len() < 3 {
        return;
    }
    let start = segment[0];
    let end = segment[segment.len() - 1];

    let mut max_dist = -1.0;
    let mut max_idx = 0;
    for (i, &p) in segment.iter().enumerate().skip(1).take(segment.len() - 2) {
        let d = perpendicular_distance(p, start, end);
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }

    if max_dist > tolerance {
        dp_recurse(&segment[..=max_idx], tolerance, out);
        out.push(segment[max_idx]);
        dp_recurse(&segment[max_idx..], tolerance, out);
    }
}

fn triangle_area(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> f64 {
    ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() / 2.0
}

/// Heap entry for Visvalingam: smallest effective area first
#[derive(Debug, Clone, Copy)]
struct AreaEntry {
    area: f64,
    index: usize,
    version: u64,
}

impl PartialEq for AreaEntry {
    fn eq(&self, other: &Self) -> bool {
        self.area == other.area
    }
}
impl Eq for AreaEntry {}
impl PartialOrd for AreaEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for AreaEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse: smaller area has higher priority
        other
            .area
            .partial_cmp(&self.area)
            .unwrap_or(Ordering::Equal)
    }
}

/// Simplify a polyline with Visvalingam-Whyatt down to `target_count`
/// points.
///
/// Uses a binary heap of triangle areas with lazy invalidation: removing a
/// vertex bumps a version counter on its neighbors and pushes fresh entries
/// instead of rebuilding the heap. Endpoints are always kept; a target at or
/// above the input length returns the input unchanged.
///
/// # Errors
/// `InvalidParameter` for a target below 2.
pub fn visvalingam(points: &[Coord<f64>], target_count: usize) -> Result<Vec<Coord<f64>>> {
    if target_count < 2 {
        return Err(Error::invalid_parameter(
            "target_count",
            target_count,
            "must be >= 2",
        ));
    }
    if points.len() <= target_count || points.len() < 3 {
        return Ok(points.to_vec());
    }

    let n = points.len();
    // Doubly linked indices over the original slice
    let mut prev: Vec<usize> = (0..n).map(|i| i.wrapping_sub(1)).collect();
    let mut next: Vec<usize> = (1..=n).collect();
    let mut alive = vec![true; n];
    let mut version = vec![0u64; n];

    let mut heap = BinaryHeap::new();
    for i in 1..n - 1 {
        heap.push(AreaEntry {
            area: triangle_area(points[i - 1], points[i], points[i + 1]),
            index: i,
            version: 0,
        });
    }

    let mut remaining = n;
    while remaining > target_count {
        let entry = match heap.pop() {
            Some(e) => e,
            None => break,
        };
        if !alive[entry.index] || entry.version != version[entry.index] {
            continue; // stale entry
        }

        let i = entry.index;
        alive[i] = false;
        remaining -= 1;

        let p = prev[i];
        let nx = next[i];
        next[p] = nx;
        prev[nx] = p;

        // Recompute neighbor triangles against their new neighbors
        for &j in &[p, nx] {
            if j == 0 || j == n - 1 || !alive[j] {
                continue;
            }
            version[j] += 1;
            heap.push(AreaEntry {
                area: triangle_area(points[prev[j]], points[j], points[next[j]]),
                index: j,
                version: version[j],
            });
        }
    }

    Ok(points
        .iter()
        .enumerate()
        .filter(|(i, _)| alive[*i])
        .map(|(_, &p)| p)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    fn zigzag() -> Vec<Coord<f64>> {
        vec![
            c(0.0, 0.0),
            c(1.0, 0.1),
            c(2.0, -0.1),
            c(3.0, 5.0),
            c(4.0, 0.1),
            c(5.0, 0.0),
        ]
    }

    #[test]
    fn test_dp_zero_tolerance_keeps_all() {
        let pts = zigzag();
        let out = douglas_peucker(&pts, 0.0).unwrap();
        assert_eq!(out, pts);
    }

    #[test]
    fn test_dp_huge_tolerance_keeps_endpoints() {
        let pts = zigzag();
        let out = douglas_peucker(&pts, 1000.0).unwrap();
        assert_eq!(out, vec![pts[0], pts[5]]);
    }

    #[test]
    fn test_dp_keeps_spike() {
        let out = douglas_peucker(&zigzag(), 0.5).unwrap();
        assert!(out.contains(&c(3.0, 5.0)));
        assert!(!out.contains(&c(1.0, 0.1)));
    }

    #[test]
    fn test_dp_short_input_unchanged() {
        let pts = vec![c(0.0, 0.0), c(1.0, 1.0)];
        assert_eq!(douglas_peucker(&pts, 10.0).unwrap(), pts);
    }

    #[test]
    fn test_dp_negative_tolerance() {
        assert!(douglas_peucker(&zigzag(), -1.0).is_err());
    }

    #[test]
    fn test_vw_reaches_target() {
        let out = visvalingam(&zigzag(), 3).unwrap();
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_vw_keeps_endpoints_and_spike() {
        let pts = zigzag();
        let out = visvalingam(&pts, 3).unwrap();
        assert_eq!(out[0], pts[0]);
        assert_eq!(out[out.len() - 1], pts[5]);
        // The spike spans by far the largest triangle
        assert!(out.contains(&c(3.0, 5.0)));
    }

    #[test]
    fn test_vw_target_above_input() {
        let pts = zigzag();
        assert_eq!(visvalingam(&pts, 100).unwrap(), pts);
    }

    #[test]
    fn test_vw_bad_target() {
        assert!(visvalingam(&zigzag(), 1).is_err());
    }
}
