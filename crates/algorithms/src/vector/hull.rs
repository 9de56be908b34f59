//! Convex hull (Graham scan) and hull-based union
//!
//! Union/merge is approximated as the convex hull of every input vertex, so
//! concavities between the inputs are lost. True polygon union
//! (Weiler-Atherton or similar) is an open upgrade and must not be assumed
//! equivalent.

use super::geometry_vertices;
use geo_types::{Coord, Geometry, LineString, Polygon};
use kartos_core::{Error, Result};

/// Convex hull of a point set via Graham scan.
///
/// Sorts candidates by polar angle around the lowest-leftmost anchor and
/// maintains a hull stack, rejecting clockwise turns. The result is a closed
/// counter-clockwise ring.
///
/// # Errors
/// `InsufficientPoints` when fewer than 3 distinct points are given.
pub fn convex_hull(points: &[Coord<f64>]) -> Result<Polygon<f64>> {
    let mut distinct: Vec<Coord<f64>> = Vec::with_capacity(points.len());
    for p in points {
        if !distinct.iter().any(|q| q.x == p.x && q.y == p.y) {
            distinct.push(*p);
        }
    }

    if distinct.len() < 3 {
        return Err(Error::InsufficientPoints {
            needed: 3,
            got: distinct.len(),
        });
    }

    // Anchor: lowest y, then lowest x
    let anchor_idx = distinct
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (a.y, a.x)
                .partial_cmp(&(b.y, b.x))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap_or(0);
    let anchor = distinct.swap_remove(anchor_idx);

    // Sort by polar angle around the anchor; nearer point first on ties
    distinct.sort_by(|a, b| {
        let angle_a = (a.y - anchor.y).atan2(a.x - anchor.x);
        let angle_b = (b.y - anchor.y).atan2(b.x - anchor.x);
        angle_a
            .partial_cmp(&angle_b)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                let da = (a.x - anchor.x).powi(2) + (a.y - anchor.y).powi(2);
                let db = (b.x - anchor.x).powi(2) + (b.y - anchor.y).powi(2);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    let mut stack: Vec<Coord<f64>> = vec![anchor];
    for p in distinct {
        while stack.len() >= 2 {
            let top = stack[stack.len() - 1];
            let below = stack[stack.len() - 2];
            // Pop while the turn below→top→p is clockwise or collinear
            if cross(below, top, p) <= 0.0 {
                stack.pop();
            } else {
                break;
            }
        }
        stack.push(p);
    }

    if stack.len() < 3 {
        // All points collinear
        return Err(Error::InsufficientPoints {
            needed: 3,
            got: stack.len(),
        });
    }

    stack.push(stack[0]);
    Ok(Polygon::new(LineString(stack), vec![]))
}

/// Cross product of (b - a) × (c - a); positive for a counter-clockwise turn
fn cross(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Merge geometries into one polygon: the convex hull of all their vertices.
///
/// Concavities between inputs are discarded (documented approximation).
///
/// # Errors
/// - `EmptyInput` when no geometries are given
/// - `InsufficientPoints` when the combined vertex set has fewer than 3
///   distinct points
pub fn union(geometries: &[Geometry<f64>]) -> Result<Polygon<f64>> {
    if geometries.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut vertices = Vec::new();
    for g in geometries {
        vertices.extend(geometry_vertices(g));
    }
    convex_hull(&vertices)
}
