//! Dissolve polygons by attribute or adjacency
//!
//! Group members are merged into the convex hull of their combined
//! vertices, a documented approximation that loses concavities.

use crate::vector::{convex_hull, geometry_vertices};
use geo_types::{Coord, Geometry, Polygon};
use kartos_core::{AttributeValue, Error, Feature, Result};
use std::collections::HashMap;

/// Merge features sharing the same value under `key`.
///
/// Features without the attribute group under a null key; features without
/// geometry contribute no vertices. Each output feature carries the shared
/// attribute and a hull geometry; groups with fewer than 3 distinct
/// non-collinear vertices are skipped. Output order follows the first
/// appearance of each group.
///
/// # Errors
/// `EmptyInput` when no features are given.
pub fn dissolve_by_attribute(features: &[Feature], key: &str) -> Result<Vec<Feature>> {
    if features.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, (AttributeValue, Vec<Coord<f64>>)> = HashMap::new();

    for feature in features {
        let value = feature
            .get_property(key)
            .cloned()
            .unwrap_or(AttributeValue::Null);
        let group_key = value.group_key();

        let entry = groups.entry(group_key.clone()).or_insert_with(|| {
            order.push(group_key);
            (value, Vec::new())
        });
        if let Some(geometry) = &feature.geometry {
            entry.1.extend(geometry_vertices(geometry));
        }
    }

    let mut dissolved = Vec::new();
    for group_key in &order {
        let (value, vertices) = &groups[group_key];
        if let Ok(hull) = convex_hull(vertices) {
            let mut feature = Feature::new(Geometry::Polygon(hull));
            feature.set_property(key, value.clone());
            dissolved.push(feature);
        }
    }
    Ok(dissolved)
}

/// Merge polygons into connected components of boundary adjacency.
///
/// Two polygons are adjacent when any exterior-ring segment of one matches
/// a segment of the other with both endpoints within `tolerance` (either
/// orientation). Each component dissolves into the convex hull of its
/// combined vertices.
///
/// # Errors
/// - `EmptyInput` when no polygons are given
/// - `InvalidParameter` for a negative or non-finite tolerance
pub fn dissolve_by_adjacency(polygons: &[Polygon<f64>], tolerance: f64) -> Result<Vec<Polygon<f64>>> {
    if polygons.is_empty() {
        return Err(Error::EmptyInput);
    }
    if !(tolerance >= 0.0) {
        return Err(Error::invalid_parameter(
            "tolerance",
            tolerance,
            "must be non-negative",
        ));
    }

    let n = polygons.len();
    let segments: Vec<Vec<(Coord<f64>, Coord<f64>)>> =
        polygons.iter().map(exterior_segments).collect();

    // Union-find over polygon indices
    let mut parent: Vec<usize> = (0..n).collect();
    fn find(parent: &mut Vec<usize>, i: usize) -> usize {
        if parent[i] != i {
            let root = find(parent, parent[i]);
            parent[i] = root;
        }
        parent[i]
    }

    for i in 0..n {
        for j in (i + 1)..n {
            if shares_segment(&segments[i], &segments[j], tolerance) {
                let ri = find(&mut parent, i);
                let rj = find(&mut parent, j);
                if ri != rj {
                    parent[rj] = ri;
                }
            }
        }
    }

    let mut order: Vec<usize> = Vec::new();
    let mut components: HashMap<usize, Vec<Coord<f64>>> = HashMap::new();
    for (i, polygon) in polygons.iter().enumerate() {
        let root = find(&mut parent, i);
        let entry = components.entry(root).or_insert_with(|| {
            order.push(root);
            Vec::new()
        });
        entry.extend(geometry_vertices(&Geometry::Polygon(polygon.clone())));
    }

    let mut dissolved = Vec::new();
    for root in order {
        dissolved.push(convex_hull(&components[&root])?);
    }
    Ok(dissolved)
}

fn exterior_segments(polygon: &Polygon<f64>) -> Vec<(Coord<f64>, Coord<f64>)> {
    polygon
        .exterior()
        .0
        .windows(2)
        .map(|w| (w[0], w[1]))
        .collect()
}

fn coords_close(a: Coord<f64>, b: Coord<f64>, tolerance: f64) -> bool {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt() <= tolerance
}

fn shares_segment(
    a: &[(Coord<f64>, Coord<f64>)],
    b: &[(Coord<f64>, Coord<f64>)],
    tolerance: f64,
) -> bool {
    for &(a1, a2) in a {
        for &(b1, b2) in b {
            let forward = coords_close(a1, b1, tolerance) && coords_close(a2, b2, tolerance);
            let reverse = coords_close(a1, b2, tolerance) && coords_close(a2, b1, tolerance);
            if forward || reverse {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{LineString, Point};

    fn unit_square(x0: f64, y0: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![
                (x0, y0),
                (x0 + 1.0, y0),
                (x0 + 1.0, y0 + 1.0),
                (x0, y0 + 1.0),
                (x0, y0),
            ]),
            vec![],
        )
    }

    #[test]
    fn test_dissolve_by_attribute_groups() {
        let features = vec![
            Feature::new(Geometry::Polygon(unit_square(0.0, 0.0))).with_property("zone", "a"),
            Feature::new(Geometry::Polygon(unit_square(5.0, 0.0))).with_property("zone", "a"),
            Feature::new(Geometry::Polygon(unit_square(0.0, 5.0))).with_property("zone", "b"),
        ];

        let out = dissolve_by_attribute(&features, "zone").unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].get_property("zone").unwrap().as_str(), Some("a"));
        assert_eq!(out[1].get_property("zone").unwrap().as_str(), Some("b"));

        // Group "a" hull spans both squares
        if let Some(Geometry::Polygon(hull)) = &out[0].geometry {
            let xs: Vec<f64> = hull.exterior().0.iter().map(|c| c.x).collect();
            assert!(xs.iter().cloned().fold(f64::MIN, f64::max) >= 6.0);
        } else {
            panic!("expected polygon geometry");
        }
    }

    #[test]
    fn test_dissolve_missing_attribute_groups_as_null() {
        let features = vec![
            Feature::new(Geometry::Polygon(unit_square(0.0, 0.0))),
            Feature::new(Geometry::Polygon(unit_square(3.0, 0.0))),
        ];
        let out = dissolve_by_attribute(&features, "zone").unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_dissolve_point_group_skipped() {
        let features =
            vec![Feature::new(Geometry::Point(Point::new(1.0, 1.0))).with_property("zone", "a")];
        let out = dissolve_by_attribute(&features, "zone").unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_adjacency_merges_touching_squares() {
        // Squares at x=0 and x=1 share the edge x=1; the third is far away
        let polygons = vec![
            unit_square(0.0, 0.0),
            unit_square(1.0, 0.0),
            unit_square(10.0, 10.0),
        ];
        let out = dissolve_by_adjacency(&polygons, 1e-9).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_adjacency_shared_edge_only_not_corner() {
        // Diagonal squares touch at one corner, not a full segment
        let polygons = vec![unit_square(0.0, 0.0), unit_square(1.0, 1.0)];
        let out = dissolve_by_adjacency(&polygons, 1e-9).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_adjacency_tolerance_bridges_gap() {
        // A 0.05 gap between squares closes under tolerance 0.1
        let polygons = vec![unit_square(0.0, 0.0), unit_square(1.05, 0.0)];
        assert_eq!(dissolve_by_adjacency(&polygons, 0.01).unwrap().len(), 2);
        assert_eq!(dissolve_by_adjacency(&polygons, 0.1).unwrap().len(), 1);
    }

    #[test]
    fn test_adjacency_empty_input() {
        assert!(matches!(
            dissolve_by_adjacency(&[], 0.1),
            Err(Error::EmptyInput)
        ));
    }
}
