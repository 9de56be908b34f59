//! Bounding-box spatial filtering and naive spatial join
//!
//! All relations compare axis-aligned bounding boxes, not exact geometry.
//! A bbox `intersects` can therefore be a false positive for concave
//! shapes; callers needing exact predicates must refine the candidates
//! themselves.

use crate::vector::{bounding_box, geometry_vertices, BoundingBox};
use kartos_core::Feature;

/// Spatial relation, evaluated on bounding boxes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialRelation {
    /// Boxes overlap or touch
    Intersects,
    /// Left box fully contains the right box
    Contains,
    /// Left box lies fully within the right box
    Within,
    /// Boxes share a boundary but no interior
    Touches,
}

impl SpatialRelation {
    fn evaluate(self, a: &BoundingBox, b: &BoundingBox) -> bool {
        match self {
            SpatialRelation::Intersects => a.intersects(b),
            SpatialRelation::Contains => a.contains(b),
            SpatialRelation::Within => b.contains(a),
            SpatialRelation::Touches => a.touches(b),
        }
    }
}

fn feature_bbox(feature: &Feature) -> Option<BoundingBox> {
    let geometry = feature.geometry.as_ref()?;
    bounding_box(&geometry_vertices(geometry)).ok()
}

/// Keep the features whose bounding box satisfies `relation` against
/// `query`. Features without geometry are dropped.
pub fn bbox_filter<'a>(
    features: &'a [Feature],
    query: &BoundingBox,
    relation: SpatialRelation,
) -> Vec<&'a Feature> {
    features
        .iter()
        .filter(|f| {
            feature_bbox(f).map_or(false, |bbox| relation.evaluate(&bbox, query))
        })
        .collect()
}

/// Pair every left feature with the right features it relates to.
///
/// Returns index pairs `(left, right)` into the two slices; a left feature
/// with no match produces no pairs. Quadratic scan over both inputs.
pub fn spatial_join(
    left: &[Feature],
    right: &[Feature],
    relation: SpatialRelation,
) -> Vec<(usize, usize)> {
    let right_boxes: Vec<Option<BoundingBox>> = right.iter().map(feature_bbox).collect();

    let mut pairs = Vec::new();
    for (li, lf) in left.iter().enumerate() {
        let lbox = match feature_bbox(lf) {
            Some(b) => b,
            None => continue,
        };
        for (ri, rbox) in right_boxes.iter().enumerate() {
            if let Some(rbox) = rbox {
                if relation.evaluate(&lbox, rbox) {
                    pairs.push((li, ri));
                }
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{Geometry, LineString, Point, Polygon};

    fn square(x0: f64, y0: f64, size: f64) -> Feature {
        Feature::new(Geometry::Polygon(Polygon::new(
            LineString::from(vec![
                (x0, y0),
                (x0 + size, y0),
                (x0 + size, y0 + size),
                (x0, y0 + size),
                (x0, y0),
            ]),
            vec![],
        )))
    }

    #[test]
    fn test_bbox_filter_intersects() {
        let features = vec![square(0.0, 0.0, 2.0), square(10.0, 10.0, 2.0)];
        let query = BoundingBox::new(1.0, 1.0, 3.0, 3.0);
        let hits = bbox_filter(&features, &query, SpatialRelation::Intersects);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_bbox_filter_within() {
        let features = vec![square(1.0, 1.0, 1.0), square(0.0, 0.0, 10.0)];
        let query = BoundingBox::new(0.0, 0.0, 5.0, 5.0);
        let hits = bbox_filter(&features, &query, SpatialRelation::Within);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_bbox_filter_skips_geometryless() {
        let features = vec![Feature::empty()];
        let query = BoundingBox::new(-100.0, -100.0, 100.0, 100.0);
        assert!(bbox_filter(&features, &query, SpatialRelation::Intersects).is_empty());
    }

    #[test]
    fn test_spatial_join_pairs() {
        let points = vec![
            Feature::new(Geometry::Point(Point::new(1.0, 1.0))),
            Feature::new(Geometry::Point(Point::new(11.0, 11.0))),
            Feature::new(Geometry::Point(Point::new(50.0, 50.0))),
        ];
        let zones = vec![square(0.0, 0.0, 2.0), square(10.0, 10.0, 2.0)];

        let pairs = spatial_join(&points, &zones, SpatialRelation::Within);
        assert_eq!(pairs, vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_spatial_join_touches() {
        // Adjacent squares share the x=2 boundary line
        let left = vec![square(0.0, 0.0, 2.0)];
        let right = vec![square(2.0, 0.0, 2.0), square(5.0, 0.0, 2.0)];
        let pairs = spatial_join(&left, &right, SpatialRelation::Touches);
        assert_eq!(pairs, vec![(0, 0)]);
    }
}
