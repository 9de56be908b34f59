//! Clip geometries against a mask polygon
//!
//! Vertex filtering only: each vertex is kept when it passes the
//! point-in-polygon test against the mask. No intersection vertices are
//! introduced, so a segment crossing the mask boundary is cut at its
//! existing endpoints. This is a documented approximation of true polygon
//! clipping.

use super::predicates::point_in_polygon;
use geo_types::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};

/// Clip a geometry by the mask polygon, dropping vertices outside it.
///
/// Returns `None` when nothing survives (or when too few vertices remain to
/// form the geometry kind, e.g. under 2 for a line or under 3 for a ring).
pub fn clip(geometry: &Geometry<f64>, mask: &Polygon<f64>) -> Option<Geometry<f64>> {
    match geometry {
        Geometry::Point(p) => point_in_polygon(p.0, mask).then(|| Geometry::Point(*p)),
        Geometry::MultiPoint(mp) => {
            let kept: Vec<Point<f64>> = mp
                .0
                .iter()
                .filter(|p| point_in_polygon(p.0, mask))
                .copied()
                .collect();
            (!kept.is_empty()).then(|| Geometry::MultiPoint(MultiPoint(kept)))
        }
        Geometry::LineString(ls) => clip_line(ls, mask).map(Geometry::LineString),
        Geometry::MultiLineString(mls) => {
            let kept: Vec<LineString<f64>> =
                mls.0.iter().filter_map(|ls| clip_line(ls, mask)).collect();
            (!kept.is_empty()).then(|| Geometry::MultiLineString(MultiLineString(kept)))
        }
        Geometry::Polygon(p) => clip_polygon(p, mask).map(Geometry::Polygon),
        Geometry::MultiPolygon(mp) => {
            let kept: Vec<Polygon<f64>> =
                mp.0.iter().filter_map(|p| clip_polygon(p, mask)).collect();
            (!kept.is_empty()).then(|| Geometry::MultiPolygon(MultiPolygon(kept)))
        }
        Geometry::GeometryCollection(gc) => {
            let kept: Vec<Geometry<f64>> = gc.0.iter().filter_map(|g| clip(g, mask)).collect();
            (!kept.is_empty()).then(|| Geometry::GeometryCollection(GeometryCollection(kept)))
        }
        // Line/Rect/Triangle are not produced by this kernel
        _ => None,
    }
}

fn clip_line(line: &LineString<f64>, mask: &Polygon<f64>) -> Option<LineString<f64>> {
    let kept: Vec<_> = line
        .0
        .iter()
        .filter(|c| point_in_polygon(**c, mask))
        .copied()
        .collect();
    (kept.len() >= 2).then(|| LineString(kept))
}

fn clip_polygon(polygon: &Polygon<f64>, mask: &Polygon<f64>) -> Option<Polygon<f64>> {
    let mut kept: Vec<_> = polygon
        .exterior()
        .0
        .iter()
        .filter(|c| point_in_polygon(**c, mask))
        .copied()
        .collect();

    // Ring needs 3 distinct vertices; re-close after filtering
    if kept.len() >= 2 && kept.first() == kept.last() {
        kept.pop();
    }
    if kept.len() < 3 {
        return None;
    }
    kept.push(kept[0]);
    Some(Polygon::new(LineString(kept), vec![]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::Coord;

    fn mask() -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![
                (0.0, 0.0),
                (10.0, 0.0),
                (10.0, 10.0),
                (0.0, 10.0),
                (0.0, 0.0),
            ]),
            vec![],
        )
    }

    #[test]
    fn test_clip_point() {
        let inside = Geometry::Point(Point::new(5.0, 5.0));
        let outside = Geometry::Point(Point::new(50.0, 5.0));
        assert!(clip(&inside, &mask()).is_some());
        assert!(clip(&outside, &mask()).is_none());
    }

    #[test]
    fn test_clip_line_drops_outside_vertices() {
        let line = Geometry::LineString(LineString::from(vec![
            (1.0, 1.0),
            (5.0, 5.0),
            (50.0, 50.0),
            (9.0, 9.0),
        ]));
        let clipped = clip(&line, &mask()).unwrap();
        match clipped {
            Geometry::LineString(ls) => {
                assert_eq!(ls.0.len(), 3);
                assert!(!ls.0.contains(&Coord { x: 50.0, y: 50.0 }));
            }
            other => panic!("expected linestring, got {other:?}"),
        }
    }

    #[test]
    fn test_clip_line_too_few_survivors() {
        let line = Geometry::LineString(LineString::from(vec![
            (5.0, 5.0),
            (50.0, 50.0),
            (60.0, 60.0),
        ]));
        assert!(clip(&line, &mask()).is_none());
    }

    #[test]
    fn test_clip_polygon_recloses() {
        let poly = Geometry::Polygon(Polygon::new(
            LineString::from(vec![
                (2.0, 2.0),
                (8.0, 2.0),
                (20.0, 5.0),
                (8.0, 8.0),
                (2.0, 8.0),
                (2.0, 2.0),
            ]),
            vec![],
        ));
        let clipped = clip(&poly, &mask()).unwrap();
        match clipped {
            Geometry::Polygon(p) => {
                assert_eq!(p.exterior().0.first(), p.exterior().0.last());
                assert_eq!(p.exterior().0.len(), 5); // 4 survivors + closure
            }
            other => panic!("expected polygon, got {other:?}"),
        }
    }
}
