//! Geometry kernel: measurements, predicates, buffering, clipping, hulls
//!
//! Planar operations over `geo-types` geometries. Several operations are
//! deliberate approximations of their exact counterparts and are documented
//! as such where they appear:
//! - line/polygon buffering returns the identity geometry re-wrapped
//! - clipping filters vertices, it does not introduce intersection vertices
//! - union/merge computes the convex hull of all vertices

mod buffer;
mod clip;
mod hull;
mod measurements;
mod predicates;

pub use buffer::{buffer_geometry, buffer_point};
pub use clip::clip;
pub use hull::{convex_hull, union};
pub use measurements::{
    bounding_box, centroid, distance, line_length, perimeter, ring_area, BoundingBox,
    DistanceMode, EARTH_RADIUS_MEAN,
};
pub use predicates::{nearest_point, point_in_polygon, NearestPoint};

use geo_types::{Coord, Geometry};

/// Collect every vertex of a geometry in order.
///
/// Shared by bounding box, clip, union and dissolve, which all operate on
/// the flat vertex set.
pub fn geometry_vertices(geometry: &Geometry<f64>) -> Vec<Coord<f64>> {
    let mut out = Vec::new();
    collect_vertices(geometry, &mut out);
    out
}

fn collect_vertices(geometry: &Geometry<f64>, out: &mut Vec<Coord<f64>>) {
    match geometry {
        Geometry::Point(p) => out.push(p.0),
        Geometry::Line(l) => {
            out.push(l.start);
            out.push(l.end);
        }
        Geometry::LineString(ls) => out.extend(ls.0.iter().copied()),
        Geometry::Polygon(p) => {
            out.extend(p.exterior().0.iter().copied());
            for ring in p.interiors() {
                out.extend(ring.0.iter().copied());
            }
        }
        Geometry::MultiPoint(mp) => out.extend(mp.0.iter().map(|p| p.0)),
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                out.extend(ls.0.iter().copied());
            }
        }
        Geometry::MultiPolygon(mp) => {
            for p in &mp.0 {
                collect_vertices(&Geometry::Polygon(p.clone()), out);
            }
        }
        Geometry::GeometryCollection(gc) => {
            for g in &gc.0 {
                collect_vertices(g, out);
            }
        }
        Geometry::Rect(r) => {
            out.push(r.min());
            out.push(r.max());
        }
        Geometry::Triangle(t) => out.extend([t.0, t.1, t.2]),
    }
}
