//! Buffering
//!
//! Point buffers are real: a 36-vertex regular polygon approximating the
//! circle. Line and polygon buffers are a documented simplification that
//! re-wraps the input vertices as a polygon without offsetting them; true
//! offset-curve generation is an open upgrade, not assumed here.

use super::geometry_vertices;
use geo_types::{Coord, Geometry, LineString, Polygon};
use kartos_core::{Error, Result};

/// Number of vertices in the circle approximation
const CIRCLE_SEGMENTS: usize = 36;

/// Buffer a point into a closed 36-vertex ring of the given radius.
///
/// # Errors
/// `InvalidParameter` for a negative or non-finite radius.
pub fn buffer_point(center: Coord<f64>, radius: f64) -> Result<Polygon<f64>> {
    if !(radius >= 0.0) {
        return Err(Error::invalid_parameter(
            "radius",
            radius,
            "must be non-negative",
        ));
    }

    let mut ring = Vec::with_capacity(CIRCLE_SEGMENTS + 1);
    for i in 0..CIRCLE_SEGMENTS {
        let angle = 2.0 * std::f64::consts::PI * i as f64 / CIRCLE_SEGMENTS as f64;
        ring.push(Coord {
            x: center.x + radius * angle.cos(),
            y: center.y + radius * angle.sin(),
        });
    }
    ring.push(ring[0]);

    Ok(Polygon::new(LineString(ring), vec![]))
}

/// Buffer any geometry.
///
/// Points (and multipoints) get circular buffers. Lines and polygons return
/// their own vertex ring re-wrapped as a polygon; the distance parameter is
/// validated but not applied. This is a documented simplification, not a
/// true offset buffer.
pub fn buffer_geometry(geometry: &Geometry<f64>, radius: f64) -> Result<Geometry<f64>> {
    if !(radius >= 0.0) {
        return Err(Error::invalid_parameter(
            "radius",
            radius,
            "must be non-negative",
        ));
    }

    match geometry {
        Geometry::Point(p) => Ok(Geometry::Polygon(buffer_point(p.0, radius)?)),
        Geometry::MultiPoint(mp) => {
            let polys: Result<Vec<Polygon<f64>>> =
                mp.0.iter().map(|p| buffer_point(p.0, radius)).collect();
            Ok(Geometry::MultiPolygon(geo_types::MultiPolygon(polys?)))
        }
        other => {
            let mut ring = geometry_vertices(other);
            if ring.is_empty() {
                return Err(Error::EmptyInput);
            }
            if ring.first() != ring.last() {
                ring.push(ring[0]);
            }
            Ok(Geometry::Polygon(Polygon::new(LineString(ring), vec![])))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_buffer_point_ring() {
        let poly = buffer_point(Coord { x: 0.0, y: 0.0 }, 10.0).unwrap();
        let ring = &poly.exterior().0;

        // Closed ring of 36 distinct vertices
        assert_eq!(ring.len(), CIRCLE_SEGMENTS + 1);
        assert_eq!(ring.first(), ring.last());

        for v in &ring[..CIRCLE_SEGMENTS] {
            let r = (v.x * v.x + v.y * v.y).sqrt();
            assert_relative_eq!(r, 10.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_buffer_point_offset_center() {
        let poly = buffer_point(Coord { x: 100.0, y: -50.0 }, 2.5).unwrap();
        for v in poly.exterior().0.iter() {
            let dx = v.x - 100.0;
            let dy = v.y + 50.0;
            assert_relative_eq!((dx * dx + dy * dy).sqrt(), 2.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_buffer_negative_radius() {
        assert!(buffer_point(Coord { x: 0.0, y: 0.0 }, -1.0).is_err());
    }

    #[test]
    fn test_buffer_line_identity_wrap() {
        let line = Geometry::LineString(LineString::from(vec![(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)]));
        let result = buffer_geometry(&line, 1.0).unwrap();

        match result {
            Geometry::Polygon(p) => {
                // Same vertices, closed
                assert_eq!(p.exterior().0.len(), 4);
                assert_eq!(p.exterior().0.first(), p.exterior().0.last());
            }
            other => panic!("expected polygon, got {other:?}"),
        }
    }
}
