//! Well-Known Text codec for the seven supported geometry kinds
//!
//! Parses and serializes POINT, LINESTRING, POLYGON, MULTIPOINT,
//! MULTILINESTRING, MULTIPOLYGON and GEOMETRYCOLLECTION. Coordinates are
//! strictly 2-D. GEOMETRYCOLLECTION members are split by tracking
//! parenthesis depth, so nested multi-geometries are handled correctly
//! (a naive comma split is not).

use crate::error::{Error, Result};
use geo_types::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};

/// Serialize a geometry to WKT.
///
/// # Errors
/// `UnsupportedGeometry` for geo-types variants outside the seven supported
/// kinds (`Line`, `Rect`, `Triangle`).
pub fn geometry_to_wkt(geometry: &Geometry<f64>) -> Result<String> {
    match geometry {
        Geometry::Point(p) => Ok(format!("POINT ({})", fmt_coord(&p.0))),
        Geometry::LineString(ls) => Ok(format!("LINESTRING {}", fmt_ring(ls))),
        Geometry::Polygon(p) => Ok(format!("POLYGON {}", fmt_polygon(p))),
        Geometry::MultiPoint(mp) => {
            if mp.0.is_empty() {
                return Ok("MULTIPOINT EMPTY".to_string());
            }
            let pts: Vec<String> = mp.0.iter().map(|p| format!("({})", fmt_coord(&p.0))).collect();
            Ok(format!("MULTIPOINT ({})", pts.join(", ")))
        }
        Geometry::MultiLineString(mls) => {
            if mls.0.is_empty() {
                return Ok("MULTILINESTRING EMPTY".to_string());
            }
            let lines: Vec<String> = mls.0.iter().map(fmt_ring).collect();
            Ok(format!("MULTILINESTRING ({})", lines.join(", ")))
        }
        Geometry::MultiPolygon(mp) => {
            if mp.0.is_empty() {
                return Ok("MULTIPOLYGON EMPTY".to_string());
            }
            let polys: Vec<String> = mp.0.iter().map(fmt_polygon).collect();
            Ok(format!("MULTIPOLYGON ({})", polys.join(", ")))
        }
        Geometry::GeometryCollection(gc) => {
            if gc.0.is_empty() {
                return Ok("GEOMETRYCOLLECTION EMPTY".to_string());
            }
            let members: Result<Vec<String>> = gc.0.iter().map(geometry_to_wkt).collect();
            Ok(format!("GEOMETRYCOLLECTION ({})", members?.join(", ")))
        }
        other => Err(Error::UnsupportedGeometry(format!("{other:?}"))),
    }
}

/// Parse a WKT string into a geometry.
///
/// # Errors
/// `UnsupportedFormat` for unknown tags, malformed coordinate lists or
/// unbalanced parentheses.
pub fn geometry_from_wkt(wkt: &str) -> Result<Geometry<f64>> {
    let trimmed = wkt.trim();
    let tag_end = trimmed
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(trimmed.len());
    let tag = trimmed[..tag_end].to_ascii_uppercase();
    let body = trimmed[tag_end..].trim();

    if body.eq_ignore_ascii_case("EMPTY") {
        return empty_geometry(&tag);
    }

    let inner = strip_outer_parens(body)?;

    match tag.as_str() {
        "POINT" => Ok(Geometry::Point(Point(parse_coord(inner)?))),
        "LINESTRING" => Ok(Geometry::LineString(parse_coord_seq(inner)?)),
        "POLYGON" => Ok(Geometry::Polygon(parse_polygon_body(inner)?)),
        "MULTIPOINT" => {
            let points: Result<Vec<Point<f64>>> = split_top_level(inner)
                .into_iter()
                .map(|item| {
                    // Both "1 2" and "(1 2)" item forms are valid WKT
                    let item = item.trim();
                    let coords = if item.starts_with('(') {
                        strip_outer_parens(item)?
                    } else {
                        item
                    };
                    Ok(Point(parse_coord(coords)?))
                })
                .collect();
            Ok(Geometry::MultiPoint(MultiPoint(points?)))
        }
        "MULTILINESTRING" => {
            let lines: Result<Vec<LineString<f64>>> = split_top_level(inner)
                .into_iter()
                .map(|item| parse_coord_seq(strip_outer_parens(item.trim())?))
                .collect();
            Ok(Geometry::MultiLineString(MultiLineString(lines?)))
        }
        "MULTIPOLYGON" => {
            let polys: Result<Vec<Polygon<f64>>> = split_top_level(inner)
                .into_iter()
                .map(|item| parse_polygon_body(strip_outer_parens(item.trim())?))
                .collect();
            Ok(Geometry::MultiPolygon(MultiPolygon(polys?)))
        }
        "GEOMETRYCOLLECTION" => {
            let members: Result<Vec<Geometry<f64>>> = split_top_level(inner)
                .into_iter()
                .map(|item| geometry_from_wkt(item.trim()))
                .collect();
            Ok(Geometry::GeometryCollection(GeometryCollection(members?)))
        }
        other => Err(Error::UnsupportedFormat(format!("unknown WKT tag: {other}"))),
    }
}

fn empty_geometry(tag: &str) -> Result<Geometry<f64>> {
    match tag {
        "LINESTRING" => Ok(Geometry::LineString(LineString(vec![]))),
        "POLYGON" => Ok(Geometry::Polygon(Polygon::new(LineString(vec![]), vec![]))),
        "MULTIPOINT" => Ok(Geometry::MultiPoint(MultiPoint(vec![]))),
        "MULTILINESTRING" => Ok(Geometry::MultiLineString(MultiLineString(vec![]))),
        "MULTIPOLYGON" => Ok(Geometry::MultiPolygon(MultiPolygon(vec![]))),
        "GEOMETRYCOLLECTION" => Ok(Geometry::GeometryCollection(GeometryCollection(vec![]))),
        other => Err(Error::UnsupportedFormat(format!(
            "{other} does not support EMPTY"
        ))),
    }
}

fn fmt_coord(c: &Coord<f64>) -> String {
    format!("{} {}", c.x, c.y)
}

fn fmt_ring(ls: &LineString<f64>) -> String {
    if ls.0.is_empty() {
        return "EMPTY".to_string();
    }
    let coords: Vec<String> = ls.0.iter().map(fmt_coord).collect();
    format!("({})", coords.join(", "))
}

fn fmt_polygon(p: &Polygon<f64>) -> String {
    if p.exterior().0.is_empty() {
        return "EMPTY".to_string();
    }
    let mut rings = vec![fmt_ring(p.exterior())];
    rings.extend(p.interiors().iter().map(fmt_ring));
    format!("({})", rings.join(", "))
}

/// Strip one pair of outer parentheses, verifying they are balanced.
fn strip_outer_parens(s: &str) -> Result<&str> {
    let s = s.trim();
    if !s.starts_with('(') || !s.ends_with(')') {
        return Err(Error::UnsupportedFormat(format!(
            "expected parenthesized body, got: {s}"
        )));
    }
    Ok(s[1..s.len() - 1].trim())
}

/// Split a WKT body at commas that sit at parenthesis depth zero.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0_i32;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

fn parse_coord(s: &str) -> Result<Coord<f64>> {
    let mut nums = s.split_whitespace();
    let x = nums
        .next()
        .and_then(|t| t.parse::<f64>().ok())
        .ok_or_else(|| Error::UnsupportedFormat(format!("bad coordinate: {s}")))?;
    let y = nums
        .next()
        .and_then(|t| t.parse::<f64>().ok())
        .ok_or_else(|| Error::UnsupportedFormat(format!("bad coordinate: {s}")))?;
    if nums.next().is_some() {
        return Err(Error::UnsupportedFormat(format!(
            "only 2-D coordinates are supported: {s}"
        )));
    }
    Ok(Coord { x, y })
}

fn parse_coord_seq(s: &str) -> Result<LineString<f64>> {
    let coords: Result<Vec<Coord<f64>>> =
        split_top_level(s).into_iter().map(parse_coord).collect();
    Ok(LineString(coords?))
}

fn parse_polygon_body(s: &str) -> Result<Polygon<f64>> {
    let rings: Result<Vec<LineString<f64>>> = split_top_level(s)
        .into_iter()
        .map(|ring| parse_coord_seq(strip_outer_parens(ring.trim())?))
        .collect();
    let mut rings = rings?;
    if rings.is_empty() {
        return Err(Error::UnsupportedFormat("polygon with no rings".into()));
    }
    let exterior = rings.remove(0);
    Ok(Polygon::new(exterior, rings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_roundtrip() {
        let geom = geometry_from_wkt("POINT (1 2)").unwrap();
        match &geom {
            Geometry::Point(p) => {
                assert_eq!(p.x(), 1.0);
                assert_eq!(p.y(), 2.0);
            }
            other => panic!("expected point, got {other:?}"),
        }
        assert_eq!(geometry_to_wkt(&geom).unwrap(), "POINT (1 2)");
    }

    #[test]
    fn test_linestring() {
        let geom = geometry_from_wkt("LINESTRING (0 0, 1 1, 2 0)").unwrap();
        match geom {
            Geometry::LineString(ls) => assert_eq!(ls.0.len(), 3),
            other => panic!("expected linestring, got {other:?}"),
        }
    }

    #[test]
    fn test_polygon_with_hole() {
        let wkt = "POLYGON ((0 0, 10 0, 10 10, 0 10, 0 0), (2 2, 8 2, 8 8, 2 8, 2 2))";
        let geom = geometry_from_wkt(wkt).unwrap();
        match &geom {
            Geometry::Polygon(p) => {
                assert_eq!(p.exterior().0.len(), 5);
                assert_eq!(p.interiors().len(), 1);
            }
            other => panic!("expected polygon, got {other:?}"),
        }
        // Re-parse what we serialize
        let back = geometry_from_wkt(&geometry_to_wkt(&geom).unwrap()).unwrap();
        assert_eq!(geometry_to_wkt(&back).unwrap(), geometry_to_wkt(&geom).unwrap());
    }

    #[test]
    fn test_multipoint_both_forms() {
        let a = geometry_from_wkt("MULTIPOINT (1 2, 3 4)").unwrap();
        let b = geometry_from_wkt("MULTIPOINT ((1 2), (3 4))").unwrap();
        assert_eq!(geometry_to_wkt(&a).unwrap(), geometry_to_wkt(&b).unwrap());
    }

    #[test]
    fn test_geometry_collection_nested() {
        // Comma inside the nested MULTIPOINT must not split the collection
        let wkt = "GEOMETRYCOLLECTION (POINT (1 2), MULTIPOINT ((3 4), (5 6)), LINESTRING (0 0, 1 1))";
        let geom = geometry_from_wkt(wkt).unwrap();
        match &geom {
            Geometry::GeometryCollection(gc) => assert_eq!(gc.0.len(), 3),
            other => panic!("expected collection, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_geometries() {
        let geom = geometry_from_wkt("MULTIPOLYGON EMPTY").unwrap();
        assert_eq!(geometry_to_wkt(&geom).unwrap(), "MULTIPOLYGON EMPTY");
        assert!(geometry_from_wkt("POINT EMPTY").is_err());
    }

    #[test]
    fn test_unknown_tag() {
        assert!(matches!(
            geometry_from_wkt("CIRCULARSTRING (0 0, 1 1, 2 0)"),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_rejects_3d() {
        assert!(geometry_from_wkt("POINT (1 2 3)").is_err());
    }
}
