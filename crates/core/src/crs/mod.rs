//! Coordinate Reference System handling
//!
//! A small immutable projection registry plus closed-form conversion between
//! WGS84 (EPSG:4326) and Web Mercator (EPSG:3857). Any other projection pair
//! requires an external projection engine and is rejected with
//! `UnsupportedFormat` rather than approximated silently.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// WGS84 semi-major axis in meters (spherical Web Mercator radius)
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Half the Web Mercator world width: π · R
const ORIGIN_SHIFT: f64 = std::f64::consts::PI * EARTH_RADIUS;

/// Coordinate Reference System identified by an EPSG code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crs(u32);

impl Crs {
    /// Create a CRS from an EPSG code
    pub fn from_epsg(code: u32) -> Self {
        Self(code)
    }

    /// Parse a CRS from an `"EPSG:nnnn"` string (case-insensitive)
    pub fn parse(s: &str) -> Result<Self> {
        let code = s
            .trim()
            .strip_prefix("EPSG:")
            .or_else(|| s.trim().strip_prefix("epsg:"))
            .unwrap_or(s.trim())
            .parse::<u32>()
            .map_err(|_| Error::UnsupportedFormat(format!("bad CRS identifier: {s}")))?;
        Ok(Self(code))
    }

    /// WGS84 geographic CRS (EPSG:4326)
    pub fn wgs84() -> Self {
        Self(4326)
    }

    /// Web Mercator (EPSG:3857)
    pub fn web_mercator() -> Self {
        Self(3857)
    }

    /// EPSG code
    pub fn epsg(&self) -> u32 {
        self.0
    }

    /// Registry entry for this CRS, if known
    pub fn info(&self) -> Option<&'static ProjectionInfo> {
        PROJECTIONS.iter().find(|p| p.epsg == self.0)
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::wgs84()
    }
}

/// Linear unit of a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionUnit {
    Degree,
    Meter,
}

impl ProjectionUnit {
    /// Length of one unit in meters (degrees use the equatorial approximation)
    pub fn units_per_meter(&self) -> f64 {
        match self {
            ProjectionUnit::Meter => 1.0,
            ProjectionUnit::Degree => 1.0 / 111_319.490_793_273_57,
        }
    }
}

/// Registry entry describing a known projection
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionInfo {
    pub epsg: u32,
    pub name: &'static str,
    pub unit: ProjectionUnit,
    /// Valid extent as (min_x, min_y, max_x, max_y) in projection units
    pub extent: (f64, f64, f64, f64),
}

/// Immutable projection registry, initialized at compile time.
static PROJECTIONS: &[ProjectionInfo] = &[
    ProjectionInfo {
        epsg: 4326,
        name: "WGS 84",
        unit: ProjectionUnit::Degree,
        extent: (-180.0, -90.0, 180.0, 90.0),
    },
    ProjectionInfo {
        epsg: 3857,
        name: "WGS 84 / Pseudo-Mercator",
        unit: ProjectionUnit::Meter,
        extent: (-ORIGIN_SHIFT, -ORIGIN_SHIFT, ORIGIN_SHIFT, ORIGIN_SHIFT),
    },
];

/// Iterate over all registered projections
pub fn registered_projections() -> impl Iterator<Item = &'static ProjectionInfo> {
    PROJECTIONS.iter()
}

/// Convert a WGS84 lon/lat coordinate to Web Mercator meters.
///
/// ```text
/// x = lon · π·R / 180
/// y = ln(tan((90 + lat) · π / 360)) · R
/// ```
///
/// Latitudes at ±90° map to ±∞; callers should clamp to the Mercator valid
/// range (about ±85.06°) when that matters.
pub fn wgs84_to_web_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let x = lon * ORIGIN_SHIFT / 180.0;
    let y = ((90.0 + lat) * std::f64::consts::PI / 360.0).tan().ln() * EARTH_RADIUS;
    (x, y)
}

/// Convert a Web Mercator coordinate to WGS84 lon/lat (algebraic inverse).
pub fn web_mercator_to_wgs84(x: f64, y: f64) -> (f64, f64) {
    let lon = x / ORIGIN_SHIFT * 180.0;
    let lat = ((y / EARTH_RADIUS).exp().atan() * 2.0 - std::f64::consts::FRAC_PI_2).to_degrees();
    (lon, lat)
}

/// Transform a coordinate between two registered projections.
///
/// Only the WGS84 ↔ Web Mercator pair (and the identity transform) has a
/// closed form here; any other pair needs an external projection engine and
/// returns `UnsupportedFormat`.
pub fn transform(x: f64, y: f64, from: Crs, to: Crs) -> Result<(f64, f64)> {
    match (from.epsg(), to.epsg()) {
        (a, b) if a == b => Ok((x, y)),
        (4326, 3857) => Ok(wgs84_to_web_mercator(x, y)),
        (3857, 4326) => Ok(web_mercator_to_wgs84(x, y)),
        _ => Err(Error::UnsupportedFormat(format!(
            "no closed-form transform from {from} to {to}; an external projection engine is required"
        ))),
    }
}

/// Map resolution (units per pixel) for a cartographic scale denominator.
///
/// `resolution = scale · 0.0254 / (dpi · units_per_meter⁻¹)` with the
/// conventional 0.0254 m/inch.
pub fn scale_to_resolution(scale: f64, dpi: f64, unit: ProjectionUnit) -> f64 {
    scale * 0.0254 / dpi * unit.units_per_meter()
}

/// Inverse of [`scale_to_resolution`].
pub fn resolution_to_scale(resolution: f64, dpi: f64, unit: ProjectionUnit) -> f64 {
    resolution * dpi / 0.0254 / unit.units_per_meter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse() {
        assert_eq!(Crs::parse("EPSG:4326").unwrap(), Crs::wgs84());
        assert_eq!(Crs::parse("3857").unwrap(), Crs::web_mercator());
        assert!(Crs::parse("not-a-crs").is_err());
    }

    #[test]
    fn test_registry() {
        let info = Crs::wgs84().info().unwrap();
        assert_eq!(info.name, "WGS 84");
        assert_eq!(info.unit, ProjectionUnit::Degree);
        assert!(Crs::from_epsg(32719).info().is_none());
    }

    #[test]
    fn test_mercator_origin() {
        let (x, y) = wgs84_to_web_mercator(0.0, 0.0);
        assert_relative_eq!(x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mercator_roundtrip() {
        let (x, y) = wgs84_to_web_mercator(-70.65, -33.45);
        let (lon, lat) = web_mercator_to_wgs84(x, y);
        assert_relative_eq!(lon, -70.65, epsilon = 1e-9);
        assert_relative_eq!(lat, -33.45, epsilon = 1e-9);
    }

    #[test]
    fn test_mercator_known_value() {
        // 180° east maps to half the world width
        let (x, _) = wgs84_to_web_mercator(180.0, 0.0);
        assert_relative_eq!(x, 20_037_508.342_789_244, epsilon = 1e-3);
    }

    #[test]
    fn test_transform_unsupported_pair() {
        assert!(transform(0.0, 0.0, Crs::from_epsg(32719), Crs::wgs84()).is_err());
    }

    #[test]
    fn test_scale_resolution_roundtrip() {
        let res = scale_to_resolution(25_000.0, 96.0, ProjectionUnit::Meter);
        assert_relative_eq!(res, 25_000.0 * 0.0254 / 96.0, epsilon = 1e-12);
        let scale = resolution_to_scale(res, 96.0, ProjectionUnit::Meter);
        assert_relative_eq!(scale, 25_000.0, epsilon = 1e-9);
    }
}
