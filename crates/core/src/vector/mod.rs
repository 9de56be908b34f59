//! Vector data structures
//!
//! Geometry is represented with `geo-types` (`Geometry<f64>` covers the
//! seven kinds: Point, LineString, Polygon, MultiPoint, MultiLineString,
//! MultiPolygon, GeometryCollection). Coordinates are 2-D; z/m values are
//! out of scope. Features pair a geometry with a flat attribute mapping.

use geo_types::Geometry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attribute value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl AttributeValue {
    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Int(i) => Some(*i as f64),
            AttributeValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// String view of the value, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Ordering between two values when they are comparable.
    ///
    /// Numbers compare numerically (Int and Float mix), strings
    /// lexicographically, booleans as false < true. Mixed kinds and Null
    /// are incomparable.
    pub fn partial_cmp_value(&self, other: &AttributeValue) -> Option<std::cmp::Ordering> {
        use AttributeValue::*;
        match (self, other) {
            (Bool(a), Bool(b)) => a.partial_cmp(b),
            (String(a), String(b)) => a.partial_cmp(b),
            _ => {
                let a = self.as_f64()?;
                let b = other.as_f64()?;
                a.partial_cmp(&b)
            }
        }
    }

    /// Grouping key for aggregation and dissolve: a stable string form.
    pub fn group_key(&self) -> String {
        match self {
            AttributeValue::Null => "<null>".to_string(),
            AttributeValue::Bool(b) => b.to_string(),
            AttributeValue::Int(i) => i.to_string(),
            AttributeValue::Float(f) => f.to_string(),
            AttributeValue::String(s) => s.clone(),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::Float(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Int(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::String(v.to_string())
    }
}

/// A geographic feature with geometry and attributes
#[derive(Debug, Clone)]
pub struct Feature {
    /// Feature geometry
    pub geometry: Option<Geometry<f64>>,
    /// Feature attributes
    pub properties: HashMap<String, AttributeValue>,
}

impl Feature {
    /// Create a new feature with geometry
    pub fn new(geometry: Geometry<f64>) -> Self {
        Self {
            geometry: Some(geometry),
            properties: HashMap::new(),
        }
    }

    /// Create a feature with no geometry
    pub fn empty() -> Self {
        Self {
            geometry: None,
            properties: HashMap::new(),
        }
    }

    /// Set an attribute, builder style
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Set an attribute
    pub fn set_property(&mut self, key: impl Into<String>, value: AttributeValue) {
        self.properties.insert(key.into(), value);
    }

    /// Get an attribute
    pub fn get_property(&self, key: &str) -> Option<&AttributeValue> {
        self.properties.get(key)
    }
}

/// Ordered collection of features
#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self {
            features: Vec::new(),
        }
    }

    pub fn from_features(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }
}

impl IntoIterator for FeatureCollection {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::Point;

    #[test]
    fn test_attribute_comparison() {
        let a = AttributeValue::Int(3);
        let b = AttributeValue::Float(3.5);
        assert_eq!(
            a.partial_cmp_value(&b),
            Some(std::cmp::Ordering::Less)
        );
        assert_eq!(
            AttributeValue::String("abc".into())
                .partial_cmp_value(&AttributeValue::String("abd".into())),
            Some(std::cmp::Ordering::Less)
        );
        assert!(AttributeValue::Null
            .partial_cmp_value(&AttributeValue::Int(1))
            .is_none());
    }

    #[test]
    fn test_feature_properties() {
        let f = Feature::new(Geometry::Point(Point::new(1.0, 2.0)))
            .with_property("name", "station")
            .with_property("height", 42.0);

        assert_eq!(f.get_property("name").unwrap().as_str(), Some("station"));
        assert_eq!(f.get_property("height").unwrap().as_f64(), Some(42.0));
        assert!(f.get_property("missing").is_none());
    }
}
