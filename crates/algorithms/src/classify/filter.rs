//! Attribute filtering

use kartos_core::{AttributeValue, Feature};
use std::cmp::Ordering;

/// Relational and string predicates over attribute values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    Contains,
    StartsWith,
    EndsWith,
}

impl FilterOp {
    fn matches(self, value: &AttributeValue, operand: &AttributeValue) -> bool {
        match self {
            FilterOp::Eq => value == operand,
            FilterOp::Ne => value != operand,
            FilterOp::Gt => value.partial_cmp_value(operand) == Some(Ordering::Greater),
            FilterOp::Lt => value.partial_cmp_value(operand) == Some(Ordering::Less),
            FilterOp::Ge => matches!(
                value.partial_cmp_value(operand),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOp::Le => matches!(
                value.partial_cmp_value(operand),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FilterOp::Contains => match (value.as_str(), operand.as_str()) {
                (Some(v), Some(o)) => v.contains(o),
                _ => false,
            },
            FilterOp::StartsWith => match (value.as_str(), operand.as_str()) {
                (Some(v), Some(o)) => v.starts_with(o),
                _ => false,
            },
            FilterOp::EndsWith => match (value.as_str(), operand.as_str()) {
                (Some(v), Some(o)) => v.ends_with(o),
                _ => false,
            },
        }
    }
}

/// Keep the features whose attribute `key` satisfies `op` against `operand`.
///
/// Features missing the attribute never match (not even `Ne`); incomparable
/// value kinds never match the ordering predicates. Input order is kept.
pub fn attribute_filter<'a>(
    features: &'a [Feature],
    key: &str,
    op: FilterOp,
    operand: &AttributeValue,
) -> Vec<&'a Feature> {
    features
        .iter()
        .filter(|f| {
            f.get_property(key)
                .map_or(false, |value| op.matches(value, operand))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities() -> Vec<Feature> {
        vec![
            Feature::empty()
                .with_property("name", "Valparaiso")
                .with_property("population", 300_000_i64),
            Feature::empty()
                .with_property("name", "Santiago")
                .with_property("population", 6_000_000_i64),
            Feature::empty()
                .with_property("name", "Valdivia")
                .with_property("population", 170_000_i64),
        ]
    }

    #[test]
    fn test_numeric_comparison() {
        let features = cities();
        let big = attribute_filter(
            &features,
            "population",
            FilterOp::Gt,
            &AttributeValue::Int(250_000),
        );
        assert_eq!(big.len(), 2);

        let exact = attribute_filter(
            &features,
            "population",
            FilterOp::Ge,
            &AttributeValue::Float(6_000_000.0),
        );
        assert_eq!(exact.len(), 1);
        assert_eq!(
            exact[0].get_property("name").unwrap().as_str(),
            Some("Santiago")
        );
    }

    #[test]
    fn test_string_predicates() {
        let features = cities();
        let val = attribute_filter(&features, "name", FilterOp::StartsWith, &"Val".into());
        assert_eq!(val.len(), 2);

        let ends = attribute_filter(&features, "name", FilterOp::EndsWith, &"ago".into());
        assert_eq!(ends.len(), 1);

        let contains = attribute_filter(&features, "name", FilterOp::Contains, &"para".into());
        assert_eq!(contains.len(), 1);
    }

    #[test]
    fn test_equality() {
        let features = cities();
        let eq = attribute_filter(&features, "name", FilterOp::Eq, &"Santiago".into());
        assert_eq!(eq.len(), 1);
        let ne = attribute_filter(&features, "name", FilterOp::Ne, &"Santiago".into());
        assert_eq!(ne.len(), 2);
    }

    #[test]
    fn test_missing_attribute_never_matches() {
        let features = cities();
        let out = attribute_filter(&features, "elevation", FilterOp::Ne, &AttributeValue::Int(0));
        assert!(out.is_empty());
    }

    #[test]
    fn test_incomparable_kinds() {
        let features = cities();
        // Comparing a string attribute numerically matches nothing
        let out = attribute_filter(&features, "name", FilterOp::Gt, &AttributeValue::Int(5));
        assert!(out.is_empty());
    }
}
