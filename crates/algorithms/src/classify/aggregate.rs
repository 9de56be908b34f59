//! Group-by aggregation over feature attributes

use kartos_core::{AttributeValue, Error, Feature, Result};
use std::collections::HashMap;

/// Reduction applied to each group's values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    Sum,
    Average,
    Count,
    Min,
    Max,
}

/// Group features by `group_key` and reduce the numeric attribute
/// `value_key` within each group.
///
/// Count counts every feature in the group; the numeric reductions skip
/// features whose value is missing or non-numeric. Groups whose every value
/// is skipped report Null. Output order follows the first appearance of
/// each group, with one result feature per group carrying the group value
/// and the reduction under `value_key`.
///
/// # Errors
/// `EmptyInput` when no features are given.
pub fn aggregate(
    features: &[Feature],
    group_key: &str,
    value_key: &str,
    op: AggregateOp,
) -> Result<Vec<Feature>> {
    if features.is_empty() {
        return Err(Error::EmptyInput);
    }

    struct Accum {
        group_value: AttributeValue,
        values: Vec<f64>,
        count: usize,
    }

    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Accum> = HashMap::new();

    for feature in features {
        let group_value = feature
            .get_property(group_key)
            .cloned()
            .unwrap_or(AttributeValue::Null);
        let key = group_value.group_key();

        let entry = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            Accum {
                group_value,
                values: Vec::new(),
                count: 0,
            }
        });
        entry.count += 1;
        if let Some(v) = feature.get_property(value_key).and_then(|v| v.as_f64()) {
            entry.values.push(v);
        }
    }

    let mut out = Vec::with_capacity(order.len());
    for key in &order {
        let accum = &groups[key];
        let reduced = match op {
            AggregateOp::Count => AttributeValue::Int(accum.count as i64),
            AggregateOp::Sum if accum.values.is_empty() => AttributeValue::Null,
            AggregateOp::Sum => AttributeValue::Float(accum.values.iter().sum()),
            AggregateOp::Average if accum.values.is_empty() => AttributeValue::Null,
            AggregateOp::Average => AttributeValue::Float(
                accum.values.iter().sum::<f64>() / accum.values.len() as f64,
            ),
            AggregateOp::Min => accum
                .values
                .iter()
                .cloned()
                .fold(None, |acc: Option<f64>, v| {
                    Some(acc.map_or(v, |a| a.min(v)))
                })
                .map_or(AttributeValue::Null, AttributeValue::Float),
            AggregateOp::Max => accum
                .values
                .iter()
                .cloned()
                .fold(None, |acc: Option<f64>, v| {
                    Some(acc.map_or(v, |a| a.max(v)))
                })
                .map_or(AttributeValue::Null, AttributeValue::Float),
        };

        let mut feature = Feature::empty();
        feature.set_property(group_key, accum.group_value.clone());
        feature.set_property(value_key, reduced);
        out.push(feature);
    }
    Ok(out)
}
