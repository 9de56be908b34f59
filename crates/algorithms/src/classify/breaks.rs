//! Classification breaks
//!
//! Quantile, equal-interval and Jenks-style natural breaks. The Jenks
//! variant samples evenly spaced indices over the sorted values instead of
//! running the full minimal-variance optimization; it approximates true
//! Jenks and is documented as such.

use kartos_core::{Error, Result};

/// Break computation method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakMethod {
    /// Equal-count bins over the sorted values
    Quantile,
    /// Equal-width intervals over [min, max]
    EqualInterval,
    /// Natural-breaks approximation by even index sampling
    Jenks,
}

/// Compute the interior break thresholds for `classes` classes.
///
/// Returns at most `classes - 1` strictly increasing thresholds; duplicate
/// candidates (heavily tied data) are deduplicated, so fewer breaks than
/// requested can come back. Classify values against the result with
/// [`class_index`].
///
/// # Errors
/// - `EmptyInput` for an empty series
/// - `InvalidParameter` for fewer than 2 classes
pub fn classify_breaks(values: &[f64], classes: usize, method: BreakMethod) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(Error::EmptyInput);
    }
    if classes < 2 {
        return Err(Error::invalid_parameter(
            "classes",
            classes,
            "must be >= 2",
        ));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();

    let candidates: Vec<f64> = match method {
        BreakMethod::Quantile => (1..classes)
            .map(|i| {
                let idx = (i * n) / classes;
                sorted[idx.min(n - 1)]
            })
            .collect(),
        BreakMethod::EqualInterval => {
            let min = sorted[0];
            let max = sorted[n - 1];
            let width = (max - min) / classes as f64;
            (1..classes).map(|i| min + width * i as f64).collect()
        }
        BreakMethod::Jenks => (1..classes)
            .map(|i| {
                let idx = ((i as f64) * (n - 1) as f64 / classes as f64).round() as usize;
                sorted[idx.min(n - 1)]
            })
            .collect(),
    };

    // Strictly increasing: drop candidates that do not advance
    let mut breaks: Vec<f64> = Vec::with_capacity(candidates.len());
    for c in candidates {
        if breaks.last().map_or(true, |&last| c > last) {
            breaks.push(c);
        }
    }
    Ok(breaks)
}

/// Class index of a value: the count of breaks less than or equal to it.
///
/// With at most `classes - 1` breaks the result is always in
/// `[0, classes)`.
pub fn class_index(value: f64, breaks: &[f64]) -> usize {
    breaks.iter().filter(|&&b| b <= value).count()
}
