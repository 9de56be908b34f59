//! Value normalization

use kartos_core::{Error, Result};

/// Normalization method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeMethod {
    /// `(v - min) / (max - min)`, mapping onto [0, 1]
    MinMax,
    /// `(v - mean) / stddev` (population stddev)
    ZScore,
    /// `v / 10^j` with the smallest `j` bringing all magnitudes below 1
    DecimalScaling,
}

/// Normalize a value series.
///
/// Degenerate inputs (zero range for min-max, zero standard deviation for
/// z-score, all-zero values for decimal scaling) return the values
/// unchanged rather than NaN.
///
/// # Errors
/// `EmptyInput` for an empty series.
pub fn normalize(values: &[f64], method: NormalizeMethod) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(Error::EmptyInput);
    }

    match method {
        NormalizeMethod::MinMax => {
            let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let range = max - min;
            if range == 0.0 {
                return Ok(values.to_vec());
            }
            Ok(values.iter().map(|v| (v - min) / range).collect())
        }
        NormalizeMethod::ZScore => {
            let n = values.len() as f64;
            let mean = values.iter().sum::<f64>() / n;
            let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
            let stddev = variance.sqrt();
            if stddev == 0.0 {
                return Ok(values.to_vec());
            }
            Ok(values.iter().map(|v| (v - mean) / stddev).collect())
        }
        NormalizeMethod::DecimalScaling => {
            let max_abs = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
            if max_abs == 0.0 {
                return Ok(values.to_vec());
            }
            let j = max_abs.log10().floor() + 1.0;
            let divisor = 10f64.powf(j);
            Ok(values.iter().map(|v| v / divisor).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minmax_range() {
        let out = normalize(&[10.0, 20.0, 30.0], NormalizeMethod::MinMax).unwrap();
        assert_eq!(out, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_minmax_zero_range_passthrough() {
        let values = vec![5.0, 5.0, 5.0];
        assert_eq!(
            normalize(&values, NormalizeMethod::MinMax).unwrap(),
            values
        );
    }

    #[test]
    fn test_zscore_mean_zero() {
        let out = normalize(&[2.0, 4.0, 6.0, 8.0], NormalizeMethod::ZScore).unwrap();
        let mean: f64 = out.iter().sum::<f64>() / out.len() as f64;
        assert!(mean.abs() < 1e-12);
        // Population stddev of the output is 1
        let var: f64 = out.iter().map(|v| v * v).sum::<f64>() / out.len() as f64;
        assert!((var - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zscore_zero_stddev_passthrough() {
        let values = vec![3.0, 3.0];
        assert_eq!(
            normalize(&values, NormalizeMethod::ZScore).unwrap(),
            values
        );
    }

    #[test]
    fn test_decimal_scaling() {
        let out = normalize(&[150.0, -32.0, 7.0], NormalizeMethod::DecimalScaling).unwrap();
        assert_eq!(out, vec![0.15, -0.032, 0.007]);
        assert!(out.iter().all(|v| v.abs() < 1.0));
    }

    #[test]
    fn test_decimal_scaling_all_zero_passthrough() {
        let values = vec![0.0, 0.0];
        assert_eq!(
            normalize(&values, NormalizeMethod::DecimalScaling).unwrap(),
            values
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            normalize(&[], NormalizeMethod::MinMax),
            Err(Error::EmptyInput)
        ));
    }
}
