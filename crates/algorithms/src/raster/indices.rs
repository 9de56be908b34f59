//! Spectral band indices
//!
//! Elementwise ratios over equal-length band arrays. Bands are plain pixel
//! vectors; georeferencing is the caller's concern.

use kartos_core::{Error, Result};

/// Parameters shared by the band index functions
#[derive(Debug, Clone)]
pub struct IndexParams {
    /// Sentinel value passed through unchanged wherever either input band
    /// carries it
    pub nodata: Option<f64>,
    /// Clamp range for normalized ratios
    pub clamp: (f64, f64),
}

impl Default for IndexParams {
    fn default() -> Self {
        Self {
            nodata: None,
            clamp: (-1.0, 1.0),
        }
    }
}

fn check_lengths(a: &[f64], b: &[f64]) -> Result<()> {
    if a.is_empty() {
        return Err(Error::EmptyInput);
    }
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    Ok(())
}

fn is_sentinel(v: f64, nodata: Option<f64>) -> bool {
    match nodata {
        Some(nd) => v == nd || (v.is_nan() && nd.is_nan()),
        None => false,
    }
}

/// Normalized difference `(a - b) / (a + b)`, clamped to the configured
/// range.
///
/// Pixels where either band carries the nodata sentinel keep the sentinel;
/// a zero denominator yields 0.
///
/// # Errors
/// - `EmptyInput` for empty bands
/// - `DimensionMismatch` for unequal band lengths
pub fn normalized_difference(
    band_a: &[f64],
    band_b: &[f64],
    params: &IndexParams,
) -> Result<Vec<f64>> {
    check_lengths(band_a, band_b)?;
    let (lo, hi) = params.clamp;

    Ok(band_a
        .iter()
        .zip(band_b)
        .map(|(&a, &b)| {
            if is_sentinel(a, params.nodata) {
                return a;
            }
            if is_sentinel(b, params.nodata) {
                return b;
            }
            let denom = a + b;
            if denom.abs() < f64::EPSILON {
                0.0
            } else {
                ((a - b) / denom).clamp(lo, hi)
            }
        })
        .collect())
}

/// Normalized Difference Vegetation Index: `(NIR - Red) / (NIR + Red)`
pub fn ndvi(nir: &[f64], red: &[f64], params: &IndexParams) -> Result<Vec<f64>> {
    normalized_difference(nir, red, params)
}

/// Difference Vegetation Index: `NIR - Red` (not normalized, not clamped)
pub fn dvi(nir: &[f64], red: &[f64], params: &IndexParams) -> Result<Vec<f64>> {
    check_lengths(nir, red)?;
    Ok(nir
        .iter()
        .zip(red)
        .map(|(&a, &b)| {
            if is_sentinel(a, params.nodata) {
                a
            } else if is_sentinel(b, params.nodata) {
                b
            } else {
                a - b
            }
        })
        .collect())
}

/// Normalized Difference Water Index (McFeeters): `(Green - NIR) / (Green + NIR)`
pub fn ndwi(green: &[f64], nir: &[f64], params: &IndexParams) -> Result<Vec<f64>> {
    normalized_difference(green, nir, params)
}

/// Normalized Difference Snow Index: `(Green - SWIR) / (Green + SWIR)`
pub fn ndsi(green: &[f64], swir: &[f64], params: &IndexParams) -> Result<Vec<f64>> {
    normalized_difference(green, swir, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndvi_known_values() {
        let nir = vec![0.8, 0.5, 0.3];
        let red = vec![0.2, 0.5, 0.6];
        let out = ndvi(&nir, &red, &IndexParams::default()).unwrap();

        assert!((out[0] - 0.6).abs() < 1e-12);
        assert!((out[1] - 0.0).abs() < 1e-12);
        assert!((out[2] - (-1.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_denominator_yields_zero() {
        let out = ndvi(&[0.5], &[-0.5], &IndexParams::default()).unwrap();
        assert_eq!(out[0], 0.0);
    }

    #[test]
    fn test_nodata_passthrough() {
        let params = IndexParams {
            nodata: Some(-9999.0),
            ..Default::default()
        };
        let out = ndvi(&[-9999.0, 0.8], &[0.2, -9999.0], &params).unwrap();
        assert_eq!(out, vec![-9999.0, -9999.0]);
    }

    #[test]
    fn test_clamp() {
        // (10 - (-9.9)) / (10 + (-9.9)) = 199, clamped
        let out = ndvi(&[10.0], &[-9.9], &IndexParams::default()).unwrap();
        assert_eq!(out[0], 1.0);
    }

    #[test]
    fn test_dvi_plain_difference() {
        let out = dvi(&[0.8, 0.4], &[0.2, 0.5], &IndexParams::default()).unwrap();
        assert!((out[0] - 0.6).abs() < 1e-12);
        assert!((out[1] - (-0.1)).abs() < 1e-12);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            ndvi(&[0.1, 0.2], &[0.1], &IndexParams::default()),
            Err(Error::DimensionMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn test_empty_bands() {
        assert!(matches!(
            ndvi(&[], &[], &IndexParams::default()),
            Err(Error::EmptyInput)
        ));
    }
}
