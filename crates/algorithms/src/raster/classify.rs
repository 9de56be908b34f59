//! Multiband Gaussian maximum-likelihood classification
//!
//! Each training class is summarized by a mean vector and a covariance
//! matrix over its labeled samples; pixels are assigned to the class with
//! the highest multivariate normal density, subject to a minimum
//! probability threshold.

use crate::maybe_rayon::*;
use kartos_core::{linalg, Error, Result};
use ndarray::{Array1, Array2};
use std::f64::consts::PI;

/// Class id emitted for pixels below the probability threshold or on nodata
pub const UNCLASSIFIED: i32 = -1;

/// A fitted class signature: mean vector, inverse covariance and the
/// precomputed density normalization constant
#[derive(Debug, Clone)]
pub struct ClassSignature {
    /// Class id reported in the output
    pub id: i32,
    mean: Array1<f64>,
    cov_inv: Array2<f64>,
    /// `1 / sqrt((2π)^k · det(Σ))`
    norm_const: f64,
}

impl ClassSignature {
    /// Fit a signature from training samples, each a vector of band values.
    ///
    /// Covariance is the sample covariance (divisor n-1).
    ///
    /// # Errors
    /// - `InsufficientPoints` for fewer than 2 samples
    /// - `DimensionMismatch` for samples of unequal length
    /// - `NonInvertibleMatrix` when the covariance is degenerate
    pub fn fit(id: i32, samples: &[Vec<f64>]) -> Result<Self> {
        if samples.len() < 2 {
            return Err(Error::InsufficientPoints {
                needed: 2,
                got: samples.len(),
            });
        }
        let bands = samples[0].len();
        if bands == 0 {
            return Err(Error::EmptyInput);
        }
        for s in samples {
            if s.len() != bands {
                return Err(Error::DimensionMismatch {
                    expected: bands,
                    got: s.len(),
                });
            }
        }

        let n = samples.len() as f64;
        let mut mean = Array1::<f64>::zeros(bands);
        for s in samples {
            for (m, &v) in mean.iter_mut().zip(s) {
                *m += v;
            }
        }
        mean.mapv_inplace(|m| m / n);

        let mut cov = Array2::<f64>::zeros((bands, bands));
        for s in samples {
            for i in 0..bands {
                let di = s[i] - mean[i];
                for j in 0..bands {
                    cov[(i, j)] += di * (s[j] - mean[j]);
                }
            }
        }
        cov.mapv_inplace(|c| c / (n - 1.0));

        let det = linalg::determinant(&cov)?;
        if det <= 0.0 {
            return Err(Error::NonInvertibleMatrix);
        }
        let cov_inv = linalg::invert(&cov)?;

        let norm_const = 1.0 / ((2.0 * PI).powi(bands as i32) * det).sqrt();

        Ok(Self {
            id,
            mean,
            cov_inv,
            norm_const,
        })
    }

    /// Number of bands this signature was fit on
    pub fn bands(&self) -> usize {
        self.mean.len()
    }

    /// Multivariate Gaussian density at a pixel vector
    fn density(&self, pixel: &Array1<f64>) -> f64 {
        let diff = pixel - &self.mean;
        let mahalanobis = diff.dot(&self.cov_inv.dot(&diff));
        self.norm_const * (-0.5 * mahalanobis).exp()
    }
}

/// Parameters for maximum-likelihood classification
#[derive(Debug, Clone)]
pub struct MaxLikelihoodParams {
    /// Minimum density for an assignment; pixels below it stay unclassified
    pub threshold: f64,
    /// Sentinel in the input bands marking nodata pixels
    pub nodata: Option<f64>,
}

impl Default for MaxLikelihoodParams {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            nodata: None,
        }
    }
}

/// Classify multiband pixels against fitted class signatures.
///
/// `bands` holds one equal-length pixel vector per band. Each pixel is
/// assigned the id of the class with the highest Gaussian density when that
/// density meets the threshold, else [`UNCLASSIFIED`]. Pixels carrying the
/// nodata sentinel (or NaN) in any band pass through unclassified without
/// density evaluation.
///
/// # Errors
/// - `EmptyInput` for no bands or no signatures
/// - `DimensionMismatch` for unequal band lengths or signatures fit on a
///   different band count
pub fn maximum_likelihood(
    bands: &[Vec<f64>],
    signatures: &[ClassSignature],
    params: &MaxLikelihoodParams,
) -> Result<Vec<i32>> {
    if bands.is_empty() || signatures.is_empty() {
        return Err(Error::EmptyInput);
    }
    let n_pixels = bands[0].len();
    for band in bands {
        if band.len() != n_pixels {
            return Err(Error::DimensionMismatch {
                expected: n_pixels,
                got: band.len(),
            });
        }
    }
    for sig in signatures {
        if sig.bands() != bands.len() {
            return Err(Error::DimensionMismatch {
                expected: bands.len(),
                got: sig.bands(),
            });
        }
    }

    let nodata = params.nodata;
    let threshold = params.threshold;

    let output: Vec<i32> = (0..n_pixels)
        .into_par_iter()
        .map(|px| {
            let mut pixel = Array1::<f64>::zeros(bands.len());
            for (bi, band) in bands.iter().enumerate() {
                let v = band[px];
                if v.is_nan() || nodata.map_or(false, |nd| v == nd) {
                    return UNCLASSIFIED;
                }
                pixel[bi] = v;
            }

            let mut best_p = f64::NEG_INFINITY;
            let mut best_id = UNCLASSIFIED;
            for sig in signatures {
                let p = sig.density(&pixel);
                if p > best_p {
                    best_p = p;
                    best_id = sig.id;
                }
            }

            if best_p >= threshold {
                best_id
            } else {
                UNCLASSIFIED
            }
        })
        .collect();

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two well-separated 2-band clusters
    fn signatures() -> Vec<ClassSignature> {
        let low: Vec<Vec<f64>> = vec![
            vec![1.0, 1.0],
            vec![1.2, 0.9],
            vec![0.8, 1.1],
            vec![1.1, 1.2],
        ];
        let high: Vec<Vec<f64>> = vec![
            vec![10.0, 10.0],
            vec![10.2, 9.8],
            vec![9.9, 10.1],
            vec![9.8, 10.3],
        ];
        vec![
            ClassSignature::fit(1, &low).unwrap(),
            ClassSignature::fit(2, &high).unwrap(),
        ]
    }

    #[test]
    fn test_assigns_nearest_cluster() {
        let bands = vec![vec![1.0, 10.0], vec![1.0, 10.0]];
        let out = maximum_likelihood(&bands, &signatures(), &MaxLikelihoodParams::default())
            .unwrap();
        assert_eq!(out, vec![1, 2]);
    }

    #[test]
    fn test_threshold_rejects_outlier() {
        // A pixel far from both clusters has near-zero density
        let bands = vec![vec![500.0], vec![500.0]];
        let params = MaxLikelihoodParams {
            threshold: 1e-30,
            ..Default::default()
        };
        let out = maximum_likelihood(&bands, &signatures(), &params).unwrap();
        assert_eq!(out, vec![UNCLASSIFIED]);
    }

    #[test]
    fn test_nodata_passes_through() {
        let params = MaxLikelihoodParams {
            nodata: Some(-9999.0),
            ..Default::default()
        };
        let bands = vec![vec![-9999.0, 1.0], vec![1.0, 1.0]];
        let out = maximum_likelihood(&bands, &signatures(), &params).unwrap();
        assert_eq!(out[0], UNCLASSIFIED);
        assert_eq!(out[1], 1);
    }

    #[test]
    fn test_signature_needs_samples() {
        assert!(matches!(
            ClassSignature::fit(1, &[vec![1.0, 2.0]]),
            Err(Error::InsufficientPoints { needed: 2, got: 1 })
        ));
    }

    #[test]
    fn test_degenerate_covariance() {
        // Identical samples give a zero covariance matrix
        let samples = vec![vec![3.0, 4.0], vec![3.0, 4.0], vec![3.0, 4.0]];
        assert!(ClassSignature::fit(1, &samples).is_err());
    }

    #[test]
    fn test_band_count_mismatch() {
        let bands = vec![vec![1.0]];
        assert!(maximum_likelihood(&bands, &signatures(), &MaxLikelihoodParams::default())
            .is_err());
    }
}
