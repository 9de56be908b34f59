//! Empirical variogram and spherical model fitting
//!
//! The empirical variogram bins squared value differences of sample pairs by
//! separation distance; a spherical model is then fit by brute-force grid
//! search over (nugget, sill, range) minimizing the sum of squared errors
//! against the binned semivariances.
//!
//! Reference:
//! Cressie, N. (1993). Statistics for Spatial Data. Wiley.

use kartos_core::{Error, Result};

use super::SamplePoint;

/// Parameters for empirical variogram estimation
#[derive(Debug, Clone)]
pub struct VariogramParams {
    /// Number of distance bins
    pub n_lags: usize,
    /// Width of each distance bin; `None` derives it from the maximum pair
    /// distance divided by `n_lags`.
    pub lag_size: Option<f64>,
}

impl Default for VariogramParams {
    fn default() -> Self {
        Self {
            n_lags: 12,
            lag_size: None,
        }
    }
}

/// Binned experimental semivariances
#[derive(Debug, Clone)]
pub struct EmpiricalVariogram {
    /// Representative distance of each bin (bin center)
    pub lags: Vec<f64>,
    /// Mean semivariance per bin; NaN for bins with no pairs
    pub semivariance: Vec<f64>,
    /// Number of pairs that fell in each bin
    pub pair_counts: Vec<usize>,
}

/// A fitted spherical variogram model.
///
/// gamma(h) rises from `nugget` at h=0+ to `sill` at h=`range` and stays
/// flat beyond. Covariance is `sill - gamma(h)`.
#[derive(Debug, Clone, Copy)]
pub struct VariogramModel {
    pub nugget: f64,
    pub sill: f64,
    pub range: f64,
}

impl VariogramModel {
    /// Build a model after checking `0 <= nugget <= sill` and `range > 0`.
    pub fn new(nugget: f64, sill: f64, range: f64) -> Result<Self> {
        if !(nugget >= 0.0) {
            return Err(Error::invalid_parameter(
                "nugget",
                nugget,
                "must be non-negative",
            ));
        }
        if !(sill >= nugget) {
            return Err(Error::invalid_parameter(
                "sill",
                sill,
                "must be >= nugget",
            ));
        }
        if !(range > 0.0) {
            return Err(Error::invalid_parameter("range", range, "must be > 0"));
        }
        Ok(Self {
            nugget,
            sill,
            range,
        })
    }

    /// Spherical semivariance at distance `h`
    pub fn evaluate(&self, h: f64) -> f64 {
        if h <= 0.0 {
            return 0.0;
        }
        if h >= self.range {
            return self.sill;
        }
        let r = h / self.range;
        self.nugget + (self.sill - self.nugget) * (1.5 * r - 0.5 * r * r * r)
    }

    /// Covariance at distance `h`: `sill - gamma(h)`
    pub fn covariance(&self, h: f64) -> f64 {
        self.sill - self.evaluate(h)
    }
}

/// Compute the empirical variogram of a sample set.
///
/// Each unordered pair (i, j) contributes `(z_i - z_j)^2 / 2` to the bin
/// `floor(distance / lag_size)`; pairs past the last bin are dropped. Bins
/// without pairs get a NaN semivariance.
///
/// # Errors
/// - `InsufficientPoints` for fewer than 2 samples
/// - `InvalidParameter` for zero lags or a non-positive lag size
pub fn empirical_variogram(
    points: &[SamplePoint],
    params: VariogramParams,
) -> Result<EmpiricalVariogram> {
    if points.len() < 2 {
        return Err(Error::InsufficientPoints {
            needed: 2,
            got: points.len(),
        });
    }
    if params.n_lags == 0 {
        return Err(Error::invalid_parameter("n_lags", 0, "must be > 0"));
    }

    let lag_size = match params.lag_size {
        Some(s) if s > 0.0 => s,
        Some(s) => {
            return Err(Error::invalid_parameter("lag_size", s, "must be > 0"));
        }
        None => {
            let mut max_dist: f64 = 0.0;
            for i in 0..points.len() {
                for j in (i + 1)..points.len() {
                    max_dist = max_dist.max(points[i].dist(points[j].x, points[j].y));
                }
            }
            if max_dist <= 0.0 {
                return Err(Error::invalid_parameter(
                    "points",
                    "coincident",
                    "all samples share one location",
                ));
            }
            max_dist / params.n_lags as f64
        }
    };

    let mut sums = vec![0.0_f64; params.n_lags];
    let mut counts = vec![0_usize; params.n_lags];

    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let h = points[i].dist(points[j].x, points[j].y);
            let bin = (h / lag_size).floor() as usize;
            if bin >= params.n_lags {
                continue;
            }
            let dz = points[i].value - points[j].value;
            sums[bin] += dz * dz / 2.0;
            counts[bin] += 1;
        }
    }

    let lags = (0..params.n_lags)
        .map(|k| (k as f64 + 0.5) * lag_size)
        .collect();
    let semivariance = sums
        .iter()
        .zip(&counts)
        .map(|(&s, &c)| if c > 0 { s / c as f64 } else { f64::NAN })
        .collect();

    Ok(EmpiricalVariogram {
        lags,
        semivariance,
        pair_counts: counts,
    })
}

/// Fit a spherical model to an empirical variogram by grid search.
///
/// Candidate nuggets, sills and ranges are spaced over the observed
/// semivariance and lag spans; the combination with the lowest sum of
/// squared errors over non-empty bins wins.
///
/// # Errors
/// `EmptyInput` when every bin of the variogram is empty.
pub fn fit_spherical_variogram(variogram: &EmpiricalVariogram) -> Result<VariogramModel> {
    let observed: Vec<(f64, f64)> = variogram
        .lags
        .iter()
        .zip(&variogram.semivariance)
        .filter(|(_, g)| !g.is_nan())
        .map(|(&h, &g)| (h, g))
        .collect();
    if observed.is_empty() {
        return Err(Error::EmptyInput);
    }

    let max_semi = observed.iter().fold(0.0_f64, |acc, &(_, g)| acc.max(g));
    let max_lag = observed.iter().fold(0.0_f64, |acc, &(h, _)| acc.max(h));

    // Flat field: every pair identical. Degenerate but valid.
    if max_semi <= 0.0 {
        return VariogramModel::new(0.0, f64::EPSILON, max_lag.max(1.0));
    }

    const STEPS: usize = 20;
    let mut best = VariogramModel {
        nugget: 0.0,
        sill: max_semi,
        range: max_lag,
    };
    let mut best_sse = f64::INFINITY;

    for ni in 0..=STEPS / 2 {
        let nugget = max_semi * ni as f64 / STEPS as f64;
        for si in 1..=STEPS {
            let sill = max_semi * 1.2 * si as f64 / STEPS as f64;
            if sill < nugget {
                continue;
            }
            for ri in 1..=STEPS {
                let range = max_lag * ri as f64 / STEPS as f64;
                let candidate = VariogramModel {
                    nugget,
                    sill,
                    range,
                };

                let sse: f64 = observed
                    .iter()
                    .map(|&(h, g)| {
                        let e = candidate.evaluate(h) - g;
                        e * e
                    })
                    .sum();

                if sse < best_sse {
                    best_sse = sse;
                    best = candidate;
                }
            }
        }
    }

    Ok(best)
}
