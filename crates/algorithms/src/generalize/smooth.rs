//! Chaikin corner-cutting smoothing
//!
//! Reference:
//! Chaikin, G. (1974). An algorithm for high-speed curve generation.
//! Computer Graphics and Image Processing 3(4).

use geo_types::Coord;
use kartos_core::{Error, Result};

/// Smooth a polyline by corner cutting.
///
/// Each iteration replaces every edge with two points at fractions `ratio`
/// and `1 - ratio` along it; the original endpoints stay fixed. The classic
/// Chaikin ratio is 0.25. Inputs of fewer than 3 points are returned
/// unchanged.
///
/// # Errors
/// `InvalidParameter` for a ratio outside (0, 0.5].
pub fn chaikin(points: &[Coord<f64>], ratio: f64, iterations: usize) -> Result<Vec<Coord<f64>>> {
    if !(ratio > 0.0 && ratio <= 0.5) {
        return Err(Error::invalid_parameter(
            "ratio",
            ratio,
            "must be in (0, 0.5]",
        ));
    }
    if points.len() < 3 || iterations == 0 {
        return Ok(points.to_vec());
    }

    let mut current = points.to_vec();
    for _ in 0..iterations {
        let mut smoothed = Vec::with_capacity(current.len() * 2);
        smoothed.push(current[0]);

        for pair in current.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            smoothed.push(Coord {
                x: a.x + (b.x - a.x) * ratio,
                y: a.y + (b.y - a.y) * ratio,
            });
            smoothed.push(Coord {
                x: a.x + (b.x - a.x) * (1.0 - ratio),
                y: a.y + (b.y - a.y) * (1.0 - ratio),
            });
        }

        smoothed.push(current[current.len() - 1]);
        current = smoothed;
    }

    Ok(current)
}
