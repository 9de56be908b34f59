//! Shared dense linear algebra
//!
//! Kriging and Gaussian maximum-likelihood classification both need to invert
//! small covariance matrices; the Gauss-Jordan routine lives here so the two
//! users share one implementation. Matrices are `ndarray::Array2<f64>` and
//! small (tens of rows), so no blocking or decomposition library is needed.

use crate::error::{Error, Result};
use ndarray::{Array1, Array2};

/// Pivot threshold below which a matrix is treated as singular
const PIVOT_EPSILON: f64 = 1e-10;

/// Check that a matrix is square and return its side length.
///
/// The error reports the true input shape; the expected square side is the
/// larger of the two dimensions so the message names a shape the input could
/// be extended to, not one it already has.
fn require_square(matrix: &Array2<f64>) -> Result<usize> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        let side = rows.max(cols);
        return Err(Error::SizeMismatch {
            er: side,
            ec: side,
            ar: rows,
            ac: cols,
        });
    }
    Ok(rows)
}

/// Invert a square matrix with Gauss-Jordan elimination and partial pivoting.
///
/// # Errors
/// - `SizeMismatch` if the matrix is not square
/// - `NonInvertibleMatrix` if any pivot is below `1e-10` after the row-swap
///   search (degenerate covariance)
pub fn invert(matrix: &Array2<f64>) -> Result<Array2<f64>> {
    let n = require_square(matrix)?;

    // Augmented [A | I], reduced in place
    let mut a = matrix.clone();
    let mut inv = Array2::<f64>::eye(n);

    for col in 0..n {
        // Partial pivoting: pick the largest remaining entry in this column
        let mut pivot_row = col;
        let mut pivot_val = a[(col, col)].abs();
        for row in (col + 1)..n {
            let v = a[(row, col)].abs();
            if v > pivot_val {
                pivot_val = v;
                pivot_row = row;
            }
        }

        if pivot_val < PIVOT_EPSILON {
            return Err(Error::NonInvertibleMatrix);
        }

        if pivot_row != col {
            for j in 0..n {
                a.swap((col, j), (pivot_row, j));
                inv.swap((col, j), (pivot_row, j));
            }
        }

        let pivot = a[(col, col)];
        for j in 0..n {
            a[(col, j)] /= pivot;
            inv[(col, j)] /= pivot;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[(row, col)];
            if factor == 0.0 {
                continue;
            }
            for j in 0..n {
                let av = a[(col, j)];
                let iv = inv[(col, j)];
                a[(row, j)] -= factor * av;
                inv[(row, j)] -= factor * iv;
            }
        }
    }

    Ok(inv)
}

/// Determinant by recursive cofactor expansion along the first row.
///
/// O(n!); intended for the small covariance matrices of the classifier
/// (one row/column per band), not general use.
///
/// # Errors
/// `SizeMismatch` if the matrix is not square.
pub fn determinant(matrix: &Array2<f64>) -> Result<f64> {
    require_square(matrix)?;
    Ok(det_recursive(matrix))
}

fn det_recursive(m: &Array2<f64>) -> f64 {
    let n = m.nrows();
    match n {
        0 => 1.0,
        1 => m[(0, 0)],
        2 => m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
        _ => {
            let mut det = 0.0;
            for col in 0..n {
                let minor = minor_matrix(m, 0, col);
                let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
                det += sign * m[(0, col)] * det_recursive(&minor);
            }
            det
        }
    }
}

fn minor_matrix(m: &Array2<f64>, skip_row: usize, skip_col: usize) -> Array2<f64> {
    let n = m.nrows();
    let mut out = Array2::<f64>::zeros((n - 1, n - 1));
    let mut r = 0;
    for row in 0..n {
        if row == skip_row {
            continue;
        }
        let mut c = 0;
        for col in 0..n {
            if col == skip_col {
                continue;
            }
            out[(r, c)] = m[(row, col)];
            c += 1;
        }
        r += 1;
    }
    out
}

/// Matrix-vector product `A · v`.
///
/// # Errors
/// `DimensionMismatch` if the vector length does not match the column count.
pub fn mat_vec(matrix: &Array2<f64>, vector: &Array1<f64>) -> Result<Array1<f64>> {
    if matrix.ncols() != vector.len() {
        return Err(Error::DimensionMismatch {
            expected: matrix.ncols(),
            got: vector.len(),
        });
    }
    Ok(matrix.dot(vector))
}
