use ml4ms_helpers::Float;
use nalgebra::{DMatrix, DVector, SVD};
use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::LinearRegressionError;

const MAX_SVD_ITERATIONS: usize = 10_000;

/// Least-squares solution of `x · β ≈ y`, optionally ridge-penalized.
///
/// A positive `alpha` appends the rows `sqrt(alpha) · I` to `x` and zeros to
/// `y`, which turns the ridge problem into ordinary least squares. Columns
/// are scaled to unit norm before the SVD, so the rank test does not depend
/// on the units of the features.
///
/// A singular value at or below `eps · max(rows, cols) · σ_max` marks the
/// design as rank deficient.
pub(crate) fn least_squares<F: Float>(
    x: ArrayView2<F>,
    y: ArrayView1<F>,
    alpha: F,
) -> Result<Array1<F>, LinearRegressionError> {
    let (n, p) = x.dim();
    let penalty = alpha.to_f64().ok_or(LinearRegressionError::NonFinite)?.sqrt();
    let rows = if penalty > 0.0 { n + p } else { n };

    let mut design = DMatrix::from_fn(rows, p, |i, j| {
        if i < n {
            x[[i, j]].to_f64().unwrap_or(f64::NAN)
        } else if i - n == j {
            penalty
        } else {
            0.0
        }
    });
    let target = DVector::from_fn(rows, |i, _| {
        if i < n {
            y[i].to_f64().unwrap_or(f64::NAN)
        } else {
            0.0
        }
    });

    let scales: Vec<f64> = design
        .column_iter()
        .map(|column| match column.norm() {
            norm if norm > 0.0 => norm,
            _ => 1.0,
        })
        .collect();
    for (mut column, &scale) in design.column_iter_mut().zip(&scales) {
        column /= scale;
    }

    let svd = SVD::try_new(design, true, true, f64::EPSILON, MAX_SVD_ITERATIONS)
        .ok_or(LinearRegressionError::NoConvergence)?;
    let largest = svd.singular_values.max();
    let tolerance = f64::EPSILON * rows.max(p) as f64 * largest;
    if svd.singular_values.len() < p
        || largest <= 0.0
        || svd.singular_values.iter().any(|&s| s <= tolerance)
    {
        return Err(LinearRegressionError::SingularMatrix);
    }

    let solution = svd
        .solve(&target, tolerance)
        .map_err(|_| LinearRegressionError::SingularMatrix)?;
    solution
        .iter()
        .zip(&scales)
        .map(|(&b, &scale)| F::cast(b / scale).ok_or(LinearRegressionError::NonFinite))
        .collect()
}
