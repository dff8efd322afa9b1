//! Goodness-of-fit measures for regression.

use log::warn;
use ndarray::{ArrayView1, Zip};

use crate::{Float, InvalidInputError};

fn check_lengths<F: Float>(
    y_true: &ArrayView1<F>,
    y_pred: &ArrayView1<F>,
) -> Result<(), InvalidInputError> {
    if y_true.len() != y_pred.len() {
        return Err(InvalidInputError::LengthMismatch {
            records: y_pred.len(),
            targets: y_true.len(),
        });
    }
    if y_true.is_empty() {
        return Err(InvalidInputError::Empty);
    }
    Ok(())
}

/// Coefficient of determination, `1 - SS_res / SS_tot`.
///
/// A constant `y_true` scores 1.0 when predicted exactly and 0.0 otherwise.
/// R² is not defined for fewer than two samples; that case yields `NaN`.
///
/// # Errors
///
/// Returns `InvalidInputError::LengthMismatch` if the inputs differ in length
/// and `InvalidInputError::Empty` if they are empty.
pub fn r2_score<F: Float>(y_true: ArrayView1<F>, y_pred: ArrayView1<F>) -> Result<F, InvalidInputError> {
    check_lengths(&y_true, &y_pred)?;
    if y_true.len() < 2 {
        warn!("R^2 score is not well-defined with less than two samples");
        return Ok(F::nan());
    }

    let mean = y_true.sum() / F::from_count(y_true.len());
    let ss_res = Zip::from(&y_true)
        .and(&y_pred)
        .fold(F::zero(), |acc, &t, &p| acc + (t - p) * (t - p));
    let ss_tot = y_true.fold(F::zero(), |acc, &t| acc + (t - mean) * (t - mean));

    if ss_tot == F::zero() {
        return Ok(if ss_res == F::zero() { F::one() } else { F::zero() });
    }
    Ok(F::one() - ss_res / ss_tot)
}

/// Mean of the squared residuals.
pub fn mean_squared_error<F: Float>(
    y_true: ArrayView1<F>,
    y_pred: ArrayView1<F>,
) -> Result<F, InvalidInputError> {
    check_lengths(&y_true, &y_pred)?;
    let ss_res = Zip::from(&y_true)
        .and(&y_pred)
        .fold(F::zero(), |acc, &t, &p| acc + (t - p) * (t - p));
    Ok(ss_res / F::from_count(y_true.len()))
}
