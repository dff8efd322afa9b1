use log::debug;
use ndarray::{Array1, ArrayView1, Axis};
use thiserror::Error;
// Core components from the shared helpers.
use ml4ms_helpers::{Fit, Float, InvalidInputError, LinearParams, Predictor, SampleSet};

mod solve;

use solve::least_squares;

/// Errors that can occur while fitting or using a linear model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinearRegressionError {
    /// Cannot fit a model without samples
    #[error("cannot fit a linear model on an empty training set")]
    EmptyTrainingSet,
    /// The least-squares solution is not unique (e.g. a constant or duplicated feature)
    #[error("feature matrix is rank deficient; the least-squares solution is not unique")]
    SingularMatrix,
    /// The singular value decomposition did not converge
    #[error("singular value decomposition did not converge")]
    NoConvergence,
    /// The ridge penalty must be a finite, non-negative number
    #[error("ridge penalty must be finite and non-negative, got {0}")]
    InvalidAlpha(f64),
    /// The training data contains NaN or infinite values
    #[error("training data contains non-finite values")]
    NonFinite,
    /// The input was malformed
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
}

/// Hyperparameters of a least-squares linear model.
///
/// With `alpha == 0` this is ordinary least squares; a positive `alpha` adds
/// the ridge penalty `alpha * ||coefficients||^2`. The intercept is never
/// penalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRegression<F: Float> {
    fit_intercept: bool,
    alpha: F,
}

impl<F: Float> Default for LinearRegression<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> LinearRegression<F> {
    /// Ordinary least squares with a fitted intercept.
    pub fn new() -> Self {
        Self {
            fit_intercept: true,
            alpha: F::zero(),
        }
    }

    /// Ridge regression with penalty `alpha`.
    pub fn ridge(alpha: F) -> Self {
        Self::new().with_alpha(alpha)
    }

    /// Whether to fit an intercept. Without one the line goes through the origin.
    pub fn with_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    pub fn with_alpha(mut self, alpha: F) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn alpha(&self) -> F {
        self.alpha
    }

    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }
}

impl<F: Float> Fit<F> for LinearRegression<F> {
    type Model = FittedLinearModel<F>;
    type Error = LinearRegressionError;

    /// Solves the (optionally ridge-penalized) least-squares problem by SVD.
    ///
    /// When an intercept is fitted, features and labels are centered first
    /// so the intercept falls out as `mean(y) - mean(X) · coefficients`.
    ///
    /// # Errors
    ///
    /// Returns `LinearRegressionError::EmptyTrainingSet` for an empty set,
    /// `InvalidAlpha` for a negative or non-finite penalty, `NonFinite` if the
    /// data holds NaN or infinities, and `SingularMatrix` if the solution is
    /// not unique.
    fn fit(&self, data: &SampleSet<F>) -> Result<FittedLinearModel<F>, LinearRegressionError> {
        if !self.alpha.is_finite() || self.alpha < F::zero() {
            return Err(LinearRegressionError::InvalidAlpha(
                self.alpha.to_f64().unwrap_or(f64::NAN),
            ));
        }
        if data.is_empty() {
            return Err(LinearRegressionError::EmptyTrainingSet);
        }
        let records = data.records();
        let targets = data.targets();
        if records.iter().chain(targets.iter()).any(|v| !v.is_finite()) {
            return Err(LinearRegressionError::NonFinite);
        }

        let n_features = data.n_features();
        let (x, y, x_mean, y_mean) = if self.fit_intercept {
            let x_mean = records
                .mean_axis(Axis(0))
                .ok_or(LinearRegressionError::EmptyTrainingSet)?;
            let y_mean = targets.sum() / F::from_count(targets.len());
            (&records - &x_mean, &targets - y_mean, x_mean, y_mean)
        } else {
            (
                records.to_owned(),
                targets.to_owned(),
                Array1::zeros(n_features),
                F::zero(),
            )
        };

        let coefficients = least_squares(x.view(), y.view(), self.alpha)?;
        let intercept = if self.fit_intercept {
            y_mean - x_mean.dot(&coefficients)
        } else {
            F::zero()
        };
        debug!(
            "fitted linear model on {} samples (alpha {:?}): coefficients {:?}, intercept {:?}",
            data.len(),
            self.alpha,
            coefficients,
            intercept
        );

        Ok(FittedLinearModel {
            coefficients,
            intercept,
        })
    }
}

/// A fitted linear model `y = coefficients · x + intercept`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct FittedLinearModel<F: Float> {
    coefficients: Array1<F>,
    intercept: F,
}

impl<F: Float> FittedLinearModel<F> {
    /// Builds a model from known parameters.
    pub fn from_params(coefficients: Array1<F>, intercept: F) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    pub fn coefficients(&self) -> ArrayView1<'_, F> {
        self.coefficients.view()
    }

    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }
}

impl<F: Float> LinearParams<F> for FittedLinearModel<F> {
    fn slope(&self) -> ArrayView1<'_, F> {
        self.coefficients.view()
    }

    fn intercept(&self) -> F {
        self.intercept
    }
}

impl<F: Float> Predictor<F> for FittedLinearModel<F> {
    type Error = LinearRegressionError;

    fn predict_one(&self, features: ArrayView1<F>) -> Result<F, LinearRegressionError> {
        if features.len() != self.coefficients.len() {
            return Err(InvalidInputError::DimensionMismatch {
                expected: self.coefficients.len(),
                found: features.len(),
            }
            .into());
        }
        Ok(features.dot(&self.coefficients) + self.intercept)
    }
}
