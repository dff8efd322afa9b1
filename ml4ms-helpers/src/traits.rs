use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::{Float, InvalidInputError, SampleSet, metrics::r2_score};

/// Trains a model from a set of samples.
///
/// Implemented by the hyperparameter structs of each algorithm; the
/// returned model is immutable.
pub trait Fit<F: Float> {
    type Model: Predictor<F>;
    type Error: std::error::Error;

    fn fit(&self, data: &SampleSet<F>) -> Result<Self::Model, Self::Error>;
}

/// A fitted regression model.
pub trait Predictor<F: Float> {
    type Error: std::error::Error + From<InvalidInputError>;

    /// Predicts the label of one feature vector.
    fn predict_one(&self, features: ArrayView1<F>) -> Result<F, Self::Error>;

    /// Predicts one label per row of `records`.
    fn predict(&self, records: ArrayView2<F>) -> Result<Array1<F>, Self::Error> {
        records
            .rows()
            .into_iter()
            .map(|row| self.predict_one(row))
            .collect()
    }

    /// Coefficient of determination of the predictions on `data`.
    fn score(&self, data: &SampleSet<F>) -> Result<F, Self::Error> {
        let predictions = self.predict(data.records())?;
        Ok(r2_score(data.targets(), predictions.view())?)
    }
}

/// Parameters of a fitted linear model.
pub trait LinearParams<F: Float> {
    /// One coefficient per feature dimension.
    fn slope(&self) -> ArrayView1<'_, F>;

    fn intercept(&self) -> F;
}
