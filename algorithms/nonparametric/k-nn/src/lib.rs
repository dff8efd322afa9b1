use thiserror::Error;
// These are the core components from our shared library.
use ml4ms_helpers::{Distance, Fit, InvalidInputError, Predictor, Sample, SampleSet};

// ndarray and ml4ms_helpers are used in the public function signatures.
use ndarray::ArrayView1;
use ml4ms_helpers::Float;

/// Errors that can occur when using the k-NN regressor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KnnError {
    /// k cannot be zero for a k-NN regressor
    #[error("k cannot be zero for a k-NN regressor")]
    InvalidK,
    /// Cannot predict with an empty training set
    #[error("Cannot predict with an empty training set")]
    EmptyTrainingSet,
    /// Invalid distance comparison (likely due to NaN values in data)
    #[error("Invalid distance comparison (likely due to NaN values in data)")]
    InvalidDistance,
    /// The query or a training sample has the wrong number of features
    #[error("expected {expected} features, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// The input was malformed
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
}

/// How the neighbors' labels are combined into a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Weights {
    /// Plain mean of the neighbors' labels.
    #[default]
    Uniform,
    /// Mean weighted by inverse distance. Exact matches take all the weight.
    Distance,
}

/// Hyperparameters of a k-NN regressor; fitting stores the training set.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct KnnParams<F, D>
where
    F: Float,
    D: Distance<F>,
{
    k: usize,
    distance: D,
    weights: Weights,
    _float: std::marker::PhantomData<F>,
}

impl<F, D> KnnParams<F, D>
where
    F: Float,
    D: Distance<F>,
{
    pub fn new(k: usize, distance: D) -> Self {
        Self {
            k,
            distance,
            weights: Weights::Uniform,
            _float: std::marker::PhantomData,
        }
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }
}

impl<F, D> Fit<F> for KnnParams<F, D>
where
    F: Float,
    D: Distance<F>,
{
    type Model = KnnRegressor<F, D>;
    type Error = KnnError;

    fn fit(&self, data: &SampleSet<F>) -> Result<KnnRegressor<F, D>, KnnError> {
        Ok(KnnRegressor::new(self.k, data.samples(), self.distance.clone())?.with_weights(self.weights))
    }
}

/// A k-Nearest Neighbors (k-NN) regressor.
///
/// This regressor predicts the label of a new data point by finding the `k`
/// most similar points in its training set and averaging their labels.
///
/// # Type Parameters
///
/// * `F`: The float type for the features and labels (e.g., `f32`, `f64`).
/// * `D`: The distance metric, which must implement the `ml4ms_helpers::Distance` trait.
#[derive(Debug, Clone)]
pub struct KnnRegressor<F, D>
where
    F: Float,
    D: Distance<F>,
{
    k: usize,
    training_data: Vec<Sample<F>>,
    distance: D,
    weights: Weights,
}

impl<F, D> KnnRegressor<F, D>
where
    F: Float,
    D: Distance<F>,
{
    /// Creates a new k-NN regressor.
    ///
    /// # Arguments
    ///
    /// * `k`: The number of neighbors to average over. Must be greater than 0.
    /// * `training_data`: A vector of `Sample`s that the regressor will learn from.
    /// * `distance`: An instance of a struct that implements the `Distance` trait (e.g., `L2Dist`).
    ///
    /// # Errors
    ///
    /// Returns `KnnError::InvalidK` if `k` is 0, and `KnnError::DimensionMismatch`
    /// if the training samples disagree on their number of features.
    pub fn new(k: usize, training_data: Vec<Sample<F>>, distance: D) -> Result<Self, KnnError> {
        if k == 0 {
            return Err(KnnError::InvalidK);
        }
        if let Some(first) = training_data.first() {
            let expected = first.features.len();
            if let Some(bad) = training_data.iter().find(|s| s.features.len() != expected) {
                return Err(KnnError::DimensionMismatch {
                    expected,
                    found: bad.features.len(),
                });
            }
        }
        Ok(Self {
            k,
            training_data,
            distance,
            weights: Weights::Uniform,
        })
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// The `k` nearest training samples to `features` as `(relative distance, label)`,
    /// closest first. Fewer are returned if the training set is smaller than `k`.
    fn neighbors(&self, features: ArrayView1<F>) -> Result<Vec<(F, F)>, KnnError> {
        let first = self.training_data.first().ok_or(KnnError::EmptyTrainingSet)?;
        if first.features.len() != features.len() {
            return Err(KnnError::DimensionMismatch {
                expected: first.features.len(),
                found: features.len(),
            });
        }

        // 1. Calculate the "relative distance" (e.g., squared Euclidean) from the new point
        //    to every point in the training set. This is faster than the true distance.
        let mut distances: Vec<(F, F)> = self
            .training_data
            .iter()
            .map(|sample| {
                let dist = self.distance.rdistance(sample.features.view(), features);
                (dist, sample.target)
            })
            .collect();
        if distances.iter().any(|(d, _)| d.is_nan()) {
            return Err(KnnError::InvalidDistance);
        }

        // 2. Sort the training points by their distance to the new point (ascending).
        //    Stable, so equidistant points keep their training order.
        distances.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        // 3. Take the top `k` neighbors.
        //    We use `min` to handle cases where k is larger than the training set size.
        distances.truncate(self.k.min(distances.len()));
        Ok(distances)
    }
}

impl<F, D> Predictor<F> for KnnRegressor<F, D>
where
    F: Float,
    D: Distance<F>,
{
    type Error = KnnError;

    /// Predicts the label for a new, unseen data point.
    ///
    /// # Errors
    ///
    /// Returns `KnnError::EmptyTrainingSet` if the training data is empty.
    /// Returns `KnnError::InvalidDistance` if a distance is NaN.
    /// Returns `KnnError::DimensionMismatch` if `features` has the wrong length.
    fn predict_one(&self, features: ArrayView1<F>) -> Result<F, KnnError> {
        let neighbors = self.neighbors(features)?;

        match self.weights {
            Weights::Uniform => {
                let sum: F = neighbors.iter().map(|&(_, label)| label).sum();
                Ok(sum / F::from_count(neighbors.len()))
            }
            Weights::Distance => {
                // Exact matches would get infinite weight; average them alone.
                let exact: Vec<F> = neighbors
                    .iter()
                    .filter(|(d, _)| *d == F::zero())
                    .map(|&(_, label)| label)
                    .collect();
                if !exact.is_empty() {
                    let sum: F = exact.iter().copied().sum();
                    return Ok(sum / F::from_count(exact.len()));
                }

                let (weighted, total) = neighbors.iter().fold(
                    (F::zero(), F::zero()),
                    |(weighted, total), &(rdist, label)| {
                        let w = F::one() / self.distance.rdist_to_dist(rdist);
                        (weighted + w * label, total + w)
                    },
                );
                Ok(weighted / total)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use ml4ms_helpers::{L1Dist, L2Dist};

    fn line_samples() -> Vec<Sample<f64>> {
        vec![
            Sample::new(array![0.0], 0.0),
            Sample::new(array![1.0], 10.0),
            Sample::new(array![2.0], 20.0),
            Sample::new(array![10.0], 100.0),
        ]
    }

    #[test]
    fn test_knn_regression_simple() {
        // Define training data
        let training_data = vec![
            Sample::new(array![1.0, 1.0], 1.0),
            Sample::new(array![2.0, 2.0], 2.0),
            Sample::new(array![1.0, 2.0], 3.0),
            Sample::new(array![8.0, 8.0], 10.0),
            Sample::new(array![9.0, 8.0], 11.0),
            Sample::new(array![8.0, 9.0], 12.0),
        ];

        // Create a regressor with k=3 and L2 (Euclidean) distance
        let regressor = KnnRegressor::new(3, training_data, L2Dist).unwrap();

        // Point close to the first group
        let point_a = array![1.5, 1.5];
        assert_abs_diff_eq!(regressor.predict_one(point_a.view()).unwrap(), 2.0);

        // Point close to the second group
        let point_b = array![8.5, 8.5];
        assert_abs_diff_eq!(regressor.predict_one(point_b.view()).unwrap(), 11.0);
    }

    #[test]
    fn test_one_neighbor_reproduces_training_labels() {
        let data = SampleSet::from_samples(&line_samples()).unwrap();
        let model = KnnParams::new(1, L2Dist).fit(&data).unwrap();
        assert_abs_diff_eq!(model.score(&data).unwrap(), 1.0);
        assert_abs_diff_eq!(model.predict_one(array![0.9].view()).unwrap(), 10.0);
    }

    #[test]
    fn test_knn_k_larger_than_dataset() {
        // k=10 is larger than the dataset size of 4, so every label is averaged.
        let regressor = KnnRegressor::new(10, line_samples(), L1Dist).unwrap();
        let point = array![3.0];
        assert_abs_diff_eq!(regressor.predict_one(point.view()).unwrap(), 32.5);
    }

    #[test]
    fn test_distance_weights() {
        let regressor = KnnRegressor::new(2, line_samples(), L2Dist)
            .unwrap()
            .with_weights(Weights::Distance);
        // Neighbors 1.0 (distance 0.25) and 2.0 (distance 0.75): weights 4 and 4/3.
        let expected = (4.0 * 10.0 + (4.0 / 3.0) * 20.0) / (4.0 + 4.0 / 3.0);
        assert_abs_diff_eq!(
            regressor.predict_one(array![1.25].view()).unwrap(),
            expected,
            epsilon = 1e-12
        );
        // Exact hit returns the stored label.
        assert_abs_diff_eq!(regressor.predict_one(array![2.0].view()).unwrap(), 20.0);
    }

    #[test]
    fn test_error_on_k_zero() {
        let training_data: Vec<Sample<f64>> = vec![];
        let result = KnnRegressor::new(0, training_data, L2Dist);
        assert!(matches!(result, Err(KnnError::InvalidK)));
    }

    #[test]
    fn test_error_on_empty_training_set() {
        let training_data: Vec<Sample<f64>> = vec![];
        let regressor = KnnRegressor::new(3, training_data, L2Dist).unwrap();
        let result = regressor.predict_one(array![1.0, 1.0].view());
        assert!(matches!(result, Err(KnnError::EmptyTrainingSet)));
    }

    #[test]
    fn test_error_on_nan_and_dimensions() {
        let regressor = KnnRegressor::new(1, line_samples(), L2Dist).unwrap();
        assert_eq!(
            regressor.predict_one(array![f64::NAN].view()).unwrap_err(),
            KnnError::InvalidDistance
        );
        assert_eq!(
            regressor.predict_one(array![1.0, 2.0].view()).unwrap_err(),
            KnnError::DimensionMismatch {
                expected: 1,
                found: 2
            }
        );

        let ragged = vec![Sample::new(array![1.0], 1.0), Sample::new(array![1.0, 2.0], 2.0)];
        assert!(matches!(
            KnnRegressor::new(1, ragged, L2Dist),
            Err(KnnError::DimensionMismatch { .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_params_are_serializable() {
        fn assert_serde<T: serde_crate::Serialize + serde_crate::de::DeserializeOwned>() {}
        assert_serde::<Weights>();
        assert_serde::<KnnParams<f64, L2Dist>>();
        assert_serde::<KnnParams<f64, ml4ms_helpers::LpDist<f64>>>();
    }
}
