//! Split, train, evaluate.

use k_nn::KnnParams;
use log::info;
use ml4ms_helpers::line::extent;
use ml4ms_helpers::{
    Fit, Float, L2Dist, LineDescriptor, LinearParams, Predictor, SampleSet, Split, SplitConfig,
    linspace, train_test_split,
};
use ndarray::{Array1, Axis};

use crate::Ml4msError;

/// Parameters and scores of a model trained on one subset and evaluated on another.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<F: Float> {
    /// One coefficient per feature dimension.
    pub slope: Array1<F>,
    pub intercept: F,
    /// R² on the training subset.
    pub train_score: F,
    /// R² on the evaluation subset.
    pub test_score: F,
    /// Predicted labels for the evaluation subset, in its row order.
    pub test_predictions: Array1<F>,
}

impl<F: Float> Evaluation<F> {
    /// The fitted line, if the model has a single feature.
    pub fn line_descriptor(&self) -> Option<LineDescriptor<F>> {
        match self.slope.as_slice() {
            Some(&[slope]) => Some(LineDescriptor::new(slope, self.intercept)),
            _ => None,
        }
    }
}

/// Outcome of [`run_fit_workflow`].
#[derive(Debug, Clone, PartialEq)]
pub struct FitReport<F: Float> {
    pub split: Split<F>,
    pub evaluation: Evaluation<F>,
}

impl<F: Float> FitReport<F> {
    pub fn line_descriptor(&self) -> Option<LineDescriptor<F>> {
        self.evaluation.line_descriptor()
    }
}

/// Fits `algorithm` on `train` and scores it on both `train` and `test`.
///
/// Fit failures are returned unchanged; fitting is deterministic, so there is
/// nothing to retry.
pub fn fit_and_score<F, A>(
    train: &SampleSet<F>,
    test: &SampleSet<F>,
    algorithm: &A,
) -> Result<(A::Model, Evaluation<F>), Ml4msError>
where
    F: Float,
    A: Fit<F>,
    A::Model: LinearParams<F>,
    Ml4msError: From<A::Error> + From<<A::Model as Predictor<F>>::Error>,
{
    let model = algorithm.fit(train)?;
    let slope = model.slope().to_owned();
    let intercept = model.intercept();
    let train_score = model.score(train)?;
    let test_score = model.score(test)?;
    let test_predictions = model.predict(test.records())?;

    Ok((
        model,
        Evaluation {
            slope,
            intercept,
            train_score,
            test_score,
            test_predictions,
        },
    ))
}

/// Splits `data`, fits a linear model on the training part and evaluates it.
///
/// # Errors
///
/// Returns an input error if `data` cannot be split (fewer than two samples
/// or an unusable fraction) and a model-fit error if the collaborator fails.
pub fn run_fit_workflow<F, A>(
    data: &SampleSet<F>,
    config: &SplitConfig,
    algorithm: &A,
) -> Result<(A::Model, FitReport<F>), Ml4msError>
where
    F: Float,
    A: Fit<F>,
    A::Model: LinearParams<F>,
    Ml4msError: From<A::Error> + From<<A::Model as Predictor<F>>::Error>,
{
    let split = train_test_split(data, config)?;
    info!(
        "training on {} samples, evaluating on {}",
        split.train.len(),
        split.test.len()
    );

    let (model, evaluation) = fit_and_score(&split.train, &split.test, algorithm)?;
    info!(
        "R^2 train {:?}, test {:?}",
        evaluation.train_score, evaluation.test_score
    );
    Ok((model, FitReport { split, evaluation }))
}

/// Scores and prediction curve of one k-NN regressor in a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct KnnSweepEntry<F: Float> {
    pub k: usize,
    pub train_score: F,
    pub test_score: F,
    pub test_predictions: Array1<F>,
    /// Predictions on an even grid over the data's x-range.
    pub grid: Vec<(F, F)>,
}

/// Fits one k-NN regressor per entry of `neighbors` on the training subset.
///
/// Each regressor is scored on both subsets and evaluated on `grid_points`
/// evenly spaced x-values spanning all samples. Only single-feature data is
/// supported.
pub fn knn_sweep<F: Float>(
    split: &Split<F>,
    neighbors: &[usize],
    grid_points: usize,
) -> Result<Vec<KnnSweepEntry<F>>, Ml4msError> {
    let train_x = split.train.single_feature()?;
    let test_x = split.test.single_feature()?;
    let (train_lo, train_hi) = extent(train_x)?;
    let (lo, hi) = match extent(test_x) {
        Ok((test_lo, test_hi)) => (train_lo.min(test_lo), train_hi.max(test_hi)),
        Err(_) => (train_lo, train_hi),
    };
    let grid_x = linspace(lo, hi, grid_points);
    let grid_records = grid_x.view().insert_axis(Axis(1));

    neighbors
        .iter()
        .map(|&k| -> Result<KnnSweepEntry<F>, Ml4msError> {
            let model = KnnParams::new(k, L2Dist).fit(&split.train)?;
            let train_score = model.score(&split.train)?;
            let test_score = model.score(&split.test)?;
            let test_predictions = model.predict(split.test.records())?;
            let grid_y = model.predict(grid_records)?;
            info!(
                "{}-NN: R^2 train {:?}, test {:?}",
                k, train_score, test_score
            );
            Ok(KnnSweepEntry {
                k,
                train_score,
                test_score,
                test_predictions,
                grid: grid_x.iter().copied().zip(grid_y).collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use approx::assert_abs_diff_eq;
    use linear_regression::LinearRegression;
    use ml4ms_helpers::datasets::make_wave;
    use ndarray::array;

    fn four_points() -> SampleSet<f64> {
        SampleSet::from_xy(&[0.0, 1.0, 2.0, 3.0], &[0.1, 0.9, 2.2, 2.8]).unwrap()
    }

    #[test]
    fn test_fit_on_all_points_recovers_unit_slope() {
        let data = four_points();
        let (_, eval) = fit_and_score(&data, &data, &LinearRegression::new()).unwrap();
        let line = eval.line_descriptor().unwrap();
        assert!((line.slope - 1.0).abs() < 0.3);
        assert!(line.intercept.abs() < 0.3);
        assert_eq!(eval.train_score, eval.test_score);
        assert_eq!(eval.test_predictions.len(), 4);
    }

    #[test]
    fn test_workflow_reports_consistent_split() {
        let data = make_wave(60, 42).unwrap();
        let config = SplitConfig::default().with_seed(0);
        let (_, report) = run_fit_workflow(&data, &config, &LinearRegression::new()).unwrap();

        assert_eq!(report.split.train.len(), 45);
        assert_eq!(report.split.test.len(), 15);
        assert_eq!(report.evaluation.test_predictions.len(), 15);
        assert!(report.evaluation.train_score <= 1.0);
        assert!(report.evaluation.test_score <= 1.0);
        assert!(report.evaluation.line_descriptor().is_some());
    }

    #[test]
    fn test_workflow_is_reproducible_with_seed() {
        let data = make_wave(40, 1).unwrap();
        let config = SplitConfig::default().with_seed(9);
        let (a, ra) = run_fit_workflow(&data, &config, &LinearRegression::new()).unwrap();
        let (b, rb) = run_fit_workflow(&data, &config, &LinearRegression::new()).unwrap();
        assert_eq!(a, b);
        assert_eq!(ra, rb);
    }

    #[test]
    fn test_single_sample_is_invalid_input() {
        let data = SampleSet::from_xy(&[1.0], &[2.0]).unwrap();
        let err = run_fit_workflow(&data, &SplitConfig::default(), &LinearRegression::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_singular_training_set_is_fit_error() {
        let data = SampleSet::from_xy(&[2.0; 8], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]).unwrap();
        let err = run_fit_workflow(&data, &SplitConfig::default(), &LinearRegression::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ModelFit);
        assert!(matches!(
            err,
            Ml4msError::LinearFit(linear_regression::LinearRegressionError::SingularMatrix)
        ));
    }

    #[test]
    fn test_multi_feature_has_no_line() {
        let data = SampleSet::new(
            array![[0.0, 1.0], [1.0, 0.0], [1.0, 1.0], [2.0, 3.0]],
            array![1.0, 2.0, 3.0, 8.0],
        )
        .unwrap();
        let (_, eval) = fit_and_score(&data, &data, &LinearRegression::new()).unwrap();
        assert_eq!(eval.slope.len(), 2);
        assert!(eval.line_descriptor().is_none());
    }

    #[test]
    fn test_knn_sweep() {
        let data = make_wave(60, 42).unwrap();
        let split = train_test_split(&data, &SplitConfig::default().with_seed(0)).unwrap();
        let sweep = knn_sweep(&split, &[1, 3, 5], 1000).unwrap();

        assert_eq!(sweep.len(), 3);
        assert_eq!(sweep.iter().map(|e| e.k).collect::<Vec<_>>(), vec![1, 3, 5]);
        // Training x-values are distinct, so one neighbor reproduces them exactly.
        assert_abs_diff_eq!(sweep[0].train_score, 1.0);
        for entry in &sweep {
            assert_eq!(entry.grid.len(), 1000);
            assert_eq!(entry.test_predictions.len(), split.test.len());
            assert!(entry.grid.windows(2).all(|w| w[0].0 <= w[1].0));
        }
        assert!(sweep[2].train_score < 1.0);
    }

    #[test]
    fn test_knn_sweep_rejects_zero_neighbors() {
        let data = make_wave(10, 42).unwrap();
        let split = train_test_split(&data, &SplitConfig::default().with_seed(0)).unwrap();
        let err = knn_sweep(&split, &[0], 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ModelFit);
    }
}
