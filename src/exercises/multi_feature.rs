//! Ordinary least squares against ridge regression on several features.

use linear_regression::LinearRegression;
use ml4ms_helpers::datasets::make_linear;
use ml4ms_helpers::{LineDescriptor, train_test_split};

use crate::config::ExerciseConfig;
use crate::plot::{Canvas, Figure, Gallery, Marker, PALETTE};
use crate::workflow::{Evaluation, fit_and_score};
use crate::Ml4msError;

pub const COEFFICIENTS: [f64; 3] = [1.5, -2.0, 0.5];
pub const INTERCEPT: f64 = 3.0;
pub const NOISE: f64 = 0.5;
pub const RIDGE_ALPHAS: [f64; 2] = [1.0, 10.0];

/// Scores of one regularization strength.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelComparison {
    pub name: String,
    pub alpha: f64,
    pub evaluation: Evaluation<f64>,
}

pub fn run(
    config: &ExerciseConfig,
    gallery: &mut Gallery,
) -> Result<Vec<ModelComparison>, Ml4msError> {
    let data = make_linear(config.samples, &COEFFICIENTS, INTERCEPT, NOISE, config.data_seed)?;
    let split = train_test_split(&data, &config.split_config())?;
    println!("true coefficients: {:?}, intercept {}", COEFFICIENTS, INTERCEPT);

    let candidates = std::iter::once(("least squares".to_string(), 0.0)).chain(
        RIDGE_ALPHAS
            .iter()
            .map(|&alpha| (format!("ridge alpha={}", alpha), alpha)),
    );

    let actual = split.test.targets();
    let mut figure = Figure::grid("predicted-vs-actual", 1, RIDGE_ALPHAS.len() + 1);
    let mut comparisons = Vec::new();
    for (name, alpha) in candidates {
        let (_, evaluation) = fit_and_score(&split.train, &split.test, &LinearRegression::ridge(alpha))?;
        println!("{}:", name);
        println!("  coefficients: {}", evaluation.slope);
        println!("  intercept: {:.4}", evaluation.intercept);
        println!(
            "  train R^2: {:.2}, test R^2: {:.2}",
            evaluation.train_score, evaluation.test_score
        );

        let identity = LineDescriptor::identity().points(actual)?;
        let canvas = Canvas::new(format!("{}: test R^2 {:.2}", name, evaluation.test_score))
            .with_axis_labels("actual", "predicted")
            .scatter(actual, evaluation.test_predictions.view(), Marker::Circle, PALETTE[0])?
            .labeled("test samples")
            .line(identity, true, PALETTE[1])
            .labeled("y = x");
        figure = figure.with_panel(canvas)?;

        comparisons.push(ModelComparison {
            name,
            alpha,
            evaluation,
        });
    }
    gallery.push(figure);
    Ok(comparisons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ridge_shrinks_coefficients() {
        let config = ExerciseConfig {
            samples: 200,
            seed: Some(3),
            ..ExerciseConfig::default()
        };
        let mut gallery = Gallery::new();
        let comparisons = run(&config, &mut gallery).unwrap();

        assert_eq!(comparisons.len(), 3);
        assert_eq!(gallery.len(), 1);
        assert_eq!(gallery.figures()[0].panels().len(), 3);

        let norms: Vec<f64> = comparisons
            .iter()
            .map(|c| c.evaluation.slope.dot(&c.evaluation.slope))
            .collect();
        assert!(norms[0] > norms[1]);
        assert!(norms[1] > norms[2]);

        let ols = &comparisons[0].evaluation;
        for (fitted, truth) in ols.slope.iter().zip(COEFFICIENTS) {
            assert!((fitted - truth).abs() < 0.3);
        }
        assert!(ols.test_score > 0.7);
    }
}
