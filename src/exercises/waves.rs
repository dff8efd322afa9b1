//! Linear and nearest-neighbor regression on the one-dimensional wave.

use linear_regression::LinearRegression;
use ml4ms_helpers::datasets::make_wave;
use ml4ms_helpers::InvalidInputError;

use crate::config::ExerciseConfig;
use crate::plot::{Canvas, Figure, Gallery, Marker, PALETTE, sloping_line};
use crate::workflow::{FitReport, KnnSweepEntry, knn_sweep, run_fit_workflow};
use crate::Ml4msError;

/// Neighbor counts compared in the grid figure.
pub const NEIGHBORS: [usize; 6] = [1, 3, 5, 7, 9, 11];
/// Number of x-values the k-NN prediction curves are evaluated on.
pub const GRID_POINTS: usize = 1000;

/// Everything the wave exercise computed.
#[derive(Debug, Clone, PartialEq)]
pub struct WavesOutcome {
    pub linear: FitReport<f64>,
    /// One entry per value of [`NEIGHBORS`], in order.
    pub sweep: Vec<KnnSweepEntry<f64>>,
}

pub fn run(config: &ExerciseConfig, gallery: &mut Gallery) -> Result<WavesOutcome, Ml4msError> {
    let data = make_wave(config.samples, config.data_seed)?;
    let x = data.single_feature()?;
    println!("x = {}", x);
    println!("y = {}", data.targets());

    let (model, report) = run_fit_workflow(&data, &config.split_config(), &LinearRegression::new())?;
    println!("{:?}", model);
    let line = report
        .line_descriptor()
        .ok_or(InvalidInputError::NotSingleFeature(data.n_features()))?;
    println!("slope: {:.4}", line.slope);
    println!("intercept: {:.4}", line.intercept);

    let test_x = report.split.test.single_feature()?;
    let canvas = Canvas::new("Linear regression on the wave")
        .with_axis_labels("feature", "target")
        .scatter(x, data.targets(), Marker::Circle, PALETTE[0])?
        .labeled("data");
    let canvas = sloping_line(canvas, x, line.slope, line.intercept)?.labeled("fit");
    let canvas = canvas
        .scatter(
            test_x,
            report.evaluation.test_predictions.view(),
            Marker::Triangle,
            PALETTE[2],
        )?
        .labeled("test predictions")
        .scatter(test_x, report.split.test.targets(), Marker::Cross, PALETTE[3])?
        .labeled("test actual");
    gallery.push(Figure::single("linear-fit", canvas));

    println!("train R^2: {:.2}", report.evaluation.train_score);
    println!("test R^2: {:.2}", report.evaluation.test_score);

    let sweep = knn_sweep(&report.split, &NEIGHBORS, GRID_POINTS)?;
    let train_x = report.split.train.single_feature()?;

    if let Some(nearest) = sweep.first() {
        let canvas = Canvas::new(format!("{}-NN regression", nearest.k))
            .with_axis_labels("feature", "target")
            .scatter(train_x, report.split.train.targets(), Marker::Circle, PALETTE[0])?
            .labeled("training data")
            .scatter(test_x, nearest.test_predictions.view(), Marker::Triangle, PALETTE[1])?
            .labeled("test predictions")
            .line(nearest.grid.clone(), false, PALETTE[2])
            .labeled("model");
        gallery.push(Figure::single("knn-nearest", canvas));
    }

    let mut grid = Figure::grid("knn-neighbors", 3, 3);
    for entry in &sweep {
        println!(
            "{}-NN: train R^2 {:.2}, test R^2 {:.2}",
            entry.k, entry.train_score, entry.test_score
        );
        let canvas = Canvas::new(format!(
            "{} neighbor(s): train {:.2}, test {:.2}",
            entry.k, entry.train_score, entry.test_score
        ))
        .with_axis_labels("feature", "target")
        .scatter(train_x, report.split.train.targets(), Marker::Circle, PALETTE[0])?
        .scatter(test_x, report.split.test.targets(), Marker::Cross, PALETTE[3])?
        .line(entry.grid.clone(), false, PALETTE[2]);
        grid = grid.with_panel(canvas)?;
    }
    gallery.push(grid);

    Ok(WavesOutcome {
        linear: report,
        sweep,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_waves_builds_three_figures() {
        let config = ExerciseConfig {
            seed: Some(0),
            ..ExerciseConfig::default()
        };
        let mut gallery = Gallery::new();
        let outcome = run(&config, &mut gallery).unwrap();

        let names: Vec<&str> = gallery.figures().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["linear-fit", "knn-nearest", "knn-neighbors"]);
        assert_eq!(gallery.figures()[2].panels().len(), NEIGHBORS.len());

        // data, fitted line, test predictions, test actual
        assert_eq!(gallery.figures()[0].panels()[0].series().len(), 4);
        assert_eq!(outcome.sweep.len(), NEIGHBORS.len());
        assert_abs_diff_eq!(outcome.sweep[0].train_score, 1.0);
        assert_eq!(outcome.linear.split.test.len(), 15);
    }

    #[test]
    fn test_waves_rejects_single_sample() {
        let config = ExerciseConfig {
            samples: 1,
            ..ExerciseConfig::default()
        };
        let mut gallery = Gallery::new();
        let err = run(&config, &mut gallery).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidInput);
        assert!(gallery.is_empty());
    }
}
