//! Synthetic regression datasets.

use ndarray::{Array1, Array2, Axis};
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::{InvalidInputError, SampleSet};

/// Seed used when a dataset should look the same on every run.
pub const DEFAULT_DATA_SEED: u64 = 42;

/// A noisy single-feature wave.
///
/// `x` is drawn uniformly from `[-3, 3)` and
/// `y = (sin(4x) + x + noise) / 2` with standard normal noise.
pub fn make_wave(n_samples: usize, seed: u64) -> Result<SampleSet<f64>, InvalidInputError> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let x: Array1<f64> = (0..n_samples).map(|_| rng.random_range(-3.0..3.0)).collect();
    let y = x.mapv(|xi| {
        let noise: f64 = rng.sample(StandardNormal);
        ((4.0 * xi).sin() + xi + noise) / 2.0
    });
    SampleSet::new(x.insert_axis(Axis(1)), y)
}

/// Samples from a noisy linear process with known coefficients.
///
/// Every feature is drawn uniformly from `[-1, 1)` and
/// `y = X · coefficients + intercept + noise * N(0, 1)`.
///
/// # Errors
///
/// Returns `InvalidInputError::NoFeatures` if `coefficients` is empty.
pub fn make_linear(
    n_samples: usize,
    coefficients: &[f64],
    intercept: f64,
    noise: f64,
    seed: u64,
) -> Result<SampleSet<f64>, InvalidInputError> {
    if coefficients.is_empty() {
        return Err(InvalidInputError::NoFeatures);
    }
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let records = Array2::<f64>::from_shape_simple_fn((n_samples, coefficients.len()), || {
        rng.random_range(-1.0..1.0)
    });

    let coef = Array1::from(coefficients.to_vec());
    let mut targets = records.dot(&coef) + intercept;
    for t in targets.iter_mut() {
        let eps: f64 = rng.sample(StandardNormal);
        *t += noise * eps;
    }
    SampleSet::new(records, targets)
}
