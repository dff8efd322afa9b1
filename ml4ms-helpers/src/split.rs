//! Random partitioning of a sample set into training and evaluation subsets.

use log::debug;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::{Float, InvalidInputError, SampleSet};

/// Default share of samples held out for evaluation.
pub const DEFAULT_TEST_FRACTION: f64 = 0.25;

/// How to split a sample set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitConfig {
    /// Share of the samples that go into the evaluation subset.
    pub test_fraction: f64,
    /// Seed for the shuffle. `None` draws a fresh seed on every call.
    pub seed: Option<u64>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: None,
        }
    }
}

impl SplitConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_test_fraction(mut self, test_fraction: f64) -> Self {
        self.test_fraction = test_fraction;
        self
    }

    /// Sizes of the (training, evaluation) subsets for `n_samples` samples.
    ///
    /// # Errors
    ///
    /// Fails if there are fewer than two samples, if the fraction is not in
    /// (0, 1), or if either subset would come out empty.
    pub fn partition_sizes(&self, n_samples: usize) -> Result<(usize, usize), InvalidInputError> {
        if n_samples < 2 {
            return Err(InvalidInputError::TooFewSamples(n_samples));
        }
        let f = self.test_fraction;
        if !f.is_finite() || f <= 0.0 || f >= 1.0 {
            return Err(InvalidInputError::InvalidFraction(f));
        }
        let n_test = (f * n_samples as f64).ceil() as usize;
        let n_train = n_samples.saturating_sub(n_test);
        if n_train == 0 || n_test == 0 {
            return Err(InvalidInputError::EmptyPartition {
                n_samples,
                n_train,
                n_test,
            });
        }
        Ok((n_train, n_test))
    }
}

/// A disjoint partition of a sample set.
///
/// `train_indices` and `test_indices` refer to rows of the original set and
/// together cover it exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct Split<F: Float> {
    pub train: SampleSet<F>,
    pub test: SampleSet<F>,
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
    /// The seed that produced this split, so an unseeded run can be replayed.
    pub seed: u64,
}

/// Shuffles the samples and splits them into training and evaluation subsets.
///
/// The first `ceil(test_fraction * N)` shuffled indices become the evaluation
/// subset and the rest the training subset. The same seed always yields the
/// same partition.
pub fn train_test_split<F: Float>(
    data: &SampleSet<F>,
    config: &SplitConfig,
) -> Result<Split<F>, InvalidInputError> {
    let (n_train, n_test) = config.partition_sizes(data.len())?;
    let seed = config.seed.unwrap_or_else(rand::random);

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..data.len()).collect();
    indices.shuffle(&mut rng);

    let train_indices = indices.split_off(n_test);
    let test_indices = indices;
    debug!(
        "split {} samples into {} train / {} test (seed {})",
        data.len(),
        n_train,
        n_test,
        seed
    );

    Ok(Split {
        train: data.select(&train_indices)?,
        test: data.select(&test_indices)?,
        train_indices,
        test_indices,
        seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ramp(n: usize) -> SampleSet<f64> {
        let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v).collect();
        SampleSet::from_xy(&x, &y).unwrap()
    }

    #[test]
    fn test_partition_is_disjoint_and_covering() {
        for n in [2, 3, 7, 60, 101] {
            let data = ramp(n);
            let split = train_test_split(&data, &SplitConfig::default()).unwrap();

            assert_eq!(split.train.len() + split.test.len(), n);
            let train: HashSet<_> = split.train_indices.iter().copied().collect();
            let test: HashSet<_> = split.test_indices.iter().copied().collect();
            assert!(train.is_disjoint(&test));
            let all: HashSet<_> = train.union(&test).copied().collect();
            assert_eq!(all, (0..n).collect::<HashSet<_>>());
        }
    }

    #[test]
    fn test_default_is_quarter_held_out() {
        let split = train_test_split(&ramp(60), &SplitConfig::default()).unwrap();
        assert_eq!(split.test.len(), 15);
        assert_eq!(split.train.len(), 45);
    }

    #[test]
    fn test_rows_follow_indices() {
        let data = ramp(10);
        let split = train_test_split(&data, &SplitConfig::default().with_seed(3)).unwrap();
        for (row, &i) in split.train.targets().iter().zip(&split.train_indices) {
            assert_eq!(*row, 2.0 * i as f64);
        }
    }

    #[test]
    fn test_seed_reproducibility() {
        let data = ramp(40);
        let config = SplitConfig::default().with_seed(42);
        let a = train_test_split(&data, &config).unwrap();
        let b = train_test_split(&data, &config).unwrap();
        assert_eq!(a, b);

        let c = train_test_split(&data, &config.with_seed(43)).unwrap();
        assert_ne!(a.test_indices, c.test_indices);
    }

    #[test]
    fn test_unseeded_split_records_seed() {
        let data = ramp(20);
        let a = train_test_split(&data, &SplitConfig::default()).unwrap();
        let replay = train_test_split(&data, &SplitConfig::default().with_seed(a.seed)).unwrap();
        assert_eq!(a, replay);
    }

    #[test]
    fn test_too_few_samples() {
        let data = ramp(1);
        assert_eq!(
            train_test_split(&data, &SplitConfig::default()).unwrap_err(),
            InvalidInputError::TooFewSamples(1)
        );
    }

    #[test]
    fn test_invalid_fractions() {
        let data = ramp(10);
        for f in [0.0, 1.0, -0.5, f64::NAN] {
            let config = SplitConfig::default().with_test_fraction(f);
            assert!(matches!(
                train_test_split(&data, &config),
                Err(InvalidInputError::InvalidFraction(_))
            ));
        }
        let config = SplitConfig::default().with_test_fraction(0.9);
        assert!(matches!(
            train_test_split(&ramp(2), &config),
            Err(InvalidInputError::EmptyPartition { .. })
        ));
    }
}
