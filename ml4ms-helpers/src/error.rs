use thiserror::Error;

/// Malformed or insufficient input handed to one of the helpers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    /// An operation that needs at least one value got none.
    #[error("input is empty")]
    Empty,
    /// The number of feature rows and labels disagree.
    #[error("mismatched lengths: {records} feature vectors but {targets} labels")]
    LengthMismatch { records: usize, targets: usize },
    /// Feature vectors must carry at least one dimension.
    #[error("feature vectors must have at least one dimension")]
    NoFeatures,
    /// A feature vector does not have the dimensionality of the rest of the set.
    #[error("expected feature vectors of dimension {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// Splitting needs at least two samples.
    #[error("need at least 2 samples to split, got {0}")]
    TooFewSamples(usize),
    /// The test fraction has to lie strictly between 0 and 1.
    #[error("test fraction must be in (0, 1), got {0}")]
    InvalidFraction(f64),
    /// The requested split would leave one side without samples.
    #[error("split of {n_samples} samples leaves {n_train} for training and {n_test} for evaluation")]
    EmptyPartition {
        n_samples: usize,
        n_train: usize,
        n_test: usize,
    },
    /// A sample index is outside the set.
    #[error("sample index {index} out of bounds for {len} samples")]
    IndexOutOfBounds { index: usize, len: usize },
    /// The operation only supports single-feature data.
    #[error("expected single-feature data, got {0} features")]
    NotSingleFeature(usize),
}
