use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use crate::{Float, InvalidInputError};
use std::fmt::Debug;

/// Represents a single sample with features and a real-valued label.
///
/// F: The float type for the features and label (e.g., f32, f64).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Sample<F>
where
    F: Float,
{
    pub features: Array1<F>,
    pub target: F,
}

impl<F> Sample<F>
where
    F: Float,
{
    pub fn new(features: Array1<F>, target: F) -> Self {
        Sample { features, target }
    }
}

/// An ordered collection of samples stored as a feature matrix plus a label vector.
///
/// Rows of `records` are samples, columns are feature dimensions. The
/// constructors guarantee that there is one label per row and at least one
/// feature column.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet<F>
where
    F: Float,
{
    records: Array2<F>,
    targets: Array1<F>,
}

impl<F> SampleSet<F>
where
    F: Float,
{
    /// Creates a sample set from a feature matrix and its labels.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInputError::LengthMismatch` if the number of rows and
    /// labels differ, and `InvalidInputError::NoFeatures` for a matrix with no
    /// columns.
    pub fn new(records: Array2<F>, targets: Array1<F>) -> Result<Self, InvalidInputError> {
        if records.nrows() != targets.len() {
            return Err(InvalidInputError::LengthMismatch {
                records: records.nrows(),
                targets: targets.len(),
            });
        }
        if records.ncols() == 0 {
            return Err(InvalidInputError::NoFeatures);
        }
        Ok(Self { records, targets })
    }

    /// Builds a single-feature sample set from parallel x and y slices.
    pub fn from_xy(x: &[F], y: &[F]) -> Result<Self, InvalidInputError> {
        let records = Array2::from_shape_vec((x.len(), 1), x.to_vec()).map_err(|_| {
            InvalidInputError::LengthMismatch {
                records: x.len(),
                targets: y.len(),
            }
        })?;
        Self::new(records, Array1::from(y.to_vec()))
    }

    /// Stacks individual samples into a set.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInputError::Empty` if `samples` is empty (the feature
    /// dimensionality would be unknown) and `DimensionMismatch` if the samples
    /// disagree on their number of features.
    pub fn from_samples(samples: &[Sample<F>]) -> Result<Self, InvalidInputError> {
        let first = samples.first().ok_or(InvalidInputError::Empty)?;
        let n_features = first.features.len();
        if n_features == 0 {
            return Err(InvalidInputError::NoFeatures);
        }

        let mut records = Array2::zeros((samples.len(), n_features));
        for (mut row, sample) in records.rows_mut().into_iter().zip(samples) {
            if sample.features.len() != n_features {
                return Err(InvalidInputError::DimensionMismatch {
                    expected: n_features,
                    found: sample.features.len(),
                });
            }
            row.assign(&sample.features);
        }
        let targets = samples.iter().map(|s| s.target).collect();
        Self::new(records, targets)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.records.ncols()
    }

    pub fn records(&self) -> ArrayView2<'_, F> {
        self.records.view()
    }

    pub fn targets(&self) -> ArrayView1<'_, F> {
        self.targets.view()
    }

    /// The values of feature `j` across all samples.
    pub fn feature_column(&self, j: usize) -> Result<ArrayView1<'_, F>, InvalidInputError> {
        if j >= self.n_features() {
            return Err(InvalidInputError::IndexOutOfBounds {
                index: j,
                len: self.n_features(),
            });
        }
        Ok(self.records.column(j))
    }

    /// The x-values of a single-feature set.
    pub fn single_feature(&self) -> Result<ArrayView1<'_, F>, InvalidInputError> {
        if self.n_features() != 1 {
            return Err(InvalidInputError::NotSingleFeature(self.n_features()));
        }
        Ok(self.records.column(0))
    }

    pub fn sample(&self, i: usize) -> Result<Sample<F>, InvalidInputError> {
        if i >= self.len() {
            return Err(InvalidInputError::IndexOutOfBounds {
                index: i,
                len: self.len(),
            });
        }
        Ok(Sample::new(self.records.row(i).to_owned(), self.targets[i]))
    }

    /// Copies every row out as an owned `Sample`.
    pub fn samples(&self) -> Vec<Sample<F>> {
        self.records
            .rows()
            .into_iter()
            .zip(self.targets.iter())
            .map(|(row, &target)| Sample::new(row.to_owned(), target))
            .collect()
    }

    /// A new set holding the given rows, in the given order.
    pub fn select(&self, indices: &[usize]) -> Result<Self, InvalidInputError> {
        if let Some(&index) = indices.iter().find(|&&i| i >= self.len()) {
            return Err(InvalidInputError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        Ok(Self {
            records: self.records.select(Axis(0), indices),
            targets: self.targets.select(Axis(0), indices),
        })
    }
}
