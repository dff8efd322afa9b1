use k_nn::KnnError;
use linear_regression::LinearRegressionError;
use ml4ms_helpers::InvalidInputError;
use thiserror::Error;

use crate::plot::RenderError;

/// The three ways a workflow run can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    ModelFit,
    Render,
}

/// Everything that can go wrong between loading samples and drawing them.
#[derive(Debug, Error)]
pub enum Ml4msError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
    #[error("linear fit failed: {0}")]
    LinearFit(LinearRegressionError),
    #[error("k-NN fit failed: {0}")]
    KnnFit(KnnError),
    #[error("rendering failed: {0}")]
    Render(#[from] RenderError),
}

impl Ml4msError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::LinearFit(_) | Self::KnnFit(_) => ErrorKind::ModelFit,
            Self::Render(_) => ErrorKind::Render,
        }
    }
}

// Collaborator errors that only wrap bad input keep their input category.
impl From<LinearRegressionError> for Ml4msError {
    fn from(e: LinearRegressionError) -> Self {
        match e {
            LinearRegressionError::InvalidInput(inner) => Self::InvalidInput(inner),
            other => Self::LinearFit(other),
        }
    }
}

impl From<KnnError> for Ml4msError {
    fn from(e: KnnError) -> Self {
        match e {
            KnnError::InvalidInput(inner) => Self::InvalidInput(inner),
            other => Self::KnnFit(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let e: Ml4msError = InvalidInputError::TooFewSamples(1).into();
        assert_eq!(e.kind(), ErrorKind::InvalidInput);

        let e: Ml4msError = LinearRegressionError::SingularMatrix.into();
        assert_eq!(e.kind(), ErrorKind::ModelFit);

        let e: Ml4msError = LinearRegressionError::InvalidInput(InvalidInputError::Empty).into();
        assert_eq!(e.kind(), ErrorKind::InvalidInput);

        let e: Ml4msError = KnnError::InvalidK.into();
        assert_eq!(e.kind(), ErrorKind::ModelFit);

        let e: Ml4msError = RenderError::LengthMismatch { xs: 2, ys: 3 }.into();
        assert_eq!(e.kind(), ErrorKind::Render);
    }
}
