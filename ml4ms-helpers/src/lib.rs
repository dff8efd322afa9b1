use ndarray::{NdFloat, ScalarOperand};

use num_traits::{AsPrimitive, FromPrimitive, NumCast, Signed};
use rand::distr::uniform::SampleUniform;

use std::iter::Sum;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

// Include submodules
mod common;
pub mod datasets;
mod distance;
mod error;
pub mod line;
pub mod metrics;
pub mod split;
mod traits;

// Re-export types from submodules
pub use common::{Sample, SampleSet};
pub use distance::{Distance, L1Dist, L2Dist, LInfDist, LpDist};
pub use error::InvalidInputError;
pub use line::{LINE_RESOLUTION, LineDescriptor, linspace, sloping_line};
pub use metrics::{mean_squared_error, r2_score};
pub use split::{Split, SplitConfig, train_test_split};
pub use traits::{Fit, LinearParams, Predictor};

pub trait Float:
    NdFloat
    + FromPrimitive
    + Default
    + Signed
    + Sum
    + AsPrimitive<usize>
    + for<'a> AddAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> DivAssign<&'a Self>
    + num_traits::MulAdd<Output = Self>
    + SampleUniform
    + ScalarOperand
    + std::marker::Unpin
{
    fn cast<T: NumCast>(x: T) -> Option<Self> {
        NumCast::from(x)
    }

    /// Converts a count into the float type. Counts used here are always representable.
    fn from_count(n: usize) -> Self {
        <Self as NumCast>::from(n).unwrap_or_else(Self::nan)
    }
}

impl Float for f32 {}

impl Float for f64 {}
