//! Straight-line parameterization for overlaying fitted lines on scatter plots.

use ndarray::{Array1, ArrayView1};

use crate::{Float, InvalidInputError};

/// Number of points used to draw a straight line.
pub const LINE_RESOLUTION: usize = 100;

/// A straight line `y = slope * x + intercept`, used purely for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct LineDescriptor<F: Float> {
    pub slope: F,
    pub intercept: F,
}

impl<F: Float> LineDescriptor<F> {
    pub fn new(slope: F, intercept: F) -> Self {
        Self { slope, intercept }
    }

    /// The identity line `y = x`.
    pub fn identity() -> Self {
        Self::new(F::one(), F::zero())
    }

    pub fn y(&self, x: F) -> F {
        self.slope * x + self.intercept
    }

    /// See [`sloping_line`].
    pub fn points(&self, x: ArrayView1<F>) -> Result<Vec<(F, F)>, InvalidInputError> {
        sloping_line(x, self.slope, self.intercept)
    }
}

/// `n` evenly spaced values from `min` to `max`, both ends included exactly.
///
/// `n == 1` yields `[min]`; `n == 0` yields an empty array.
pub fn linspace<F: Float>(min: F, max: F, n: usize) -> Array1<F> {
    if n < 2 {
        return Array1::from_elem(n, min);
    }
    let step = (max - min) / F::from_count(n - 1);
    Array1::from_shape_fn(n, |i| {
        if i == n - 1 {
            max
        } else {
            min + step * F::from_count(i)
        }
    })
}

/// Smallest and largest value of a non-empty collection.
pub fn extent<F: Float>(x: ArrayView1<F>) -> Result<(F, F), InvalidInputError> {
    let first = *x.first().ok_or(InvalidInputError::Empty)?;
    Ok(x.iter()
        .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))))
}

/// Computes [`LINE_RESOLUTION`] points of the line `y = slope * x + intercept`,
/// spanning the range of `x` from its minimum to its maximum.
///
/// If every value in `x` is equal, all points coincide at that x.
///
/// # Errors
///
/// Returns `InvalidInputError::Empty` if `x` holds no values.
pub fn sloping_line<F: Float>(
    x: ArrayView1<F>,
    slope: F,
    intercept: F,
) -> Result<Vec<(F, F)>, InvalidInputError> {
    let (min, max) = extent(x)?;
    let line = LineDescriptor::new(slope, intercept);
    Ok(linspace(min, max, LINE_RESOLUTION)
        .into_iter()
        .map(|xi| (xi, line.y(xi)))
        .collect())
}
