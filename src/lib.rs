//! Linear regression and k-nearest-neighbor regression exercises.
//!
//! The algorithms live in their own crates; this crate ties them together
//! into a split/fit/score workflow and draws the results.

pub mod config;
mod error;
pub mod exercises;
pub mod plot;
pub mod workflow;

pub use config::{Exercise, ExerciseConfig};
pub use error::{ErrorKind, Ml4msError};
pub use exercises::run;
pub use ml4ms_helpers::{LineDescriptor, Sample, SampleSet, Split, SplitConfig};
pub use workflow::{Evaluation, FitReport, fit_and_score, knn_sweep, run_fit_workflow};
