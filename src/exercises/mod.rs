//! The runnable exercises. Each one prints its results and adds its figures
//! to a shared [`Gallery`].

pub mod multi_feature;
pub mod waves;

use log::info;

use crate::config::{Exercise, ExerciseConfig};
use crate::plot::Gallery;
use crate::Ml4msError;

/// Runs the exercise(s) selected in `config` and returns every figure drawn.
pub fn run(config: &ExerciseConfig) -> Result<Gallery, Ml4msError> {
    let mut gallery = Gallery::new();
    if matches!(config.exercise, Exercise::Waves | Exercise::All) {
        info!("running the wave exercise");
        waves::run(config, &mut gallery)?;
    }
    if matches!(config.exercise, Exercise::MultiFeature | Exercise::All) {
        info!("running the multi-feature exercise");
        multi_feature::run(config, &mut gallery)?;
    }
    Ok(gallery)
}
