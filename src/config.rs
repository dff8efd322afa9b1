use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use ml4ms_helpers::datasets::DEFAULT_DATA_SEED;
use ml4ms_helpers::split::DEFAULT_TEST_FRACTION;
use ml4ms_helpers::SplitConfig;

/// Which exercise to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Exercise {
    /// Linear and k-NN regression on the noisy wave.
    Waves,
    /// Least squares versus ridge on several features.
    MultiFeature,
    /// Every exercise, one after the other.
    All,
}

/// Linear regression and k-NN regression exercises.
///
/// Runs the selected exercise once and writes every figure it produced as
/// SVG into the output directory.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "ml4ms", version)]
pub struct ExerciseConfig {
    /// Exercise to run.
    #[arg(long, value_enum, default_value_t = Exercise::Waves)]
    pub exercise: Exercise,

    /// Number of samples to generate.
    #[arg(long, default_value_t = 60)]
    pub samples: usize,

    /// Share of samples held out for evaluation.
    #[arg(long, default_value_t = DEFAULT_TEST_FRACTION)]
    pub test_fraction: f64,

    /// Seed for the train/test split. Unseeded runs differ every time.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Seed for the synthetic dataset.
    #[arg(long, default_value_t = DEFAULT_DATA_SEED)]
    pub data_seed: u64,

    /// Directory the figures are written to.
    #[arg(long, default_value = "figures")]
    pub out_dir: PathBuf,
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            exercise: Exercise::Waves,
            samples: 60,
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: None,
            data_seed: DEFAULT_DATA_SEED,
            out_dir: PathBuf::from("figures"),
        }
    }
}

impl ExerciseConfig {
    pub fn split_config(&self) -> SplitConfig {
        SplitConfig {
            test_fraction: self.test_fraction,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_matches_default() {
        let parsed = ExerciseConfig::try_parse_from(["ml4ms"]).unwrap();
        assert_eq!(parsed, ExerciseConfig::default());
        assert_eq!(parsed.split_config(), SplitConfig::default());
    }

    #[test]
    fn test_flags() {
        let parsed = ExerciseConfig::try_parse_from([
            "ml4ms",
            "--exercise",
            "multi-feature",
            "--samples",
            "100",
            "--test-fraction",
            "0.5",
            "--seed",
            "7",
            "--out-dir",
            "/tmp/plots",
        ])
        .unwrap();
        assert_eq!(parsed.exercise, Exercise::MultiFeature);
        assert_eq!(parsed.samples, 100);
        assert_eq!(
            parsed.split_config(),
            SplitConfig {
                test_fraction: 0.5,
                seed: Some(7)
            }
        );
        assert_eq!(parsed.out_dir, PathBuf::from("/tmp/plots"));
    }

    #[test]
    fn test_unknown_exercise_rejected() {
        assert!(ExerciseConfig::try_parse_from(["ml4ms", "--exercise", "lasso"]).is_err());
    }
}
