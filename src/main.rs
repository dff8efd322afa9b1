use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;
use ml4ms::{ExerciseConfig, Ml4msError};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = ExerciseConfig::parse();
    info!("running {:?} with {} samples", config.exercise, config.samples);

    let gallery = ml4ms::run(&config)?;
    let written = gallery
        .show(&config.out_dir)
        .map_err(Ml4msError::from)
        .with_context(|| format!("failed to write figures to {}", config.out_dir.display()))?;
    info!("{} figure(s) written", written.len());
    Ok(())
}
