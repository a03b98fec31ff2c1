use std::error::Error;
use std::path::PathBuf;

use causal_core::ScoreMatrix;
use causal_mcmc::{RunManifest, ValidationMode};
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Run directory produced by `causal-sim estimate`.
    #[arg(long)]
    pub run: PathBuf,
    /// Manifest filename inside the run directory.
    #[arg(long, default_value = "manifest.json")]
    pub manifest: PathBuf,
}

#[derive(Debug, Serialize)]
struct InspectReport {
    input: String,
    observation_shape: (usize, usize),
    iterations: i64,
    burnin: i64,
    validation: ValidationMode,
    master_seed: u64,
    seed_label: Option<String>,
    non_finite_scores: usize,
}

pub fn run(args: &InspectArgs) -> Result<(), Box<dyn Error>> {
    let manifest = RunManifest::load(&args.run.join(&args.manifest))?;
    let scores = ScoreMatrix::read_csv(&args.run.join(&manifest.scores_file))?;
    let report = InspectReport {
        input: manifest.provenance.input.clone(),
        observation_shape: manifest.observation_shape,
        iterations: manifest.config.iterations,
        burnin: manifest.config.burnin,
        validation: manifest.config.validation,
        master_seed: manifest.master_seed,
        seed_label: manifest.seed_label.clone(),
        non_finite_scores: scores
            .as_slice()
            .iter()
            .filter(|value| !value.is_finite())
            .count(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
