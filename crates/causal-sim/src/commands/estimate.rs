use std::error::Error;
use std::fs;
use std::path::PathBuf;

use causal_core::ObservationMatrix;
use causal_mcmc::manifest::write_json;
use causal_mcmc::{CausalScoreEstimator, EstimatorConfig, RunManifest, ValidationMode};
use clap::Args;

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// CSV file holding the observation table.
    #[arg(long)]
    pub data: PathBuf,
    /// Treat the first CSV row as column names.
    #[arg(long)]
    pub has_headers: bool,
    /// YAML configuration; command line values override it.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Total sampling iterations.
    #[arg(long, allow_hyphen_values = true)]
    pub iterations: Option<i64>,
    /// Leading iterations to discard.
    #[arg(long, allow_hyphen_values = true)]
    pub burnin: Option<i64>,
    /// Master seed for the sampling stream.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Reject runs that retain no samples instead of writing NaN scores.
    #[arg(long)]
    pub strict: bool,
    /// Output directory for run artefacts.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &EstimateArgs) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(args)?;
    let data = ObservationMatrix::read_csv(&args.data, args.has_headers)?;
    let estimate = CausalScoreEstimator::new(config.clone()).estimate(&data)?;

    fs::create_dir_all(&args.out)?;
    estimate
        .scores
        .write_csv(&args.out.join(&config.output.scores_file))?;
    write_json(
        &args.out.join(&config.output.summary_file),
        &estimate.summary,
        "summary",
    )?;
    let input = args.data.display().to_string();
    let manifest = RunManifest::for_run(&config, &estimate.summary, &input);
    manifest.write(&args.out.join(&config.output.manifest_file))?;
    fs::write(args.out.join("config.yaml"), serde_yaml::to_string(&config)?)?;

    println!(
        "wrote {0}x{0} scores ({1} retained samples) to {2}",
        estimate.summary.dimension,
        estimate.summary.retained_samples,
        args.out.display()
    );
    Ok(())
}

fn resolve_config(args: &EstimateArgs) -> Result<EstimatorConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => EstimatorConfig::load(path)?,
        None => EstimatorConfig::default(),
    };
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(burnin) = args.burnin {
        config.burnin = burnin;
    }
    if let Some(seed) = args.seed {
        config.seed_policy.master_seed = seed;
    }
    if args.strict {
        config.validation = ValidationMode::Strict;
    }
    Ok(config)
}
