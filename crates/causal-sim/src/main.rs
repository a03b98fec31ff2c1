use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    estimate::{self, EstimateArgs},
    inspect::{self, InspectArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "causal-sim", about = "Causal score estimator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate the score matrix for an observation table and write run artefacts.
    Estimate(EstimateArgs),
    /// Print the parameters recorded in a run directory.
    Inspect(InspectArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Estimate(args) => estimate::run(&args),
        Command::Inspect(args) => inspect::run(&args),
    }
}
