use std::fs;
use std::path::{Path, PathBuf};

use causal_core::errors::ErrorInfo;
use causal_core::CausalError;
use serde::{Deserialize, Serialize};

/// YAML-configurable parameters governing an estimator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Total number of sampling iterations, burn-in included.
    #[serde(default = "default_iterations")]
    pub iterations: i64,
    /// Number of leading iterations whose samples are discarded.
    #[serde(default = "default_burnin")]
    pub burnin: i64,
    /// How degenerate iteration/burn-in combinations are treated.
    #[serde(default)]
    pub validation: ValidationMode,
    /// Master seed and labelling policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Artefact file names used by the CLI.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_iterations() -> i64 {
    1000
}

fn default_burnin() -> i64 {
    200
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            burnin: default_burnin(),
            validation: ValidationMode::default(),
            seed_policy: SeedPolicy::default(),
            output: OutputConfig::default(),
        }
    }
}

impl EstimatorConfig {
    /// Creates a configuration with the given iteration counts and default policies.
    pub fn new(iterations: i64, burnin: i64) -> Self {
        Self {
            iterations,
            burnin,
            ..Self::default()
        }
    }

    /// Parses a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, CausalError> {
        serde_yaml::from_str(text)
            .map_err(|err| CausalError::Serde(ErrorInfo::new("config-parse", err.to_string())))
    }

    /// Loads a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, CausalError> {
        let text = fs::read_to_string(path)
            .map_err(|err| CausalError::serde_at("config-read", err, path))?;
        serde_yaml::from_str(&text).map_err(|err| CausalError::serde_at("config-parse", err, path))
    }

    /// Number of retained samples used as the normalisation denominator.
    ///
    /// This is `iterations - burnin` as written, so it may be zero or negative.
    pub fn retained_samples(&self) -> f64 {
        crate::estimator::retained_samples(self.iterations, self.burnin)
    }

    /// Applies the configured validation mode.
    ///
    /// Permissive mode accepts every combination. Strict mode rejects a
    /// negative burn-in and any run that would retain no samples.
    pub fn validate(&self) -> Result<(), CausalError> {
        if self.validation == ValidationMode::Permissive {
            return Ok(());
        }
        if self.burnin < 0 {
            return Err(CausalError::Config(
                ErrorInfo::new("negative-burnin", "burn-in must not be negative")
                    .with_context("burnin", self.burnin.to_string()),
            ));
        }
        if self.iterations <= self.burnin {
            return Err(CausalError::Config(
                ErrorInfo::new(
                    "no-retained-samples",
                    "iterations must exceed burn-in to retain any samples",
                )
                .with_context("iterations", self.iterations.to_string())
                .with_context("burnin", self.burnin.to_string())
                .with_hint("increase iterations or lower burnin"),
            ));
        }
        Ok(())
    }
}

/// Treatment of iteration/burn-in combinations that retain no samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    /// Accept everything; degenerate denominators surface as NaN or signed zero.
    #[default]
    Permissive,
    /// Reject `burnin < 0` and `iterations <= burnin` before sampling.
    Strict,
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for the run.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label recorded in manifests.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

/// Output file layout, relative to the run directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Score matrix CSV filename.
    #[serde(default = "default_scores_filename")]
    pub scores_file: PathBuf,
    /// Summary JSON filename.
    #[serde(default = "default_summary_filename")]
    pub summary_file: PathBuf,
    /// Manifest filename.
    #[serde(default = "default_manifest_filename")]
    pub manifest_file: PathBuf,
}

fn default_scores_filename() -> PathBuf {
    PathBuf::from("scores.csv")
}

fn default_summary_filename() -> PathBuf {
    PathBuf::from("summary.json")
}

fn default_manifest_filename() -> PathBuf {
    PathBuf::from("manifest.json")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            scores_file: default_scores_filename(),
            summary_file: default_summary_filename(),
            manifest_file: default_manifest_filename(),
        }
    }
}
