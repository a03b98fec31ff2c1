use std::fs;
use std::path::{Path, PathBuf};

use causal_core::{CausalError, RunProvenance, SchemaVersion};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::EstimatorConfig;
use crate::estimator::EstimateSummary;

/// Schema version written into every manifest.
pub const MANIFEST_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Structured manifest describing a completed estimator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Manifest schema version.
    pub schema_version: SchemaVersion,
    /// Configuration used for the run.
    pub config: EstimatorConfig,
    /// Master seed used to derive the sampling stream.
    pub master_seed: u64,
    /// Optional seed label captured from the configuration.
    pub seed_label: Option<String>,
    /// Shape of the observation table as `(rows, cols)`.
    pub observation_shape: (usize, usize),
    /// Provenance of the input and tooling.
    pub provenance: RunProvenance,
    /// Score matrix CSV (relative to run directory).
    pub scores_file: PathBuf,
    /// Summary JSON (relative to run directory).
    pub summary_file: PathBuf,
}

impl RunManifest {
    /// Builds the manifest for a finished run over the table at `input`.
    pub fn for_run(config: &EstimatorConfig, summary: &EstimateSummary, input: &str) -> Self {
        Self {
            schema_version: MANIFEST_SCHEMA,
            config: config.clone(),
            master_seed: summary.seed,
            seed_label: config.seed_policy.label.clone(),
            observation_shape: (summary.observations, summary.dimension),
            provenance: RunProvenance::new(input, summary.seed),
            scores_file: config.output.scores_file.clone(),
            summary_file: config.output.summary_file.clone(),
        }
    }

    /// Writes the manifest to a JSON file.
    pub fn write(&self, path: &Path) -> Result<(), CausalError> {
        write_json(path, self, "manifest")
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, CausalError> {
        read_json(path, "manifest")
    }
}

/// Writes `value` as pretty JSON, creating parent directories. Error codes are
/// prefixed with `kind` (e.g. `summary-write`).
pub fn write_json<T: Serialize>(path: &Path, value: &T, kind: &str) -> Result<(), CausalError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| CausalError::serde_at(&format!("{kind}-mkdir"), err, parent))?;
    }
    let json = serde_json::to_string_pretty(value)
        .map_err(|err| CausalError::serde_at(&format!("{kind}-serialize"), err, path))?;
    fs::write(path, json).map_err(|err| CausalError::serde_at(&format!("{kind}-write"), err, path))
}

/// Reads a JSON document written by [`write_json`].
pub fn read_json<T: DeserializeOwned>(path: &Path, kind: &str) -> Result<T, CausalError> {
    let contents = fs::read_to_string(path)
        .map_err(|err| CausalError::serde_at(&format!("{kind}-read"), err, path))?;
    serde_json::from_str(&contents)
        .map_err(|err| CausalError::serde_at(&format!("{kind}-parse"), err, path))
}
