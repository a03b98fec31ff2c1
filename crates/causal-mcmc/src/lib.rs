#![deny(missing_docs)]

//! Sampling-loop estimator for pairwise causal score matrices.
//!
//! Each iteration draws one standard-normal variate per ordered pair of
//! distinct variables. Samples from iterations past the burn-in are summed
//! and the total is divided by `iterations - burnin`. Only the column count
//! of the observation table is used.

/// YAML configuration schema and defaults.
pub mod config;
/// Deterministic seed derivation helpers.
pub mod determinism;
/// Core sampling loop and the configured estimator.
pub mod estimator;
/// Run manifest serialization helpers.
pub mod manifest;
/// Variate sources feeding the sampling loop.
pub mod sampler;

pub use config::{EstimatorConfig, OutputConfig, SeedPolicy, ValidationMode};
pub use estimator::{
    causal_score_estimate, estimate_with_source, retained_samples, CausalScoreEstimator, Estimate,
    EstimateSummary,
};
pub use manifest::RunManifest;
pub use sampler::{FixedVariates, NormalVariates, VariateSource};
