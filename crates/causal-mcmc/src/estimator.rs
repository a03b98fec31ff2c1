use causal_core::{CausalError, ObservationMatrix, ScoreMatrix};
use serde::{Deserialize, Serialize};

use crate::config::{EstimatorConfig, SeedPolicy};
use crate::sampler::{NormalVariates, VariateSource};

/// Estimates the pairwise score matrix for `data` using the default seed policy.
///
/// Degenerate parameters are accepted: `iterations == burnin` yields NaN
/// everywhere and `burnin > iterations` yields negative zeros.
pub fn causal_score_estimate(
    data: &ObservationMatrix,
    iterations: i64,
    burnin: i64,
) -> ScoreMatrix {
    let source = NormalVariates::from_master_seed(SeedPolicy::default().master_seed);
    estimate_with_source(data, iterations, burnin, source)
}

/// Runs the sampling loop against an explicit variate source.
///
/// Every iteration draws one variate per off-diagonal cell in row-major
/// order, burn-in included, so a fixed source fully determines the output.
pub fn estimate_with_source<S: VariateSource>(
    data: &ObservationMatrix,
    iterations: i64,
    burnin: i64,
    mut source: S,
) -> ScoreMatrix {
    let m = data.ncol();
    let mut scores = ScoreMatrix::zeros(m);
    for iter in 0..iterations {
        let current = sample_iteration(m, &mut source);
        if iter >= burnin {
            scores.accumulate(&current);
        }
    }
    scores.divide_all(retained_samples(iterations, burnin));
    scores
}

/// Normalisation denominator `iterations - burnin`, evaluated without overflow.
pub fn retained_samples(iterations: i64, burnin: i64) -> f64 {
    (i128::from(iterations) - i128::from(burnin)) as f64
}

fn sample_iteration<S: VariateSource>(m: usize, source: &mut S) -> ScoreMatrix {
    let mut current = ScoreMatrix::zeros(m);
    for i in 0..m {
        for j in 0..m {
            if i != j {
                current.set(i, j, source.next_variate());
            }
        }
    }
    current
}

/// Parameters and outcome flags recorded for a completed estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateSummary {
    /// Side length of the score matrix (observation column count).
    pub dimension: usize,
    /// Number of observation rows supplied.
    pub observations: usize,
    /// Total iterations executed.
    pub iterations: i64,
    /// Burn-in iterations requested.
    pub burnin: i64,
    /// Denominator applied during normalisation.
    pub retained_samples: f64,
    /// Master seed of the sampling stream.
    pub seed: u64,
    /// Whether every score is finite.
    pub finite: bool,
}

/// Score matrix together with its summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    /// Normalised score matrix.
    pub scores: ScoreMatrix,
    /// Run parameters and flags.
    pub summary: EstimateSummary,
}

/// Configured estimator owning the lifecycle of a single run.
#[derive(Debug, Clone, Default)]
pub struct CausalScoreEstimator {
    config: EstimatorConfig,
}

impl CausalScoreEstimator {
    /// Creates an estimator from a configuration.
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// Validates the configuration and estimates scores with a freshly seeded stream.
    pub fn estimate(&self, data: &ObservationMatrix) -> Result<Estimate, CausalError> {
        let source = NormalVariates::from_master_seed(self.config.seed_policy.master_seed);
        self.estimate_with(data, source)
    }

    /// Same as [`CausalScoreEstimator::estimate`] with a caller supplied source.
    pub fn estimate_with<S: VariateSource>(
        &self,
        data: &ObservationMatrix,
        source: S,
    ) -> Result<Estimate, CausalError> {
        self.config.validate()?;
        let scores = estimate_with_source(data, self.config.iterations, self.config.burnin, source);
        let summary = EstimateSummary {
            dimension: scores.dim(),
            observations: data.nrow(),
            iterations: self.config.iterations,
            burnin: self.config.burnin,
            retained_samples: self.config.retained_samples(),
            seed: self.config.seed_policy.master_seed,
            finite: scores.is_finite(),
        };
        Ok(Estimate { scores, summary })
    }
}
