use causal_core::RngHandle;
use rand::RngCore;
use rand_distr::{Distribution, StandardNormal};

use crate::determinism;

/// Sequential source of standard-normal variates.
///
/// The estimator consumes exactly one variate per off-diagonal cell per
/// iteration, in row-major order.
pub trait VariateSource {
    /// Returns the next variate in the stream.
    fn next_variate(&mut self) -> f64;
}

impl<S: VariateSource + ?Sized> VariateSource for &mut S {
    fn next_variate(&mut self) -> f64 {
        (**self).next_variate()
    }
}

/// Standard-normal variates drawn from an owned RNG.
#[derive(Debug, Clone)]
pub struct NormalVariates<R = RngHandle> {
    rng: R,
}

impl NormalVariates<RngHandle> {
    /// Creates the sampling stream for `master_seed`.
    pub fn from_master_seed(master_seed: u64) -> Self {
        Self::new(determinism::chain_rng(master_seed))
    }
}

impl<R: RngCore> NormalVariates<R> {
    /// Wraps an RNG.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> VariateSource for NormalVariates<R> {
    fn next_variate(&mut self) -> f64 {
        StandardNormal.sample(&mut self.rng)
    }
}

/// Replays a fixed list of values, wrapping around at the end.
///
/// An empty list yields `0.0` forever.
#[derive(Debug, Clone, Default)]
pub struct FixedVariates {
    values: Vec<f64>,
    cursor: usize,
}

impl FixedVariates {
    /// Creates a replay source over `values`.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Number of variates handed out so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl VariateSource for FixedVariates {
    fn next_variate(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
