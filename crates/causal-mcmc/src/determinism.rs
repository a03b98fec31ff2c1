use causal_core::RngHandle;

/// Substream index reserved for the sampling chain.
const SAMPLING_STREAM: u64 = 0;

/// Creates the RNG owned by a single estimator call, derived from `master_seed`.
pub fn chain_rng(master_seed: u64) -> RngHandle {
    RngHandle::for_substream(master_seed, SAMPLING_STREAM)
}
