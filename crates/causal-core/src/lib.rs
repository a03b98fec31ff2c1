#![deny(missing_docs)]
#![doc = "Core matrix, error and seeding types shared by the causal score estimator crates."]

pub mod errors;
pub mod matrix;
pub mod provenance;
pub mod rng;

pub use errors::{CausalError, ErrorInfo};
pub use matrix::{ObservationMatrix, ScoreMatrix};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};
