pub mod estimate;
pub mod inspect;
