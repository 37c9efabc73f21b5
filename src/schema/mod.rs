pub mod arrow;
pub mod types;

pub use arrow::{build_observation_batch, observation_schema};
pub use types::{Observation, Province};
