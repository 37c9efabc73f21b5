// src/lib.rs

pub mod cache;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod process;
pub mod report;
pub mod schema;

pub use cache::DatasetCache;
pub use config::{MonthLocale, Policy, ZeroPolicy};
pub use dataset::{Dataset, QueryOutcome, Series, Summary};
pub use error::{PriceError, Result};
pub use process::{load, load_from_reader, RawTable};
pub use schema::{Observation, Province};
