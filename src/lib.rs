pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod forecast;
pub mod models;
pub mod providers;
pub mod utils;

pub use error::{PipelineError, Result};
