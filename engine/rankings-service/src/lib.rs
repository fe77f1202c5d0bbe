//! Gridiron Rankings Service Library
//!
//! Configuration loading, logging setup and the ranking pipeline run behind
//! the `gridiron-rankings` binary.

use anyhow::{Context, Result};
use std::path::Path;

pub mod cli;
pub mod config;
pub mod logging;
pub mod service;

pub use cli::Cli;
pub use config::ServiceConfig;
pub use logging::initialize_logging_with_config;
pub use service::RankingService;

/// Load configuration from files and environment variables
pub fn load_configuration(config_file: Option<&Path>) -> Result<ServiceConfig> {
    config::load_config(config_file).context("Failed to load service configuration")
}
