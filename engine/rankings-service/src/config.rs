//! Service configuration management

use anyhow::{Context, Result};
use rank_engine::RankingConfig;
use rankings_export::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use stats_fetcher::FetcherConfig;

/// Environment variable naming the TOML configuration file
pub const CONFIG_FILE_ENV: &str = "GRIDIRON_CONFIG";

/// Report file name used when no output path is configured
pub const DEFAULT_OUTPUT_STEM: &str = "nfl_rankings";

/// Main service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Ranking cutoffs and positions
    pub ranking: RankingConfig,

    /// Data source selection
    pub fetcher: FetcherConfig,

    /// Report output
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Report output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file; defaults to `nfl_rankings.<format>`
    pub path: Option<PathBuf>,

    pub format: OutputFormat,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { path: None, format: OutputFormat::Pdf }
    }
}

impl OutputConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.{}", DEFAULT_OUTPUT_STEM, self.format.extension())))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "compact".to_string() }
    }
}

/// Load configuration from an optional TOML file and environment variables.
///
/// The file comes from `config_file`, falling back to `GRIDIRON_CONFIG`.
pub fn load_config(config_file: Option<&Path>) -> Result<ServiceConfig> {
    let env_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);
    let config_file = config_file.map(Path::to_path_buf).or(env_file);

    let mut config = match &config_file {
        Some(path) => {
            tracing::debug!("Loading configuration from file: {:?}", path);
            load_from_file(path)?
        }
        None => ServiceConfig::default(),
    };

    // Override with environment variables
    load_from_env(&mut config)?;

    Ok(config)
}

/// Load configuration from a TOML file
pub fn load_from_file(path: &Path) -> Result<ServiceConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {:?}", path))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse configuration file: {:?}", path))
}

/// Load configuration from environment variables
fn load_from_env(config: &mut ServiceConfig) -> Result<()> {
    config.fetcher.apply_env()?;

    if let Ok(path) = std::env::var("GRIDIRON_OUTPUT") {
        config.output.path = Some(PathBuf::from(path));
    }

    if let Ok(format) = std::env::var("GRIDIRON_FORMAT") {
        config.output.format = format.parse().context("Invalid GRIDIRON_FORMAT")?;
    }

    if let Ok(level) = std::env::var("GRIDIRON_LOG_LEVEL") {
        config.logging.level = level;
    }

    if let Ok(format) = std::env::var("GRIDIRON_LOG_FORMAT") {
        config.logging.format = format;
    }

    Ok(())
}

/// Validate configuration
pub fn validate_config(config: &ServiceConfig) -> Result<()> {
    config.ranking.validate().context("Invalid ranking configuration")?;
    config.fetcher.validate().context("Invalid data source configuration")?;

    // Validate log level
    match config.logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow::anyhow!("Invalid log level: {}", config.logging.level)),
    }

    // Validate log format
    match config.logging.format.as_str() {
        "json" | "pretty" | "compact" => {}
        _ => return Err(anyhow::anyhow!("Invalid log format: {}", config.logging.format)),
    }

    Ok(())
}

/// Render configuration as TOML
pub fn to_toml(config: &ServiceConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize configuration")
}

/// Save configuration to a file
pub fn save_config(config: &ServiceConfig, path: &Path) -> Result<()> {
    std::fs::write(path, to_toml(config)?)
        .with_context(|| format!("Failed to write configuration file: {:?}", path))
}
