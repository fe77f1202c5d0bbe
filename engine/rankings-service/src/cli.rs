//! # Command Line Interface

use clap::Parser;
use rankings_export::OutputFormat;
use stats_fetcher::SourceKind;
use std::path::PathBuf;

use crate::config::ServiceConfig;

/// Rank NFL players by position and team defenses, then export the report
#[derive(Parser, Debug, Default)]
#[command(name = "gridiron-rankings")]
#[command(version, about = "Correlation-weighted NFL player and defense rankings")]
pub struct Cli {
    /// TOML configuration file (falls back to GRIDIRON_CONFIG)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Season to rank
    #[arg(long)]
    pub season: Option<i32>,

    /// Data source: mock or json
    #[arg(long, value_parser = parse_source)]
    pub source: Option<SourceKind>,

    /// Mock data seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Player season file for the json source
    #[arg(long)]
    pub players_file: Option<PathBuf>,

    /// Team defense season file for the json source
    #[arg(long)]
    pub defenses_file: Option<PathBuf>,

    /// Report output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report format: pdf or json
    #[arg(short, long, value_parser = parse_format)]
    pub format: Option<OutputFormat>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, pretty, compact)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

fn parse_source(s: &str) -> Result<SourceKind, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse().map_err(|e: rankings_export::ExportError| e.to_string())
}

impl Cli {
    /// Apply command-line overrides on top of file and environment settings
    pub fn apply(&self, config: &mut ServiceConfig) {
        if let Some(season) = self.season {
            config.fetcher.season = season;
        }
        if let Some(source) = self.source {
            config.fetcher.source = source;
        }
        if let Some(seed) = self.seed {
            config.fetcher.seed = seed;
        }
        if let Some(path) = &self.players_file {
            config.fetcher.players_file = Some(path.clone());
        }
        if let Some(path) = &self.defenses_file {
            config.fetcher.defenses_file = Some(path.clone());
        }
        if let Some(path) = &self.output {
            config.output.path = Some(path.clone());
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
    }
}
