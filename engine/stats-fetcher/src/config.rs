use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default RNG seed for mock data
pub const DEFAULT_SEED: u64 = 42;

/// Default season
pub const DEFAULT_SEASON: i32 = 2024;

/// Where player and defense data comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Seeded synthetic rosters
    Mock,
    /// Season files on disk
    Json,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Mock => f.write_str("mock"),
            SourceKind::Json => f.write_str("json"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(SourceKind::Mock),
            "json" => Ok(SourceKind::Json),
            other => anyhow::bail!("Unknown data source '{}', expected 'mock' or 'json'", other),
        }
    }
}

/// Configuration for the stats data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    pub source: SourceKind,

    /// Mock generator seed
    pub seed: u64,

    pub season: i32,

    /// Player season file (json source)
    pub players_file: Option<PathBuf>,

    /// Team defense season file (json source)
    pub defenses_file: Option<PathBuf>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Mock,
            seed: DEFAULT_SEED,
            season: DEFAULT_SEASON,
            players_file: None,
            defenses_file: None,
        }
    }
}

impl FetcherConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields from GRIDIRON_* environment variables
    pub fn apply_env(&mut self) -> anyhow::Result<()> {
        if let Ok(source) = std::env::var("GRIDIRON_SOURCE") {
            self.source = source.parse()?;
        }

        if let Ok(seed) = std::env::var("GRIDIRON_SEED") {
            self.seed = seed.parse().context("GRIDIRON_SEED must be an unsigned integer")?;
        }

        if let Ok(season) = std::env::var("GRIDIRON_SEASON") {
            self.season = season.parse().context("GRIDIRON_SEASON must be a year")?;
        }

        if let Ok(path) = std::env::var("GRIDIRON_PLAYERS_FILE") {
            self.players_file = Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("GRIDIRON_DEFENSES_FILE") {
            self.defenses_file = Some(PathBuf::from(path));
        }

        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.source == SourceKind::Json {
            if self.players_file.is_none() {
                anyhow::bail!("players_file is required for the json data source");
            }
            if self.defenses_file.is_none() {
                anyhow::bail!("defenses_file is required for the json data source");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FetcherConfig::default();
        assert_eq!(config.source, SourceKind::Mock);
        assert_eq!(config.seed, 42);
        assert_eq!(config.season, 2024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_source_kind_parsing() {
        assert_eq!("JSON".parse::<SourceKind>().unwrap(), SourceKind::Json);
        assert_eq!(" mock".parse::<SourceKind>().unwrap(), SourceKind::Mock);
        assert!("csv".parse::<SourceKind>().is_err());
    }

    #[test]
    fn test_json_source_requires_files() {
        let config = FetcherConfig { source: SourceKind::Json, ..Default::default() };
        assert!(config.validate().is_err());

        let config = FetcherConfig {
            source: SourceKind::Json,
            players_file: Some("players.json".into()),
            defenses_file: Some("defenses.json".into()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
