use crate::config::{FetcherConfig, SourceKind};
use crate::mock::MockDataSource;
use crate::models::{DefensesFile, PlayersFile};
use anyhow::{Context, Result};
use rank_engine::{Defense, Player};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Supplies season populations of players and team defenses
pub trait DataSource {
    fn fetch_players(&mut self, season: i32) -> Result<Vec<Player>>;

    fn fetch_defenses(&mut self, season: i32) -> Result<Vec<Defense>>;
}

/// Build the data source selected by configuration
pub fn from_config(config: &FetcherConfig) -> Result<Box<dyn DataSource>> {
    config.validate()?;

    match config.source {
        SourceKind::Mock => Ok(Box::new(MockDataSource::new(config.seed))),
        SourceKind::Json => {
            let players = config.players_file.clone().context("players_file is not set")?;
            let defenses = config.defenses_file.clone().context("defenses_file is not set")?;
            Ok(Box::new(JsonFileSource::new(players, defenses)))
        }
    }
}

/// Reads season stats from JSON files on disk
pub struct JsonFileSource {
    players_path: PathBuf,
    defenses_path: PathBuf,
}

impl JsonFileSource {
    pub fn new(players_path: impl Into<PathBuf>, defenses_path: impl Into<PathBuf>) -> Self {
        Self { players_path: players_path.into(), defenses_path: defenses_path.into() }
    }

    fn read(path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

impl DataSource for JsonFileSource {
    fn fetch_players(&mut self, season: i32) -> Result<Vec<Player>> {
        info!("Loading player data for season {} from {}", season, self.players_path.display());

        let content = Self::read(&self.players_path)?;
        let file: PlayersFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.players_path.display()))?;

        if file.season != season {
            warn!("Player file is for season {}, requested {}", file.season, season);
        }

        let mut players = Vec::with_capacity(file.players.len());
        for record in file.players {
            let player_id = record.player_id.clone();
            match record.into_player(file.season) {
                Ok(player) => players.push(player),
                Err(e) => warn!("Skipping player {}: {}", player_id, e),
            }
        }

        info!("Loaded {} players", players.len());
        Ok(players)
    }

    fn fetch_defenses(&mut self, season: i32) -> Result<Vec<Defense>> {
        info!("Loading defense data for season {} from {}", season, self.defenses_path.display());

        let content = Self::read(&self.defenses_path)?;
        let file: DefensesFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.defenses_path.display()))?;

        if file.season != season {
            warn!("Defense file is for season {}, requested {}", file.season, season);
        }

        let defenses: Vec<Defense> =
            file.defenses.into_iter().map(|record| record.into_defense(file.season)).collect();

        info!("Loaded {} defenses", defenses.len());
        Ok(defenses)
    }
}

/// Keep players with targets, receptions and a positive ppr_sh
pub fn filter_active_players(players: Vec<Player>) -> Vec<Player> {
    let total = players.len();
    let active: Vec<Player> = players
        .into_iter()
        .filter(|p| {
            p.receiving.targets > 0.0
                && p.receiving.receptions > 0.0
                && p.ppr_sh().is_some_and(|share| share > 0.0)
        })
        .collect();

    info!("Filtered {} players to {} active", total, active.len());
    active
}

#[cfg(test)]
mod tests {
    use super::*;
    use rank_engine::{Position, ReceivingStats, ShareStats};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn player(id: &str, targets: f64, receptions: f64, ppr_sh: Option<f64>) -> Player {
        Player::new(id, id, id, Position::Rb, 2024)
            .with_receiving(ReceivingStats { targets, receptions, ..Default::default() })
            .with_shares(ShareStats { ppr_sh, ..Default::default() })
    }

    #[test]
    fn test_filter_active_players() {
        let players = vec![
            player("active", 80.0, 60.0, Some(0.12)),
            player("no_targets", 0.0, 0.0, Some(0.05)),
            player("no_share", 40.0, 30.0, None),
            player("zero_share", 40.0, 30.0, Some(0.0)),
            player("nan_share", 40.0, 30.0, Some(f64::NAN)),
        ];

        let active = filter_active_players(players);
        let ids: Vec<&str> = active.iter().map(|p| p.player_id.as_str()).collect();
        assert_eq!(ids, vec!["active"]);
    }

    #[test]
    fn test_json_source_skips_unknown_positions() {
        let players = write_temp(
            r#"{"season": 2023, "players": [
                {"player_id": "1", "player_name": "Travis Kelce", "position": "TE", "targets": 121, "receptions": 93, "ppr_sh": 0.19},
                {"player_id": "2", "player_name": "Justin Tucker", "position": "K"}
            ]}"#,
        );
        let defenses = write_temp(
            r#"{"season": 2023, "defenses": [
                {"team": "BAL", "team_name": "Ravens", "sacks": 60, "fantasy_points": 150, "fantasy_points_ppr": 150}
            ]}"#,
        );

        let mut source = JsonFileSource::new(players.path(), defenses.path());
        let loaded = source.fetch_players(2023).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].last_name, "Kelce");
        assert_eq!(loaded[0].season, 2023);

        let loaded = source.fetch_defenses(2023).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].stats.sacks, Some(60.0));
    }

    #[test]
    fn test_json_source_missing_file() {
        let mut source = JsonFileSource::new("/nonexistent/players.json", "/nonexistent/defenses.json");
        let err = source.fetch_players(2024).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_from_config_builds_mock_by_default() {
        let mut source = from_config(&FetcherConfig::default()).unwrap();
        assert_eq!(source.fetch_defenses(2024).unwrap().len(), 32);
    }
}
