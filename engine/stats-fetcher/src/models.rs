use rank_engine::{Defense, DefenseStats, Player, Position, RankError, ReceivingStats, ShareStats};
use serde::{Deserialize, Serialize};

fn default_season_type() -> String {
    "REG".to_string()
}

/// Player season file: `{"season": 2024, "players": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayersFile {
    pub season: i32,
    pub players: Vec<PlayerRecord>,
}

/// One player row with nflverse column names. Missing stat columns are absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player_id: String,
    pub player_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    pub position: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default = "default_season_type")]
    pub season_type: String,
    #[serde(flatten)]
    pub receiving: ReceivingStats,
    #[serde(flatten)]
    pub shares: ShareStats,
}

impl PlayerRecord {
    pub fn into_player(self, season: i32) -> Result<Player, RankError> {
        let position: Position = self.position.parse()?;
        let last_name = self.last_name.unwrap_or_else(|| {
            self.player_name
                .split_whitespace()
                .last()
                .unwrap_or(self.player_name.as_str())
                .to_string()
        });

        let mut player = Player::new(self.player_id, self.player_name, last_name, position, season)
            .with_receiving(self.receiving)
            .with_shares(self.shares);
        player.team = self.team;
        player.season_type = self.season_type;
        Ok(player)
    }
}

/// Team defense season file: `{"season": 2024, "defenses": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefensesFile {
    pub season: i32,
    pub defenses: Vec<DefenseRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenseRecord {
    pub team: String,
    pub team_name: String,
    #[serde(default = "default_season_type")]
    pub season_type: String,
    #[serde(flatten)]
    pub stats: DefenseStats,
}

impl DefenseRecord {
    pub fn into_defense(self, season: i32) -> Defense {
        let mut defense = Defense::new(self.team, self.team_name, season).with_stats(self.stats);
        defense.season_type = self.season_type;
        defense
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rank_engine::{PlayerStat, Scorable};

    #[test]
    fn test_player_record_with_missing_columns() {
        let json = r#"{
            "player_id": "00-0036322",
            "player_name": "Justin Jefferson",
            "position": "wr",
            "team": "MIN",
            "targets": 154.0,
            "receptions": 103.0,
            "tgt_sh": 0.27,
            "ppr_sh": 0.21
        }"#;

        let record: PlayerRecord = serde_json::from_str(json).unwrap();
        let player = record.into_player(2024).unwrap();

        assert_eq!(player.last_name, "Jefferson");
        assert_eq!(player.position(), Position::Wr);
        assert_eq!(player.season_type, "REG");
        assert_eq!(player.receiving.targets, 154.0);
        assert_eq!(player.stat(PlayerStat::TgtSh), Some(0.27));
        assert_eq!(player.stat(PlayerStat::Dom), None);
        assert_eq!(player.ppr_sh(), Some(0.21));
    }

    #[test]
    fn test_unknown_position_is_rejected() {
        let json = r#"{"player_id": "k1", "player_name": "Some Kicker", "position": "K"}"#;
        let record: PlayerRecord = serde_json::from_str(json).unwrap();
        assert!(matches!(record.into_player(2024), Err(RankError::UnknownPosition(_))));
    }

    #[test]
    fn test_defense_record() {
        let json = r#"{"team": "BAL", "team_name": "Ravens", "sacks": 54.0, "fantasy_points": 131.5}"#;
        let defense = serde_json::from_str::<DefenseRecord>(json).unwrap().into_defense(2024);

        assert_eq!(defense.team, "BAL");
        assert_eq!(defense.stats.sacks, Some(54.0));
        assert_eq!(defense.stats.fantasy_points_ppr, None);
    }
}
