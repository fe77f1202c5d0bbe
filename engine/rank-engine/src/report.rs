//! Read-only ranking view handed to report renderers.

use crate::models::{Defense, Player, Position, Scorable, StatColumn};
use crate::weights::{WeightDerivation, WeightTable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything a renderer needs for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingReport {
    pub season: i32,
    pub generated_at: DateTime<Utc>,
    pub weight_derivation: String,
    pub weights: Vec<StatWeight>,
    pub positions: Vec<PositionReport>,
    /// Configured defense display limit, used in titles
    pub defense_limit: usize,
    pub defenses: Vec<DefenseRow>,
}

impl RankingReport {
    pub fn position(&self, position: Position) -> Option<&PositionReport> {
        self.positions.iter().find(|p| p.position == position)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatWeight {
    pub stat: String,
    pub weight: f64,
    /// |Pearson r| against ppr_sh
    pub signal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionReport {
    pub position: Position,
    /// Configured per-position limit, used in titles
    pub limit: usize,
    /// Minimum raw ppr_sh for a highlighted row, `None` for an empty group
    pub highlight_threshold: Option<f64>,
    pub players: Vec<PlayerRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRow {
    pub rank: usize,
    pub player_id: String,
    pub player_name: String,
    pub last_name: String,
    pub team: Option<String>,
    pub score: f64,
    pub ppr_sh: Option<f64>,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenseRow {
    pub rank: usize,
    pub team: String,
    pub team_name: String,
    pub score: f64,
}

/// Raw value marking the top `fraction` of a group: the k-th largest value,
/// k = max(1, floor(n * fraction)). Non-finite values are ignored.
pub fn highlight_threshold(values: &[f64], fraction: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| b.total_cmp(a));

    let k = ((sorted.len() as f64 * fraction).floor() as usize).clamp(1, sorted.len());
    Some(sorted[k - 1])
}

pub(crate) fn stat_weights<S: StatColumn>(weights: &WeightTable<S>) -> Vec<StatWeight> {
    weights
        .iter()
        .map(|(stat, weight)| StatWeight {
            stat: stat.name().to_string(),
            weight,
            signal: weights.signal(stat).unwrap_or(0.0),
        })
        .collect()
}

pub(crate) fn derivation_label(derivation: WeightDerivation) -> &'static str {
    match derivation {
        WeightDerivation::Correlation => "correlation",
        WeightDerivation::Uniform => "uniform",
        WeightDerivation::EqualContribution => "equal_contribution",
    }
}

pub(crate) fn position_report(
    position: Position,
    players: &[Player],
    limit: usize,
    fraction: f64,
) -> PositionReport {
    let shares: Vec<f64> = players.iter().filter_map(|p| p.ppr_sh()).collect();
    let threshold = highlight_threshold(&shares, fraction);

    let rows = players
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, player)| {
            let ppr_sh = player.ppr_sh();
            PlayerRow {
                rank: i + 1,
                player_id: player.player_id.clone(),
                player_name: player.player_name.clone(),
                last_name: player.last_name.clone(),
                team: player.team.clone(),
                score: player.score().unwrap_or(0.0),
                ppr_sh,
                highlighted: matches!((ppr_sh, threshold), (Some(v), Some(t)) if v >= t),
            }
        })
        .collect();

    PositionReport { position, limit, highlight_threshold: threshold, players: rows }
}

pub(crate) fn defense_rows(defenses: &[Defense], limit: usize) -> Vec<DefenseRow> {
    defenses
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, defense)| DefenseRow {
            rank: i + 1,
            team: defense.team.clone(),
            team_name: defense.team_name.clone(),
            score: defense.score().unwrap_or(0.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShareStats;

    #[test]
    fn test_highlight_threshold_top_fifth() {
        let values = [0.10, 0.30, 0.20, 0.50, 0.40, 0.05, 0.15, 0.25, 0.35, 0.45];
        // 10 values, k = 2: second largest
        assert_eq!(highlight_threshold(&values, 0.2), Some(0.45));
    }

    #[test]
    fn test_highlight_threshold_small_groups() {
        assert_eq!(highlight_threshold(&[], 0.2), None);
        assert_eq!(highlight_threshold(&[0.12], 0.2), Some(0.12));
        // 4 values, floor(0.8) = 0, at least one row is highlighted
        assert_eq!(highlight_threshold(&[0.1, 0.4, 0.3, 0.2], 0.2), Some(0.4));
        assert_eq!(highlight_threshold(&[0.1, f64::NAN], 0.2), Some(0.1));
    }

    #[test]
    fn test_position_report_rows() {
        let players: Vec<Player> = [0.10, 0.30, 0.20, 0.25, 0.05]
            .iter()
            .enumerate()
            .map(|(i, share)| {
                let shares = ShareStats { ppr_sh: Some(*share), ..Default::default() };
                Player::new(format!("player_{i}"), format!("Player {i}"), format!("P{i}"), Position::Te, 2024)
                    .with_shares(shares)
            })
            .collect();

        let report = position_report(Position::Te, &players, 3, 0.2);

        assert_eq!(report.highlight_threshold, Some(0.30));
        assert_eq!(report.players.len(), 3);
        assert_eq!(report.players[0].rank, 1);
        let highlighted: Vec<bool> = report.players.iter().map(|r| r.highlighted).collect();
        assert_eq!(highlighted, vec![false, true, false]);
    }
}
