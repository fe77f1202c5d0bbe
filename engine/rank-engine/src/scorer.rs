//! Population z-score standardization and weighted composite scores.

use crate::models::{Scorable, StatColumn};
use crate::stats::ColumnStats;
use crate::weights::WeightTable;
use std::collections::BTreeMap;
use tracing::debug;

/// Population statistics for every stat column, skipping absent values
pub fn column_stats<E: Scorable>(population: &[E]) -> BTreeMap<E::Stat, ColumnStats> {
    <E::Stat as StatColumn>::ALL
        .iter()
        .map(|stat| {
            let values: Vec<f64> = population.iter().filter_map(|e| e.stat(*stat)).collect();
            let stats = ColumnStats::from_values(&values);
            if stats.is_degenerate() {
                debug!(
                    "Column {} has no spread ({} values), standardizing with divisor 1",
                    stat.name(),
                    stats.count
                );
            }
            (*stat, stats)
        })
        .collect()
}

/// Standardize every stat across the population and write each entity's
/// score card.
///
/// The composite is the sum of `z * weight` over stats the entity has and the
/// table weighs, in column order. Missing stats contribute nothing.
pub fn score<E: Scorable>(population: &mut [E], weights: &WeightTable<E::Stat>) {
    let columns = column_stats(population);

    for entity in population.iter_mut() {
        let mut normalized = BTreeMap::new();
        let mut composite = 0.0;

        for (stat, stats) in &columns {
            let Some(value) = entity.stat(*stat) else {
                continue;
            };
            let z = stats.z_score(value);
            normalized.insert(*stat, z);

            if let Some(weight) = weights.get(*stat) {
                composite += z * weight;
            }
        }

        entity.score_card_mut().record(normalized, composite);
    }

    debug!("Scored {} entities", population.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Defense, DefenseStat, DefenseStats, Player, PlayerStat, Position, ShareStats};

    fn player(id: u32, tgt_sh: Option<f64>, dom: Option<f64>) -> Player {
        let shares = ShareStats { tgt_sh, dom, ppr_sh: Some(0.1), ..Default::default() };
        Player::new(format!("player_{id}"), format!("Player {id}"), format!("P{id}"), Position::Rb, 2024)
            .with_shares(shares)
    }

    fn defense(team: &str, sacks: f64, fp: f64) -> Defense {
        Defense::new(team, team, 2024).with_stats(DefenseStats {
            sacks: Some(sacks),
            fantasy_points: Some(fp),
            fantasy_points_ppr: Some(fp),
        })
    }

    #[test]
    fn test_z_scores_and_composite() {
        let mut players = vec![player(1, Some(1.0), None), player(2, Some(3.0), None)];
        let weights = WeightTable::uniform();

        score(&mut players, &weights);

        // mean 2, population std dev 1
        assert_eq!(players[0].normalized_stat(PlayerStat::TgtSh), Some(-1.0));
        assert_eq!(players[1].normalized_stat(PlayerStat::TgtSh), Some(1.0));
        let w = 1.0 / PlayerStat::ALL.len() as f64;
        assert!((players[1].score().unwrap() - w).abs() < 1e-12);
    }

    #[test]
    fn test_missing_stats_are_skipped() {
        let mut players = vec![
            player(1, Some(0.2), Some(0.5)),
            player(2, Some(0.4), None),
            player(3, Some(0.6), Some(0.1)),
        ];

        score(&mut players, &WeightTable::uniform());

        assert_eq!(players[1].normalized_stat(PlayerStat::Dom), None);
        assert!(players[1].normalized_stat(PlayerStat::TgtSh).is_some());
        // dom column stats come from players 1 and 3 only
        assert!((players[0].normalized_stat(PlayerStat::Dom).unwrap() - 1.0).abs() < 1e-9);
        assert!((players[2].normalized_stat(PlayerStat::Dom).unwrap() + 1.0).abs() < 1e-9);
        assert!(players.iter().all(|p| p.score().is_some()));
    }

    #[test]
    fn test_constant_column_scores_zero() {
        let mut players = vec![player(1, Some(0.1), None), player(2, Some(0.1), None), player(3, Some(0.1), None)];

        score(&mut players, &WeightTable::uniform());

        for p in &players {
            assert_eq!(p.normalized_stat(PlayerStat::TgtSh), Some(0.0));
            assert_eq!(p.score(), Some(0.0));
        }
    }

    #[test]
    fn test_empty_population() {
        let mut players: Vec<Player> = Vec::new();
        score(&mut players, &WeightTable::uniform());
        assert!(players.is_empty());
    }

    #[test]
    fn test_defense_equal_contribution_sums_z_scores() {
        let mut defenses = vec![defense("BAL", 50.0, 130.0), defense("NYJ", 30.0, 90.0)];

        score(&mut defenses, &WeightTable::equal_contribution());

        // Each of the three columns standardizes to +/-1
        assert_eq!(defenses[0].normalized_stat(DefenseStat::Sacks), Some(1.0));
        assert_eq!(defenses[0].score(), Some(3.0));
        assert_eq!(defenses[1].score(), Some(-3.0));
    }
}
