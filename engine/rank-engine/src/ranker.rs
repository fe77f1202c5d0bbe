//! Stable descending ranking, global cap and category partitioning.

use crate::models::{Categorized, Scorable};
use std::cmp::Ordering;

/// Entities of one category, best first
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBucket<C, E> {
    pub category: C,
    pub entries: Vec<E>,
}

impl<C, E> CategoryBucket<C, E> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Non-finite composites rank as unscored; -0.0 ties with 0.0
fn rank_key(score: Option<f64>) -> Option<f64> {
    score.filter(|s| s.is_finite()).map(|s| s + 0.0)
}

fn by_score_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (rank_key(a), rank_key(b)) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort descending by composite score. Ties keep input order; unscored and
/// non-finite entities go last.
pub fn rank<E: Scorable>(mut entities: Vec<E>) -> Vec<E> {
    entities.sort_by(|a, b| by_score_desc(a.score(), b.score()));
    entities
}

/// Rank, then keep at most `cap` entities
pub fn rank_capped<E: Scorable>(entities: Vec<E>, cap: usize) -> Vec<E> {
    let mut ranked = rank(entities);
    ranked.truncate(cap);
    ranked
}

/// Split an already-ranked sequence into one bucket per category, in the
/// given category order, each holding at most `limit` entities.
///
/// A category with no entities yields an empty bucket.
pub fn partition_by_category<E>(
    ranked: &[E],
    categories: &[E::Category],
    limit: usize,
) -> Vec<CategoryBucket<E::Category, E>>
where
    E: Categorized + Clone,
{
    categories
        .iter()
        .map(|category| CategoryBucket {
            category: *category,
            entries: ranked
                .iter()
                .filter(|entity| entity.category() == *category)
                .take(limit)
                .cloned()
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, PlayerStat, Position, ShareStats};
    use crate::scorer::score;
    use crate::weights::WeightTable;
    use std::collections::BTreeMap;

    /// Players whose composite equals their tgt_sh z-score scaled by the
    /// single-stat weight table
    fn scored_players(specs: &[(u32, Position, f64)]) -> Vec<Player> {
        let mut players: Vec<Player> = specs
            .iter()
            .map(|(id, position, tgt_sh)| {
                let shares = ShareStats { tgt_sh: Some(*tgt_sh), ppr_sh: Some(0.1), ..Default::default() };
                Player::new(format!("player_{id}"), format!("Player {id}"), format!("P{id}"), *position, 2024)
                    .with_shares(shares)
            })
            .collect();

        let mut signals = BTreeMap::new();
        signals.insert(PlayerStat::TgtSh, 1.0);
        score(&mut players, &WeightTable::from_signals(signals));
        players
    }

    fn ids(players: &[Player]) -> Vec<&str> {
        players.iter().map(|p| p.player_id.as_str()).collect()
    }

    #[test]
    fn test_rank_descending() {
        let players = scored_players(&[
            (1, Position::Wr, 4.0),
            (2, Position::Wr, 10.0),
            (3, Position::Wr, 2.0),
            (4, Position::Wr, 8.0),
            (5, Position::Wr, 6.0),
        ]);

        let ranked = rank(players);
        assert_eq!(ids(&ranked), vec!["player_2", "player_4", "player_5", "player_1", "player_3"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let players = scored_players(&[
            (1, Position::Rb, 0.2),
            (2, Position::Rb, 0.3),
            (3, Position::Rb, 0.2),
            (4, Position::Rb, 0.2),
        ]);

        let ranked = rank(players);
        assert_eq!(ids(&ranked), vec!["player_2", "player_1", "player_3", "player_4"]);
    }

    #[test]
    fn test_unscored_sort_last() {
        let mut players = scored_players(&[(1, Position::Te, 0.1), (2, Position::Te, 0.3)]);
        players.insert(0, Player::new("player_9", "Player 9", "P9", Position::Te, 2024));

        let ranked = rank(players);
        assert_eq!(ids(&ranked), vec!["player_2", "player_1", "player_9"]);
    }

    #[test]
    fn test_non_finite_scores_sort_last() {
        let mut players = scored_players(&[(1, Position::Wr, 1.0), (2, Position::Wr, 3.0), (3, Position::Wr, 2.0)]);
        for (id, bad) in [(7, f64::NAN), (8, f64::INFINITY)] {
            let mut player = Player::new(format!("player_{id}"), format!("Player {id}"), format!("P{id}"), Position::Wr, 2024);
            player.score_card_mut().record(BTreeMap::new(), bad);
            players.insert(0, player);
        }

        let ranked = rank(players);
        assert_eq!(ids(&ranked), vec!["player_2", "player_3", "player_1", "player_8", "player_7"]);
    }

    #[test]
    fn test_negative_zero_ties_with_zero() {
        let mut players = Vec::new();
        for (id, score) in [(1, -0.0), (2, 0.0), (3, -0.0)] {
            let mut player = Player::new(format!("player_{id}"), format!("Player {id}"), format!("P{id}"), Position::Rb, 2024);
            player.score_card_mut().record(BTreeMap::new(), score);
            players.push(player);
        }

        assert_eq!(ids(&rank(players)), vec!["player_1", "player_2", "player_3"]);
    }

    #[test]
    fn test_rank_capped() {
        let players = scored_players(&[(1, Position::Qb, 1.0), (2, Position::Qb, 3.0), (3, Position::Qb, 2.0)]);
        let ranked = rank_capped(players, 2);
        assert_eq!(ids(&ranked), vec!["player_2", "player_3"]);
    }

    #[test]
    fn test_partition_respects_limit() {
        let ranked = rank(scored_players(&[
            (1, Position::Wr, 10.0),
            (2, Position::Wr, 8.0),
            (3, Position::Wr, 6.0),
            (4, Position::Wr, 4.0),
            (5, Position::Wr, 2.0),
        ]));

        let buckets = partition_by_category(&ranked, &[Position::Wr], 2);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].category, Position::Wr);
        assert_eq!(ids(&buckets[0].entries), vec!["player_1", "player_2"]);
    }

    #[test]
    fn test_partition_keeps_category_order_and_empty_buckets() {
        let ranked = rank(scored_players(&[
            (1, Position::Wr, 0.3),
            (2, Position::Rb, 0.5),
            (3, Position::Wr, 0.4),
        ]));

        let buckets = partition_by_category(&ranked, &Position::ALL, 15);

        let categories: Vec<Position> = buckets.iter().map(|b| b.category).collect();
        assert_eq!(categories, Position::ALL.to_vec());
        assert!(buckets[0].is_empty());
        assert_eq!(ids(&buckets[1].entries), vec!["player_2"]);
        assert_eq!(ids(&buckets[2].entries), vec!["player_3", "player_1"]);
        assert!(buckets[3].is_empty());
    }
}
