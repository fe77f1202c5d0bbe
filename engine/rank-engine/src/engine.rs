use crate::{
    config::RankingConfig,
    error::RankError,
    models::{Defense, DefenseStat, Player, PlayerStat, Position},
    ranker::{partition_by_category, rank, rank_capped, CategoryBucket},
    report::{defense_rows, derivation_label, position_report, stat_weights, RankingReport},
    scorer,
    weights::{WeightCalculator, WeightTable},
};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Result of ranking one player population
#[derive(Debug, Clone)]
pub struct PlayerRanking {
    pub weights: WeightTable<PlayerStat>,
    /// Scored players, best first, truncated to the global cap
    pub ranked: Vec<Player>,
    /// One bucket per configured position, in configured order
    pub by_position: Vec<CategoryBucket<Position, Player>>,
}

impl PlayerRanking {
    pub fn position(&self, position: Position) -> Option<&[Player]> {
        self.by_position
            .iter()
            .find(|bucket| bucket.category == position)
            .map(|bucket| bucket.entries.as_slice())
    }
}

/// Runs weight derivation, scoring and ranking for players and defenses
pub struct RankEngine {
    config: RankingConfig,
    calculator: WeightCalculator,
}

impl RankEngine {
    pub fn new(config: RankingConfig) -> Result<Self, RankError> {
        config.validate()?;
        info!(
            "Creating rank engine (cap {}, {} per position, {} defenses)",
            config.global_cap, config.per_position_limit, config.defense_display_limit
        );
        Ok(Self { config, calculator: WeightCalculator::new() })
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Derive weights from the population's own ppr_sh, then score and rank it
    pub fn rank_players(&self, players: Vec<Player>) -> PlayerRanking {
        let weights = self.calculator.calculate(&players);
        self.rank_players_with_weights(players, weights)
    }

    /// Score and rank players against a precomputed weight table
    pub fn rank_players_with_weights(
        &self,
        mut players: Vec<Player>,
        weights: WeightTable<PlayerStat>,
    ) -> PlayerRanking {
        info!("Ranking {} players", players.len());

        scorer::score(&mut players, &weights);
        let ranked = rank_capped(players, self.config.global_cap);
        let by_position =
            partition_by_category(&ranked, &self.config.positions, self.config.per_position_limit);

        for bucket in &by_position {
            debug!("{}: {} ranked players", bucket.category, bucket.len());
        }

        PlayerRanking { weights, ranked, by_position }
    }

    /// Score defenses with every stat weighted 1.0 and sort them, uncapped
    pub fn rank_defenses(&self, mut defenses: Vec<Defense>) -> Vec<Defense> {
        info!("Ranking {} defenses", defenses.len());

        let weights = WeightTable::<DefenseStat>::equal_contribution();
        scorer::score(&mut defenses, &weights);
        rank(defenses)
    }

    pub fn build_report(&self, season: i32, players: &PlayerRanking, defenses: &[Defense]) -> RankingReport {
        self.build_report_at(season, players, defenses, Utc::now())
    }

    /// Build the report with an explicit generation timestamp
    pub fn build_report_at(
        &self,
        season: i32,
        players: &PlayerRanking,
        defenses: &[Defense],
        generated_at: DateTime<Utc>,
    ) -> RankingReport {
        let positions = players
            .by_position
            .iter()
            .map(|bucket| {
                position_report(
                    bucket.category,
                    &bucket.entries,
                    self.config.per_position_limit,
                    self.config.highlight_fraction,
                )
            })
            .collect();

        RankingReport {
            season,
            generated_at,
            weight_derivation: derivation_label(players.weights.derivation()).to_string(),
            weights: stat_weights(&players.weights),
            positions,
            defense_limit: self.config.defense_display_limit,
            defenses: defense_rows(defenses, self.config.defense_display_limit),
        }
    }
}
