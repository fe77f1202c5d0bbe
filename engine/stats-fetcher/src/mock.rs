//! Seeded synthetic season data.
//!
//! Rosters and team names are fixed; every stat is drawn from the owned RNG
//! so the same seed always yields the same season.

use crate::fetcher::DataSource;
use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rank_engine::{Defense, DefenseStats, Player, Position, ReceivingStats, ShareStats};
use tracing::info;

const QB_NAMES: [&str; 14] = [
    "Mahomes", "Allen", "Burrow", "Herbert", "Jackson", "Prescott", "Hurts", "Lawrence", "Stroud", "Love",
    "Purdy", "Tagovailoa", "Goff", "Stafford",
];

const RB_NAMES: [&str; 18] = [
    "McCaffrey", "Barkley", "Henry", "Gibbs", "Kamara", "Montgomery", "Ekeler", "Jones", "Jacobs", "Chubb",
    "Cook", "Taylor", "Mixon", "Harris", "Stevenson", "Walker", "Pollard", "Williams",
];

const WR_NAMES: [&str; 25] = [
    "Hill", "Jefferson", "Chase", "Lamb", "Adams", "Diggs", "Brown", "Evans", "Kupp", "Samuel", "Higgins",
    "Waddle", "Smith-Schuster", "Lockett", "Hopkins", "Metcalf", "McLaurin", "Johnson", "Pittman", "Wilson",
    "Smith", "Olave", "London", "Allen", "Moore",
];

const TE_NAMES: [&str; 14] = [
    "Kelce", "Andrews", "Kittle", "Goedert", "Hockenson", "Pitts", "LaPorta", "Ertz", "Njoku", "Kmet",
    "Freiermuth", "Engram", "Gesicki", "Knox",
];

const TEAMS: [(&str, &str); 32] = [
    ("SF", "49ers"),
    ("BAL", "Ravens"),
    ("BUF", "Bills"),
    ("DAL", "Cowboys"),
    ("KC", "Chiefs"),
    ("MIA", "Dolphins"),
    ("PHI", "Eagles"),
    ("DET", "Lions"),
    ("CLE", "Browns"),
    ("NO", "Saints"),
    ("LAC", "Chargers"),
    ("CIN", "Bengals"),
    ("JAX", "Jaguars"),
    ("MIN", "Vikings"),
    ("SEA", "Seahawks"),
    ("TB", "Buccaneers"),
    ("NYJ", "Jets"),
    ("GB", "Packers"),
    ("LAR", "Rams"),
    ("PIT", "Steelers"),
    ("NE", "Patriots"),
    ("ATL", "Falcons"),
    ("LV", "Raiders"),
    ("IND", "Colts"),
    ("TEN", "Titans"),
    ("CHI", "Bears"),
    ("DEN", "Broncos"),
    ("WAS", "Commanders"),
    ("NYG", "Giants"),
    ("CAR", "Panthers"),
    ("ARI", "Cardinals"),
    ("HOU", "Texans"),
];

fn roster(position: Position) -> &'static [&'static str] {
    match position {
        Position::Qb => &QB_NAMES,
        Position::Rb => &RB_NAMES,
        Position::Wr => &WR_NAMES,
        Position::Te => &TE_NAMES,
    }
}

/// First player id for each position
fn id_base(position: Position) -> usize {
    match position {
        Position::Qb => 1,
        Position::Rb => 100,
        Position::Wr => 200,
        Position::Te => 300,
    }
}

/// Scales share stats by how involved the position is in the passing game
fn position_multiplier(position: Position) -> f64 {
    match position {
        Position::Qb => 0.8,
        Position::Rb => 0.9,
        Position::Wr => 1.2,
        Position::Te => 1.0,
    }
}

/// Generates deterministic rosters from an owned, explicitly seeded RNG
pub struct MockDataSource {
    rng: StdRng,
}

impl MockDataSource {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    fn create_player(&mut self, last_name: &str, position: Position, season: i32, id: usize) -> Player {
        let rng = &mut self.rng;
        let games = 16 + rng.gen_range(0..2u32);

        let multiplier = position_multiplier(position);
        let variance = 0.7 + rng.gen::<f64>() * 0.6;

        let targets = 50.0 + rng.gen::<f64>() * 100.0 * multiplier;
        let receptions = targets * (0.6 + rng.gen::<f64>() * 0.2);
        let receiving_yards = receptions * (8.0 + rng.gen::<f64>() * 6.0);
        let receiving_tds = receptions * (0.05 + rng.gen::<f64>() * 0.05);
        let receiving_air_yards = targets * (7.0 + rng.gen::<f64>() * 5.0);
        let receiving_yards_after_catch = receiving_yards * (0.4 + rng.gen::<f64>() * 0.2);
        let receiving_first_downs = receptions * (0.3 + rng.gen::<f64>() * 0.2);

        let mut share = |base: f64, span: f64| Some(base + rng.gen::<f64>() * span * multiplier * variance);
        let shares = ShareStats {
            tgt_sh: share(0.1, 0.25),
            ay_sh: share(0.08, 0.22),
            yac_sh: share(0.06, 0.18),
            wopr_y: share(0.3, 0.4),
            ry_sh: share(0.05, 0.15),
            rtd_sh: share(0.03, 0.12),
            rfd_sh: share(0.04, 0.14),
            rtdfd_sh: share(0.02, 0.10),
            dom: share(0.2, 0.3),
            w8dom: share(0.15, 0.25),
            yptmpa: share(1.5, 3.0),
            ppr_sh: share(0.08, 0.20),
        };

        let receiving = ReceivingStats {
            games,
            targets,
            receptions,
            receiving_yards,
            receiving_tds,
            receiving_air_yards,
            receiving_yards_after_catch,
            receiving_first_downs,
            fantasy_points_ppr: receptions + receiving_yards * 0.1 + receiving_tds * 6.0,
        };

        Player::new(format!("player_{id}"), format!("Player {last_name}"), last_name, position, season)
            .with_receiving(receiving)
            .with_shares(shares)
    }
}

impl DataSource for MockDataSource {
    fn fetch_players(&mut self, season: i32) -> Result<Vec<Player>> {
        info!("Generating mock player data for season {}", season);

        let mut players = Vec::new();
        for position in Position::ALL {
            let base = id_base(position);
            for (i, last_name) in roster(position).iter().enumerate() {
                players.push(self.create_player(last_name, position, season, base + i));
            }
        }

        info!("Generated {} players", players.len());
        Ok(players)
    }

    fn fetch_defenses(&mut self, season: i32) -> Result<Vec<Defense>> {
        info!("Generating mock defense data for season {}", season);

        let defenses: Vec<Defense> = TEAMS
            .iter()
            .map(|(team, team_name)| {
                let sacks = 25.0 + self.rng.gen::<f64>() * 30.0;
                let fantasy_points = 80.0 + self.rng.gen::<f64>() * 60.0;
                Defense::new(*team, *team_name, season).with_stats(DefenseStats {
                    sacks: Some(sacks),
                    fantasy_points: Some(fantasy_points),
                    fantasy_points_ppr: Some(fantasy_points),
                })
            })
            .collect();

        info!("Generated {} defenses", defenses.len());
        Ok(defenses)
    }
}
