//! Rank Engine
//!
//! Ranks NFL players by position and team defenses. Stat weights are the
//! absolute correlation of each share stat with PPR fantasy point share;
//! stats are z-score standardized across the population and combined into
//! a weighted composite score.

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod ranker;
pub mod report;
pub mod scorer;
pub mod stats;
pub mod weights;

pub use config::RankingConfig;
pub use engine::{PlayerRanking, RankEngine};
pub use error::RankError;
pub use models::*;
pub use ranker::CategoryBucket;
pub use report::{DefenseRow, PlayerRow, PositionReport, RankingReport, StatWeight};
pub use weights::{WeightCalculator, WeightDerivation, WeightTable};

/// Maximum players kept after the global sort
pub const DEFAULT_GLOBAL_CAP: usize = 45;

/// Players shown per position
pub const DEFAULT_PER_POSITION_LIMIT: usize = 15;

/// Defenses shown in the report
pub const DEFAULT_DEFENSE_DISPLAY_LIMIT: usize = 15;

/// Top share of a position group highlighted by raw ppr_sh
pub const DEFAULT_HIGHLIGHT_FRACTION: f64 = 0.2;
