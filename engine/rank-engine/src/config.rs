use crate::error::RankError;
use crate::models::Position;
use crate::{
    DEFAULT_DEFENSE_DISPLAY_LIMIT, DEFAULT_GLOBAL_CAP, DEFAULT_HIGHLIGHT_FRACTION,
    DEFAULT_PER_POSITION_LIMIT,
};
use serde::{Deserialize, Serialize};

/// Configuration for ranking and report cutoffs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Maximum players kept after the global sort, before the position split
    pub global_cap: usize,

    /// Positions to report, in output order
    pub positions: Vec<Position>,

    /// Players shown per position
    pub per_position_limit: usize,

    /// Defenses shown in the report
    pub defense_display_limit: usize,

    /// Share of a position group (by raw ppr_sh) that gets highlighted
    pub highlight_fraction: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            global_cap: DEFAULT_GLOBAL_CAP,
            positions: Position::ALL.to_vec(),
            per_position_limit: DEFAULT_PER_POSITION_LIMIT,
            defense_display_limit: DEFAULT_DEFENSE_DISPLAY_LIMIT,
            highlight_fraction: DEFAULT_HIGHLIGHT_FRACTION,
        }
    }
}

impl RankingConfig {
    pub fn validate(&self) -> Result<(), RankError> {
        if self.global_cap == 0 {
            return Err(RankError::InvalidConfig("global_cap must be greater than 0".to_string()));
        }

        if self.per_position_limit == 0 {
            return Err(RankError::InvalidConfig(
                "per_position_limit must be greater than 0".to_string(),
            ));
        }

        if self.defense_display_limit == 0 {
            return Err(RankError::InvalidConfig(
                "defense_display_limit must be greater than 0".to_string(),
            ));
        }

        if self.positions.is_empty() {
            return Err(RankError::InvalidConfig("at least one position is required".to_string()));
        }

        for (i, position) in self.positions.iter().enumerate() {
            if self.positions[..i].contains(position) {
                return Err(RankError::InvalidConfig(format!("duplicate position {position}")));
            }
        }

        if !(self.highlight_fraction > 0.0 && self.highlight_fraction <= 1.0) {
            return Err(RankError::InvalidConfig(format!(
                "highlight_fraction must be in (0, 1], got {}",
                self.highlight_fraction
            )));
        }

        Ok(())
    }
}
