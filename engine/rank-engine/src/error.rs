//! Error types for the rank engine

use thiserror::Error;

/// Errors raised while parsing or validating ranking inputs.
///
/// The scoring pipeline itself never fails on degenerate data; these only
/// surface at parse and configuration boundaries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RankError {
    #[error("Unknown stat column: {0}")]
    UnknownStat(String),

    #[error("Unknown position: {0}")]
    UnknownPosition(String),

    #[error("Invalid ranking configuration: {0}")]
    InvalidConfig(String),
}
