//! Stats Fetcher
//!
//! Supplies season player and team defense data for ranking, either from a
//! seeded mock generator or from JSON season files.

pub mod config;
pub mod fetcher;
pub mod mock;
pub mod models;

pub use config::{FetcherConfig, SourceKind};
pub use fetcher::{filter_active_players, from_config, DataSource, JsonFileSource};
pub use mock::MockDataSource;
pub use models::*;
