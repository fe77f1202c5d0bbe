//! Gridiron Rankings
//!
//! Fetches a season of player and team defense stats, derives stat weights,
//! ranks players by position and defenses, and exports the report.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use rankings_service::{config, initialize_logging_with_config, load_configuration, Cli, RankingService};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // .env values fill in anything not already set in the environment
    dotenv::dotenv().ok();

    let mut config = load_configuration(cli.config.as_deref())?;
    cli.apply(&mut config);
    config::validate_config(&config).context("Invalid configuration")?;

    if cli.print_config {
        print!("{}", config::to_toml(&config)?);
        return Ok(());
    }

    initialize_logging_with_config(&config.logging)?;

    info!("Starting Gridiron Rankings v{}", env!("CARGO_PKG_VERSION"));

    let mut service = RankingService::new(config)?;
    service.run()?;

    info!("Done! Check {:?}", service.output_path());
    Ok(())
}
