//! Pipeline orchestration: fetch, filter, weigh, rank, export

use anyhow::{Context, Result};
use rank_engine::{RankEngine, RankingReport};
use rankings_export::ReportRenderer;
use stats_fetcher::{filter_active_players, DataSource};
use std::path::PathBuf;
use tracing::info;

use crate::config::ServiceConfig;

/// Names shown per group in the run summary
pub const SUMMARY_TOP_N: usize = 3;

/// Owns the configured data source, engine and renderer for one run
pub struct RankingService {
    config: ServiceConfig,
    engine: RankEngine,
    source: Box<dyn DataSource>,
    renderer: Box<dyn ReportRenderer>,
}

impl RankingService {
    /// Build the service from configuration
    pub fn new(config: ServiceConfig) -> Result<Self> {
        info!("Initializing ranking service...");

        let source = stats_fetcher::from_config(&config.fetcher).context("Failed to create data source")?;
        let renderer = config.output.format.renderer();
        Self::with_parts(config, source, renderer)
    }

    /// Build the service around an explicit data source and renderer
    pub fn with_parts(
        config: ServiceConfig,
        source: Box<dyn DataSource>,
        renderer: Box<dyn ReportRenderer>,
    ) -> Result<Self> {
        let engine = RankEngine::new(config.ranking.clone()).context("Failed to create rank engine")?;
        Ok(Self { config, engine, source, renderer })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn output_path(&self) -> PathBuf {
        self.config.output.resolved_path()
    }

    /// Run the full pipeline and write the report
    pub fn run(&mut self) -> Result<RankingReport> {
        let season = self.config.fetcher.season;

        info!("Step 1/6: fetching player data for season {}", season);
        let players = self.source.fetch_players(season).context("Failed to fetch player data")?;
        info!("Fetched {} player records", players.len());

        info!("Step 2/6: filtering active players");
        let active = filter_active_players(players);

        info!("Step 3/6: calculating stat weights");
        let weights = rank_engine::WeightCalculator::new().calculate(&active);
        for (stat, weight) in weights.iter() {
            info!("  {:<10} {:.4}", stat.to_string(), weight);
        }

        info!("Step 4/6: ranking players");
        let ranking = self.engine.rank_players_with_weights(active, weights);

        info!("Step 5/6: fetching and ranking defenses");
        let defenses = self.source.fetch_defenses(season).context("Failed to fetch defense data")?;
        let defenses = self.engine.rank_defenses(defenses);

        let output = self.output_path();
        info!("Step 6/6: exporting {} report to {:?}", self.config.output.format, output);
        let report = self.engine.build_report(season, &ranking, &defenses);
        self.renderer
            .render(&report, &output)
            .with_context(|| format!("Failed to export report to {:?}", output))?;

        for line in summary_lines(&report) {
            info!("{}", line);
        }
        info!("Rankings written to {:?}", output);

        Ok(report)
    }
}

/// Top names per position and top defenses, one line per group
pub fn summary_lines(report: &RankingReport) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.positions.len() + 1);

    for position in &report.positions {
        let names: Vec<&str> =
            position.players.iter().take(SUMMARY_TOP_N).map(|row| row.last_name.as_str()).collect();
        lines.push(format!("Top {} {}s: {}", SUMMARY_TOP_N, position.position, join_or_none(&names)));
    }

    let names: Vec<&str> =
        report.defenses.iter().take(SUMMARY_TOP_N).map(|row| row.team_name.as_str()).collect();
    lines.push(format!("Top {} defenses: {}", SUMMARY_TOP_N, join_or_none(&names)));

    lines
}

fn join_or_none(names: &[&str]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}
