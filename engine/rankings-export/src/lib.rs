//! Rankings Export
//!
//! Renders a `RankingReport` to disk as a paginated PDF or as JSON.

pub mod error;
pub mod json;
pub mod pdf;

pub use error::ExportError;
pub use json::JsonRenderer;
pub use pdf::PdfRenderer;

use rank_engine::RankingReport;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Writes a ranking report to a file
pub trait ReportRenderer {
    fn render(&self, report: &RankingReport, path: &Path) -> Result<(), ExportError>;
}

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Pdf,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Json => "json",
        }
    }

    pub fn renderer(&self) -> Box<dyn ReportRenderer> {
        match self {
            OutputFormat::Pdf => Box::new(PdfRenderer::new()),
            OutputFormat::Json => Box::new(JsonRenderer::new()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rank_engine::{DefenseRow, PlayerRow, Position, PositionReport, StatWeight};

    fn row(rank: usize, last_name: &str, score: f64, ppr_sh: f64, highlighted: bool) -> PlayerRow {
        PlayerRow {
            rank,
            player_id: format!("player_{rank}"),
            player_name: format!("Player {last_name}"),
            last_name: last_name.to_string(),
            team: None,
            score,
            ppr_sh: Some(ppr_sh),
            highlighted,
        }
    }

    pub(crate) fn sample_report() -> RankingReport {
        RankingReport {
            season: 2024,
            generated_at: Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap(),
            weight_derivation: "correlation".to_string(),
            weights: vec![StatWeight { stat: "tgt_sh".to_string(), weight: 1.0, signal: 0.8 }],
            positions: vec![
                PositionReport { position: Position::Qb, limit: 15, highlight_threshold: None, players: Vec::new() },
                PositionReport {
                    position: Position::Wr,
                    limit: 15,
                    highlight_threshold: Some(0.25),
                    players: vec![
                        row(1, "Jefferson", 1.23456, 0.27, true),
                        row(2, "Lamb", 0.5, 0.21, false),
                    ],
                },
                PositionReport {
                    position: Position::Te,
                    limit: 15,
                    highlight_threshold: Some(0.19),
                    players: vec![row(1, "Kelce", 0.75, 0.19, true)],
                },
            ],
            defense_limit: 15,
            defenses: vec![
                DefenseRow { rank: 1, team: "BAL".to_string(), team_name: "Ravens".to_string(), score: 2.5 },
                DefenseRow { rank: 2, team: "NYJ".to_string(), team_name: "Jets".to_string(), score: -1.25 },
            ],
        }
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("PDF".parse::<OutputFormat>().unwrap(), OutputFormat::Pdf);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(matches!("csv".parse::<OutputFormat>(), Err(ExportError::UnknownFormat(_))));
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_renderer_selection_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        for format in [OutputFormat::Pdf, OutputFormat::Json] {
            let path = dir.path().join(format!("rankings.{}", format.extension()));
            format.renderer().render(&sample_report(), &path).unwrap();
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }
    }
}
