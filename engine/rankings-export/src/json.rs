use crate::error::ExportError;
use crate::ReportRenderer;
use rank_engine::RankingReport;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes the report as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &RankingReport, path: &Path) -> Result<(), ExportError> {
        info!("Exporting rankings to JSON: {}", path.display());

        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(())
    }
}
