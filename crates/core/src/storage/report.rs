use crate::domain::recommendation::ReportRow;
use crate::storage::ensure_parent_dir;
use anyhow::Context;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub fn report_file_name(as_of: NaiveDate) -> String {
    format!("holistic_plan_{}.csv", as_of.format("%Y-%m-%d"))
}

/// CSV bytes with a `Ticker,Value,Category` header.
pub fn render_csv(rows: &[ReportRow]) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if rows.is_empty() {
        writer
            .write_record(["Ticker", "Value", "Category"])
            .context("failed to write report header")?;
    }
    for row in rows {
        writer.serialize(row).context("failed to write report row")?;
    }
    writer.into_inner().context("failed to flush report")
}

/// Writes the report under `dir`. An empty report is not written and yields `None`.
pub fn write_report(
    dir: &Path,
    as_of: NaiveDate,
    rows: &[ReportRow],
) -> anyhow::Result<Option<PathBuf>> {
    if rows.is_empty() {
        tracing::info!("no investments recommended; report not written");
        return Ok(None);
    }

    let path = dir.join(report_file_name(as_of));
    ensure_parent_dir(&path)?;
    let bytes = render_csv(rows)?;
    std::fs::write(&path, bytes)
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = rows.len(), "report written");
    Ok(Some(path))
}
