//! CSV serialization of the cleaned dataset.

use crate::api::ExportRecord;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Writes the rows to a comma-delimited UTF-8 file.
///
/// The header row is always written, even for an empty dataset, so a run
/// against an empty source still produces a parseable file. Failures to open
/// or write the output path are fatal.
pub fn write_csv(path: &Path, rows: &[ExportRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to open output file: {}", path.display()))?;

    writer.write_record(ExportRecord::HEADER).context("Failed to write header row")?;

    for row in rows {
        writer
            .write_record(&row.to_record())
            .with_context(|| format!("Failed to write row for {}", row.asin))?;
    }

    writer.flush().with_context(|| format!("Failed to flush output file: {}", path.display()))?;

    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
