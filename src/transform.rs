//! Cleanup of raw listings: column drop and dataset-level deduplication.

use crate::api::{ExportRecord, Listing};
use crate::config::DedupMode;
use std::collections::HashSet;
use tracing::info;

/// Maps raw listings into export rows, dropping the pagination origin column.
///
/// The API's placeholder columns never reach this stage; serde already dropped
/// them at deserialization.
pub fn clean(listings: Vec<Listing>) -> Vec<ExportRecord> {
    listings.into_iter().map(ExportRecord::from).collect()
}

/// Removes duplicate rows, keeping the first occurrence; order is otherwise
/// preserved. Idempotent in both modes.
pub fn dedup(rows: Vec<ExportRecord>, mode: DedupMode) -> Vec<ExportRecord> {
    let before = rows.len();

    let mut seen = HashSet::new();
    let deduped: Vec<ExportRecord> =
        rows.into_iter().filter(|row| seen.insert(dedup_key(row, mode))).collect();

    info!("Removed {} duplicate rows ({} remain)", before - deduped.len(), deduped.len());
    deduped
}

/// Identity of a row for duplicate detection under the given mode.
fn dedup_key(row: &ExportRecord, mode: DedupMode) -> Vec<String> {
    match mode {
        // Full-row equality over the serialized fields: two rows are duplicates
        // exactly when their output lines would be identical
        DedupMode::WholeRow => row.to_record().to_vec(),
        DedupMode::AsinCountry => vec![row.asin.clone(), row.country.clone()],
    }
}
