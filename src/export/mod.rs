//! Export functionality for search results.
//!
//! This module writes a result set to disk in one of several formats
//! (XLSX, CSV, JSONL) for use in spreadsheets and other tools.

mod columns;
mod csv;
mod jsonl;
mod types;
mod xlsx;

use log::info;

use crate::criteria::SearchParams;
use crate::error_handling::ExportError;
use crate::normalize::FlatRecord;

pub use self::csv::{export_csv, write_csv};
pub use jsonl::{export_jsonl, write_jsonl};
pub use types::{ExportFormat, ExportOptions, ExportSummary};
pub use xlsx::{export_xlsx, AD_DATA_SHEET, DEMOGRAPHICS_SHEET, SEARCH_PARAMETERS_SHEET};

/// Exports `records` using `options`.
///
/// `params` are the merged criteria of the search; only the workbook
/// format records them.
///
/// # Errors
///
/// Returns an [`ExportError`] if the file cannot be created or written.
pub fn export(
    records: &[FlatRecord],
    params: &SearchParams,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let path = options.resolved_path();
    let rows = match options.format {
        ExportFormat::Xlsx => export_xlsx(records, params, &path)?,
        ExportFormat::Csv => export_csv(records, &path)?,
        ExportFormat::Jsonl => export_jsonl(records, &path)?,
    };
    info!("Exported {} ads to {}", rows, path.display());
    Ok(ExportSummary { path, rows })
}
