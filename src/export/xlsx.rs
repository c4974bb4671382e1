//! Excel workbook export.
//!
//! The workbook has up to three sheets:
//! - `Ad Data`: labelled main fields, one row per ad
//! - `Demographics`: ad id, page name and one column per demographic bucket
//!   (only written when the result set has demographic data)
//! - `Search Parameters`: the criteria used for the search

use std::path::Path;

use log::debug;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet};

use crate::config::{MAX_MAIN_COLUMN_WIDTH, MAX_XLSX_CELL_CHARS};
use crate::criteria::SearchParams;
use crate::error_handling::ExportError;
use crate::normalize::{demographic_columns, FlatRecord};

use super::columns::{demographic_headers, demographic_values, main_headers, main_values};

pub const AD_DATA_SHEET: &str = "Ad Data";
pub const DEMOGRAPHICS_SHEET: &str = "Demographics";
pub const SEARCH_PARAMETERS_SHEET: &str = "Search Parameters";

/// Padding added to the widest cell when sizing a column.
const COLUMN_PADDING: usize = 2;

/// Writes the workbook for `records` and the `params` used to find them.
///
/// Returns the number of ad rows written.
pub fn export_xlsx(
    records: &[FlatRecord],
    params: &SearchParams,
    path: &Path,
) -> Result<usize, ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let rows: Vec<Vec<String>> = records.iter().map(main_values).collect();
    workbook.push_worksheet(table_sheet(
        AD_DATA_SHEET,
        &main_headers(),
        &rows,
        Some(MAX_MAIN_COLUMN_WIDTH),
        &header_format,
    )?);

    let demo_columns = demographic_columns(records);
    if demo_columns.is_empty() {
        debug!("No demographic data; skipping {DEMOGRAPHICS_SHEET} sheet");
    } else {
        let mut headers = vec!["Ad ID".to_string(), "Page Name".to_string()];
        headers.extend(demographic_headers(&demo_columns));
        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|r| {
                let mut row = vec![r.id.clone(), r.page_name.clone()];
                row.extend(demographic_values(r, &demo_columns));
                row
            })
            .collect();
        workbook.push_worksheet(table_sheet(
            DEMOGRAPHICS_SHEET,
            &headers,
            &rows,
            None,
            &header_format,
        )?);
    }

    let headers = vec!["Parameter".to_string(), "Value".to_string()];
    let rows: Vec<Vec<String>> = params
        .entries()
        .map(|(key, value)| vec![key.to_string(), value])
        .collect();
    workbook.push_worksheet(table_sheet(
        SEARCH_PARAMETERS_SHEET,
        &headers,
        &rows,
        None,
        &header_format,
    )?);

    workbook.save(path)?;
    Ok(records.len())
}

/// Builds a sheet with a bold header row and columns sized to their content.
fn table_sheet(
    name: &str,
    headers: &[String],
    rows: &[Vec<String>],
    max_width: Option<usize>,
    header_format: &Format,
) -> Result<Worksheet, ExportError> {
    let mut sheet = Worksheet::new();
    sheet.set_name(name)?;

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as ColNum, header.as_str(), header_format)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let row_num = (i + 1) as RowNum;
        for (col, value) in row.iter().enumerate() {
            let text = cell_text(value);
            if let Some(width) = widths.get_mut(col) {
                *width = (*width).max(text.chars().count());
            }
            sheet.write_string(row_num, col as ColNum, text)?;
        }
    }

    for (col, width) in widths.into_iter().enumerate() {
        let mut width = width + COLUMN_PADDING;
        if let Some(max) = max_width {
            width = width.min(max);
        }
        sheet.set_column_width(col as ColNum, width as f64)?;
    }

    Ok(sheet)
}

/// Truncates text Excel would refuse.
fn cell_text(value: &str) -> &str {
    match value.char_indices().nth(MAX_XLSX_CELL_CHARS) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
