//! Results preview table and per-ad details.

use std::io::{self, Write};

use crate::config::PREVIEW_TEXT_WIDTH;
use crate::normalize::FlatRecord;

const ELLIPSIS: &str = "...";
const COLUMN_GAP: &str = "  ";
const PREVIEW_HEADERS: [&str; 6] = [
    "Page Name",
    "Ad Text",
    "Start Date",
    "Spend",
    "Impressions",
    "Platforms",
];

/// Shortens ad text for a table cell.
///
/// Line breaks become spaces. Text longer than the preview width is cut so
/// that, with the trailing `...`, it is exactly that width.
pub fn truncate_ad_text(text: &str) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= PREVIEW_TEXT_WIDTH {
        return single_line;
    }
    let kept: String = single_line
        .chars()
        .take(PREVIEW_TEXT_WIDTH - ELLIPSIS.len())
        .collect();
    format!("{kept}{ELLIPSIS}")
}

fn preview_row(record: &FlatRecord) -> [String; 6] {
    [
        record.page_name.clone(),
        truncate_ad_text(&record.ad_creative_body),
        record.start_date.clone(),
        record.spend.clone(),
        record.impressions.clone(),
        record.platforms.clone(),
    ]
}

/// Writes a fixed-width table of `records` followed by a result count.
///
/// `total` is the size of the full result set, which may exceed the number
/// of rows shown.
pub fn write_preview<W: Write>(
    mut out: W,
    records: &[FlatRecord],
    total: usize,
) -> io::Result<()> {
    if total == 0 {
        writeln!(out, "No results to display")?;
        return Ok(());
    }

    let rows: Vec<[String; 6]> = records.iter().map(preview_row).collect();
    let mut widths: Vec<usize> = PREVIEW_HEADERS.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(&mut out, PREVIEW_HEADERS.iter().copied(), &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(&mut out, rule.iter().map(String::as_str), &widths)?;
    for row in &rows {
        write_row(&mut out, row.iter().map(String::as_str), &widths)?;
    }

    writeln!(out)?;
    if records.len() < total {
        writeln!(out, "Displaying {} of {} results", records.len(), total)?;
    } else {
        writeln!(out, "Displaying {total} results")?;
    }
    Ok(())
}

fn write_row<'a, W: Write>(
    out: &mut W,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> io::Result<()> {
    let line = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    writeln!(out, "{}", line.trim_end())
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

/// Writes the full details of one ad, including the untruncated text.
pub fn write_details<W: Write>(mut out: W, record: &FlatRecord) -> io::Result<()> {
    writeln!(out, "Page: {}", or_na(&record.page_name))?;
    writeln!(out, "Ad ID: {}", or_na(&record.id))?;
    writeln!(out, "Start Date: {}", or_na(&record.start_date))?;
    let end_date = if record.end_date.is_empty() {
        "Active"
    } else {
        record.end_date.as_str()
    };
    writeln!(out, "End Date: {end_date}")?;
    writeln!(out, "Spend: {}", or_na(&record.spend))?;
    writeln!(out, "Impressions: {}", or_na(&record.impressions))?;
    writeln!(out, "Platforms: {}", or_na(&record.platforms))?;
    writeln!(out, "Paid By: {}", or_na(&record.byline))?;
    if !record.ad_snapshot_url.is_empty() {
        writeln!(out, "Snapshot: {}", record.ad_snapshot_url)?;
    }
    writeln!(out)?;
    writeln!(out, "Ad Text:")?;
    writeln!(out, "{}", or_na(&record.ad_creative_body))
}
