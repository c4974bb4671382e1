//! JSONL export functionality.
//!
//! Each line is one flat record as a JSON object, demographic keys inline.
//! This format is ideal for piping to `jq` or loading into other tools.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error_handling::ExportError;
use crate::normalize::FlatRecord;

/// Writes `records` as JSON Lines to `writer`.
pub fn write_jsonl<W: Write>(records: &[FlatRecord], mut writer: W) -> Result<usize, ExportError> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(records.len())
}

/// Exports `records` to a JSONL file at `path`.
pub fn export_jsonl(records: &[FlatRecord], path: &Path) -> Result<usize, ExportError> {
    let file = File::create(path)?;
    write_jsonl(records, BufWriter::new(file))
}
