//! Export types and options.

use std::path::PathBuf;

use chrono::Local;
use clap::ValueEnum;

use crate::config::EXPORT_FILE_PREFIX;

/// Export format options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Excel workbook (ad data, demographics and search parameters sheets)
    Xlsx,
    /// CSV format (one flattened row per ad, demographics as extra columns)
    Csv,
    /// JSONL format (one JSON object per ad)
    Jsonl,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Jsonl => "jsonl",
        }
    }

    /// `meta_ads_export_<YYYYmmdd_HHMMSS>.<ext>` in the current directory.
    pub fn default_filename(&self) -> PathBuf {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        PathBuf::from(format!(
            "{EXPORT_FILE_PREFIX}_{timestamp}.{}",
            self.extension()
        ))
    }
}

/// Options for exporting data.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    /// Output file path (timestamped default if None)
    pub output: Option<PathBuf>,
    /// Export format
    pub format: ExportFormat,
}

impl ExportOptions {
    /// The file that will be written.
    pub fn resolved_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.format.default_filename())
    }
}

/// What an export wrote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSummary {
    /// File written
    pub path: PathBuf,
    /// Number of ad rows written
    pub rows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filename_shape() {
        let name = ExportFormat::Xlsx.default_filename();
        let name = name.to_string_lossy();
        assert!(name.starts_with("meta_ads_export_"));
        assert!(name.ends_with(".xlsx"));
        // meta_ads_export_ + YYYYmmdd_HHMMSS + .xlsx
        assert_eq!(name.len(), "meta_ads_export_".len() + 15 + ".xlsx".len());
    }

    #[test]
    fn test_resolved_path_prefers_explicit_output() {
        let options = ExportOptions {
            output: Some(PathBuf::from("out/ads.csv")),
            format: ExportFormat::Csv,
        };
        assert_eq!(options.resolved_path(), PathBuf::from("out/ads.csv"));

        let options = ExportOptions {
            output: None,
            format: ExportFormat::Jsonl,
        };
        assert!(options
            .resolved_path()
            .to_string_lossy()
            .ends_with(".jsonl"));
    }
}
