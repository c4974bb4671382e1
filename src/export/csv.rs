//! CSV export functionality.
//!
//! One row per ad: the labelled main fields followed by one column per
//! demographic bucket seen anywhere in the result set.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use crate::error_handling::ExportError;
use crate::normalize::{demographic_columns, FlatRecord};

use super::columns::{demographic_headers, demographic_values, main_headers, main_values};

/// Writes `records` as CSV to `writer`.
///
/// Returns the number of records written.
pub fn write_csv<W: Write>(records: &[FlatRecord], writer: W) -> Result<usize, ExportError> {
    let demo_columns = demographic_columns(records);
    let mut writer = Writer::from_writer(writer);

    let mut header = main_headers();
    header.extend(demographic_headers(&demo_columns));
    writer.write_record(&header)?;

    for record in records {
        let mut row = main_values(record);
        row.extend(demographic_values(record, &demo_columns));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(records.len())
}

/// Exports `records` to a CSV file at `path`.
pub fn export_csv(records: &[FlatRecord], path: &Path) -> Result<usize, ExportError> {
    let file = File::create(path)?;
    write_csv(records, file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, demo: &[(&str, &str)]) -> FlatRecord {
        let mut record = FlatRecord {
            id: id.to_string(),
            page_name: format!("Page {id}"),
            ad_creative_body: "line one\nline two".to_string(),
            spend: "100-199".to_string(),
            ..Default::default()
        };
        for (k, v) in demo {
            record.demographics.insert(k.to_string(), v.to_string());
        }
        record
    }

    fn read_back(buf: Vec<u8>) -> Vec<Vec<String>> {
        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let mut rows = vec![reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>()];
        for row in reader.records() {
            rows.push(row.unwrap().iter().map(str::to_string).collect());
        }
        rows
    }

    #[test]
    fn test_write_csv_without_demographics() {
        let mut buf = Vec::new();
        let count = write_csv(&[record("1", &[]), record("2", &[])], &mut buf).unwrap();
        assert_eq!(count, 2);

        let rows = read_back(buf);
        assert_eq!(rows[0].len(), 12);
        assert_eq!(rows[0][0], "Ad ID");
        assert_eq!(rows[0][11], "Paid By");
        assert_eq!(rows[1][0], "1");
        assert_eq!(rows[1][4], "line one\nline two");
        assert_eq!(rows[2][2], "Page 2");
    }

    #[test]
    fn test_write_csv_with_demographic_union() {
        let mut buf = Vec::new();
        write_csv(
            &[
                record("1", &[("demo_65plus_male", "0.2")]),
                record("2", &[("demo_25-34_female", "0.7")]),
            ],
            &mut buf,
        )
        .unwrap();

        let rows = read_back(buf);
        assert_eq!(rows[0].len(), 14);
        assert_eq!(rows[0][12], "25-34 Female");
        assert_eq!(rows[0][13], "65+ Male");
        assert_eq!(rows[1][12], "");
        assert_eq!(rows[1][13], "0.2");
        assert_eq!(rows[2][12], "0.7");
        assert_eq!(rows[2][13], "");
    }

    #[test]
    fn test_write_csv_empty_result_set() {
        let mut buf = Vec::new();
        assert_eq!(write_csv(&[], &mut buf).unwrap(), 0);
        let rows = read_back(buf);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 12);
    }
}
