//! Column headers shared by the tabular exports.

use crate::normalize::{demographic_label, FlatRecord};

/// Human labels for the fixed fields, in [`FlatRecord::main_fields`] order.
pub(crate) const MAIN_COLUMN_LABELS: [(&str, &str); 12] = [
    ("id", "Ad ID"),
    ("page_id", "Page ID"),
    ("page_name", "Page Name"),
    ("ad_snapshot_url", "Ad URL"),
    ("ad_creative_body", "Ad Text"),
    ("start_date", "Start Date"),
    ("end_date", "End Date"),
    ("currency", "Currency"),
    ("spend", "Spend"),
    ("impressions", "Impressions"),
    ("platforms", "Platforms"),
    ("byline", "Paid By"),
];

pub(crate) fn main_headers() -> Vec<String> {
    MAIN_COLUMN_LABELS
        .iter()
        .map(|(_, label)| label.to_string())
        .collect()
}

pub(crate) fn main_values(record: &FlatRecord) -> Vec<String> {
    record
        .main_fields()
        .iter()
        .map(|(_, value)| value.to_string())
        .collect()
}

pub(crate) fn demographic_headers(columns: &[String]) -> Vec<String> {
    columns.iter().map(|c| demographic_label(c)).collect()
}

/// Demographic values in `columns` order; missing buckets are empty.
pub(crate) fn demographic_values(record: &FlatRecord, columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .map(|c| record.demographics.get(c).cloned().unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_follow_field_order() {
        let record = FlatRecord::default();
        for ((field, _), (label_field, _)) in record.main_fields().iter().zip(MAIN_COLUMN_LABELS) {
            assert_eq!(*field, label_field);
        }
    }

    #[test]
    fn test_demographic_values_fill_gaps() {
        let mut record = FlatRecord::default();
        record
            .demographics
            .insert("demo_25-34_male".into(), "0.4".into());
        let columns = vec!["demo_18-24_male".to_string(), "demo_25-34_male".to_string()];
        assert_eq!(demographic_values(&record, &columns), vec!["", "0.4"]);
        assert_eq!(
            demographic_headers(&columns),
            vec!["18-24 Male", "25-34 Male"]
        );
    }
}
