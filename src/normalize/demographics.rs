//! Demographic breakdown columns.
//!
//! Every demographic key in a result set is produced by [`demographic_key`],
//! so grouping columns by the `demo_` prefix is reliable downstream.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::normalize::record::{scalar_text, FlatRecord};

pub const DEMOGRAPHIC_PREFIX: &str = "demo_";

/// Derives the column key for an age/gender bucket.
///
/// `("65+", "male")` → `demo_65plus_male`.
pub fn demographic_key(age: &str, gender: &str) -> String {
    format!("{DEMOGRAPHIC_PREFIX}{age}_{gender}")
        .to_lowercase()
        .replace('+', "plus")
}

/// Turns a `demographic_distribution` list into key → percentage.
///
/// Entries that collapse to the same key overwrite each other; the last one
/// wins. Non-list input yields no fields.
pub(crate) fn demographic_fields(value: &Value) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    let Value::Array(entries) = value else {
        return fields;
    };
    for entry in entries {
        let Value::Object(entry) = entry else {
            continue;
        };
        let text = |key: &str| entry.get(key).map(scalar_text).unwrap_or_default();
        fields.insert(
            demographic_key(&text("age"), &text("gender")),
            text("percentage"),
        );
    }
    fields
}

/// Sorted union of demographic keys across a result set.
pub fn demographic_columns(records: &[FlatRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| r.demographics.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Human label for a demographic key: `demo_65plus_male` → `65+ Male`.
///
/// Keys that do not split into age and gender are returned unchanged.
pub fn demographic_label(key: &str) -> String {
    let rest = key.strip_prefix(DEMOGRAPHIC_PREFIX).unwrap_or(key);
    let mut parts = rest.split('_');
    match (parts.next(), parts.next()) {
        (Some(age), Some(gender)) => {
            let age = age.replace("plus", "+");
            let mut chars = gender.chars();
            let gender = match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            };
            format!("{age} {gender}")
        }
        _ => key.to_string(),
    }
}
