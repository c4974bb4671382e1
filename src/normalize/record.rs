//! Flat record type and per-field rendering rules.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::api::RawRecord;
use crate::normalize::demographics::demographic_fields;

/// Separator between creative text variants.
const CREATIVE_SEPARATOR: &str = "\n";
const PLATFORM_SEPARATOR: &str = ", ";

/// One ad flattened into fixed scalar fields plus demographic columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlatRecord {
    pub id: String,
    pub page_id: String,
    pub page_name: String,
    pub ad_snapshot_url: String,
    pub ad_creative_body: String,
    pub start_date: String,
    pub end_date: String,
    pub currency: String,
    pub spend: String,
    pub impressions: String,
    pub platforms: String,
    pub byline: String,
    /// `demo_<age>_<gender>` → percentage
    #[serde(flatten)]
    pub demographics: BTreeMap<String, String>,
}

impl FlatRecord {
    /// Projects a raw API record. Missing or malformed fields become empty
    /// strings.
    pub fn from_raw(ad: &RawRecord) -> Self {
        Self {
            id: scalar_field(ad, "id"),
            page_id: scalar_field(ad, "page_id"),
            page_name: scalar_field(ad, "page_name"),
            ad_snapshot_url: scalar_field(ad, "ad_snapshot_url"),
            ad_creative_body: join_list(ad.get("ad_creative_bodies"), CREATIVE_SEPARATOR),
            start_date: scalar_field(ad, "ad_delivery_start_time"),
            end_date: scalar_field(ad, "ad_delivery_stop_time"),
            currency: scalar_field(ad, "currency"),
            spend: render_range(ad.get("spend")),
            impressions: render_range(ad.get("impressions")),
            platforms: join_list(ad.get("publisher_platforms"), PLATFORM_SEPARATOR),
            byline: scalar_field(ad, "bylines"),
            demographics: ad
                .get("demographic_distribution")
                .map(demographic_fields)
                .unwrap_or_default(),
        }
    }

    /// The fixed fields in column order, keyed by field name.
    pub fn main_fields(&self) -> [(&'static str, &str); 12] {
        [
            ("id", self.id.as_str()),
            ("page_id", self.page_id.as_str()),
            ("page_name", self.page_name.as_str()),
            ("ad_snapshot_url", self.ad_snapshot_url.as_str()),
            ("ad_creative_body", self.ad_creative_body.as_str()),
            ("start_date", self.start_date.as_str()),
            ("end_date", self.end_date.as_str()),
            ("currency", self.currency.as_str()),
            ("spend", self.spend.as_str()),
            ("impressions", self.impressions.as_str()),
            ("platforms", self.platforms.as_str()),
            ("byline", self.byline.as_str()),
        ]
    }

    pub fn has_demographics(&self) -> bool {
        !self.demographics.is_empty()
    }
}

/// Renders a scalar JSON value as text. Null, arrays and objects are empty.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn scalar_field(ad: &RawRecord, key: &str) -> String {
    ad.get(key).map(scalar_text).unwrap_or_default()
}

/// Joins the string elements of a list. Anything but a list yields "".
fn join_list(value: Option<&Value>, separator: &str) -> String {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(separator),
        _ => String::new(),
    }
}

/// A range bound, or `None` when absent, null or empty.
fn bound(range: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    range
        .get(key)
        .map(scalar_text)
        .filter(|text| !text.is_empty())
}

/// Renders a range value such as spend or impressions.
///
/// Checked in order: both bounds → `"lower-upper"`, lower only → `">lower"`,
/// upper only → `"<upper"`, plain string → unchanged, otherwise `""`.
pub fn render_range(value: Option<&Value>) -> String {
    match value {
        Some(Value::Object(range)) => {
            match (bound(range, "lower_bound"), bound(range, "upper_bound")) {
                (Some(lower), Some(upper)) => format!("{lower}-{upper}"),
                (Some(lower), None) => format!(">{lower}"),
                (None, Some(upper)) => format!("<{upper}"),
                (None, None) => String::new(),
            }
        }
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
