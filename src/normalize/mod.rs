//! Normalization of raw API records into flat rows.
//!
//! Raw records are loose JSON maps. They are projected into [`FlatRecord`]
//! here and nowhere else; everything downstream works with the typed rows.

mod demographics;
mod record;

use std::ops::Deref;
use std::sync::Arc;

pub use demographics::{
    demographic_columns, demographic_key, demographic_label, DEMOGRAPHIC_PREFIX,
};
pub use record::{render_range, FlatRecord};

use crate::api::RawRecord;
use crate::config::DEFAULT_PREVIEW_LIMIT;

/// Immutable, cheaply cloneable sequence of flat records from one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    records: Arc<[FlatRecord]>,
}

impl Default for ResultSet {
    fn default() -> Self {
        Vec::<FlatRecord>::new().into()
    }
}

impl ResultSet {
    pub fn records(&self) -> &[FlatRecord] {
        &self.records
    }

    /// The first `limit` records.
    pub fn preview(&self, limit: usize) -> &[FlatRecord] {
        &self.records[..limit.min(self.records.len())]
    }

    /// Sorted demographic column keys present anywhere in the set.
    pub fn demographic_columns(&self) -> Vec<String> {
        demographic_columns(&self.records)
    }
}

impl Deref for ResultSet {
    type Target = [FlatRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl From<Vec<FlatRecord>> for ResultSet {
    fn from(records: Vec<FlatRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }
}

/// Maps raw records to flat records, one record at a time.
pub fn normalize(raw_records: &[RawRecord]) -> ResultSet {
    raw_records
        .iter()
        .map(FlatRecord::from_raw)
        .collect::<Vec<_>>()
        .into()
}

/// Holds the output of the most recent normalization.
#[derive(Debug, Default)]
pub struct Normalizer {
    last: ResultSet,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes `raw_records`, replacing the previous result set.
    pub fn normalize(&mut self, raw_records: &[RawRecord]) -> ResultSet {
        self.last = normalize(raw_records);
        self.last.clone()
    }

    /// The first `limit` records of the last result set.
    pub fn preview(&self, limit: usize) -> &[FlatRecord] {
        self.last.preview(limit)
    }

    /// The first [`DEFAULT_PREVIEW_LIMIT`] records.
    pub fn default_preview(&self) -> &[FlatRecord] {
        self.preview(DEFAULT_PREVIEW_LIMIT)
    }

    /// The complete last result set.
    pub fn all(&self) -> ResultSet {
        self.last.clone()
    }
}
