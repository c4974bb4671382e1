//! Search criteria for the ads archive.
//!
//! [`SearchCriteria`] holds what the user asked for. [`SearchParams`] is the
//! flat key/value mapping sent on the wire: the documented defaults with the
//! user's criteria merged over them key by key.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

use crate::config::{
    ACCESS_TOKEN_PARAM, DEFAULT_ACTIVE_STATUS, DEFAULT_AD_TYPE, DEFAULT_FIELDS,
    DEFAULT_REACHED_COUNTRIES,
};
use crate::error_handling::CriteriaError;

pub const SEARCH_TERMS: &str = "search_terms";
pub const AD_TYPE: &str = "ad_type";
pub const AD_REACHED_COUNTRIES: &str = "ad_reached_countries";
pub const AD_ACTIVE_STATUS: &str = "ad_active_status";
pub const PUBLISHER_PLATFORMS: &str = "publisher_platforms";
pub const AD_DELIVERY_DATE_MIN: &str = "ad_delivery_date_min";
pub const AD_DELIVERY_DATE_MAX: &str = "ad_delivery_date_max";
pub const FIELDS: &str = "fields";
pub const LIMIT: &str = "limit";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Category of ads to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdType {
    All,
    PoliticalAndIssueAds,
    HousingAds,
    EmploymentAds,
    FinancialProductsAndServicesAds,
}

impl AdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdType::All => "ALL",
            AdType::PoliticalAndIssueAds => "POLITICAL_AND_ISSUE_ADS",
            AdType::HousingAds => "HOUSING_ADS",
            AdType::EmploymentAds => "EMPLOYMENT_ADS",
            AdType::FinancialProductsAndServicesAds => "FINANCIAL_PRODUCTS_AND_SERVICES_ADS",
        }
    }
}

/// Delivery status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActiveStatus {
    Active,
    Inactive,
    All,
}

impl ActiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveStatus::Active => "ACTIVE",
            ActiveStatus::Inactive => "INACTIVE",
            ActiveStatus::All => "ALL",
        }
    }
}

/// Platforms an ad can be published on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    Facebook,
    Instagram,
    AudienceNetwork,
    Messenger,
    Whatsapp,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Facebook => "FACEBOOK",
            Platform::Instagram => "INSTAGRAM",
            Platform::AudienceNetwork => "AUDIENCE_NETWORK",
            Platform::Messenger => "MESSENGER",
            Platform::Whatsapp => "WHATSAPP",
        }
    }
}

/// Parses a delivery date in `YYYY-MM-DD` form.
pub fn parse_delivery_date(field: &'static str, value: &str) -> Result<NaiveDate, CriteriaError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| CriteriaError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// User-supplied search filters. Unset fields fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub search_terms: Option<String>,
    pub ad_type: Option<AdType>,
    pub ad_reached_countries: Option<Vec<String>>,
    pub ad_active_status: Option<ActiveStatus>,
    pub publisher_platforms: Option<Vec<Platform>>,
    pub ad_delivery_date_min: Option<NaiveDate>,
    pub ad_delivery_date_max: Option<NaiveDate>,
    /// Comma-separated field selection
    pub fields: Option<String>,
    /// Page size requested from the API
    pub limit: Option<u32>,
}

impl SearchCriteria {
    /// Checks that the delivery window is not inverted.
    pub fn validate(&self) -> Result<(), CriteriaError> {
        if let (Some(start), Some(end)) = (self.ad_delivery_date_min, self.ad_delivery_date_max) {
            if start > end {
                return Err(CriteriaError::DateRangeInverted {
                    start: start.format(DATE_FORMAT).to_string(),
                    end: end.format(DATE_FORMAT).to_string(),
                });
            }
        }
        Ok(())
    }

    /// The keys this criteria set overrides, with their values.
    fn overrides(&self) -> Vec<(&'static str, CriterionValue)> {
        let mut out = Vec::new();
        if let Some(terms) = &self.search_terms {
            out.push((SEARCH_TERMS, CriterionValue::Text(terms.clone())));
        }
        if let Some(ad_type) = self.ad_type {
            out.push((AD_TYPE, CriterionValue::Text(ad_type.as_str().to_string())));
        }
        if let Some(countries) = &self.ad_reached_countries {
            out.push((AD_REACHED_COUNTRIES, CriterionValue::List(countries.clone())));
        }
        if let Some(status) = self.ad_active_status {
            out.push((AD_ACTIVE_STATUS, CriterionValue::Text(status.as_str().to_string())));
        }
        if let Some(platforms) = &self.publisher_platforms {
            out.push((
                PUBLISHER_PLATFORMS,
                CriterionValue::List(platforms.iter().map(|p| p.as_str().to_string()).collect()),
            ));
        }
        if let Some(date) = self.ad_delivery_date_min {
            out.push((
                AD_DELIVERY_DATE_MIN,
                CriterionValue::Text(date.format(DATE_FORMAT).to_string()),
            ));
        }
        if let Some(date) = self.ad_delivery_date_max {
            out.push((
                AD_DELIVERY_DATE_MAX,
                CriterionValue::Text(date.format(DATE_FORMAT).to_string()),
            ));
        }
        if let Some(fields) = &self.fields {
            out.push((FIELDS, CriterionValue::Text(fields.clone())));
        }
        if let Some(limit) = self.limit {
            out.push((LIMIT, CriterionValue::Text(limit.to_string())));
        }
        out
    }
}

/// A single criterion value as sent to the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriterionValue {
    Text(String),
    /// Sent as a JSON array string
    List(Vec<String>),
}

impl CriterionValue {
    /// Renders the value for a query string. Lists become JSON array text.
    pub fn to_query_value(&self) -> String {
        match self {
            CriterionValue::Text(s) => s.clone(),
            // Serializing a Vec<String> cannot fail
            CriterionValue::List(items) => {
                serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
            }
        }
    }
}

impl fmt::Display for CriterionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_value())
    }
}

/// Merged request parameters, ordered by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    params: BTreeMap<&'static str, CriterionValue>,
}

impl SearchParams {
    /// The documented default criteria.
    pub fn defaults() -> Self {
        let mut params = BTreeMap::new();
        params.insert(AD_TYPE, CriterionValue::Text(DEFAULT_AD_TYPE.to_string()));
        params.insert(
            AD_REACHED_COUNTRIES,
            CriterionValue::List(
                DEFAULT_REACHED_COUNTRIES
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
            ),
        );
        params.insert(
            AD_ACTIVE_STATUS,
            CriterionValue::Text(DEFAULT_ACTIVE_STATUS.to_string()),
        );
        params.insert(FIELDS, CriterionValue::Text(DEFAULT_FIELDS.to_string()));
        Self { params }
    }

    /// Merges `criteria` over the defaults, overriding only the keys it sets.
    pub fn merged(criteria: &SearchCriteria) -> Self {
        let mut merged = Self::defaults();
        for (key, value) in criteria.overrides() {
            merged.params.insert(key, value);
        }
        merged
    }

    pub fn get(&self, key: &str) -> Option<&CriterionValue> {
        self.params.get(key)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Key/value pairs for display, with lists rendered as JSON arrays.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, String)> + '_ {
        self.params.iter().map(|(k, v)| (*k, v.to_query_value()))
    }

    /// Query pairs for the first page request, token included.
    pub fn to_query(&self, token: &str) -> Vec<(String, String)> {
        let mut query: Vec<(String, String)> = self
            .entries()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        query.push((ACCESS_TOKEN_PARAM.to_string(), token.to_string()));
        query
    }
}
