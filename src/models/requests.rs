use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::form_urlencoded;
use validator::Validate;

use crate::models::domain::{FilterSelection, SetKey};

/// Request to compare two accounts
///
/// Mirrors the URL query state of the comparison page:
/// `?a=alice&b=bob&aFilters=following,followed-by&selectedSets=user1-followers`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CompareRequest {
    #[validate(length(min = 1))]
    pub a: String,
    #[validate(length(min = 1))]
    pub b: String,
    #[serde(rename = "aFilters", default)]
    pub a_filters: Vec<String>,
    #[serde(rename = "bFilters", default)]
    pub b_filters: Vec<String>,
    #[serde(rename = "selectedSets", default)]
    pub selected_sets: Vec<String>,
}

impl CompareRequest {
    /// Parse a URL query string. Unknown parameters are ignored and list
    /// parameters are comma separated.
    pub fn from_query(query: &str) -> Self {
        let params: HashMap<String, String> =
            form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
                .into_owned()
                .collect();
        let param = |key: &str| params.get(key).map(String::as_str).unwrap_or_default();

        Self {
            a: param("a").to_string(),
            b: param("b").to_string(),
            a_filters: split_list(param("aFilters")),
            b_filters: split_list(param("bFilters")),
            selected_sets: split_list(param("selectedSets")),
        }
    }

    pub fn selection(&self) -> FilterSelection {
        FilterSelection::from_tags(&self.a_filters, &self.b_filters)
    }

    /// Selected diagram sets, unknown keys dropped and duplicates collapsed
    pub fn set_keys(&self) -> Vec<SetKey> {
        let mut keys: Vec<SetKey> = self
            .selected_sets
            .iter()
            .filter_map(|k| SetKey::parse(k))
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}
