use serde::{Deserialize, Serialize};

use crate::core::stats::{NetworkStats, VennRegion};
use crate::models::domain::AccountRecord;

/// Full comparison of two accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub a: String,
    pub b: String,
    #[serde(rename = "similarityScore")]
    pub similarity_score: u8,
    #[serde(rename = "similarityMessage")]
    pub similarity_message: String,
    pub stats: NetworkStats,
    pub venn: Vec<VennRegion>,
    /// Accounts matching the per-user filter toggles
    #[serde(rename = "filteredAccounts")]
    pub filtered_accounts: Vec<AccountRecord>,
    /// Accounts in the intersection of the selected diagram sets
    #[serde(rename = "selectedSetAccounts")]
    pub selected_set_accounts: Vec<AccountRecord>,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Actor returned by the typeahead search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSummary {
    #[serde(default)]
    pub did: String,
    pub handle: String,
    #[serde(rename = "displayName", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Typeahead search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchActorsResponse {
    #[serde(default)]
    pub actors: Vec<ActorSummary>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
