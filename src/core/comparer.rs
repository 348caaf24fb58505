use crate::core::{
    directory::build_directory,
    filters::{filtered_accounts_with_policy, intersect_selected, select_sets},
    scoring::{similarity_message, similarity_score},
    stats::{venn_regions, NetworkStats, VennRegion},
};
use crate::models::{AccountRecord, CombinePolicy, ComparisonReport, FilterSelection, SetKey, UserNetwork};

/// Result of comparing two networks
#[derive(Debug)]
pub struct Comparison {
    pub similarity_score: u8,
    pub similarity_message: &'static str,
    pub stats: NetworkStats,
    pub venn: Vec<VennRegion>,
    pub filtered_accounts: Vec<AccountRecord>,
    pub selected_set_accounts: Vec<AccountRecord>,
}

impl Comparison {
    pub fn into_report(self, a: impl Into<String>, b: impl Into<String>) -> ComparisonReport {
        ComparisonReport {
            a: a.into(),
            b: b.into(),
            similarity_score: self.similarity_score,
            similarity_message: self.similarity_message.to_string(),
            stats: self.stats,
            venn: self.venn,
            filtered_accounts: self.filtered_accounts,
            selected_set_accounts: self.selected_set_accounts,
            generated_at: chrono::Utc::now(),
        }
    }
}

/// Runs every comparison over a pair of loaded networks
///
/// # Steps
/// 1. Merge both account directories
/// 2. Score the overall similarity
/// 3. Compute following overlap and diagram regions
/// 4. Apply the filter toggles and the diagram set selection
#[derive(Debug, Clone, Copy, Default)]
pub struct Comparer {
    policy: CombinePolicy,
}

impl Comparer {
    pub fn new(policy: CombinePolicy) -> Self {
        Self { policy }
    }

    /// Compare two networks
    ///
    /// # Arguments
    /// * `user_a` - First user's network
    /// * `user_b` - Second user's network
    /// * `selection` - Filter toggles for each user
    /// * `selected_sets` - Base sets picked from the overlap diagram
    ///
    /// Both account lists are sorted by handle.
    pub fn compare(
        &self,
        user_a: &UserNetwork,
        user_b: &UserNetwork,
        selection: &FilterSelection,
        selected_sets: &[SetKey],
    ) -> Comparison {
        let directory = build_directory(Some(user_a), Some(user_b));

        let score = similarity_score(Some(user_a), Some(user_b));

        let mut filtered_accounts = filtered_accounts_with_policy(
            selection,
            Some(user_a),
            Some(user_b),
            &directory,
            self.policy,
        );
        filtered_accounts.sort_by(|x, y| x.handle.cmp(&y.handle));

        let sets = select_sets(selected_sets, user_a, user_b);
        let mut selected_set_accounts = intersect_selected(&sets, &directory);
        selected_set_accounts.sort_by(|x, y| x.handle.cmp(&y.handle));

        Comparison {
            similarity_score: score,
            similarity_message: similarity_message(score),
            stats: NetworkStats::compute(user_a, user_b),
            venn: venn_regions(user_a, user_b),
            filtered_accounts,
            selected_set_accounts,
        }
    }
}
