use std::collections::{HashMap, HashSet};

use crate::core::sets::HandleSet;
use crate::models::{AccountRecord, CombinePolicy, FilterSelection, FilterTag, SetKey, UserNetwork, INVALID_HANDLE};

/// Build the candidate set for one user from their selected tags
///
/// No tags selects nothing. A single tag selects that base set. Both tags
/// are combined according to `policy`.
pub fn user_filter_set(
    network: &UserNetwork,
    tags: &HashSet<FilterTag>,
    policy: CombinePolicy,
) -> HandleSet {
    let following = tags.contains(&FilterTag::Following);
    let followed_by = tags.contains(&FilterTag::FollowedBy);

    match (following, followed_by) {
        (true, true) => match policy {
            CombinePolicy::Intersection => network.following.intersect(&network.followers),
            CombinePolicy::Union => network.following.union(&network.followers),
        },
        (true, false) => network.following.clone(),
        (false, true) => network.followers.clone(),
        (false, false) => HandleSet::new(),
    }
}

/// Accounts matching the per-user filter toggles, mutual-only when both tags
/// are selected for a user
///
/// See [`filtered_accounts_with_policy`].
pub fn filtered_accounts(
    selection: &FilterSelection,
    user_a: Option<&UserNetwork>,
    user_b: Option<&UserNetwork>,
    directory: &HashMap<String, AccountRecord>,
) -> Vec<AccountRecord> {
    filtered_accounts_with_policy(selection, user_a, user_b, directory, CombinePolicy::default())
}

/// Accounts matching the per-user filter toggles
///
/// Returns nothing until both users are loaded and at least one tag is
/// selected. When both users have a selection the two candidate sets are
/// intersected. The invalid-handle sentinel is always dropped, as is any
/// handle missing from `directory`. Output order is unspecified.
pub fn filtered_accounts_with_policy(
    selection: &FilterSelection,
    user_a: Option<&UserNetwork>,
    user_b: Option<&UserNetwork>,
    directory: &HashMap<String, AccountRecord>,
    policy: CombinePolicy,
) -> Vec<AccountRecord> {
    let (Some(user_a), Some(user_b)) = (user_a, user_b) else {
        return Vec::new();
    };

    if selection.is_empty() {
        return Vec::new();
    }

    let result = match (selection.a.is_empty(), selection.b.is_empty()) {
        (false, false) => {
            let a_set = user_filter_set(user_a, &selection.a, policy);
            let b_set = user_filter_set(user_b, &selection.b, policy);
            a_set.intersect(&b_set)
        }
        (false, true) => user_filter_set(user_a, &selection.a, policy),
        _ => user_filter_set(user_b, &selection.b, policy),
    };

    resolve_accounts(&result, directory)
}

/// Accounts present in every one of `sets`
///
/// Used when sets are picked from the overlap diagram. An empty list selects
/// nothing.
pub fn intersect_selected(
    sets: &[&HandleSet],
    directory: &HashMap<String, AccountRecord>,
) -> Vec<AccountRecord> {
    if sets.is_empty() {
        return Vec::new();
    }

    resolve_accounts(&HandleSet::intersect_all(sets), directory)
}

/// Look up the base sets named by `keys`
pub fn select_sets<'a>(
    keys: &[SetKey],
    user_a: &'a UserNetwork,
    user_b: &'a UserNetwork,
) -> Vec<&'a HandleSet> {
    keys.iter().map(|k| k.resolve(user_a, user_b)).collect()
}

/// Map handles to account records, skipping the sentinel and unknown handles
fn resolve_accounts(
    handles: &HandleSet,
    directory: &HashMap<String, AccountRecord>,
) -> Vec<AccountRecord> {
    handles
        .iter()
        .filter(|h| *h != INVALID_HANDLE)
        .filter_map(|h| directory.get(h).cloned())
        .collect()
}
