use std::collections::HashMap;

use crate::models::{AccountRecord, UserNetwork, INVALID_HANDLE};

/// Merge both users' account records into one lookup table
///
/// User B's records are inserted last and win on a shared handle. The
/// invalid-handle sentinel is removed. Empty unless both users are present.
pub fn build_directory(
    user_a: Option<&UserNetwork>,
    user_b: Option<&UserNetwork>,
) -> HashMap<String, AccountRecord> {
    let (Some(user_a), Some(user_b)) = (user_a, user_b) else {
        return HashMap::new();
    };

    let mut directory = HashMap::with_capacity(user_a.accounts.len() + user_b.accounts.len());
    for (handle, account) in user_a.accounts.iter().chain(user_b.accounts.iter()) {
        directory.insert(handle.clone(), account.clone());
    }
    directory.remove(INVALID_HANDLE);

    directory
}
