use serde::{Deserialize, Serialize};

use crate::core::{scoring::similarity_score, sets::HandleSet};
use crate::models::{SetKey, UserNetwork};

/// Headline overlap numbers for two users' following lists
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    #[serde(rename = "mutualCount")]
    pub mutual: usize,
    #[serde(rename = "user1OnlyCount")]
    pub user1_only: usize,
    #[serde(rename = "user2OnlyCount")]
    pub user2_only: usize,
    #[serde(rename = "totalUnique")]
    pub total_unique: usize,
    #[serde(rename = "overlapPercentage")]
    pub overlap_percentage: f64,
    #[serde(rename = "similarityScore")]
    pub similarity_score: u8,
}

impl NetworkStats {
    pub fn compute(user_a: &UserNetwork, user_b: &UserNetwork) -> Self {
        let mutual = user_a.following.intersection_size(&user_b.following);
        let total_unique = user_a.following.size() + user_b.following.size() - mutual;

        let overlap_percentage = if total_unique > 0 {
            mutual as f64 / total_unique as f64 * 100.0
        } else {
            0.0
        };

        Self {
            mutual,
            user1_only: user_a.following.size() - mutual,
            user2_only: user_b.following.size() - mutual,
            total_unique,
            overlap_percentage,
            similarity_score: similarity_score(Some(user_a), Some(user_b)),
        }
    }
}

/// One region of the four-set overlap diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VennRegion {
    pub sets: Vec<SetKey>,
    pub size: usize,
}

/// Intersection size of every non-empty combination of the four base sets
///
/// Combinations whose intersection is empty are left out. Regions come out
/// singles first, then pairs, triples and the four-way intersection.
pub fn venn_regions(user_a: &UserNetwork, user_b: &UserNetwork) -> Vec<VennRegion> {
    let mut masks: Vec<u8> = (1u8..16).collect();
    masks.sort_by_key(|m| (m.count_ones(), *m));

    masks
        .into_iter()
        .filter_map(|mask| {
            let keys: Vec<SetKey> = SetKey::ALL
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1u8 << *i) != 0)
                .map(|(_, k)| *k)
                .collect();
            let sets: Vec<&HandleSet> = keys.iter().map(|k| k.resolve(user_a, user_b)).collect();

            let size = match sets.as_slice() {
                [only] => only.size(),
                [first, second] => first.intersection_size(second),
                _ => HandleSet::intersect_all(&sets).size(),
            };

            (size > 0).then_some(VennRegion { sets: keys, size })
        })
        .collect()
}
