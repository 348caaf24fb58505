use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::core::sets::HandleSet;

/// Reserved handle the network reports for deleted or unresolvable accounts
pub const INVALID_HANDLE: &str = "handle.invalid";

/// Account as reported by the aggregation backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub handle: String,
    #[serde(rename = "displayName", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl AccountRecord {
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            display_name: None,
            avatar: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Display name if set, otherwise the handle
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.handle)
    }
}

/// Raw payload returned by the aggregation backend for one actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendResponse {
    #[serde(default)]
    pub followers: Vec<AccountRecord>,
    #[serde(default)]
    pub follows: Vec<AccountRecord>,
    #[serde(rename = "fromCache", default)]
    pub from_cache: bool,
    #[serde(default)]
    pub cached: bool,
    #[serde(rename = "cacheHits", default, skip_serializing_if = "Option::is_none")]
    pub cache_hits: Option<u64>,
}

/// Follower and following sets of a single account, precomputed once per fetch
#[derive(Debug, Clone, Default)]
pub struct UserNetwork {
    pub following: HandleSet,
    pub followers: HandleSet,
    /// Every account this user's lists mention, keyed by handle
    pub accounts: HashMap<String, AccountRecord>,
}

impl UserNetwork {
    pub fn new(
        following: HandleSet,
        followers: HandleSet,
        accounts: HashMap<String, AccountRecord>,
    ) -> Self {
        Self {
            following,
            followers,
            accounts,
        }
    }

    /// Build a network from two account lists.
    ///
    /// Follows are recorded before followers, so an account that appears in
    /// both lists keeps its follower record.
    pub fn from_lists(follows: Vec<AccountRecord>, followers: Vec<AccountRecord>) -> Self {
        let following: HandleSet = follows.iter().map(|a| a.handle.as_str()).collect();
        let follower_set: HandleSet = followers.iter().map(|a| a.handle.as_str()).collect();

        let mut accounts = HashMap::with_capacity(follows.len() + followers.len());
        for account in follows.into_iter().chain(followers) {
            accounts.insert(account.handle.clone(), account);
        }

        Self {
            following,
            followers: follower_set,
            accounts,
        }
    }

    /// Everyone this account follows or is followed by
    pub fn combined(&self) -> HandleSet {
        self.following.union(&self.followers)
    }
}

impl From<BackendResponse> for UserNetwork {
    fn from(response: BackendResponse) -> Self {
        Self::from_lists(response.follows, response.followers)
    }
}

/// Membership predicate a user can toggle in the filter panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilterTag {
    #[serde(rename = "following")]
    Following,
    #[serde(rename = "followed-by")]
    FollowedBy,
}

impl FilterTag {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "following" => Some(Self::Following),
            "followed-by" => Some(Self::FollowedBy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Following => "following",
            Self::FollowedBy => "followed-by",
        }
    }
}

/// How two tags selected for the same user are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombinePolicy {
    /// Only accounts that are both followed and following (mutuals)
    #[default]
    Intersection,
    /// Accounts that are either followed or following
    Union,
}

/// Tags selected for user A and user B
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub a: HashSet<FilterTag>,
    pub b: HashSet<FilterTag>,
}

impl FilterSelection {
    /// Build a selection from raw tag strings. Unknown tags are dropped.
    pub fn from_tags<I, J, S, T>(a: I, b: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            a: a.into_iter().filter_map(|t| FilterTag::parse(t.as_ref())).collect(),
            b: b.into_iter().filter_map(|t| FilterTag::parse(t.as_ref())).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty() && self.b.is_empty()
    }
}

/// Stable identifiers for the four base sets shown in the overlap diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SetKey {
    #[serde(rename = "user1-followers")]
    User1Followers,
    #[serde(rename = "user2-followers")]
    User2Followers,
    #[serde(rename = "user1-following")]
    User1Following,
    #[serde(rename = "user2-following")]
    User2Following,
}

impl SetKey {
    pub const ALL: [SetKey; 4] = [
        SetKey::User1Followers,
        SetKey::User2Followers,
        SetKey::User1Following,
        SetKey::User2Following,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "user1-followers" => Some(Self::User1Followers),
            "user2-followers" => Some(Self::User2Followers),
            "user1-following" => Some(Self::User1Following),
            "user2-following" => Some(Self::User2Following),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User1Followers => "user1-followers",
            Self::User2Followers => "user2-followers",
            Self::User1Following => "user1-following",
            Self::User2Following => "user2-following",
        }
    }

    /// The base set this key names
    pub fn resolve<'a>(&self, a: &'a UserNetwork, b: &'a UserNetwork) -> &'a HandleSet {
        match self {
            Self::User1Followers => &a.followers,
            Self::User2Followers => &b.followers,
            Self::User1Following => &a.following,
            Self::User2Following => &b.following,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_from_lists() {
        let follows = vec![
            AccountRecord::new("p").with_display_name("Follow P"),
            AccountRecord::new("q"),
        ];
        let followers = vec![
            AccountRecord::new("p").with_display_name("Follower P"),
            AccountRecord::new("r"),
        ];

        let network = UserNetwork::from_lists(follows, followers);

        assert_eq!(network.following.size(), 2);
        assert_eq!(network.followers.size(), 2);
        assert_eq!(network.accounts.len(), 3);
        assert_eq!(network.accounts["p"].display_name.as_deref(), Some("Follower P"));
        assert_eq!(network.combined().size(), 3);
    }

    #[test]
    fn test_backend_response_parsing() {
        let json = r#"{
            "followers": [{"handle": "alice.test", "displayName": "Alice"}],
            "follows": [{"handle": "bob.test", "avatar": "https://cdn.example/bob.jpg"}],
            "fromCache": true,
            "cached": false
        }"#;

        let response: BackendResponse = serde_json::from_str(json).unwrap();
        assert!(response.from_cache);
        assert_eq!(response.cache_hits, None);

        let network = UserNetwork::from(response);
        assert!(network.followers.has("alice.test"));
        assert!(network.following.has("bob.test"));
        assert_eq!(network.accounts["alice.test"].label(), "Alice");
        assert_eq!(network.accounts["bob.test"].label(), "bob.test");
    }

    #[test]
    fn test_filter_selection_ignores_unknown_tags() {
        let selection = FilterSelection::from_tags(
            ["following", "following", "bogus"],
            ["followed-by", "neither"],
        );

        assert_eq!(selection.a.len(), 1);
        assert!(selection.a.contains(&FilterTag::Following));
        assert_eq!(selection.b.len(), 1);
        assert!(selection.b.contains(&FilterTag::FollowedBy));
        assert!(!selection.is_empty());
        assert!(FilterSelection::from_tags(["x"], Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_account_record_serialization() {
        let bare = serde_json::to_value(AccountRecord::new("p")).unwrap();
        assert_eq!(bare, serde_json::json!({"handle": "p"}));

        let full = AccountRecord::new("q")
            .with_display_name("Q")
            .with_avatar("https://cdn.example/q.jpg");
        let value = serde_json::to_value(&full).unwrap();
        assert_eq!(value["displayName"], "Q");
        assert_eq!(value["avatar"], "https://cdn.example/q.jpg");
    }

    #[test]
    fn test_filter_tag_names_match_serde() {
        for tag in [FilterTag::Following, FilterTag::FollowedBy] {
            assert_eq!(FilterTag::parse(tag.as_str()), Some(tag));
            assert_eq!(serde_json::to_value(tag).unwrap(), tag.as_str());
        }
        assert_eq!(FilterTag::parse("followers"), None);
    }

    #[test]
    fn test_set_key_round_trip() {
        for key in SetKey::ALL {
            assert_eq!(SetKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(SetKey::parse("user3-followers"), None);
    }

    #[test]
    fn test_combine_policy_deserialize() {
        let policy: CombinePolicy = serde_json::from_str("\"union\"").unwrap();
        assert_eq!(policy, CombinePolicy::Union);
        assert_eq!(CombinePolicy::default(), CombinePolicy::Intersection);
    }
}
