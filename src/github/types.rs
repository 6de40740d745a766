//! # GitHub Wire Types
//!
//! Normalized subsets of the GitHub REST v3 user and repository objects.
//! Only the fields the explorer actually reads are modelled; everything else
//! in the payload is ignored by serde.
//!
//! Field names follow our own vocabulary where it reads better
//! (`profile_url`, `star_count`, `is_fork`) and are renamed back to the
//! GitHub names on the wire.

use serde::{Deserialize, Serialize};

/// A user as returned inside the `items` array of `/search/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    /// Public profile page (`html_url` on the wire).
    #[serde(rename = "html_url")]
    pub profile_url: String,
    /// Repository listing endpoint. Used verbatim for the repo fetch.
    pub repos_url: String,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    /// GitHub sends `null` for repositories without a description.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "stargazers_count", default)]
    pub star_count: u64,
    #[serde(rename = "fork", default)]
    pub is_fork: bool,
}

impl RepositorySummary {
    /// The description as rendered: hidden only when null or empty.
    pub fn visible_description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

/// Body of a successful `/search/users` response.
///
/// `items` stays optional so a malformed body is detected instead of being
/// mistaken for an empty result.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Option<Vec<UserSummary>>,
}

/// Error body GitHub attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of a user search that reached the server and parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// One or more users, in server order. Never empty.
    Found(Vec<UserSummary>),
    /// The server answered with zero items.
    NoMatch,
}

impl SearchOutcome {
    pub fn from_items(items: Vec<UserSummary>) -> Self {
        if items.is_empty() {
            SearchOutcome::NoMatch
        } else {
            SearchOutcome::Found(items)
        }
    }
}
