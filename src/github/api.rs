use std::fmt;

use async_trait::async_trait;

use super::types::{RepositorySummary, SearchOutcome, UserSummary};

/// Shown when a failure carries no usable text of its own.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";

/// Errors that can occur while talking to the GitHub API.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No response was received (DNS, connection refused, timeout, body read).
    Network(String),
    /// The API answered with a non-2xx status. `message` is the `message`
    /// field of the JSON error body, when one could be parsed.
    Api { status: u16, message: Option<String> },
    /// A 2xx body that didn't match the expected shape.
    Parse(String),
}

impl ApiError {
    /// The text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Api { status, message } => message
                .as_deref()
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP error! status: {status}")),
            ApiError::Network(msg) | ApiError::Parse(msg) => {
                if msg.trim().is_empty() {
                    UNKNOWN_ERROR.to_string()
                } else {
                    msg.clone()
                }
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => match message {
                Some(message) => write!(f, "API error (HTTP {status}): {message}"),
                None => write!(f, "API error (HTTP {status})"),
            },
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The two read-only calls the explorer makes.
#[async_trait]
pub trait GithubApi: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// `GET /search/users?q=<term>`. `term` is already trimmed and non-empty.
    async fn search_users(&self, term: &str) -> Result<SearchOutcome, ApiError>;

    /// `GET <user.repos_url>`.
    async fn list_repositories(
        &self,
        user: &UserSummary,
    ) -> Result<Vec<RepositorySummary>, ApiError>;
}
