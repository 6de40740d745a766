//! reqwest-backed [`GithubApi`] implementation.
//!
//! Both endpoints go through [`GithubClient::get_json`], which applies the
//! shared headers and turns every failure into an [`ApiError`].

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;

use super::api::{ApiError, GithubApi};
use super::types::{ApiErrorBody, RepositorySummary, SearchOutcome, SearchResponse, UserSummary};

pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_SEARCH_PAGE_SIZE: u32 = 5;
pub const DEFAULT_REPO_PAGE_SIZE: u32 = 100;

/// Default `User-Agent`. GitHub rejects requests that don't send one.
pub fn default_user_agent() -> String {
    format!("ghx/{}", env!("CARGO_PKG_VERSION"))
}

/// GitHub REST client
pub struct GithubClient {
    base_url: String,
    user_agent: String,
    search_page_size: u32,
    repo_page_size: u32,
    client: reqwest::Client,
}

impl GithubClient {
    /// Creates a client against `base_url` (defaults to `https://api.github.com`)
    /// with the default page sizes.
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: default_user_agent(),
            search_page_size: DEFAULT_SEARCH_PAGE_SIZE,
            repo_page_size: DEFAULT_REPO_PAGE_SIZE,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_page_sizes(mut self, search: u32, repos: u32) -> Self {
        self.search_page_size = search;
        self.repo_page_size = repos;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a GET with the shared headers and decodes a 2xx JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(url)
            .query(query)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        debug!("GitHub response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message_from_body(&body);
            warn!("GitHub API error: {} - {}", status.as_u16(), body);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to decode GitHub response from {}: {}", url, e);
            ApiError::Parse(format!("Invalid response from GitHub: {e}"))
        })
    }
}

/// Pulls the `message` field out of a GitHub error body.
/// Returns `None` for non-JSON bodies and bodies without a usable message.
fn error_message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
}

#[async_trait]
impl GithubApi for GithubClient {
    fn name(&self) -> &str {
        "github"
    }

    async fn search_users(&self, term: &str) -> Result<SearchOutcome, ApiError> {
        info!(
            "Searching users: term={:?}, per_page={}",
            term, self.search_page_size
        );
        let url = format!("{}/search/users", self.base_url);
        let query = [
            ("q", term.to_string()),
            ("per_page", self.search_page_size.to_string()),
        ];

        let response: SearchResponse = self.get_json(&url, &query).await?;
        let items = response.items.ok_or_else(|| {
            ApiError::Parse("Invalid response from GitHub: missing `items`".to_string())
        })?;

        debug!(
            "Search returned {} of {} users (incomplete={})",
            items.len(),
            response.total_count,
            response.incomplete_results
        );
        Ok(SearchOutcome::from_items(items))
    }

    async fn list_repositories(
        &self,
        user: &UserSummary,
    ) -> Result<Vec<RepositorySummary>, ApiError> {
        info!(
            "Fetching repositories for {} (per_page={})",
            user.login, self.repo_page_size
        );
        let query = [("per_page", self.repo_page_size.to_string())];
        let repos: Vec<RepositorySummary> = self.get_json(&user.repos_url, &query).await?;
        debug!("{} has {} repositories", user.login, repos.len());
        Ok(repos)
    }
}
