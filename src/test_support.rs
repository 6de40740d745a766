//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::github::{ApiError, GithubApi, RepositorySummary, SearchOutcome, UserSummary};

/// A canned `GithubApi` that records what it was asked for.
pub struct StubGithub {
    search_result: Result<SearchOutcome, ApiError>,
    repos_result: Result<Vec<RepositorySummary>, ApiError>,
    search_calls: Mutex<Vec<String>>,
    repo_calls: Mutex<Vec<String>>,
}

impl StubGithub {
    pub fn new() -> Self {
        Self {
            search_result: Ok(SearchOutcome::NoMatch),
            repos_result: Ok(Vec::new()),
            search_calls: Mutex::new(Vec::new()),
            repo_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_search(mut self, result: Result<SearchOutcome, ApiError>) -> Self {
        self.search_result = result;
        self
    }

    pub fn with_repos(mut self, result: Result<Vec<RepositorySummary>, ApiError>) -> Self {
        self.repos_result = result;
        self
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    /// Logins whose repositories were requested.
    pub fn repo_calls(&self) -> Vec<String> {
        self.repo_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GithubApi for StubGithub {
    fn name(&self) -> &str {
        "stub"
    }

    async fn search_users(&self, term: &str) -> Result<SearchOutcome, ApiError> {
        self.search_calls.lock().unwrap().push(term.to_string());
        self.search_result.clone()
    }

    async fn list_repositories(
        &self,
        user: &UserSummary,
    ) -> Result<Vec<RepositorySummary>, ApiError> {
        self.repo_calls.lock().unwrap().push(user.login.clone());
        self.repos_result.clone()
    }
}

pub fn sample_user(id: u64, login: &str) -> UserSummary {
    UserSummary {
        login: login.to_string(),
        id,
        avatar_url: format!("https://avatars.example/{id}"),
        profile_url: format!("https://github.com/{login}"),
        repos_url: format!("https://api.github.com/users/{login}/repos"),
        score: 1.0,
    }
}

pub fn sample_repo(id: u64, name: &str, description: Option<&str>) -> RepositorySummary {
    RepositorySummary {
        id,
        name: name.to_string(),
        full_name: format!("owner/{name}"),
        html_url: format!("https://github.com/owner/{name}"),
        description: description.map(str::to_string),
        star_count: id * 2,
        is_fork: false,
    }
}
