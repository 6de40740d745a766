//! # Application State
//!
//! Core view state for the explorer. Domain data only, no TUI types.
//! Presentation state (input buffer, scroll offsets) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── last_query: String              // last submitted (trimmed) term
//! ├── users: Vec<UserSummary>         // last fetched search results
//! ├── expanded: Option<u64>           // id of the expanded user, at most one
//! ├── repos: Vec<RepositorySummary>   // repositories of the expanded user
//! ├── searching: bool                 // user search in flight
//! ├── loading_repos: bool             // repo fetch in flight
//! ├── error: Option<String>           // active error message
//! ├── not_found: Option<String>       // active "not found" message
//! ├── search_seq / repo_seq: u64      // latest request tags
//! └── drop_stale_responses: bool      // discard superseded completions
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::policy;
use crate::github::{RepositorySummary, UserSummary};

/// What the search area shows. Exactly one at a time.
#[derive(Debug, PartialEq)]
pub enum SearchPanel<'a> {
    Error { message: &'a str, rate_limited: bool },
    NotFound(&'a str),
    Results(&'a [UserSummary]),
    Searching,
    Idle,
}

/// What the panel under the expanded user shows.
#[derive(Debug, PartialEq)]
pub enum RepoPanel<'a> {
    Loading,
    List(&'a [RepositorySummary]),
    Empty,
}

pub struct App {
    pub last_query: String,
    pub users: Vec<UserSummary>,
    pub expanded: Option<u64>,
    pub repos: Vec<RepositorySummary>,
    pub searching: bool,
    pub loading_repos: bool,
    pub error: Option<String>,
    pub not_found: Option<String>,
    /// Tag of the most recently issued user search.
    pub search_seq: u64,
    /// Tag of the most recently issued (or invalidated) repo fetch.
    pub repo_seq: u64,
    /// When false, completions apply in whatever order they resolve.
    pub drop_stale_responses: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            last_query: String::new(),
            users: Vec::new(),
            expanded: None,
            repos: Vec::new(),
            searching: false,
            loading_repos: false,
            error: None,
            not_found: None,
            search_seq: 0,
            repo_seq: 0,
            drop_stale_responses: true,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            drop_stale_responses: config.drop_stale_responses,
            ..Self::new()
        }
    }

    /// Clears both messages. Every fetch starts with this.
    pub(crate) fn clear_messages(&mut self) {
        self.error = None;
        self.not_found = None;
    }

    /// Collapses the expanded user and drops its repositories.
    pub(crate) fn collapse(&mut self) {
        self.expanded = None;
        self.repos.clear();
        self.loading_repos = false;
    }

    pub fn search_panel(&self) -> SearchPanel<'_> {
        if let Some(message) = self.error.as_deref() {
            return SearchPanel::Error {
                message,
                rate_limited: policy::is_rate_limit_message(message),
            };
        }
        if let Some(message) = self.not_found.as_deref()
            && !self.searching
        {
            return SearchPanel::NotFound(message);
        }
        if !self.users.is_empty() {
            return SearchPanel::Results(&self.users);
        }
        if self.searching {
            SearchPanel::Searching
        } else {
            SearchPanel::Idle
        }
    }

    /// `None` when no user is expanded.
    pub fn repo_panel(&self) -> Option<RepoPanel<'_>> {
        self.expanded?;
        Some(if self.loading_repos {
            RepoPanel::Loading
        } else if self.repos.is_empty() {
            RepoPanel::Empty
        } else {
            RepoPanel::List(&self.repos)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_repo, sample_user};

    #[test]
    fn test_app_new_defaults() {
        let app = App::new();
        assert!(app.users.is_empty());
        assert!(app.expanded.is_none());
        assert!(!app.searching);
        assert!(!app.loading_repos);
        assert!(app.drop_stale_responses);
        assert_eq!(app.search_panel(), SearchPanel::Idle);
        assert_eq!(app.repo_panel(), None);
    }

    #[test]
    fn test_error_panel_flags_rate_limit() {
        let mut app = App::new();
        app.error = Some("API rate limit exceeded for 127.0.0.1.".into());
        assert!(matches!(
            app.search_panel(),
            SearchPanel::Error { rate_limited: true, .. }
        ));

        app.error = Some("Internal Server Error".into());
        assert!(matches!(
            app.search_panel(),
            SearchPanel::Error { rate_limited: false, .. }
        ));
    }

    #[test]
    fn test_error_wins_over_results() {
        let mut app = App::new();
        app.users = vec![sample_user(1, "a")];
        app.error = Some("boom".into());
        assert!(matches!(app.search_panel(), SearchPanel::Error { .. }));
    }

    #[test]
    fn test_searching_panel_while_in_flight() {
        let mut app = App::new();
        app.searching = true;
        assert_eq!(app.search_panel(), SearchPanel::Searching);
    }

    #[test]
    fn test_repo_panel_states() {
        let mut app = App::new();
        app.users = vec![sample_user(1, "a")];
        app.expanded = Some(1);
        app.loading_repos = true;
        assert_eq!(app.repo_panel(), Some(RepoPanel::Loading));

        app.loading_repos = false;
        assert_eq!(app.repo_panel(), Some(RepoPanel::Empty));

        app.repos = vec![sample_repo(10, "r", None)];
        assert!(matches!(app.repo_panel(), Some(RepoPanel::List(r)) if r.len() == 1));
    }
}
