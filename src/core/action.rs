//! # Actions
//!
//! Everything that can happen in the explorer becomes an `Action`.
//! User presses Enter in the search box? That's `Action::SubmitSearch(text)`.
//! The search endpoint answers? That's `Action::UsersLoaded { .. }`.
//!
//! `update()` applies an action to the state and returns an `Effect`
//! describing the I/O the caller should start. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Stale responses
//!
//! Every request carries the sequence number it was issued with. When
//! `App::drop_stale_responses` is set, a completion whose tag is not the
//! latest is ignored, and so is a repository list for a user who is no longer
//! expanded. With the flag off, completions apply in resolution order.

use log::{debug, info};

use crate::core::policy;
use crate::core::state::App;
use crate::github::{ApiError, RepositorySummary, SearchOutcome, UserSummary};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Raw search box contents submitted by the user.
    SubmitSearch(String),
    /// A user search finished.
    UsersLoaded {
        seq: u64,
        term: String,
        result: Result<SearchOutcome, ApiError>,
    },
    /// The user clicked (or pressed Enter on) a result row.
    ToggleUser(UserSummary),
    /// A repository listing finished.
    ReposLoaded {
        seq: u64,
        user_id: u64,
        result: Result<Vec<RepositorySummary>, ApiError>,
    },
    Quit,
}

/// I/O the event loop should perform after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    SearchUsers { seq: u64, term: String },
    FetchRepositories { seq: u64, user: UserSummary },
}

/// True if `action` is a completion that `update()` will drop because a
/// newer request superseded it. Always false with `drop_stale_responses` off.
pub fn is_stale(app: &App, action: &Action) -> bool {
    if !app.drop_stale_responses {
        return false;
    }
    match action {
        Action::UsersLoaded { seq, .. } => *seq != app.search_seq,
        Action::ReposLoaded { seq, user_id, .. } => {
            *seq != app.repo_seq || app.expanded != Some(*user_id)
        }
        _ => false,
    }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    if is_stale(app, &action) {
        match &action {
            Action::UsersLoaded { seq, .. } => debug!(
                "Dropping stale search response (seq={}, latest={})",
                seq, app.search_seq
            ),
            Action::ReposLoaded { seq, user_id, .. } => debug!(
                "Dropping stale repo response (seq={}, latest={}, user_id={})",
                seq, app.repo_seq, user_id
            ),
            _ => {}
        }
        return Effect::None;
    }

    match action {
        Action::SubmitSearch(raw) => submit_search(app, &raw),
        Action::UsersLoaded { term, result, .. } => {
            users_loaded(app, &term, result);
            Effect::None
        }
        Action::ToggleUser(user) => toggle_user(app, user),
        Action::ReposLoaded { result, .. } => {
            repos_loaded(app, result);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit_search(app: &mut App, raw: &str) -> Effect {
    let term = raw.trim();

    // Anything still in flight belongs to a query the user has moved past.
    app.search_seq += 1;
    app.repo_seq += 1;
    app.clear_messages();
    app.collapse();

    if term.is_empty() {
        debug!("Empty search term, resetting state");
        app.users.clear();
        app.searching = false;
        app.last_query.clear();
        return Effect::None;
    }

    info!("Submitting search for {:?} (seq={})", term, app.search_seq);
    app.searching = true;
    app.last_query = term.to_string();
    Effect::SearchUsers {
        seq: app.search_seq,
        term: term.to_string(),
    }
}

fn users_loaded(app: &mut App, term: &str, result: Result<SearchOutcome, ApiError>) {
    app.searching = false;
    app.clear_messages();

    match result {
        Ok(SearchOutcome::Found(users)) => {
            info!("Search for {:?} returned {} users", term, users.len());
            app.users = users;
        }
        Ok(SearchOutcome::NoMatch) => {
            info!("Search for {:?} returned no users", term);
            app.users.clear();
            app.not_found = Some(policy::not_found_message(term));
        }
        Err(e) => {
            info!("Search for {:?} failed: {}", term, e);
            app.users.clear();
            app.error = Some(e.user_message());
        }
    }

    app.collapse();
}

fn toggle_user(app: &mut App, user: UserSummary) -> Effect {
    // Invalidate whatever repo fetch is pending, whichever way this goes.
    app.repo_seq += 1;

    if app.expanded == Some(user.id) {
        debug!("Collapsing {}", user.login);
        app.collapse();
        return Effect::None;
    }

    debug!("Expanding {} (seq={})", user.login, app.repo_seq);
    app.clear_messages();
    app.expanded = Some(user.id);
    app.repos.clear();
    app.loading_repos = true;
    Effect::FetchRepositories {
        seq: app.repo_seq,
        user,
    }
}

fn repos_loaded(app: &mut App, result: Result<Vec<RepositorySummary>, ApiError>) {
    app.loading_repos = false;
    match result {
        Ok(repos) => {
            app.repos = repos;
        }
        Err(e) => {
            info!("Repository fetch failed: {}", e);
            app.not_found = None;
            app.error = Some(e.user_message());
            app.repos.clear();
        }
    }
}
