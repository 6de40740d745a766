//! Runs an [`Effect`] against a [`GithubApi`] and produces the completion
//! action. The caller decides where the future runs and how the action gets
//! back to `update()`.

use std::sync::Arc;

use log::debug;

use crate::core::action::{Action, Effect};
use crate::github::GithubApi;

/// Performs the request described by `effect`.
/// Returns `None` for effects that involve no I/O.
pub async fn perform(api: Arc<dyn GithubApi>, effect: Effect) -> Option<Action> {
    match effect {
        Effect::SearchUsers { seq, term } => {
            debug!("[{}] search seq={} term={:?}", api.name(), seq, term);
            let result = api.search_users(&term).await;
            Some(Action::UsersLoaded { seq, term, result })
        }
        Effect::FetchRepositories { seq, user } => {
            debug!("[{}] repos seq={} user={}", api.name(), seq, user.login);
            let result = api.list_repositories(&user).await;
            Some(Action::ReposLoaded {
                seq,
                user_id: user.id,
                result,
            })
        }
        Effect::None | Effect::Quit => None,
    }
}
