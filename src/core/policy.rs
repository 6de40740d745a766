//! # Message Policy
//!
//! Every user-facing string the controller produces, kept in one place so the
//! wording can be tested without rendering anything.
//!
//! The rate-limit check is a plain substring heuristic on the error text.
//! GitHub reports an exhausted quota as a 403 with a message such as
//! `API rate limit exceeded for 203.0.113.7.`, and that text is the only
//! signal we look at.

/// Static note appended to errors that look like an exhausted rate limit.
pub const RATE_LIMIT_NOTE: &str = "You have exceeded the API rate limit (60 requests/hour without authentication). Please wait or use a Personal Access Token.";

/// Shown while nothing has been searched yet.
pub const IDLE_PROMPT: &str = "Start by searching for a GitHub user!";

/// Repository panel text for a user with no repositories.
pub const NO_REPOSITORIES: &str = "No repositories found for this user.";

const RATE_LIMIT_MARKER: &str = "rate limit exceeded";

/// True if `text` looks like GitHub's rate-limit error (case-sensitive).
pub fn is_rate_limit_message(text: &str) -> bool {
    text.contains(RATE_LIMIT_MARKER)
}

/// `User "<term>" not found on GitHub.`
pub fn not_found_message(term: &str) -> String {
    format!("User \"{term}\" not found on GitHub.")
}

/// The error line as displayed.
pub fn error_line(message: &str) -> String {
    format!("Error: {message}")
}
