pub mod api;
pub mod client;
pub mod types;

pub use api::{ApiError, GithubApi};
pub use client::GithubClient;
pub use types::{RepositorySummary, SearchOutcome, UserSummary};
