//! # Core Application Logic
//!
//! The search/fetch controller. It knows nothing about any specific UI
//! technology and performs no I/O itself.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (view data)    │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                    ┌───────────┴─────────────┐
//!                    ▼                         ▼
//!             ┌────────────┐            ┌────────────┐
//!             │    TUI     │            │   task     │
//!             │  Adapter   │──spawns───▶│ perform()  │──▶ GithubApi
//!             │ (ratatui)  │◀──Action───│            │
//!             └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all view state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`policy`]: User-facing message wording and the rate-limit heuristic
//! - [`task`]: Turns an `Effect` into a request and its completion `Action`
//! - [`config`]: Config file, env and CLI resolution

pub mod action;
pub mod config;
pub mod policy;
pub mod state;
pub mod task;
