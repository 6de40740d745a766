//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Created each frame from the data they display:
//! - `TitleBar`: app name, activity spinner, API host
//! - `Notice`: error / not found / searching / idle message
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `SearchBox`: single-line query input, emits `SearchEvent::Submit`
//! - `UserList`: scrollable results with the expanded repository panel;
//!   its scroll and highlight live in `UserListState`
//!
//! Components receive external data as props, never the whole `App`, so
//! each file can be tested on its own with a `TestBackend`.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status line)
//! ├── search_box.rs    (Query input)
//! ├── notice.rs        (Message area)
//! └── user_list.rs     (Results + repositories)
//! ```

pub mod notice;
pub mod search_box;
pub mod title_bar;
pub mod user_list;

pub use notice::Notice;
pub use search_box::{SearchBox, SearchEvent};
pub use title_bar::TitleBar;
pub use user_list::{Row, UserList, UserListState, selectable_rows};
