//! Host state: panes, page switching and search input.
//!
//! Everything here is driven by the TUI shell but testable without a terminal.

pub mod pane;
pub mod search_input;
pub mod workspace;

// Re-export for convenience
pub use pane::PagePane;
pub use search_input::SearchState;
pub use workspace::{FocusPane, Workspace};
