//! Console rendering built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! - **[`memory_view`]**: the stack frame pane shown after each swap with
//!   `--memory-view`, rendered off-screen and written line by line
//! - **[`theme`]**: centralized color palette used by the pane

pub mod memory_view;
pub mod theme;
