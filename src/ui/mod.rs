//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** — application state, keyboard event loop, pane focus, edit modes
//! - **[`panes`]** — stateless render functions for each visible pane (code,
//!   input, output, debug snapshots, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The UI never executes programs itself. It drives a
//! [`RunController`](crate::runner::RunController) and redraws from its
//! published view, so the event loop stays responsive while a program runs.

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
