//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Program text with per-symbol highlighting and error markers
//! - [`input`]: Text queued for `,` instructions
//! - [`output`]: Printed output, or the error list of a failed run
//! - [`debug`]: Snapshot table filled by debug markers
//! - [`status`]: Status bar with run state and keybindings
//!
//! Each pane exports one stateless `render_*` function; scroll offsets live
//! in [`crate::ui::App`] and are clamped during rendering.

pub mod debug;
pub mod input;
pub mod output;
pub mod source;
pub mod status;

pub use debug::render_debug_pane;
pub use input::render_input_pane;
pub use output::render_output_pane;
pub use source::render_source_pane;
pub use status::render_status_bar;
