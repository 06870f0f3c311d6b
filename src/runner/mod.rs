//! Run orchestration
//!
//! - [`controller`]: [`RunController`], which sequences validation and
//!   execution on a worker thread and handles cancellation
//! - [`state`]: [`RunState`], [`ProgramResult`] and the events published to
//!   observers
//!
//! ```text
//! Idle → Parsing → Running → Done
//!           │         ├────→ Error
//!           │         └────→ Interrupted
//!           ├──────────────→ Error
//!           └──────────────→ Interrupted
//! ```

pub mod controller;
pub mod state;

pub use controller::RunController;
pub use state::{ProgramError, ProgramResult, RunEvent, RunState, RunView, Stats};
