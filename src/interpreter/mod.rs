//! Tape interpreter execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: Main interpreter loop over a validated token sequence
//! - [`errors`]: Runtime error types
//! - [`input`]: Character sources for the `,` instruction
//! - [`cancel`]: Cooperative cancellation token
//! - [`constants`]: Tape geometry and default limits
//!
//! # Execution Model
//!
//! The engine executes one token per step against a fresh tape. Every
//! `yield_interval` steps it yields the thread and polls its cancel token, so
//! a long or endless program can be stopped without leaving an instruction
//! half-applied. A step budget bounds every run.

pub mod cancel;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod input;

pub use cancel::CancelToken;
pub use engine::{execute, Engine, ExecutionResult};
pub use errors::InterpreterError;
pub use input::{InputSource, NoInput, QueuedInput};
