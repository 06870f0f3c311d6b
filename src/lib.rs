//! # Introduction
//!
//! tapetty validates and executes programs for a minimal tape machine (the
//! eight classic symbols `+ - > < . , [ ]` plus `$`/`#` debug markers) on a
//! worker thread that can be cancelled at any time, and shows the result in
//! a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Validator → Tokens → Engine → Output + Stats + Snapshots → TUI
//! ```
//!
//! 1. [`parser`] — tokenises the source, resolves loop targets and collects
//!    every lexical and structural error.
//! 2. [`interpreter`] — runs the token sequence against a [`memory::tape::Tape`]
//!    under a step budget, checking a cancel token between steps.
//! 3. [`snapshot`] — bounded ring of tape snapshots recorded by debug markers.
//! 4. [`runner`] — the [`runner::RunController`] that owns the single
//!    in-flight run and publishes its [`runner::RunState`].
//! 5. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Quick start
//!
//! ```
//! use tapetty::parser::validate;
//! use tapetty::interpreter::execute;
//!
//! let validation = validate("++++++++[>++++++++<-]>+.");
//! assert!(validation.success);
//! let result = execute(&validation.tokens);
//! assert_eq!(result.output, "A");
//! ```

pub mod config;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod presets;
pub mod runner;
pub mod snapshot;
pub mod ui;
