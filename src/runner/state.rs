//! Observable run state and results
//!
//! These are the values the controller publishes to its callers: the
//! current [`RunState`], the last [`ProgramResult`] and the [`RunEvent`]s
//! emitted on every transition.

use crate::interpreter::{ExecutionResult, InterpreterError};
use crate::memory::tape::Tape;
use crate::parser::ParserError;
use crate::snapshot::SnapshotRecord;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Lifecycle of a single run.
///
/// `Error`, `Interrupted` and `Done` are terminal; a new run starts again at
/// `Parsing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Parsing,
    Running,
    Error,
    Interrupted,
    Done,
}

impl RunState {
    /// Whether a run is in flight and can be cancelled
    pub fn is_active(self) -> bool {
        matches!(self, RunState::Parsing | RunState::Running)
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunState::Error | RunState::Interrupted | RunState::Done
        )
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunState::Idle => "Idle",
            RunState::Parsing => "Parsing",
            RunState::Running => "Running",
            RunState::Error => "Error",
            RunState::Interrupted => "Interrupted",
            RunState::Done => "Done",
        };
        f.write_str(label)
    }
}

/// Any error surfaced to the caller, tagged by the phase that raised it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramError {
    #[error(transparent)]
    Parser(#[from] ParserError),

    #[error(transparent)]
    Interpreter(#[from] InterpreterError),

    /// Unexpected fault (worker panic, failed thread spawn)
    #[error("{0}")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub steps: u64,
    pub elapsed: Duration,
}

/// Last result published by the controller
#[derive(Debug, Clone, Default)]
pub struct ProgramResult {
    pub output: String,
    pub stats: Stats,
    pub errors: Vec<ProgramError>,
    pub snapshots: Vec<SnapshotRecord>,
    /// Oldest snapshots dropped once the log was full
    pub snapshots_evicted: usize,
    /// Final tape, present once execution has started
    pub tape: Option<Tape>,
}

impl ProgramResult {
    pub fn from_errors(errors: Vec<ProgramError>) -> Self {
        ProgramResult {
            errors,
            ..ProgramResult::default()
        }
    }

    pub fn from_parser_errors(errors: Vec<ParserError>) -> Self {
        Self::from_errors(errors.into_iter().map(ProgramError::from).collect())
    }

    /// One line per error, as shown to the user
    pub fn error_lines(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }
}

impl From<ExecutionResult> for ProgramResult {
    fn from(result: ExecutionResult) -> Self {
        ProgramResult {
            output: result.output,
            stats: Stats {
                steps: result.steps,
                elapsed: result.elapsed,
            },
            errors: result.errors.into_iter().map(ProgramError::from).collect(),
            snapshots: result.snapshots,
            snapshots_evicted: result.snapshots_evicted,
            tape: Some(result.tape),
        }
    }
}

/// Notification sent to subscribers; `run_id` tells runs apart
#[derive(Debug, Clone)]
pub enum RunEvent {
    StateChanged { run_id: u64, state: RunState },
    Finished {
        run_id: u64,
        state: RunState,
        result: ProgramResult,
    },
}

impl RunEvent {
    pub fn state(&self) -> RunState {
        match self {
            RunEvent::StateChanged { state, .. } | RunEvent::Finished { state, .. } => *state,
        }
    }

    pub fn run_id(&self) -> u64 {
        match self {
            RunEvent::StateChanged { run_id, .. } | RunEvent::Finished { run_id, .. } => *run_id,
        }
    }
}

/// Point-in-time copy of everything the controller exposes
#[derive(Debug, Clone, Default)]
pub struct RunView {
    pub run_id: u64,
    pub state: RunState,
    pub source: String,
    pub result: ProgramResult,
}
