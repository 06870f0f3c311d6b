// Execution engine for the tape interpreter

use crate::config::{ConfigError, EngineConfig};
use crate::interpreter::cancel::CancelToken;
use crate::interpreter::errors::InterpreterError;
use crate::interpreter::input::{InputSource, NoInput};
use crate::memory::tape::Tape;
use crate::parser::Token;
use crate::snapshot::{SnapshotLog, SnapshotRecord};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Everything a finished (or stopped) run produced.
///
/// Partial data is kept when a run overflows or is interrupted.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// `true` only when the instruction pointer ran off the end of the program
    pub success: bool,
    pub output: String,
    pub errors: Vec<InterpreterError>,
    pub steps: u64,
    pub elapsed: Duration,
    pub snapshots: Vec<SnapshotRecord>,
    /// Set when the run stopped because its cancel token fired
    pub interrupted: bool,
    /// Snapshots dropped from the front of `snapshots` to stay within capacity
    pub snapshots_evicted: usize,
    /// Final tape state
    pub tape: Tape,
}

/// Run `tokens` with the default configuration and no input.
pub fn execute(tokens: &[Token]) -> ExecutionResult {
    Engine::default().run(tokens)
}

/// Interprets validated token sequences.
///
/// An engine owns the input source and cancel token for the runs it
/// performs; every call to [`Engine::run`] starts from a fresh tape.
pub struct Engine {
    config: EngineConfig,
    input: Box<dyn InputSource>,
    cancel: CancelToken,
}

impl Engine {
    /// Build an engine, rejecting configurations the tape cannot run with
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Engine::from_validated(config))
    }

    /// Callers must have run [`EngineConfig::validate`] on `config`
    pub(crate) fn from_validated(config: EngineConfig) -> Self {
        Engine {
            config,
            input: Box::new(NoInput),
            cancel: CancelToken::new(),
        }
    }

    pub fn with_input(mut self, input: impl InputSource + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Execute `tokens` until the program ends, the step budget runs out or
    /// cancellation is observed.
    pub fn run(&mut self, tokens: &[Token]) -> ExecutionResult {
        let mut machine = Machine::new(&self.config);
        let yield_interval = self.config.yield_interval.max(1);
        let mut remaining = self.config.step_budget;
        let mut errors = Vec::new();
        let mut interrupted = false;
        let mut started: Option<Instant> = None;

        info!(
            tokens = tokens.len(),
            budget = self.config.step_budget,
            "starting execution"
        );

        while let Some(&token) = tokens.get(machine.ip) {
            if remaining == 0 {
                warn!(position = machine.ip, steps = machine.steps, "step budget exhausted");
                errors.push(InterpreterError::steps_overflow(machine.ip, token));
                break;
            }

            if machine.steps % yield_interval == 0 {
                thread::yield_now();
                if self.cancel.is_cancelled() {
                    debug!(steps = machine.steps, "cancellation observed");
                    interrupted = true;
                    break;
                }
            }

            started.get_or_insert_with(Instant::now);

            if let Err(err) = machine.step(token, &mut *self.input) {
                warn!(position = err.position, kind = %err.kind, "execution fault");
                errors.push(err);
                break;
            }
            remaining -= 1;
        }

        let snapshots_evicted = machine.snapshots.evicted();
        let elapsed = started.map(|t| t.elapsed()).unwrap_or_default();
        let success = errors.is_empty() && !interrupted;

        info!(
            steps = machine.steps,
            elapsed_ms = elapsed.as_millis() as u64,
            success,
            interrupted,
            "execution finished"
        );

        ExecutionResult {
            success,
            output: machine.output,
            errors,
            steps: machine.steps,
            elapsed,
            snapshots: machine.snapshots.into_vec(),
            interrupted,
            snapshots_evicted,
            tape: machine.tape,
        }
    }
}

/// Per-run mutable state, discarded when the run ends
struct Machine {
    ip: usize,
    tape: Tape,
    output: String,
    snapshots: SnapshotLog,
    steps: u64,
}

impl Machine {
    fn new(config: &EngineConfig) -> Self {
        Machine {
            ip: 0,
            tape: Tape::new(config.tape_len, config.address_space),
            output: String::new(),
            snapshots: SnapshotLog::new(config.snapshot_capacity),
            steps: 0,
        }
    }

    /// Apply one instruction and advance the instruction pointer
    fn step(&mut self, token: Token, input: &mut dyn InputSource) -> Result<(), InterpreterError> {
        match token {
            Token::Increment => self.tape.increment(),
            Token::Decrement => self.tape.decrement(),
            Token::ShiftRight => self.tape.shift_right(),
            Token::ShiftLeft => self.tape.shift_left(),
            Token::OpenLoop { end, .. } => {
                if self.tape.get() == 0 {
                    self.ip = end.ok_or_else(|| InterpreterError::unmatched_loop(self.ip, token))?;
                }
            }
            Token::CloseLoop { start, .. } => {
                if self.tape.get() != 0 {
                    self.ip =
                        start.ok_or_else(|| InterpreterError::unmatched_loop(self.ip, token))?;
                }
            }
            Token::Print => self.output.push(char::from(self.tape.get())),
            Token::Prompt => {
                if let Some(c) = input.next_char() {
                    self.tape.set((u32::from(c) & 0xff) as u8);
                }
            }
            Token::Debug { .. } => {
                self.snapshots
                    .push(SnapshotRecord::new(self.tape.address(), self.tape.get()));
            }
            Token::Unknown => {}
        }

        self.ip += 1;
        self.steps += 1;
        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::from_validated(EngineConfig::default())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::parser::validate;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn random_programs_respect_step_budget(
            source in "[+\\-<>\\[\\]#.]{0,64}",
            budget in 1u64..2000
        ) {
            // unbalanced sequences are executed too; they stop on an unmatched loop
            let validation = validate(&source);
            let config = EngineConfig::default().with_step_budget(budget);
            let result = Engine::new(config).unwrap().run(&validation.tokens);
            prop_assert!(result.steps <= budget);
            prop_assert!(result.snapshots.len() <= 512);
            prop_assert_eq!(result.success, result.errors.is_empty());
        }
    }
}
