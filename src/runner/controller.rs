//! Run controller: owns the single in-flight run
//!
//! Each run executes on its own worker thread. Starting a run first cancels
//! and joins the previous worker, so two runs never overlap. Callers observe
//! progress through [`RunController::view`] or a [`RunEvent`] subscription.

use super::state::{ProgramError, ProgramResult, RunEvent, RunState, RunView};
use crate::config::{ConfigError, EngineConfig};
use crate::interpreter::{CancelToken, Engine, InputSource, QueuedInput};
use crate::parser::validate_with;
use parking_lot::Mutex;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info, warn};

/// State shared between the controller and its worker
#[derive(Default)]
struct Shared {
    view: Mutex<RunView>,
    subscribers: Mutex<Vec<Sender<RunEvent>>>,
}

impl Shared {
    fn publish(&self, event: RunEvent) {
        self.subscribers
            .lock()
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn begin(&self, run_id: u64, source: &str) {
        let mut view = self.view.lock();
        *view = RunView {
            run_id,
            state: RunState::Parsing,
            source: source.to_string(),
            result: ProgramResult::default(),
        };
        self.publish(RunEvent::StateChanged {
            run_id,
            state: RunState::Parsing,
        });
    }

    /// Move to a non-terminal state; ignored if `run_id` is no longer current
    /// or the run already stopped
    fn transition(&self, run_id: u64, state: RunState) {
        let mut view = self.view.lock();
        if view.run_id != run_id || !view.state.is_active() {
            return;
        }
        debug!(run_id, from = %view.state, to = %state, "state transition");
        view.state = state;
        self.publish(RunEvent::StateChanged { run_id, state });
    }

    fn finish(&self, run_id: u64, state: RunState, result: ProgramResult) {
        let mut view = self.view.lock();
        if view.run_id != run_id || !view.state.is_active() {
            return;
        }
        info!(run_id, state = %state, steps = result.stats.steps, "run finished");
        view.state = state;
        view.result = result.clone();
        self.publish(RunEvent::Finished {
            run_id,
            state,
            result,
        });
    }

    /// Mark the run interrupted unless the worker already reached a terminal state
    fn interrupt(&self, run_id: u64) {
        let mut view = self.view.lock();
        if view.run_id != run_id || !view.state.is_active() {
            return;
        }
        view.state = RunState::Interrupted;
        self.publish(RunEvent::Finished {
            run_id,
            state: RunState::Interrupted,
            result: view.result.clone(),
        });
    }
}

/// Handle to the worker executing one run
struct RunHandle {
    run_id: u64,
    cancel: CancelToken,
    thread: JoinHandle<()>,
}

impl RunHandle {
    fn join(self) {
        if self.thread.join().is_err() {
            warn!(run_id = self.run_id, "run worker terminated abnormally");
        }
    }
}

pub struct RunController {
    config: EngineConfig,
    shared: Arc<Shared>,
    current: Option<RunHandle>,
    next_run_id: u64,
}

impl RunController {
    /// Create an idle controller; `config` is checked once here so workers
    /// never see an invalid one
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(RunController::from_validated(config))
    }

    fn from_validated(config: EngineConfig) -> Self {
        RunController {
            config,
            shared: Arc::new(Shared::default()),
            current: None,
            next_run_id: 0,
        }
    }

    pub fn state(&self) -> RunState {
        self.shared.view.lock().state
    }

    pub fn result(&self) -> ProgramResult {
        self.shared.view.lock().result.clone()
    }

    pub fn view(&self) -> RunView {
        self.shared.view.lock().clone()
    }

    /// Receive every event published from now on
    pub fn subscribe(&self) -> Receiver<RunEvent> {
        let (tx, rx) = mpsc::channel();
        self.shared.subscribers.lock().push(tx);
        rx
    }

    pub fn start_run(&mut self, source: &str) {
        self.start_run_with_input(source, "");
    }

    /// Start a run whose `,` instructions read from `input`
    pub fn start_run_with_input(&mut self, source: &str, input: &str) {
        self.start_run_with_input_source(source, QueuedInput::new(input));
    }

    /// Start a run whose `,` instructions read from `input`.
    ///
    /// Any previous run is cancelled and joined before shared state is reset.
    pub fn start_run_with_input_source(
        &mut self,
        source: &str,
        input: impl InputSource + 'static,
    ) {
        if let Some(previous) = self.current.take() {
            debug!(run_id = previous.run_id, "cancelling previous run");
            previous.cancel.cancel();
            let previous_id = previous.run_id;
            previous.join();
            self.shared.interrupt(previous_id);
        }

        self.next_run_id += 1;
        let run_id = self.next_run_id;
        info!(run_id, len = source.len(), "starting run");
        self.shared.begin(run_id, source);

        let cancel = CancelToken::new();
        let worker = Worker {
            run_id,
            shared: Arc::clone(&self.shared),
            config: self.config.clone(),
            source: source.to_string(),
            input: Box::new(input),
            cancel: cancel.clone(),
        };

        let spawned = thread::Builder::new()
            .name(format!("tapetty-run-{}", run_id))
            .spawn(move || worker.run());

        match spawned {
            Ok(thread) => {
                self.current = Some(RunHandle {
                    run_id,
                    cancel,
                    thread,
                });
            }
            Err(e) => {
                error!(run_id, error = %e, "failed to spawn run worker");
                self.shared.finish(
                    run_id,
                    RunState::Error,
                    ProgramResult::from_errors(vec![ProgramError::Unknown(e.to_string())]),
                );
            }
        }
    }

    /// Cancel the in-flight run. No-op unless the state is Parsing or Running.
    pub fn request_cancel(&mut self) {
        if !self.state().is_active() {
            debug!(state = %self.state(), "cancel ignored");
            return;
        }

        if let Some(handle) = self.current.take() {
            info!(run_id = handle.run_id, "cancelling run");
            handle.cancel.cancel();
            let run_id = handle.run_id;
            handle.join();
            self.shared.interrupt(run_id);
        }
    }

    /// Block until the in-flight run, if any, has stopped
    pub fn wait(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.join();
        }
    }
}

impl Default for RunController {
    fn default() -> Self {
        Self::from_validated(EngineConfig::default())
    }
}

impl Drop for RunController {
    fn drop(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.cancel.cancel();
            handle.join();
        }
    }
}

/// Everything a worker thread needs, moved into it at spawn time
struct Worker {
    run_id: u64,
    shared: Arc<Shared>,
    config: EngineConfig,
    source: String,
    input: Box<dyn InputSource>,
    cancel: CancelToken,
}

impl Worker {
    fn run(self) {
        let shared = Arc::clone(&self.shared);
        let run_id = self.run_id;
        let outcome = panic::catch_unwind(AssertUnwindSafe(move || self.parse_and_execute()));
        if let Err(payload) = outcome {
            let message = panic_message(payload.as_ref());
            error!(run_id, %message, "run worker panicked");
            shared.finish(
                run_id,
                RunState::Error,
                ProgramResult::from_errors(vec![ProgramError::Unknown(message)]),
            );
        }
    }

    fn parse_and_execute(self) {
        let validation = validate_with(&self.source, self.config.policy);

        if self.cancel.is_cancelled() {
            self.shared
                .finish(self.run_id, RunState::Interrupted, ProgramResult::default());
            return;
        }

        if !validation.success {
            self.shared.finish(
                self.run_id,
                RunState::Error,
                ProgramResult::from_parser_errors(validation.errors),
            );
            return;
        }

        self.shared.transition(self.run_id, RunState::Running);

        let execution = Engine::from_validated(self.config)
            .with_input(self.input)
            .with_cancel(self.cancel.clone())
            .run(&validation.tokens);

        let state = if execution.interrupted {
            RunState::Interrupted
        } else if execution.success {
            RunState::Done
        } else {
            RunState::Error
        };

        self.shared
            .finish(self.run_id, state, ProgramResult::from(execution));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown error".to_string()
    }
}
