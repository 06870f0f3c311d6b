// Run controller tests: state transitions, cancellation and run replacement

use std::sync::mpsc::Receiver;
use std::thread;
use std::time::Duration;

use tapetty::config::EngineConfig;
use tapetty::interpreter::InputSource;
use tapetty::runner::{ProgramError, RunController, RunEvent, RunState};

const TIMEOUT: Duration = Duration::from_secs(30);

/// Collect events until one with `state` arrives
fn collect_until(rx: &Receiver<RunEvent>, state: RunState) -> Vec<RunEvent> {
    let mut events = Vec::new();
    loop {
        let event = rx.recv_timeout(TIMEOUT).expect("timed out waiting for event");
        let done = event.state() == state;
        events.push(event);
        if done {
            return events;
        }
    }
}

fn states(events: &[RunEvent]) -> Vec<RunState> {
    events.iter().map(|e| e.state()).collect()
}

#[test]
fn test_valid_program_reaches_done() {
    let mut controller = RunController::default();
    let rx = controller.subscribe();
    controller.start_run("++++++++[>++++++++<-]>+.");
    controller.wait();

    let events = collect_until(&rx, RunState::Done);
    assert_eq!(
        states(&events),
        vec![RunState::Parsing, RunState::Running, RunState::Done]
    );
    assert_eq!(controller.state(), RunState::Done);
    assert_eq!(controller.result().output, "A");
    assert!(controller.result().stats.steps > 0);
}

#[test]
fn test_invalid_program_skips_running() {
    let mut controller = RunController::default();
    let rx = controller.subscribe();
    controller.start_run("[[");
    controller.wait();

    let events = collect_until(&rx, RunState::Error);
    assert_eq!(states(&events), vec![RunState::Parsing, RunState::Error]);

    let result = controller.result();
    assert_eq!(result.errors.len(), 1);
    assert!(matches!(&result.errors[0], ProgramError::Parser(e) if e.kind == "2 x ']' missing"));
    assert_eq!(result.stats.steps, 0);
}

#[test]
fn test_overflow_reported_as_error_with_partial_result() {
    let config = EngineConfig::default().with_step_budget(1_000);
    let mut controller = RunController::new(config).expect("valid config");
    controller.start_run("+.[]");
    controller.wait();

    assert_eq!(controller.state(), RunState::Error);
    let result = controller.result();
    assert_eq!(result.output, "\u{1}");
    assert_eq!(result.stats.steps, 1_000);
    assert!(matches!(&result.errors[0], ProgramError::Interpreter(e) if e.is_overflow()));
}

#[test]
fn test_cancel_outside_run_is_noop() {
    let mut controller = RunController::default();
    controller.request_cancel();
    assert_eq!(controller.state(), RunState::Idle);

    controller.start_run("+");
    controller.wait();
    assert_eq!(controller.state(), RunState::Done);
    controller.request_cancel();
    assert_eq!(controller.state(), RunState::Done);
}

#[test]
fn test_cancel_running_program() {
    let mut controller = RunController::default();
    let rx = controller.subscribe();
    controller.start_run("+[]");
    collect_until(&rx, RunState::Running);

    controller.request_cancel();
    assert_eq!(controller.state(), RunState::Interrupted);

    // nothing mutates the result once the worker is joined
    let before = controller.result();
    thread::sleep(Duration::from_millis(50));
    let after = controller.result();
    assert_eq!(before.stats, after.stats);
    assert!(after.errors.is_empty());
}

#[test]
fn test_new_run_replaces_running_one() {
    let mut controller = RunController::default();
    let rx = controller.subscribe();
    controller.start_run("+[]");
    collect_until(&rx, RunState::Running);

    controller.start_run("+++.");
    controller.wait();

    let events = collect_until(&rx, RunState::Done);
    let first_run_end = events
        .iter()
        .position(|e| e.run_id() == 1 && e.state() == RunState::Interrupted)
        .expect("first run interrupted");
    let second_run_start = events
        .iter()
        .position(|e| e.run_id() == 2 && e.state() == RunState::Parsing)
        .expect("second run started");
    assert!(first_run_end < second_run_start);

    assert_eq!(controller.state(), RunState::Done);
    assert_eq!(controller.result().output, "\u{3}");
}

#[test]
fn test_input_is_fed_to_prompts() {
    let mut controller = RunController::default();
    controller.start_run_with_input(",+.", "a");
    controller.wait();
    assert_eq!(controller.result().output, "b");
}

/// Input source whose device fails on first use
struct BrokenInput;

impl InputSource for BrokenInput {
    fn next_char(&mut self) -> Option<char> {
        panic!("input device unplugged");
    }
}

#[test]
fn test_worker_fault_reported_as_unknown_error() {
    let mut controller = RunController::default();
    let rx = controller.subscribe();
    controller.start_run_with_input_source("+,.", BrokenInput);
    controller.wait();

    let events = collect_until(&rx, RunState::Error);
    assert_eq!(
        states(&events),
        vec![RunState::Parsing, RunState::Running, RunState::Error]
    );
    assert_eq!(controller.state(), RunState::Error);
    assert_eq!(
        controller.result().errors,
        vec![ProgramError::Unknown("input device unplugged".to_string())]
    );
}

#[test]
fn test_cancel_while_parsing_discards_result() {
    let mut controller = RunController::default();
    let rx = controller.subscribe();
    // long enough that validation is still in progress when the cancel lands
    let source = "+".repeat(2_000_000);
    controller.start_run(&source);
    controller.request_cancel();

    let events = collect_until(&rx, RunState::Interrupted);
    assert_eq!(states(&events), vec![RunState::Parsing, RunState::Interrupted]);
    assert_eq!(controller.state(), RunState::Interrupted);

    let result = controller.result();
    assert!(result.errors.is_empty());
    assert!(result.output.is_empty());
    assert_eq!(result.stats.steps, 0);
    assert!(result.tape.is_none());
}
