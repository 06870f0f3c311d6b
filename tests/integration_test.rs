// Integration tests for the validate → execute pipeline

use tapetty::config::EngineConfig;
use tapetty::interpreter::{execute, Engine, QueuedInput};
use tapetty::parser::{validate, validate_with, Token, ValidationPolicy};
use tapetty::presets;

#[test]
fn test_hello_world_preset() {
    let preset = presets::find("hello").expect("hello preset exists");
    let validation = validate(preset.source);
    assert!(validation.success, "Validation failed: {:?}", validation.errors);

    let result = execute(&validation.tokens);
    assert!(result.success, "Execution failed: {:?}", result.errors);
    assert_eq!(result.output, "Hello World!\n");
}

#[test]
fn test_alphabet_preset() {
    let preset = presets::find("alphabet").expect("alphabet preset exists");
    let validation = validate(preset.source);
    let result = execute(&validation.tokens);
    assert_eq!(result.output, "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
}

#[test]
fn test_echo_preset_with_input() {
    let preset = presets::find("echo").expect("echo preset exists");
    let validation = validate(preset.source);
    let result = Engine::new(EngineConfig::default())
        .expect("default config is valid")
        .with_input(QueuedInput::new("abc"))
        .run(&validation.tokens);
    assert_eq!(result.output, "abc");
}

#[test]
fn test_snapshot_preset_records_each_marker() {
    let preset = presets::find("snapshots").expect("snapshots preset exists");
    let validation = validate(preset.source);
    let result = execute(&validation.tokens);
    let recorded: Vec<(usize, u8)> = result
        .snapshots
        .iter()
        .map(|s| (s.address, s.value))
        .collect();
    assert_eq!(recorded, vec![(0, 1), (1, 2), (2, 3), (0, 0)]);
}

#[test]
fn test_validation_errors_block_nothing_but_report_all() {
    let validation = validate("+@[x");
    assert!(!validation.success);
    assert_eq!(validation.tokens.len(), 4);
    let lines: Vec<String> = validation.errors.iter().map(|e| e.to_string()).collect();
    assert_eq!(
        lines,
        vec![
            "--> Unknown token at [1] <@>",
            "--> Unknown token at [3] <x>",
            "--> 1 x ']' missing",
        ]
    );
}

#[test]
fn test_strict_policy_differs_only_on_markers() {
    let source = "+[-#]";
    assert!(validate_with(source, ValidationPolicy::Permissive).success);
    let strict = validate_with(source, ValidationPolicy::Strict);
    assert!(!strict.success);
    assert_eq!(strict.errors.len(), 1);
    assert_eq!(strict.errors[0].position, Some(3));
}

#[test]
fn test_loop_pairs_point_at_each_other() {
    let validation = validate("+[>[-]<-]");
    for (i, token) in validation.tokens.iter().enumerate() {
        if let Token::OpenLoop { end: Some(e), .. } = *token {
            assert_eq!(
                validation.tokens[e],
                Token::CloseLoop {
                    start: Some(i),
                    end: e
                }
            );
        }
    }
}

#[test]
fn test_infinite_loop_stops_at_budget() {
    let validation = validate("+[]");
    let config = EngineConfig::default().with_step_budget(50_000);
    let result = Engine::new(config)
        .expect("valid config")
        .run(&validation.tokens);
    assert!(!result.success);
    assert_eq!(result.steps, 50_000);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(
        result.errors[0].to_string(),
        "--> Steps overflow at [2] <CloseLoop(1, 2)>"
    );
}

#[test]
fn test_addresses_past_tape_alias_onto_it() {
    // 256 shifts right lands on address 256, which shares cell 0
    let source = format!("+{}.", ">".repeat(256));
    let validation = validate(&source);
    let result = execute(&validation.tokens);
    assert_eq!(result.tape.address(), 256);
    assert_eq!(result.output, "\u{1}");
}
