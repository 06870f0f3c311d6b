//! Lexer (tokenizer) and validator for tape programs
//!
//! Converts raw source text into a flat [`Token`] stream with one token per
//! character, resolving bracket pairs as it goes. Problems are collected
//! rather than returned early, so a caller sees every error in one pass.

use super::errors::ParserError;
use super::token::Token;
use tracing::debug;

/// Characters accepted by the permissive policy that do nothing but record a
/// snapshot when executed.
pub const DEBUG_MARKERS: [char; 2] = ['$', '#'];

/// How characters outside the executable set are classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// `$` and `#` become [`Token::Debug`]; anything else is an unknown token.
    #[default]
    Permissive,
    /// Only the eight executable symbols are accepted.
    Strict,
}

/// Output of a validation pass.
///
/// `tokens` is always fully populated, including [`Token::Unknown`] entries,
/// so positions reported in `errors` index straight into it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    pub success: bool,
    pub tokens: Vec<Token>,
    pub errors: Vec<ParserError>,
}

/// Validate `source` with the default (permissive) policy.
pub fn validate(source: &str) -> ValidationResult {
    Lexer::new(source).tokenize()
}

pub fn validate_with(source: &str, policy: ValidationPolicy) -> ValidationResult {
    Lexer::new(source).with_policy(policy).tokenize()
}

/// Running bracket totals, compared once the walk is over
#[derive(Debug, Default)]
struct LoopCounter {
    opened: usize,
    closed: usize,
}

impl LoopCounter {
    fn mismatch(&self) -> Option<ParserError> {
        if self.opened > self.closed {
            Some(ParserError::missing_bracket(self.opened - self.closed, ']'))
        } else if self.closed > self.opened {
            Some(ParserError::missing_bracket(self.closed - self.opened, '['))
        } else {
            None
        }
    }
}

pub struct Lexer {
    input: Vec<char>,
    policy: ValidationPolicy,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            input: source.chars().collect(),
            policy: ValidationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Tokenize the whole input and check bracket balance
    pub fn tokenize(&self) -> ValidationResult {
        let mut tokens = Vec::with_capacity(self.input.len());
        let mut errors = Vec::new();
        let mut pending_loops: Vec<usize> = Vec::new();
        let mut counter = LoopCounter::default();

        for (position, &c) in self.input.iter().enumerate() {
            let token = match c {
                '[' => {
                    counter.opened += 1;
                    pending_loops.push(position);
                    Token::OpenLoop {
                        start: position,
                        end: None,
                    }
                }
                ']' => {
                    counter.closed += 1;
                    let start = pending_loops.pop();
                    if let Some(open) = start {
                        if let Some(Token::OpenLoop { end, .. }) = tokens.get_mut(open) {
                            *end = Some(position);
                        }
                    }
                    Token::CloseLoop {
                        start,
                        end: position,
                    }
                }
                _ => match Token::from_control(c) {
                    Some(token) => token,
                    None if self.is_debug_marker(c) => Token::Debug { char: c },
                    None => {
                        errors.push(ParserError::unknown_token(position, c));
                        Token::Unknown
                    }
                },
            };
            tokens.push(token);
        }

        if let Some(err) = counter.mismatch() {
            errors.push(err);
        }

        debug!(
            tokens = tokens.len(),
            errors = errors.len(),
            policy = ?self.policy,
            "validated program"
        );

        ValidationResult {
            success: errors.is_empty(),
            tokens,
            errors,
        }
    }

    fn is_debug_marker(&self, c: char) -> bool {
        match self.policy {
            ValidationPolicy::Permissive => DEBUG_MARKERS.contains(&c),
            ValidationPolicy::Strict => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokens() {
        let result = validate("+-><.,");
        assert!(result.success);
        assert_eq!(
            result.tokens,
            vec![
                Token::Increment,
                Token::Decrement,
                Token::ShiftRight,
                Token::ShiftLeft,
                Token::Print,
                Token::Prompt,
            ]
        );
    }

    #[test]
    fn test_nested_loops_resolve() {
        let result = validate("[[]]");
        assert!(result.success);
        assert_eq!(
            result.tokens[0],
            Token::OpenLoop {
                start: 0,
                end: Some(3)
            }
        );
        assert_eq!(
            result.tokens[1],
            Token::OpenLoop {
                start: 1,
                end: Some(2)
            }
        );
        assert_eq!(
            result.tokens[2],
            Token::CloseLoop {
                start: Some(1),
                end: 2
            }
        );
        assert_eq!(
            result.tokens[3],
            Token::CloseLoop {
                start: Some(0),
                end: 3
            }
        );
    }

    #[test]
    fn test_missing_close_brackets() {
        let result = validate("[[");
        assert!(!result.success);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, "2 x ']' missing");
        assert_eq!(result.errors[0].position, None);
        assert_eq!(result.errors[0].char, ']');
    }

    #[test]
    fn test_missing_open_brackets() {
        let result = validate("]]");
        assert!(!result.success);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, "2 x '[' missing");
        assert_eq!(
            result.tokens[0],
            Token::CloseLoop {
                start: None,
                end: 0
            }
        );
    }

    #[test]
    fn test_unknown_character_keeps_position() {
        let result = validate("+@+");
        assert!(!result.success);
        assert_eq!(result.tokens.len(), 3);
        assert_eq!(result.tokens[1], Token::Unknown);
        assert_eq!(result.errors, vec![ParserError::unknown_token(1, '@')]);
    }

    #[test]
    fn test_every_bad_character_reported() {
        let result = validate("a+b[");
        let kinds: Vec<_> = result.errors.iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["Unknown token", "Unknown token", "1 x ']' missing"]);
    }

    #[test]
    fn test_debug_markers_permissive() {
        let result = validate("+#$");
        assert!(result.success);
        assert_eq!(result.tokens[1], Token::Debug { char: '#' });
        assert_eq!(result.tokens[2], Token::Debug { char: '$' });
    }

    #[test]
    fn test_debug_markers_rejected_when_strict() {
        let result = validate_with("+#", ValidationPolicy::Strict);
        assert!(!result.success);
        assert_eq!(result.tokens[1], Token::Unknown);
        assert_eq!(result.errors[0].position, Some(1));
    }

    #[test]
    fn test_positions_count_characters_not_bytes() {
        let result = validate("é+!");
        assert_eq!(result.tokens.len(), 3);
        assert_eq!(result.errors[0].position, Some(0));
        assert_eq!(result.errors[1].position, Some(2));
    }

    #[test]
    fn test_empty_source() {
        let result = validate("");
        assert!(result.success);
        assert!(result.tokens.is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Balanced programs over the permissive alphabet
    fn balanced_program() -> impl Strategy<Value = String> {
        let leaf = prop::sample::select(vec!['+', '-', '>', '<', '.', ',', '#', '$'])
            .prop_map(|c| c.to_string());
        leaf.prop_recursive(4, 64, 8, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..8).prop_map(|parts| parts.concat()),
                inner.prop_map(|body| format!("[{}]", body)),
            ]
        })
    }

    proptest! {
        #[test]
        fn balanced_programs_validate(source in balanced_program()) {
            let result = validate(&source);
            prop_assert!(result.success);
            prop_assert_eq!(result.tokens.len(), source.chars().count());
        }

        #[test]
        fn loop_pairs_are_bijective(source in balanced_program()) {
            let result = validate(&source);
            for (i, token) in result.tokens.iter().enumerate() {
                if let Token::OpenLoop { start, end } = *token {
                    prop_assert_eq!(start, i);
                    let e = end.expect("balanced program has resolved loops");
                    prop_assert!(e > i);
                    prop_assert_eq!(result.tokens[e], Token::CloseLoop { start: Some(i), end: e });
                }
            }
        }

        #[test]
        fn token_count_matches_any_input(source in ".{0,64}") {
            let result = validate(&source);
            prop_assert_eq!(result.tokens.len(), source.chars().count());
            prop_assert_eq!(result.success, result.errors.is_empty());
        }
    }
}
