//! Runtime error types for the tape interpreter
//!
//! This module defines [`InterpreterError`], raised while executing a token
//! sequence (as opposed to validation errors, see
//! [`crate::parser::ParserError`]). Execution stops at the first one.

use crate::parser::Token;
use thiserror::Error;

pub const STEPS_OVERFLOW: &str = "Steps overflow";
pub const UNMATCHED_LOOP: &str = "Unmatched loop";

/// A fault that stopped execution at `position`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("--> {kind} at [{position}] <{token}>")]
pub struct InterpreterError {
    pub kind: String,
    pub position: usize,
    pub token: Token,
}

impl InterpreterError {
    pub fn steps_overflow(position: usize, token: Token) -> Self {
        InterpreterError {
            kind: STEPS_OVERFLOW.to_string(),
            position,
            token,
        }
    }

    /// Loop token without a jump target; only reachable with unvalidated input
    pub fn unmatched_loop(position: usize, token: Token) -> Self {
        InterpreterError {
            kind: UNMATCHED_LOOP.to_string(),
            position,
            token,
        }
    }

    pub fn is_overflow(&self) -> bool {
        self.kind == STEPS_OVERFLOW
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_description() {
        let err = InterpreterError::steps_overflow(2, Token::CloseLoop { start: Some(1), end: 2 });
        assert_eq!(err.to_string(), "--> Steps overflow at [2] <CloseLoop(1, 2)>");
        assert!(err.is_overflow());
    }
}
