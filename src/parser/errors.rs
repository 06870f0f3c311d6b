//! Validation error records

use thiserror::Error;

/// A lexical or structural problem found while validating source text.
///
/// `position` is `None` for errors that do not point at a single character,
/// such as the global bracket-count mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.description())]
pub struct ParserError {
    pub kind: String,
    pub position: Option<usize>,
    pub char: char,
}

impl ParserError {
    pub fn unknown_token(position: usize, char: char) -> Self {
        ParserError {
            kind: "Unknown token".to_string(),
            position: Some(position),
            char,
        }
    }

    /// `missing` is the bracket that has no partner, `count` how many of them
    pub fn missing_bracket(count: usize, missing: char) -> Self {
        ParserError {
            kind: format!("{} x '{}' missing", count, missing),
            position: None,
            char: missing,
        }
    }

    pub fn is_structural(&self) -> bool {
        self.position.is_none()
    }

    pub fn description(&self) -> String {
        match self.position {
            Some(position) => format!("--> {} at [{}] <{}>", self.kind, position, self.char),
            None => format!("--> {}", self.kind),
        }
    }
}
