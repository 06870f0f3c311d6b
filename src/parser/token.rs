//! Instruction tokens produced by the validator
//!
//! A program is a flat `Vec<Token>` with exactly one token per source
//! character, so a token's index doubles as its source position.

use std::fmt;

/// One instruction of the tape language.
///
/// Loop tokens carry absolute indices into the token sequence. A side is
/// `None` when the bracket had no partner, which only happens in sequences
/// that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Increment,
    Decrement,
    ShiftRight,
    ShiftLeft,
    Print,
    Prompt,
    OpenLoop {
        start: usize,
        end: Option<usize>,
    },
    CloseLoop {
        start: Option<usize>,
        end: usize,
    },
    /// Inert marker that records a tape snapshot when executed
    Debug {
        char: char,
    },
    Unknown,
}

impl Token {
    /// Map an executable control character to its token.
    ///
    /// Brackets are not handled here since they need the pending-loop stack.
    pub fn from_control(c: char) -> Option<Token> {
        match c {
            '+' => Some(Token::Increment),
            '-' => Some(Token::Decrement),
            '>' => Some(Token::ShiftRight),
            '<' => Some(Token::ShiftLeft),
            '.' => Some(Token::Print),
            ',' => Some(Token::Prompt),
            _ => None,
        }
    }

    /// Source character this token was read from, when it is recoverable
    pub fn symbol(&self) -> Option<char> {
        match self {
            Token::Increment => Some('+'),
            Token::Decrement => Some('-'),
            Token::ShiftRight => Some('>'),
            Token::ShiftLeft => Some('<'),
            Token::Print => Some('.'),
            Token::Prompt => Some(','),
            Token::OpenLoop { .. } => Some('['),
            Token::CloseLoop { .. } => Some(']'),
            Token::Debug { char } => Some(*char),
            Token::Unknown => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Increment => write!(f, "Increment"),
            Token::Decrement => write!(f, "Decrement"),
            Token::ShiftRight => write!(f, "ShiftRight"),
            Token::ShiftLeft => write!(f, "ShiftLeft"),
            Token::Print => write!(f, "Print"),
            Token::Prompt => write!(f, "Prompt"),
            Token::OpenLoop { start, end } => {
                write!(f, "OpenLoop({}, {})", start, fmt_target(*end))
            }
            Token::CloseLoop { start, end } => {
                write!(f, "CloseLoop({}, {})", fmt_target(*start), end)
            }
            Token::Debug { char } => write!(f, "Debug({})", char),
            Token::Unknown => write!(f, "Unknown"),
        }
    }
}

fn fmt_target(target: Option<usize>) -> String {
    match target {
        Some(index) => index.to_string(),
        None => "-1".to_string(),
    }
}
