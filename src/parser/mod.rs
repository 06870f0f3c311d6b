//! Tape program validator
//!
//! This module turns source text into an executable token sequence:
//! - [`token`]: Instruction token definitions
//! - [`lexer`]: Tokenization and bracket validation (source text → tokens)
//! - [`errors`]: Lexical and structural error records
//!
//! # Character Policy
//!
//! The eight symbols `+ - > < . , [ ]` are executable. Under the default
//! permissive policy, `$` and `#` are accepted as inert debug markers; every
//! other character is reported as an unknown token but still occupies a slot
//! in the token sequence.

pub mod errors;
pub mod lexer;
pub mod token;

pub use errors::ParserError;
pub use lexer::{validate, validate_with, Lexer, ValidationPolicy, ValidationResult};
pub use token::Token;
