//! Memory model for the tape interpreter
//!
//! - [`tape`]: Fixed-length byte tape with a wrapping address register
//!
//! # Addressing
//!
//! Cell values wrap modulo 256. The address register wraps modulo the
//! configured address space (4096 by default), which is larger than the tape
//! (256 cells); an address selects cell `address % tape_len`.

pub mod tape;

pub use tape::Tape;
