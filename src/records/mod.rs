// src/records/mod.rs

//! Input framing: turning a byte stream into records.
//!
//! - [`scanner`] provides [`RecordScanner`], a forward-only reader that yields
//!   one record per newline- or NUL-terminated chunk.

pub mod scanner;

pub use scanner::RecordScanner;
