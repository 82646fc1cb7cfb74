// src/config/mod.rs

//! Run configuration for stdinexec.
//!
//! Responsibilities:
//! - Define the validated option set the executor runs with (`model.rs`).
//! - Turn raw CLI values into that option set, rejecting bad input
//!   (`validate.rs`).

pub mod model;
pub mod validate;

pub use model::{ExecOptions, RawExecOptions};
