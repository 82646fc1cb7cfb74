// src/exec/mod.rs

//! Process execution layer.
//!
//! This module runs one subprocess per input record, using
//! `tokio::process::Command`, and merges every subprocess's output into one
//! shared sink.
//!
//! - [`template`] renders the command line for a record.
//! - [`sink`] owns the serialized output writer and line formatting.
//! - [`drain`] reads one subprocess pipe to EOF, line by line.
//! - [`worker`] is the per-record loop of one pool member.
//! - [`producer`] scans the input and feeds the shared record channel.
//! - [`executor`] spawns producer and workers, then aggregates their results.

pub mod drain;
pub mod executor;
pub mod producer;
pub mod sink;
pub mod template;
pub mod worker;

pub use executor::{Executor, RunSummary};
pub use sink::{LineFormat, OutputSink};
pub use template::{CommandTemplate, PLACEHOLDER, RenderedCommand};
