// src/errors.rs

//! Crate-wide error type and `Result` alias.

use std::process::ExitStatus;

use thiserror::Error;

use crate::types::{OutputStream, WorkerId};

#[derive(Error, Debug)]
pub enum StdinexecError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to scan records: {0}")]
    Scan(#[source] std::io::Error),

    #[error("failed to execute command: {source} (worker {worker}, {command})")]
    Spawn {
        worker: WorkerId,
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for command: {source} (worker {worker}, {command})")]
    Wait {
        worker: WorkerId,
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to drain {stream} of worker {worker}: {source}")]
    Drain {
        worker: WorkerId,
        stream: OutputStream,
        #[source]
        source: std::io::Error,
    },

    #[error("command failed with {status} (worker {worker}, {command})")]
    ExitStatus {
        worker: WorkerId,
        command: String,
        status: ExitStatus,
    },

    #[error("failed to write output: {0}")]
    OutputError(#[source] std::io::Error),

    #[error("task failed: {0}")]
    TaskFailed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, StdinexecError>;
