// src/exec/sink.rs

//! The single output destination shared by every worker.
//!
//! All drain routines write through one [`OutputSink`]. Each line is built in
//! full first and then written with a single `write_all` while holding the
//! sink's mutex, so lines from different subprocesses interleave but never
//! tear.

use std::sync::Arc;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::errors::{Result, StdinexecError};
use crate::types::WorkerId;

/// How a worker formats the lines it forwards.
///
/// - `Bare`: the line as-is. Used when there is a single worker, because the
///   output is already ordered.
/// - `Tagged(i)`: `"<i>\t<line>"`, so interleaved output can be grouped back
///   by worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormat {
    Bare,
    Tagged(WorkerId),
}

impl LineFormat {
    pub fn for_worker(worker: WorkerId, parallel: usize) -> Self {
        if parallel <= 1 {
            LineFormat::Bare
        } else {
            LineFormat::Tagged(worker)
        }
    }

    /// Render `text` into a complete output line, newline included.
    pub fn format(&self, text: &[u8]) -> Vec<u8> {
        match self {
            LineFormat::Bare => {
                let mut out = Vec::with_capacity(text.len() + 1);
                out.extend_from_slice(text);
                out.push(b'\n');
                out
            }
            LineFormat::Tagged(worker) => {
                let prefix = format!("{worker}\t");
                let mut out = Vec::with_capacity(prefix.len() + text.len() + 1);
                out.extend_from_slice(prefix.as_bytes());
                out.extend_from_slice(text);
                out.push(b'\n');
                out
            }
        }
    }
}

type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Cloneable, mutex-guarded handle to the process-wide output writer.
#[derive(Clone)]
pub struct OutputSink {
    writer: Arc<Mutex<BoxedWriter>>,
}

impl OutputSink {
    pub fn new<W>(writer: W) -> Self
    where
        W: AsyncWrite + Send + Unpin + 'static,
    {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Sink writing to the process's stdout.
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }

    /// Write one formatted line as a single unit.
    pub async fn write_line(&self, format: LineFormat, text: &[u8]) -> Result<()> {
        let line = format.format(text);
        let mut writer = self.writer.lock().await;
        writer
            .write_all(&line)
            .await
            .map_err(StdinexecError::OutputError)?;
        writer.flush().await.map_err(StdinexecError::OutputError)?;
        Ok(())
    }

    pub async fn flush(&self) -> Result<()> {
        let mut writer = self.writer.lock().await;
        writer.flush().await.map_err(StdinexecError::OutputError)
    }
}

impl std::fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputSink").finish_non_exhaustive()
    }
}
