// src/exec/worker.rs

//! A single member of the worker pool.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, warn};

use crate::errors::{Result, StdinexecError};
use crate::exec::drain::drain_pipe;
use crate::exec::sink::{LineFormat, OutputSink};
use crate::exec::template::{CommandTemplate, RenderedCommand};
use crate::types::{OutputStream, WorkerId};

/// Receiving end of the record channel, shared by every worker.
pub type SharedReceiver = Arc<Mutex<mpsc::Receiver<Vec<u8>>>>;

/// Takes records off the shared channel and runs one subprocess per record,
/// strictly one at a time.
#[derive(Debug)]
pub struct Worker {
    id: WorkerId,
    template: Arc<CommandTemplate>,
    format: LineFormat,
    sink: OutputSink,
}

impl Worker {
    pub fn new(
        id: WorkerId,
        parallel: usize,
        template: Arc<CommandTemplate>,
        sink: OutputSink,
    ) -> Self {
        Self {
            id,
            template,
            format: LineFormat::for_worker(id, parallel),
            sink,
        }
    }

    /// Consume records until the channel is closed and empty.
    ///
    /// A spawn failure ends this worker at once. A failed drain or a
    /// non-zero exit only fails that record: the first such error is kept,
    /// the worker moves on to the next record, and the kept error is
    /// returned when the channel runs dry.
    pub async fn run(self, records: SharedReceiver) -> Result<()> {
        info!(worker = self.id, "worker started");

        let mut first_error: Option<StdinexecError> = None;
        let mut processed = 0u64;

        while let Some(record) = next_record(&records).await {
            processed += 1;
            match self.process(&record).await {
                Ok(()) => {}
                Err(err @ StdinexecError::Spawn { .. }) => {
                    warn!(worker = self.id, error = %err, "could not start command; worker stopping");
                    return Err(first_error.unwrap_or(err));
                }
                Err(err) => {
                    warn!(worker = self.id, error = %err, "record failed");
                    first_error.get_or_insert(err);
                }
            }
        }

        info!(worker = self.id, processed, "worker finished (channel closed)");
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Run the command for one record and forward its output.
    pub async fn process(&self, record: &[u8]) -> Result<()> {
        let rendered = self.template.render(record);
        debug!(worker = self.id, command = %rendered, "starting command");

        let mut child = rendered
            .command()
            .spawn()
            .map_err(|source| StdinexecError::Spawn {
                worker: self.id,
                command: rendered.to_string(),
                source,
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Both pipes must be read at the same time: a child blocked on a full
        // stderr pipe never closes stdout.
        let stdout_task = stdout.map(|pipe| {
            tokio::spawn(drain_pipe(
                pipe,
                self.id,
                OutputStream::Stdout,
                self.format,
                self.sink.clone(),
            ))
        });
        let stderr_task = stderr.map(|pipe| {
            tokio::spawn(drain_pipe(
                pipe,
                self.id,
                OutputStream::Stderr,
                self.format,
                self.sink.clone(),
            ))
        });

        // Wait for both drains even if one fails, so nothing from this
        // record reaches the sink after the next record has started.
        let (stdout_res, stderr_res) = tokio::join!(
            join_drain(stdout_task, self.id),
            join_drain(stderr_task, self.id),
        );

        if let Err(err) = stdout_res.and(stderr_res) {
            // Reap the child so it does not linger as a zombie, but report
            // the drain failure.
            if let Err(e) = child.wait().await {
                debug!(worker = self.id, error = %e, "waiting after drain failure");
            }
            return Err(err);
        }

        let status = child
            .wait()
            .await
            .map_err(|source| StdinexecError::Wait {
                worker: self.id,
                command: rendered.to_string(),
                source,
            })?;
        debug!(
            worker = self.id,
            command = %rendered,
            exit_code = ?status.code(),
            success = status.success(),
            "command exited"
        );

        if !status.success() {
            return Err(exit_error(self.id, &rendered, status));
        }
        Ok(())
    }
}

async fn next_record(records: &SharedReceiver) -> Option<Vec<u8>> {
    records.lock().await.recv().await
}

async fn join_drain(
    task: Option<tokio::task::JoinHandle<Result<u64>>>,
    worker: WorkerId,
) -> Result<u64> {
    match task {
        Some(handle) => handle.await.map_err(|e| {
            StdinexecError::TaskFailed(format!("drain task of worker {worker}: {e}"))
        })?,
        None => Ok(0),
    }
}

fn exit_error(
    worker: WorkerId,
    rendered: &RenderedCommand,
    status: std::process::ExitStatus,
) -> StdinexecError {
    StdinexecError::ExitStatus {
        worker,
        command: rendered.to_string(),
        status,
    }
}
