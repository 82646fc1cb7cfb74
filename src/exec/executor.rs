// src/exec/executor.rs

//! Runs the producer and the worker pool as one unit and folds their
//! results into a single outcome.

use std::sync::Arc;

use tokio::io::{AsyncRead, BufReader};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::ExecOptions;
use crate::errors::{Result, StdinexecError};
use crate::exec::producer::run_producer;
use crate::exec::sink::OutputSink;
use crate::exec::worker::Worker;
use crate::records::RecordScanner;
use crate::types::WorkerId;

/// Smallest capacity tokio allows; the producer can be at most one record
/// ahead of the workers.
const CHANNEL_CAPACITY: usize = 1;

/// What a finished task reports on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskExit {
    Producer { published: u64 },
    Worker(WorkerId),
}

/// Summary of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Records read from the input and handed to workers.
    pub records: u64,
}

/// One producer plus `parallel` workers sharing a single record channel.
#[derive(Debug)]
pub struct Executor {
    options: ExecOptions,
    sink: OutputSink,
}

impl Executor {
    pub fn new(options: ExecOptions, sink: OutputSink) -> Self {
        Self { options, sink }
    }

    /// Process all of `input` and wait for every task to finish.
    ///
    /// Failures do not cancel anything: the producer keeps reading and the
    /// healthy workers keep going until the channel is closed and drained.
    /// When several tasks fail, the error of the task that happened to
    /// *finish* first is returned. That order is a race, so callers must
    /// not rely on which of several errors they get.
    pub async fn run<R>(self, input: R) -> Result<RunSummary>
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        let Executor { options, sink } = self;
        let parallel = options.parallel.max(1);

        info!(
            parallel,
            delimiter = ?options.delimiter,
            command = ?options.template.argv(),
            "starting executor"
        );

        let (tx, rx) = mpsc::channel::<Vec<u8>>(CHANNEL_CAPACITY);
        let rx = Arc::new(Mutex::new(rx));
        let template = Arc::new(options.template);

        let mut tasks: JoinSet<Result<TaskExit>> = JoinSet::new();

        let scanner = RecordScanner::new(BufReader::new(input), options.delimiter);
        tasks.spawn(async move {
            let published = run_producer(scanner, tx).await?;
            Ok(TaskExit::Producer { published })
        });

        for id in 0..parallel {
            let worker = Worker::new(id, parallel, Arc::clone(&template), sink.clone());
            let records = Arc::clone(&rx);
            tasks.spawn(async move {
                worker.run(records).await?;
                Ok(TaskExit::Worker(id))
            });
        }
        // Workers hold the only receivers now; once they all exit the
        // producer's sends fail instead of blocking forever.
        drop(rx);

        let mut summary = RunSummary::default();
        let mut first_error: Option<StdinexecError> = None;

        while let Some(joined) = tasks.join_next().await {
            let outcome = joined
                .map_err(|e| StdinexecError::TaskFailed(e.to_string()))
                .and_then(|res| res);

            match outcome {
                Ok(TaskExit::Producer { published }) => {
                    debug!(published, "producer task joined");
                    summary.records = published;
                }
                Ok(TaskExit::Worker(id)) => {
                    debug!(worker = id, "worker task joined");
                }
                Err(err) => {
                    if first_error.is_none() {
                        warn!(error = %err, "task failed; waiting for the rest to finish");
                        first_error = Some(err);
                    } else {
                        debug!(error = %err, "additional task failure");
                    }
                }
            }
        }

        if let Err(err) = sink.flush().await {
            first_error.get_or_insert(err);
        }

        match first_error {
            Some(err) => Err(err),
            None => {
                info!(records = summary.records, "executor finished");
                Ok(summary)
            }
        }
    }
}
