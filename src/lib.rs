// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod records;
pub mod types;

use tokio::io::AsyncRead;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::ExecOptions;
use crate::errors::Result;
use crate::exec::{Executor, LineFormat, OutputSink, RunSummary};

/// High-level entry point used by `main.rs`.
///
/// Validates the arguments, then runs the executor over stdin with stdout
/// as the output sink. With `--version` only the version is printed.
pub async fn run(args: CliArgs) -> Result<RunSummary> {
    run_with_io(&args, tokio::io::stdin(), OutputSink::stdout()).await
}

/// Same as [`run`], with the input stream and output sink supplied by the
/// caller.
pub async fn run_with_io<R>(args: &CliArgs, input: R, sink: OutputSink) -> Result<RunSummary>
where
    R: AsyncRead + Send + Unpin + 'static,
{
    if args.version {
        sink.write_line(LineFormat::Bare, cli::VERSION.as_bytes()).await?;
        return Ok(RunSummary::default());
    }

    let options = ExecOptions::try_from(args)?;
    debug!(?options, "validated options");
    Executor::new(options, sink).run(input).await
}
