// src/exec/drain.rs

//! Per-pipe drain routine.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::trace;

use crate::errors::{Result, StdinexecError};
use crate::exec::sink::{LineFormat, OutputSink};
use crate::types::{OutputStream, WorkerId};

/// Read `pipe` to EOF and forward every line to `sink`.
///
/// Lines are split on `\n` regardless of how the input records were
/// delimited; a trailing `\r` is dropped and a final unterminated line is
/// still forwarded. Bytes are passed through untouched, so output does not
/// need to be UTF-8.
///
/// Returns the number of lines forwarded.
pub async fn drain_pipe<R>(
    pipe: R,
    worker: WorkerId,
    stream: OutputStream,
    format: LineFormat,
    sink: OutputSink,
) -> Result<u64>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    let mut lines = 0u64;

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|source| StdinexecError::Drain {
                worker,
                stream,
                source,
            })?;
        if n == 0 {
            break;
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }

        sink.write_line(format, &buf).await?;
        lines += 1;
    }

    trace!(worker, %stream, lines, "pipe drained");
    Ok(lines)
}
