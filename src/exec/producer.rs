// src/exec/producer.rs

//! Feeds records from the input stream into the shared channel.

use tokio::io::AsyncBufRead;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::errors::{Result, StdinexecError};
use crate::records::RecordScanner;

/// Publish every record of `scanner` to `tx`, in input order.
///
/// `tx` is the only sender, and it is moved in here, so the channel is
/// closed exactly once when this function returns, whatever the outcome.
/// Workers therefore always see the end of input, even after a scan error.
///
/// If every worker has already stopped (all receivers dropped), the
/// remaining input is left unread and the producer returns `Ok`: the
/// workers' own errors decide the outcome of the run.
///
/// Returns the number of records published.
pub async fn run_producer<R>(
    mut scanner: RecordScanner<R>,
    tx: mpsc::Sender<Vec<u8>>,
) -> Result<u64>
where
    R: AsyncBufRead + Unpin,
{
    info!(delimiter = ?scanner.delimiter(), "producer started");
    let mut published = 0u64;

    loop {
        let record = match scanner.next_record().await {
            Ok(Some(record)) => record,
            Ok(None) => break,
            Err(e) => {
                warn!(published, error = %e, "input scan failed; closing channel");
                return Err(StdinexecError::Scan(e));
            }
        };

        if tx.send(record).await.is_err() {
            warn!(published, "no workers left to receive records; stopping input scan");
            return Ok(published);
        }
        published += 1;
    }

    info!(published, "producer finished (end of input)");
    Ok(published)
}
