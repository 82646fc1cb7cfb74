// src/records/scanner.rs

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::types::Delimiter;

/// Lazily splits an async byte stream into records.
///
/// Framing rules:
/// - the delimiter byte ends a record and is not part of it;
/// - in newline mode a single trailing `\r` is dropped as well;
/// - an unterminated, non-empty tail is yielded as the last record;
/// - records are raw bytes; nothing is decoded, so file names in any
///   encoding survive untouched.
///
/// Only a failing read is an error. Once EOF or an error has been returned
/// the scanner stays exhausted.
#[derive(Debug)]
pub struct RecordScanner<R> {
    reader: R,
    delimiter: Delimiter,
    buf: Vec<u8>,
    done: bool,
}

impl<R> RecordScanner<R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn new(reader: R, delimiter: Delimiter) -> Self {
        Self {
            reader,
            delimiter,
            buf: Vec::new(),
            done: false,
        }
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    /// Read the next record, or `Ok(None)` at end of input.
    pub async fn next_record(&mut self) -> io::Result<Option<Vec<u8>>> {
        if self.done {
            return Ok(None);
        }

        self.buf.clear();
        let delim = self.delimiter.byte();
        let n = match self.reader.read_until(delim, &mut self.buf).await {
            Ok(n) => n,
            Err(e) => {
                self.done = true;
                return Err(e);
            }
        };

        if n == 0 {
            self.done = true;
            return Ok(None);
        }

        if self.buf.last() == Some(&delim) {
            self.buf.pop();
        }
        if self.delimiter == Delimiter::Newline && self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }

        Ok(Some(std::mem::take(&mut self.buf)))
    }

    /// Drain every remaining record into a `Vec`.
    pub async fn collect_records(mut self) -> io::Result<Vec<Vec<u8>>> {
        let mut out = Vec::new();
        while let Some(record) = self.next_record().await? {
            out.push(record);
        }
        Ok(out)
    }
}
