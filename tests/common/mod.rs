#![allow(dead_code)]

pub use stdinexec_test_utils::builders::{ExecOptionsBuilder, sh};
pub use stdinexec_test_utils::capture::CapturedOutput;
pub use stdinexec_test_utils::{init_tracing, with_timeout};

use std::io::Cursor;

use stdinexec::config::ExecOptions;
use stdinexec::errors::Result;
use stdinexec::exec::{Executor, RunSummary};

/// Run the executor over `input`, capturing everything it writes.
pub async fn run_captured(
    options: ExecOptions,
    input: &[u8],
) -> (Result<RunSummary>, CapturedOutput) {
    let captured = CapturedOutput::new();
    let result = Executor::new(options, captured.sink())
        .run(Cursor::new(input.to_vec()))
        .await;
    (result, captured)
}

/// Split tagged output (`"<worker>\t<line>"`) into `(worker, line)` pairs.
pub fn split_tagged(output: &str) -> Vec<(usize, String)> {
    output
        .lines()
        .map(|line| {
            let (worker, text) = line
                .split_once('\t')
                .unwrap_or_else(|| panic!("line without worker tag: {line:?}"));
            let worker = worker
                .parse()
                .unwrap_or_else(|_| panic!("bad worker tag in line: {line:?}"));
            (worker, text.to_string())
        })
        .collect()
}
