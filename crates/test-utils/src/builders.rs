#![allow(dead_code)]

use stdinexec::config::{ExecOptions, RawExecOptions};

/// Builder for `ExecOptions` to simplify test setup.
pub struct ExecOptionsBuilder {
    raw: RawExecOptions,
}

impl ExecOptionsBuilder {
    pub fn new<I, S>(command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            raw: RawExecOptions {
                command: command.into_iter().map(Into::into).collect(),
                null: false,
                parallel: 0,
            },
        }
    }

    pub fn null(mut self, val: bool) -> Self {
        self.raw.null = val;
        self
    }

    pub fn parallel(mut self, n: i64) -> Self {
        self.raw.parallel = n;
        self
    }

    pub fn raw(self) -> RawExecOptions {
        self.raw
    }

    pub fn build(self) -> ExecOptions {
        ExecOptions::try_from(self.raw).expect("Failed to build valid options from builder")
    }
}

/// `sh -c <script>` with the record passed as `$1`.
///
/// Keeps records out of the script text, so tests don't need to worry about
/// quoting.
pub fn sh(script: &str) -> Vec<String> {
    vec![
        "sh".to_string(),
        "-c".to_string(),
        script.to_string(),
        "sh".to_string(),
        "{}".to_string(),
    ]
}
