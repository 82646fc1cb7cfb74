// src/exec/template.rs

//! Command templates and their per-record rendering.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::process::Stdio;

use tokio::process::Command;

use crate::errors::{Result, StdinexecError};

/// Token replaced with the record text in every argument.
pub const PLACEHOLDER: &str = "{}";

/// The argument vector given on the command line, first element being the
/// program. Immutable for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    argv: Vec<String>,
}

impl CommandTemplate {
    pub fn new(argv: Vec<String>) -> Result<Self> {
        if argv.is_empty() {
            return Err(StdinexecError::ConfigError(
                "command is required".to_string(),
            ));
        }
        Ok(Self { argv })
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// Replace every `{}` in every argument with `record`.
    ///
    /// The record is substituted byte for byte, so it does not have to be
    /// UTF-8. Arguments without a placeholder are copied unchanged. The
    /// result is a fresh allocation, so workers never share argument
    /// buffers.
    pub fn render(&self, record: impl AsRef<[u8]>) -> RenderedCommand {
        let record = record.as_ref();
        let mut argv = self
            .argv
            .iter()
            .map(|arg| replace_all(arg.as_bytes(), PLACEHOLDER.as_bytes(), record))
            .map(bytes_to_os_string);

        // `new` guarantees at least one element.
        let program = argv.next().unwrap_or_default();
        RenderedCommand {
            program,
            args: argv.collect(),
        }
    }
}

fn replace_all(haystack: &[u8], needle: &[u8], with: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(haystack.len());
    let mut rest = haystack;
    while let Some(pos) = rest.windows(needle.len()).position(|w| w == needle) {
        out.extend_from_slice(&rest[..pos]);
        out.extend_from_slice(with);
        rest = &rest[pos + needle.len()..];
    }
    out.extend_from_slice(rest);
    out
}

#[cfg(unix)]
fn bytes_to_os_string(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

// Windows arguments are UTF-16; bytes that are not UTF-8 cannot be passed
// through as-is there.
#[cfg(not(unix))]
fn bytes_to_os_string(bytes: Vec<u8>) -> OsString {
    OsString::from(String::from_utf8_lossy(&bytes).into_owned())
}

/// A template with one record substituted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl RenderedCommand {
    /// Build the process description: stdin from /dev/null, both output
    /// streams piped back to us.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> impl Iterator<Item = &OsStr> {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
    }
}

impl fmt::Display for RenderedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, arg) in self.argv().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg:?}")?;
        }
        f.write_str("]")
    }
}
