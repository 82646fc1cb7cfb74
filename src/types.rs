use std::fmt;

/// Zero-based index of a worker in the pool.
///
/// Only used to tag output lines and diagnostics; it says nothing about which
/// records the worker processed.
pub type WorkerId = usize;

/// How the input stream is split into records.
///
/// - `Newline`: records end at `\n` (a trailing `\r` is dropped).
/// - `Null`: records end at a NUL byte, as produced by `find -print0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Newline,
    Null,
}

impl Delimiter {
    pub fn from_null_flag(null: bool) -> Self {
        if null { Delimiter::Null } else { Delimiter::Newline }
    }

    /// The byte that terminates a record in this mode.
    pub fn byte(self) -> u8 {
        match self {
            Delimiter::Newline => b'\n',
            Delimiter::Null => b'\0',
        }
    }
}

/// Which pipe of a subprocess a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl fmt::Display for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputStream::Stdout => f.write_str("stdout"),
            OutputStream::Stderr => f.write_str("stderr"),
        }
    }
}
