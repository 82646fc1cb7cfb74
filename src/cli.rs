// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `stdinexec`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stdinexec",
    version,
    disable_version_flag = true,
    about = "Execute a command for each line of the input, similar to \"find -exec\".",
    long_about = None,
    after_help = "Every occurrence of {} in COMMAND and ARGS is replaced with the record.\n\
                  With more than one parallel execution, each output line is prefixed\n\
                  with the worker index and a tab."
)]
pub struct CliArgs {
    /// Use null byte as the record separator.
    #[arg(short = '0', long = "null")]
    pub null: bool,

    /// Number of parallel executions (0 means 1).
    #[arg(
        short = 'p',
        value_name = "N",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub parallel_short: i64,

    /// Number of parallel executions; takes precedence over `-p`.
    #[arg(
        long = "parallel",
        value_name = "N",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub parallel_long: i64,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STDINEXEC_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print version and exit.
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Command to run, followed by its arguments.
    #[arg(
        value_name = "COMMAND",
        required_unless_present = "version",
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl CliArgs {
    /// Requested worker count before validation.
    ///
    /// `--parallel` wins over `-p` whenever it was given a non-zero value.
    pub fn requested_parallel(&self) -> i64 {
        if self.parallel_long != 0 {
            self.parallel_long
        } else {
            self.parallel_short
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Version string printed by `-v` / `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
