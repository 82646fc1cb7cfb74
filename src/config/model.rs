// src/config/model.rs

use crate::cli::CliArgs;
use crate::exec::template::CommandTemplate;
use crate::types::Delimiter;

/// Options exactly as they came in, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawExecOptions {
    pub command: Vec<String>,
    pub null: bool,
    pub parallel: i64,
}

impl From<&CliArgs> for RawExecOptions {
    fn from(args: &CliArgs) -> Self {
        Self {
            command: args.command.clone(),
            null: args.null,
            parallel: args.requested_parallel(),
        }
    }
}

/// Validated options for one executor run.
///
/// Build it with `ExecOptions::try_from(raw)`; the fields are always
/// consistent afterwards (`parallel >= 1`, non-empty template).
#[derive(Debug, Clone)]
pub struct ExecOptions {
    pub template: CommandTemplate,
    pub delimiter: Delimiter,
    pub parallel: usize,
}

impl ExecOptions {
    pub(crate) fn new_unchecked(
        template: CommandTemplate,
        delimiter: Delimiter,
        parallel: usize,
    ) -> Self {
        Self {
            template,
            delimiter,
            parallel,
        }
    }
}
