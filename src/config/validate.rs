// src/config/validate.rs

use crate::cli::CliArgs;
use crate::config::model::{ExecOptions, RawExecOptions};
use crate::errors::{Result, StdinexecError};
use crate::exec::template::CommandTemplate;
use crate::types::Delimiter;

impl TryFrom<RawExecOptions> for ExecOptions {
    type Error = StdinexecError;

    fn try_from(raw: RawExecOptions) -> std::result::Result<Self, Self::Error> {
        let parallel = validate_parallel(raw.parallel)?;
        let template = CommandTemplate::new(raw.command)?;
        Ok(ExecOptions::new_unchecked(
            template,
            Delimiter::from_null_flag(raw.null),
            parallel,
        ))
    }
}

impl TryFrom<&CliArgs> for ExecOptions {
    type Error = StdinexecError;

    fn try_from(args: &CliArgs) -> std::result::Result<Self, Self::Error> {
        ExecOptions::try_from(RawExecOptions::from(args))
    }
}

/// `0` means "unspecified" and becomes a single worker.
fn validate_parallel(parallel: i64) -> Result<usize> {
    match parallel {
        0 => Ok(1),
        n if n < 0 => Err(StdinexecError::ConfigError(format!(
            "parallel must be at least 1 (got {n})"
        ))),
        n => usize::try_from(n).map_err(|_| {
            StdinexecError::ConfigError(format!("parallel is too large (got {n})"))
        }),
    }
}
