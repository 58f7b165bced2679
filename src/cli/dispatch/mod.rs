use crate::{cli::actions::Action, config::PGPROBE_FORMAT, report::Format};
use anyhow::{Error, Result};
use clap::ArgMatches;
use std::{
    env,
    ffi::{OsStr, OsString},
};
use tracing::warn;

/// Convert `ArgMatches` into typed Action enum
///
/// The DSN is passed through untouched, even when it is not UTF-8: a missing
/// or malformed connection string is a failed probe, not a usage error.
///
/// # Errors
///
/// Returns an error if the output format given with `--format` is unknown
pub fn dispatch(matches: &ArgMatches) -> Result<Action> {
    let dsn = matches.get_one::<OsString>("dsn").cloned();

    let format = match matches.get_one::<String>("format") {
        Some(format) => format.parse::<Format>().map_err(Error::msg)?,
        None => env_format(env::var_os(PGPROBE_FORMAT).as_deref()),
    };

    Ok(Action::Probe { dsn, format })
}

/// Format requested through the environment, unknown values fall back to text
fn env_format(value: Option<&OsStr>) -> Format {
    let Some(value) = value else {
        return Format::default();
    };

    match value.to_str().map(str::parse::<Format>) {
        Some(Ok(format)) => format,
        _ => {
            warn!(
                variable = PGPROBE_FORMAT,
                value = %value.to_string_lossy(),
                "unknown output format, using text"
            );
            Format::default()
        }
    }
}
