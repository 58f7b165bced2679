use anyhow::{Context, Result, bail};
use sqlx::postgres::PgConnectOptions;
use std::{ffi::OsStr, path::PathBuf, str::FromStr};

/// Environment variable holding the connection string
pub const DATABASE_URL: &str = "DATABASE_URL";

/// Environment variable selecting the report format when `--format` is absent
pub const PGPROBE_FORMAT: &str = "PGPROBE_FORMAT";

/// Reported to the server so the session shows up in `pg_stat_activity`
pub const APPLICATION_NAME: &str = env!("CARGO_PKG_NAME");

/// Populate the process environment from a `.env` file, searched from the
/// working directory upwards. Variables that are already set are kept.
///
/// Returns the path of the file that was loaded, if any.
#[must_use]
pub fn load_env_file() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Validate a raw connection string and turn it into driver options
///
/// Accepts `postgres://` and `postgresql://` URIs with the usual libpq query
/// parameters (`sslmode`, `sslrootcert`, `application_name`, ...).
///
/// # Errors
///
/// Returns an error if the value is missing, not UTF-8, blank, uses another
/// scheme or cannot be parsed
pub fn connection_options(raw: Option<&OsStr>) -> Result<PgConnectOptions> {
    let raw = raw
        .with_context(|| format!("{DATABASE_URL} is not set"))?
        .to_str()
        .context("connection string is not valid UTF-8")?
        .trim();

    if raw.is_empty() {
        bail!("connection string is empty");
    }

    match raw.split_once("://").map(|(scheme, _)| scheme) {
        Some("postgres" | "postgresql") => {}
        Some(other) if is_scheme(other) => bail!("unsupported driver: {other}"),
        _ => bail!(
            "invalid connection string: expected postgres://<user>:<password>@<host>/<database>"
        ),
    }

    let options = PgConnectOptions::from_str(raw).context("invalid connection string")?;

    if options.get_application_name().is_some() {
        Ok(options)
    } else {
        Ok(options.application_name(APPLICATION_NAME))
    }
}

// RFC 3986 scheme characters, anything else may be a mangled credential
fn is_scheme(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_alphabetic())
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
