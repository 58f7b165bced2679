use crate::probe::{Outcome, Probe};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const SUCCESS_MARKER: &str = "✅";
pub const FAILURE_MARKER: &str = "❌";

/// Shape of the report line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Human readable, starts with a marker
    #[default]
    Text,
    /// One JSON object
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s}")),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct Record {
    status: String,
    time: String,
    runtime_ms: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tls_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tls_cipher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<&Probe> for Record {
    fn from(probe: &Probe) -> Self {
        let mut record = Self {
            time: probe.time.to_rfc3339(),
            runtime_ms: probe.runtime_ms,
            ..Default::default()
        };

        match &probe.outcome {
            Outcome::Success(info) => {
                "ok".clone_into(&mut record.status);
                record.version = Some(info.version.clone());
                if let Some(tls) = &info.tls {
                    tls.version.clone_into(&mut record.tls_version);
                    tls.cipher.clone_into(&mut record.tls_cipher);
                }
            }
            Outcome::Failure { reason } => {
                "error".clone_into(&mut record.status);
                record.error = Some(reason.clone());
            }
        }

        record
    }
}

/// Render the single report line for a probe
///
/// # Errors
///
/// Returns an error if the JSON record cannot be serialized
pub fn render(probe: &Probe, format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(text(&probe.outcome)),
        Format::Json => Ok(serde_json::to_string(&Record::from(probe))?),
    }
}

#[must_use]
pub fn text(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Success(info) => {
            let version = one_line(&info.version);
            match &info.tls {
                Some(tls) => format!("{SUCCESS_MARKER} connection succeeded: {version} ({tls})"),
                None => format!("{SUCCESS_MARKER} connection succeeded: {version}"),
            }
        }
        Outcome::Failure { reason } => format!("{FAILURE_MARKER} connection failed: {reason}"),
    }
}

/// Collapse multi-line text into the single report line, never empty
#[must_use]
pub fn one_line(text: &str) -> String {
    let line = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if line.is_empty() {
        "unknown error".to_string()
    } else {
        line
    }
}
