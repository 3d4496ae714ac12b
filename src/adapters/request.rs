use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use gitstamp_core::app::CommitRequest;
use gitstamp_core::domain::{DateInput, IdentitySource};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A commit request written as TOML
///
/// ```toml
/// repository = "/workspaces/T1"
/// file = "b.txt"
/// message = "Implemented new feature X"
/// date = 2023-12-31T20:30:00Z
/// ```
///
/// `date` may be a TOML string (parsed leniently) or a TOML date/time.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RequestFile {
    pub repository: PathBuf,
    pub file: PathBuf,
    pub message: String,
    pub date: toml::Value,
    #[serde(default)]
    pub allow_empty: bool,
}

impl RequestFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file: {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse request file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn into_request(self, author: IdentitySource) -> CommitRequest {
        let date = date_input_from_toml(&self.date);
        CommitRequest::new(self.repository, self.file, self.message, date, author)
            .allow_empty(self.allow_empty)
    }
}

/// Map a TOML value onto a commit date input
///
/// Strings stay text, offset date-times become zoned values, local
/// date-times and local dates become naive values. Everything else,
/// including a local time with no date, is unsupported.
pub fn date_input_from_toml(value: &toml::Value) -> DateInput {
    match value {
        toml::Value::String(text) => DateInput::Text(text.clone()),
        toml::Value::Datetime(datetime) => {
            // toml renders datetimes in RFC 3339 shape
            let rendered = datetime.to_string();
            if let Ok(zoned) = DateTime::parse_from_rfc3339(&rendered) {
                DateInput::Zoned(zoned)
            } else if let Ok(naive) = NaiveDateTime::parse_from_str(&rendered, "%Y-%m-%dT%H:%M:%S%.f") {
                DateInput::Naive(naive)
            } else if let Ok(date) = NaiveDate::parse_from_str(&rendered, "%Y-%m-%d") {
                DateInput::from(date)
            } else {
                DateInput::Unsupported {
                    kind: format!("local time {}", rendered),
                }
            }
        }
        other => DateInput::Unsupported {
            kind: other.type_str().to_string(),
        },
    }
}
