use crate::domain::{DateInput, Timestamp, ZonePolicy};
use crate::error::{CoreError, Result};
use crate::ports::{DateParser, ParsedDate};
use chrono::{DateTime, FixedOffset};

/// Normalize a caller-supplied date into a single commit timestamp
///
/// Text goes through `parser`; values without an offset are anchored with
/// `zone`. Text that cannot be parsed or anchored is an
/// `InvalidDateFormat`; every other unusable value is an
/// `InvalidTimestampType`.
pub fn normalize_date(input: &DateInput, parser: &dyn DateParser, zone: ZonePolicy) -> Result<Timestamp> {
    let datetime = match input {
        DateInput::Text(text) => {
            let invalid = || CoreError::InvalidDateFormat {
                input: text.clone(),
            };
            match parser.parse(text).ok_or_else(invalid)? {
                ParsedDate::Zoned(datetime) => datetime,
                // ambiguous or skipped local time
                ParsedDate::Naive(naive) => zone.resolve(&naive).ok_or_else(invalid)?,
            }
        }
        DateInput::Zoned(datetime) => *datetime,
        DateInput::Naive(naive) => zone.resolve(naive).ok_or_else(|| CoreError::InvalidTimestampType {
            detail: format!("{} does not exist or is ambiguous in zone {}", naive, zone),
        })?,
        DateInput::Unsupported { kind } => {
            return Err(CoreError::InvalidTimestampType {
                detail: format!("expected text or a date/time value, got {}", kind),
            })
        }
    };

    to_commit_timestamp(&datetime)
}

fn to_commit_timestamp(datetime: &DateTime<FixedOffset>) -> Result<Timestamp> {
    let timestamp = Timestamp::from_datetime(datetime);
    if timestamp.seconds < 0 {
        return Err(CoreError::InvalidTimestampType {
            detail: format!("{} is before the Unix epoch", datetime.to_rfc3339()),
        });
    }
    if timestamp.to_datetime().is_none() {
        return Err(CoreError::InvalidTimestampType {
            detail: format!("{} has no valid git offset", datetime.to_rfc3339()),
        });
    }
    Ok(timestamp)
}
