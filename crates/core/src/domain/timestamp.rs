use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Commit timestamp (Unix timestamp with timezone offset in minutes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: i64,
    pub offset_minutes: i32,
}

impl Timestamp {
    pub fn new(seconds: i64, offset_minutes: i32) -> Self {
        Self {
            seconds,
            offset_minutes,
        }
    }

    /// Git records offsets in whole minutes; sub-minute offsets are truncated
    /// while the instant itself is kept.
    pub fn from_datetime(datetime: &DateTime<FixedOffset>) -> Self {
        Self::new(datetime.timestamp(), datetime.offset().local_minus_utc() / 60)
    }

    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(self.offset_minutes.checked_mul(60)?)?;
        Some(DateTime::from_timestamp(self.seconds, 0)?.with_timezone(&offset))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(datetime) => write!(f, "{}", datetime.to_rfc3339()),
            None => write!(f, "@{} {:+}", self.seconds, self.offset_minutes),
        }
    }
}

/// A commit date as handed in by the caller, before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// Free-form text, resolved by a `DateParser`
    Text(String),
    /// Date/time with a known offset
    Zoned(DateTime<FixedOffset>),
    /// Date/time without an offset, anchored by a `ZonePolicy`
    Naive(NaiveDateTime),
    /// Anything else (numbers, booleans, tables ...), named by its kind
    Unsupported { kind: String },
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(datetime: DateTime<Tz>) -> Self {
        Self::Zoned(datetime.fixed_offset())
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::Naive(datetime)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        Self::Naive(date.and_time(NaiveTime::default()))
    }
}

/// How date/times without an offset are anchored to absolute time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ZonePolicy {
    #[default]
    Utc,
    /// The system time zone; ambiguous or skipped local times do not resolve
    Local,
    /// Fixed offset east of UTC, in minutes
    Fixed(i32),
}

impl ZonePolicy {
    pub fn resolve(&self, naive: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Utc => Some(naive.and_utc().fixed_offset()),
            Self::Local => Local
                .from_local_datetime(naive)
                .single()
                .map(|datetime| datetime.fixed_offset()),
            Self::Fixed(minutes) => FixedOffset::east_opt(minutes.checked_mul(60)?)?
                .from_local_datetime(naive)
                .single(),
        }
    }
}

impl FromStr for ZonePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "utc" | "z" | "gmt" => return Ok(Self::Utc),
            "local" => return Ok(Self::Local),
            _ => {}
        }

        let invalid = || format!("invalid zone '{}': expected utc, local or an offset like +02:00", s);
        let (sign, digits) = match s.as_bytes().first() {
            Some(b'+') => (1, &s[1..]),
            Some(b'-') => (-1, &s[1..]),
            _ => return Err(invalid()),
        };
        let digits: String = digits.chars().filter(|c| *c != ':').collect();
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
        let minutes: i32 = digits[2..].parse().map_err(|_| invalid())?;
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }
        Ok(Self::Fixed(sign * (hours * 60 + minutes)))
    }
}

impl fmt::Display for ZonePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => write!(f, "utc"),
            Self::Local => write!(f, "local"),
            Self::Fixed(minutes) => {
                let sign = if *minutes < 0 { '-' } else { '+' };
                let abs = minutes.abs();
                write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
            }
        }
    }
}

impl TryFrom<String> for ZonePolicy {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ZonePolicy> for String {
    fn from(policy: ZonePolicy) -> Self {
        policy.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_from_utc_datetime() {
        let datetime = DateTime::parse_from_rfc3339("2023-12-31T20:30:00Z").unwrap();
        let timestamp = Timestamp::from_datetime(&datetime);
        assert_eq!(timestamp, Timestamp::new(1_704_054_600, 0));
        assert_eq!(timestamp.to_string(), "2023-12-31T20:30:00+00:00");
    }

    #[test]
    fn test_timestamp_keeps_offset() {
        let datetime = DateTime::parse_from_rfc3339("2023-12-25T10:00:00+05:30").unwrap();
        let timestamp = Timestamp::from_datetime(&datetime);
        assert_eq!(timestamp.offset_minutes, 330);
        assert_eq!(timestamp.to_datetime(), Some(datetime));
    }

    #[test]
    fn test_timestamp_with_impossible_offset_has_no_datetime() {
        let timestamp = Timestamp::new(0, 24 * 60 + 1);
        assert_eq!(timestamp.to_datetime(), None);
    }

    #[test]
    fn test_zone_policy_parse() {
        assert_eq!("utc".parse::<ZonePolicy>(), Ok(ZonePolicy::Utc));
        assert_eq!("Local".parse::<ZonePolicy>(), Ok(ZonePolicy::Local));
        assert_eq!("+02:00".parse::<ZonePolicy>(), Ok(ZonePolicy::Fixed(120)));
        assert_eq!("-0330".parse::<ZonePolicy>(), Ok(ZonePolicy::Fixed(-210)));
        assert!("+25:00".parse::<ZonePolicy>().is_err());
        assert!("somewhere".parse::<ZonePolicy>().is_err());
    }

    #[test]
    fn test_zone_policy_display_parses_back() {
        for policy in [ZonePolicy::Utc, ZonePolicy::Local, ZonePolicy::Fixed(-210)] {
            assert_eq!(policy.to_string().parse::<ZonePolicy>(), Ok(policy));
        }
    }

    #[test]
    fn test_zone_policy_resolves_fixed_offset() {
        let naive = NaiveDate::from_ymd_opt(2023, 12, 31)
            .unwrap()
            .and_hms_opt(20, 30, 0)
            .unwrap();
        let resolved = ZonePolicy::Fixed(60).resolve(&naive).unwrap();
        assert_eq!(resolved.to_rfc3339(), "2023-12-31T20:30:00+01:00");

        let resolved = ZonePolicy::Utc.resolve(&naive).unwrap();
        assert_eq!(resolved.timestamp(), 1_704_054_600);
    }

    #[test]
    fn test_date_input_conversions() {
        assert_eq!(
            DateInput::from("2023-12-25 10:00"),
            DateInput::Text("2023-12-25 10:00".to_string())
        );

        let utc = DateTime::parse_from_rfc3339("2023-12-31T20:30:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        match DateInput::from(utc) {
            DateInput::Zoned(datetime) => assert_eq!(datetime.timestamp(), 1_704_054_600),
            other => panic!("expected zoned input, got {:?}", other),
        }

        let date = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        match DateInput::from(date) {
            DateInput::Naive(datetime) => assert_eq!(datetime.to_string(), "2023-12-25 00:00:00"),
            other => panic!("expected naive input, got {:?}", other),
        }
    }
}
