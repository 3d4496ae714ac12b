use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};
use gitstamp_core::ports::{DateParser, ParsedDate};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%a %b %d %Y",
    "%a, %d %b %Y",
    "%A, %B %d, %Y",
    "%A, %d %B %Y",
    "%Y%m%d",
];

const TIME_FORMATS: &[&str] = &[
    "%H:%M:%S%.f",
    "%H:%M",
    "%I:%M:%S %p",
    "%I:%M %p",
    "%I:%M%p",
];

const SEPARATORS: &[&str] = &[" ", "T", ", ", " at "];

/// `git log` default (`Sun Dec 31 20:30:00 2023 +0000`) and ISO 8601 basic
/// format (`20231231T203000`)
const WHOLE_FORMATS: &[&str] = &["%a %b %d %H:%M:%S %Y", "%Y%m%dT%H%M%S", "%Y%m%dT%H%M"];

/// Lenient date parser built on chrono
///
/// Accepts RFC 3339, RFC 2822, git's raw `@<seconds> <offset>` form and a
/// range of common written formats with or without a time of day and an
/// offset. A missing time means midnight; a missing offset yields
/// `ParsedDate::Naive`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChronoDateParser;

impl ChronoDateParser {
    pub fn new() -> Self {
        Self
    }
}

impl DateParser for ChronoDateParser {
    fn parse(&self, text: &str) -> Option<ParsedDate> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Some(parsed) = parse_raw_git(text) {
            return Some(ParsedDate::Zoned(parsed));
        }
        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            return Some(ParsedDate::Zoned(parsed));
        }
        if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
            return Some(ParsedDate::Zoned(parsed));
        }

        let text = expand_hour_only_time(&normalize_zone_suffix(text));
        parse_with_offset(&text)
            .map(ParsedDate::Zoned)
            .or_else(|| parse_naive(&text).map(ParsedDate::Naive))
    }
}

/// `@1704054600`, `@1704054600 +0100` or `1704054600 +0100`
fn parse_raw_git(text: &str) -> Option<DateTime<FixedOffset>> {
    let mut parts = text.split_whitespace();
    let first = parts.next()?;
    let offset = parts.next();
    if parts.next().is_some() {
        return None;
    }

    let seconds = match (first.strip_prefix('@'), offset) {
        (Some(seconds), _) => seconds,
        // a bare number is only raw git when it carries an offset
        (None, Some(_)) => first,
        (None, None) => return None,
    };
    if seconds.is_empty() || !seconds.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let seconds: i64 = seconds.parse().ok()?;

    let offset = match offset {
        Some(offset) => parse_offset(offset)?,
        None => FixedOffset::east_opt(0)?,
    };
    Some(DateTime::from_timestamp(seconds, 0)?.with_timezone(&offset))
}

/// `+hhmm` / `-hhmm` / `+hh`
fn parse_offset(text: &str) -> Option<FixedOffset> {
    let (sign, digits) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    if !matches!(digits.len(), 2 | 4) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = match &digits[2..] {
        "" => 0,
        minutes => minutes.parse().ok()?,
    };
    if minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Rewrite a trailing `Z`, `UTC` or `GMT` zone name as `+0000`
fn normalize_zone_suffix(text: &str) -> String {
    let upper = text.to_ascii_uppercase();
    for suffix in [" UTC", " GMT", "UTC", "GMT", "Z"] {
        if let Some(rest) = upper.strip_suffix(suffix) {
            // only after a time of day, so month names are left alone
            if rest.ends_with(|c: char| c.is_ascii_digit()) {
                return format!("{} +0000", &text[..rest.len()]);
            }
        }
    }
    text.to_string()
}

/// Rewrite a trailing hour-only 12-hour time (`10am`, `10 PM`) as `10:00 AM`
fn expand_hour_only_time(text: &str) -> String {
    let upper = text.to_ascii_uppercase();
    let Some((rest, meridiem)) = ["AM", "PM"]
        .iter()
        .find_map(|m| upper.strip_suffix(m).map(|rest| (rest.trim_end(), *m)))
    else {
        return text.to_string();
    };

    let hour_start = rest.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    let hour = &rest[hour_start..];
    if hour.is_empty() || hour.len() > 2 || !rest[..hour_start].ends_with(char::is_whitespace) {
        return text.to_string();
    }
    format!("{}{}:00 {}", &text[..hour_start], hour, meridiem)
}

/// Years are written with four digits; chrono would otherwise read
/// `Dec 2023` as day 20 of year 23
fn four_digit_year<T: Datelike>(date: T) -> Option<T> {
    (1000..=9999).contains(&date.year()).then_some(date)
}

fn datetime_formats() -> impl Iterator<Item = String> {
    let combined = DATE_FORMATS.iter().flat_map(|date| {
        SEPARATORS.iter().flat_map(move |separator| {
            TIME_FORMATS
                .iter()
                .map(move |time| format!("{}{}{}", date, separator, time))
        })
    });
    WHOLE_FORMATS.iter().map(|format| format.to_string()).chain(combined)
}

fn parse_with_offset(text: &str) -> Option<DateTime<FixedOffset>> {
    datetime_formats().find_map(|format| {
        // %#z also takes an hour-only offset such as -05
        [" %z", "%z", " %#z", "%#z"].iter().find_map(|zone| {
            DateTime::parse_from_str(text, &format!("{}{}", format, zone))
                .ok()
                .and_then(four_digit_year)
        })
    })
}

fn parse_naive(text: &str) -> Option<NaiveDateTime> {
    if let Some(parsed) = datetime_formats().find_map(|format| {
        NaiveDateTime::parse_from_str(text, &format)
            .ok()
            .and_then(four_digit_year)
    }) {
        return Some(parsed);
    }

    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(text, format)
            .ok()
            .and_then(four_digit_year)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    })
}
