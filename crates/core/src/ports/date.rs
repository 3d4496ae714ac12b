use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// Result of parsing free-form date text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    /// The text named an offset (or was an absolute epoch value)
    Zoned(DateTime<FixedOffset>),
    /// The text carried no offset
    Naive(NaiveDateTime),
}

/// Port for turning human-written dates into structured values
pub trait DateParser: Send + Sync {
    /// Parse `text`, or return `None` when it is not date-like
    fn parse(&self, text: &str) -> Option<ParsedDate>;
}
