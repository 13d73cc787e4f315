//! ISO-8601 normalisation for date and time arguments
//!
//! Query filters and event bounds accept either a native chrono value or a
//! string that is already formatted. Both end up as the string the API
//! expects: `YYYY-MM-DD` for dates, `YYYY-MM-DDTHH:MM:SSZ` (UTC) for instants.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// Date-only format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// UTC date-time format
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A date, an instant, or a pre-formatted ISO-8601 string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    /// Calendar date without time (all-day events, date-bounded queries)
    Date(NaiveDate),
    /// Instant in time
    DateTime(DateTime<Utc>),
    /// Caller-supplied string, sent unchanged
    Iso(String),
}

impl Timestamp {
    /// Canonical ISO-8601 representation
    pub fn to_iso8601(&self) -> String {
        match self {
            Self::Date(date) => date.format(DATE_FORMAT).to_string(),
            Self::DateTime(dt) => dt.format(DATETIME_FORMAT).to_string(),
            Self::Iso(s) => s.clone(),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(dt: DateTime<Tz>) -> Self {
        Self::DateTime(dt.with_timezone(&Utc))
    }
}

impl From<&str> for Timestamp {
    fn from(s: &str) -> Self {
        Self::Iso(s.to_string())
    }
}

impl From<String> for Timestamp {
    fn from(s: String) -> Self {
        Self::Iso(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

/// Normalise an optional value, `None` staying absent
pub fn iso8601(value: Option<&Timestamp>) -> Option<String> {
    value.map(Timestamp::to_iso8601)
}
