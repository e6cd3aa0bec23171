//! # Temporal Types — UTC Timestamps and Calendar Dates
//!
//! `Timestamp` is a UTC-only instant truncated to seconds precision. The
//! review service returns `updatedAt` values with millisecond fractions and
//! occasionally with explicit offsets; both are normalized on the way in so
//! that revision ordering and display are stable.
//!
//! `CalendarDate` is a date without time or zone, used for fields such as
//! `dateApprovalReleasedToState` where the reviewer picks a day, not an
//! instant.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::McrError;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// Serialized as `YYYY-MM-DDTHH:MM:SSZ`. Deserialization accepts any RFC 3339
/// offset and converts to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// From a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse an RFC 3339 string, converting any offset to UTC.
    pub fn parse(s: &str) -> Result<Self, McrError> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| McrError::InvalidDateTime {
            value: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// The UTC calendar day this instant falls on.
    pub fn date(&self) -> CalendarDate {
        CalendarDate(self.0.date_naive())
    }

    /// Render as ISO8601 with Z suffix (e.g., `2024-03-01T14:05:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl TryFrom<String> for Timestamp {
    type Error = McrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.to_iso8601()
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

/// A calendar date (`YYYY-MM-DD`) with no time-of-day or zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(pub NaiveDate);

impl CalendarDate {
    /// Parse `YYYY-MM-DD`.
    pub fn parse(s: &str) -> Result<Self, McrError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|e| McrError::InvalidDateTime {
                value: s.to_string(),
                reason: e.to_string(),
            })
    }

    /// Today's date in UTC.
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    /// Display form used in banners, e.g. `03/01/2024`.
    pub fn to_display(&self) -> String {
        self.0.format("%m/%d/%Y").to_string()
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for CalendarDate {
    type Err = McrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn from_utc_truncates_subseconds() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 14, 5, 9).unwrap();
        let ts = Timestamp::from_utc(dt.with_nanosecond(123_000_000).unwrap());
        assert_eq!(ts.as_datetime().nanosecond(), 0);
        assert_eq!(ts.to_iso8601(), "2024-03-01T14:05:09Z");
    }

    #[test]
    fn parse_accepts_service_millisecond_format() {
        let ts = Timestamp::parse("2024-03-01T14:05:09.517Z").unwrap();
        assert_eq!(ts.to_iso8601(), "2024-03-01T14:05:09Z");
    }

    #[test]
    fn parse_converts_offsets_to_utc() {
        let ts = Timestamp::parse("2024-03-01T09:05:09-05:00").unwrap();
        assert_eq!(ts.to_iso8601(), "2024-03-01T14:05:09Z");
    }

    #[test]
    fn parse_rejects_date_only() {
        assert!(Timestamp::parse("2024-03-01").is_err());
        assert!(Timestamp::parse("").is_err());
    }

    #[test]
    fn timestamp_serde_uses_z_suffix() {
        let ts = Timestamp::parse("2024-03-01T14:05:09.517Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2024-03-01T14:05:09Z\"");
        let back: Timestamp = serde_json::from_str("\"2024-03-01T14:05:09.999Z\"").unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn ordering_follows_instant() {
        let earlier = Timestamp::parse("2024-03-01T14:05:09Z").unwrap();
        let later = Timestamp::parse("2024-03-01T14:05:10Z").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn calendar_date_parse_and_display() {
        let d = CalendarDate::parse("2024-03-01").unwrap();
        assert_eq!(d.to_string(), "2024-03-01");
        assert_eq!(d.to_display(), "03/01/2024");
        assert!(CalendarDate::parse("03/01/2024").is_err());
    }

    #[test]
    fn calendar_date_serde_is_iso() {
        let d = CalendarDate::parse("2024-12-31").unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2024-12-31\"");
    }

    #[test]
    fn timestamp_date_is_utc_day() {
        let ts = Timestamp::parse("2024-03-01T23:30:00-05:00").unwrap();
        assert_eq!(ts.date().to_string(), "2024-03-02");
    }
}
