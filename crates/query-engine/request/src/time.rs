//! Timestamps and time ranges.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::ValidationError;

/// Normalized ISO-8601 rendering, seconds precision: `2021-08-27T09:00:00`.
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Normalized rendering with a space separator: `2021-08-27 09:00:00`.
pub const SPACED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a request timestamp.
///
/// Fields need not be zero padded (`2021-10-7T9:00:00`), fractional seconds are
/// accepted, a bare date means midnight and an explicit offset is converted to UTC.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ValidationError> {
    let value = value.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Ok(with_offset.naive_utc());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| ValidationError::InvalidTimestamp(value.to_string()))
}

/// A half-open reporting window; `start` is always strictly before `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<TimeRange, ValidationError> {
        if start >= end {
            return Err(ValidationError::InvalidTimeRange {
                from: start,
                to: end,
            });
        }
        Ok(TimeRange { start, end })
    }

    /// Parse and validate a `fromTimestamp`/`toTimestamp` pair.
    pub fn parse(from: &str, to: &str) -> Result<TimeRange, ValidationError> {
        TimeRange::new(parse_timestamp(from)?, parse_timestamp(to)?)
    }

    /// Parse an optional pair; giving only one side is an error.
    pub fn parse_optional(
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Option<TimeRange>, ValidationError> {
        match (from, to) {
            (Some(from), Some(to)) => TimeRange::parse(from, to).map(Some),
            (None, None) => Ok(None),
            _ => Err(ValidationError::IncompleteTimeRange),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn start_iso(&self) -> String {
        self.start.format(ISO_FORMAT).to_string()
    }

    pub fn end_iso(&self) -> String {
        self.end.format(ISO_FORMAT).to_string()
    }

    pub fn start_spaced(&self) -> String {
        self.start.format(SPACED_FORMAT).to_string()
    }

    pub fn end_spaced(&self) -> String {
        self.end.format(SPACED_FORMAT).to_string()
    }
}
