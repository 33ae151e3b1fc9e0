//! Errors raised while validating request parameters.

use chrono::NaiveDateTime;
use thiserror::Error;

/// A request parameter failed validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid timestamp '{0}', expected an ISO-8601 date and time")]
    InvalidTimestamp(String),
    #[error("fromTimestamp ({from}) must be earlier than toTimestamp ({to})")]
    InvalidTimeRange {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
    #[error("fromTimestamp and toTimestamp must be given together")]
    IncompleteTimeRange,
    #[error("{0} must not be empty")]
    EmptyList(&'static str),
    #[error("{0} must not contain empty values")]
    EmptyValue(&'static str),
    #[error("one of {0} is required")]
    MissingScope(&'static str),
    #[error("{0} are mutually exclusive")]
    ConflictingScope(&'static str),
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}
