//! Translate report parameters to SQL text to be run against the statistics database.

pub mod error;
pub mod filters;
pub mod helpers;
pub mod query;
