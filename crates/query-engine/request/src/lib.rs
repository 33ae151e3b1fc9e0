//! Typed request parameters for the statistics reports.
//!
//! Every parameter type is validated when it is constructed, either through its
//! `new` constructor or while deserializing the wire shape, so that the query
//! translation never sees a malformed request.

pub mod data_quality;
pub mod error;
pub mod geometry;
pub mod issue;
pub mod mapathon;
pub mod report;
pub mod time;
pub mod user_stats;

pub use data_quality::{
    DataQualityHashtagParams, DataQualityParams, DataQualityProjectParams,
    DataQualityUsernameParams, HashtagScope,
};
pub use error::ValidationError;
pub use geometry::Polygon;
pub use issue::{IssueType, OutputType};
pub use mapathon::MapathonParams;
pub use report::ReportRequest;
pub use time::TimeRange;
pub use user_stats::UserStatsParams;
