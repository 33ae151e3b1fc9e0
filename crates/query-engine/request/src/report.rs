//! A request document naming the report to produce.

use serde::Deserialize;

use crate::data_quality::{DataQualityHashtagParams, DataQualityParams};
use crate::mapathon::MapathonParams;
use crate::user_stats::UserStatsParams;

/// One report request, tagged by the `report` field.
///
/// ```json
/// { "report": "mapathon_summary", "project_ids": [1], "fromTimestamp": "...", "toTimestamp": "..." }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum ReportRequest {
    MapathonSummary(MapathonParams),
    MapathonDetail(MapathonParams),
    UserStatistics(UserStatsParams),
    DataQuality(DataQualityParams),
    DataQualityHashtags(DataQualityHashtagParams),
}

impl ReportRequest {
    pub fn name(&self) -> &'static str {
        match self {
            ReportRequest::MapathonSummary(_) => "mapathon_summary",
            ReportRequest::MapathonDetail(_) => "mapathon_detail",
            ReportRequest::UserStatistics(_) => "user_statistics",
            ReportRequest::DataQuality(_) => "data_quality",
            ReportRequest::DataQualityHashtags(_) => "data_quality_hashtags",
        }
    }
}

/// The JSON schema of the parameters of every report, keyed by report name.
pub fn parameter_schemas() -> Vec<(&'static str, schemars::schema::RootSchema)> {
    use crate::data_quality::{RawDataQualityHashtagParams, RawDataQualityParams};
    use crate::mapathon::RawMapathonParams;
    use crate::user_stats::RawUserStatsParams;

    vec![
        ("mapathon_summary", schemars::schema_for!(RawMapathonParams)),
        ("mapathon_detail", schemars::schema_for!(RawMapathonParams)),
        ("user_statistics", schemars::schema_for!(RawUserStatsParams)),
        ("data_quality", schemars::schema_for!(RawDataQualityParams)),
        (
            "data_quality_hashtags",
            schemars::schema_for!(RawDataQualityHashtagParams),
        ),
    ]
}
