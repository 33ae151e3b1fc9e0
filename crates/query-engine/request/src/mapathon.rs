//! Parameters of the mapathon summary and detail reports.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::error::ValidationError;
use crate::time::TimeRange;

/// Wire shape of a mapathon request.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
pub struct RawMapathonParams {
    #[serde(default)]
    pub project_ids: Vec<i64>,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(rename = "fromTimestamp")]
    pub from_timestamp: String,
    #[serde(rename = "toTimestamp")]
    pub to_timestamp: String,
}

/// A validated mapathon request: changesets in a time window, optionally scoped by
/// HOT Tasking Manager projects and hashtags.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawMapathonParams")]
pub struct MapathonParams {
    project_ids: Vec<i64>,
    hashtags: Vec<String>,
    time_range: TimeRange,
}

impl MapathonParams {
    pub fn new(
        project_ids: Vec<i64>,
        hashtags: Vec<String>,
        time_range: TimeRange,
    ) -> Result<MapathonParams, ValidationError> {
        Ok(MapathonParams {
            project_ids,
            hashtags: validate_hashtags(hashtags)?,
            time_range,
        })
    }

    pub fn project_ids(&self) -> &[i64] {
        &self.project_ids
    }

    pub fn hashtags(&self) -> &[String] {
        &self.hashtags
    }

    pub fn time_range(&self) -> &TimeRange {
        &self.time_range
    }
}

impl TryFrom<RawMapathonParams> for MapathonParams {
    type Error = ValidationError;

    fn try_from(raw: RawMapathonParams) -> Result<Self, Self::Error> {
        let time_range = TimeRange::parse(&raw.from_timestamp, &raw.to_timestamp)?;
        MapathonParams::new(raw.project_ids, raw.hashtags, time_range)
    }
}

/// Hashtags are matched as substrings, so a blank one would match every changeset.
pub(crate) fn validate_hashtags(hashtags: Vec<String>) -> Result<Vec<String>, ValidationError> {
    if hashtags.iter().any(|hashtag| hashtag.trim().is_empty()) {
        return Err(ValidationError::EmptyValue("hashtags"));
    }
    Ok(hashtags)
}
