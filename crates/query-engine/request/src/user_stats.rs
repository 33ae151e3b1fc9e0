//! Parameters of the per-user statistics report.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::error::ValidationError;
use crate::mapathon::validate_hashtags;
use crate::time::TimeRange;

/// Wire shape of a user statistics request.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawUserStatsParams {
    pub user_id: i64,
    #[serde(default)]
    pub project_ids: Vec<i64>,
    #[serde(default)]
    pub hashtags: Vec<String>,
    pub from_timestamp: String,
    pub to_timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawUserStatsParams")]
pub struct UserStatsParams {
    user_id: i64,
    project_ids: Vec<i64>,
    hashtags: Vec<String>,
    time_range: TimeRange,
}

impl UserStatsParams {
    pub fn new(
        user_id: i64,
        project_ids: Vec<i64>,
        hashtags: Vec<String>,
        time_range: TimeRange,
    ) -> Result<UserStatsParams, ValidationError> {
        Ok(UserStatsParams {
            user_id,
            project_ids,
            hashtags: validate_hashtags(hashtags)?,
            time_range,
        })
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
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

    /// Whether the statistics are restricted to changesets of given projects or hashtags.
    pub fn is_scoped(&self) -> bool {
        !self.project_ids.is_empty() || !self.hashtags.is_empty()
    }
}

impl TryFrom<RawUserStatsParams> for UserStatsParams {
    type Error = ValidationError;

    fn try_from(raw: RawUserStatsParams) -> Result<Self, Self::Error> {
        let time_range = TimeRange::parse(&raw.from_timestamp, &raw.to_timestamp)?;
        UserStatsParams::new(raw.user_id, raw.project_ids, raw.hashtags, time_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_wire_names() {
        let params: UserStatsParams = serde_json::from_value(serde_json::json!({
            "userId": 11593794,
            "projectIds": [11224],
            "hashtags": [],
            "fromTimestamp": "2021-08-27T09:00:00",
            "toTimestamp": "2021-08-27T11:00:00"
        }))
        .unwrap();
        assert_eq!(params.user_id(), 11593794);
        assert!(params.is_scoped());
    }

    #[test]
    fn unscoped_without_projects_or_hashtags() {
        let params: UserStatsParams = serde_json::from_value(serde_json::json!({
            "userId": 11593794,
            "fromTimestamp": "2021-08-27T09:00:00",
            "toTimestamp": "2021-08-27T11:00:00"
        }))
        .unwrap();
        assert!(!params.is_scoped());
    }
}
