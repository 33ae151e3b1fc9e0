//! Mapathon summary and detail reports.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::PlanResults;
use crate::error::Error;

/// Distinct elements carrying a tag key, per action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCount {
    pub feature: String,
    pub action: String,
    pub count: i64,
}

/// [`FeatureCount`] broken down by user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFeatureCount {
    pub feature: String,
    pub action: String,
    pub username: Option<String>,
    pub count: i64,
}

/// One contributor of the detail report. The task counts and editors come from
/// database routines and are passed through as they are returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserContribution {
    pub user_id: i64,
    pub username: Option<String>,
    pub total_buildings: i64,
    pub mapped_tasks: Value,
    pub validated_tasks: Value,
    pub editors: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapathonSummary {
    pub mapped_features: Vec<FeatureCount>,
    pub total_contributors: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapathonDetail {
    pub mapped_features: Vec<UserFeatureCount>,
    pub contributors: Vec<UserContribution>,
}

#[derive(Deserialize)]
struct ContributorsCount {
    contributors_count: i64,
}

pub fn summary(results: &PlanResults) -> Result<MapathonSummary, Error> {
    let mapped_features = results.get("summary")?.deserialize_rows()?;
    let total_contributors = results
        .get("total_contributors")?
        .deserialize_rows::<ContributorsCount>()?
        .first()
        .map(|row| row.contributors_count)
        .ok_or_else(|| Error::UnexpectedResult {
            statement: "total_contributors",
            message: "expected one row".to_string(),
        })?;

    Ok(MapathonSummary {
        mapped_features,
        total_contributors,
    })
}

pub fn detail(results: &PlanResults) -> Result<MapathonDetail, Error> {
    Ok(MapathonDetail {
        mapped_features: results.get("contributed_features")?.deserialize_rows()?,
        contributors: results.get("contributors")?.deserialize_rows()?,
    })
}
