//! Parameters of the data-quality reports.
//!
//! A data-quality report is scoped either by Tasking Manager projects or by OSM
//! usernames, never both. The hashtag variant of the report is scoped either by
//! changeset hashtags or by a polygon, never both.

use nonempty::NonEmpty;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::error::ValidationError;
use crate::geometry::{Polygon, RawPolygon};
use crate::issue::{IssueType, OutputType};
use crate::mapathon::validate_hashtags;
use crate::time::TimeRange;

// Wire shapes //

#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
pub struct RawDataQualityParams {
    #[serde(default)]
    pub project_ids: Vec<i64>,
    #[serde(default)]
    pub osm_usernames: Vec<String>,
    pub issue_types: Vec<IssueType>,
    #[serde(default)]
    pub output_type: OutputType,
    #[serde(rename = "fromTimestamp", default)]
    pub from_timestamp: Option<String>,
    #[serde(rename = "toTimestamp", default)]
    pub to_timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawDataQualityHashtagParams {
    #[serde(default)]
    pub hashtags: Vec<String>,
    pub issue_type: Vec<IssueType>,
    #[serde(default)]
    pub output_type: OutputType,
    pub from_timestamp: String,
    pub to_timestamp: String,
    #[serde(default)]
    pub geometry: Option<RawPolygon>,
}

// Project and username scoped report //

#[derive(Debug, Clone, PartialEq)]
pub struct DataQualityProjectParams {
    project_ids: NonEmpty<i64>,
    issue_types: NonEmpty<IssueType>,
    output_type: OutputType,
}

impl DataQualityProjectParams {
    pub fn new(
        project_ids: Vec<i64>,
        issue_types: Vec<IssueType>,
        output_type: OutputType,
    ) -> Result<DataQualityProjectParams, ValidationError> {
        Ok(DataQualityProjectParams {
            project_ids: NonEmpty::from_vec(project_ids)
                .ok_or(ValidationError::EmptyList("project_ids"))?,
            issue_types: non_empty_issues(issue_types, "issue_types")?,
            output_type,
        })
    }

    pub fn project_ids(&self) -> &NonEmpty<i64> {
        &self.project_ids
    }

    pub fn issue_types(&self) -> &NonEmpty<IssueType> {
        &self.issue_types
    }

    pub fn output_type(&self) -> OutputType {
        self.output_type
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataQualityUsernameParams {
    osm_usernames: NonEmpty<String>,
    issue_types: NonEmpty<IssueType>,
    time_range: Option<TimeRange>,
    output_type: OutputType,
}

impl DataQualityUsernameParams {
    pub fn new(
        osm_usernames: Vec<String>,
        issue_types: Vec<IssueType>,
        time_range: Option<TimeRange>,
        output_type: OutputType,
    ) -> Result<DataQualityUsernameParams, ValidationError> {
        if osm_usernames
            .iter()
            .any(|username| username.trim().is_empty())
        {
            return Err(ValidationError::EmptyValue("osm_usernames"));
        }
        Ok(DataQualityUsernameParams {
            osm_usernames: NonEmpty::from_vec(osm_usernames)
                .ok_or(ValidationError::EmptyList("osm_usernames"))?,
            issue_types: non_empty_issues(issue_types, "issue_types")?,
            time_range,
            output_type,
        })
    }

    pub fn osm_usernames(&self) -> &NonEmpty<String> {
        &self.osm_usernames
    }

    pub fn issue_types(&self) -> &NonEmpty<IssueType> {
        &self.issue_types
    }

    pub fn time_range(&self) -> Option<&TimeRange> {
        self.time_range.as_ref()
    }

    pub fn output_type(&self) -> OutputType {
        self.output_type
    }
}

/// A data-quality request, scoped by projects or by usernames.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawDataQualityParams")]
pub enum DataQualityParams {
    Project(DataQualityProjectParams),
    Username(DataQualityUsernameParams),
}

impl DataQualityParams {
    pub fn issue_types(&self) -> &NonEmpty<IssueType> {
        match self {
            DataQualityParams::Project(params) => params.issue_types(),
            DataQualityParams::Username(params) => params.issue_types(),
        }
    }

    pub fn output_type(&self) -> OutputType {
        match self {
            DataQualityParams::Project(params) => params.output_type(),
            DataQualityParams::Username(params) => params.output_type(),
        }
    }
}

impl TryFrom<RawDataQualityParams> for DataQualityParams {
    type Error = ValidationError;

    fn try_from(raw: RawDataQualityParams) -> Result<Self, Self::Error> {
        let time_range =
            TimeRange::parse_optional(raw.from_timestamp.as_deref(), raw.to_timestamp.as_deref())?;

        match (raw.project_ids.is_empty(), raw.osm_usernames.is_empty()) {
            (false, false) => Err(ValidationError::ConflictingScope(
                "project_ids and osm_usernames",
            )),
            (true, true) => Err(ValidationError::MissingScope("project_ids or osm_usernames")),
            (false, true) => {
                // The project report has no time filter; accepting one would silently ignore it.
                if time_range.is_some() {
                    return Err(ValidationError::ConflictingScope(
                        "project_ids and fromTimestamp/toTimestamp",
                    ));
                }
                DataQualityProjectParams::new(raw.project_ids, raw.issue_types, raw.output_type)
                    .map(DataQualityParams::Project)
            }
            (true, false) => DataQualityUsernameParams::new(
                raw.osm_usernames,
                raw.issue_types,
                time_range,
                raw.output_type,
            )
            .map(DataQualityParams::Username),
        }
    }
}

// Hashtag or geometry scoped report //

/// What the hashtag data-quality report is narrowed to.
#[derive(Debug, Clone, PartialEq)]
pub enum HashtagScope {
    Hashtags(NonEmpty<String>),
    Geometry(Polygon),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawDataQualityHashtagParams")]
pub struct DataQualityHashtagParams {
    scope: HashtagScope,
    issue_types: NonEmpty<IssueType>,
    time_range: TimeRange,
    output_type: OutputType,
}

impl DataQualityHashtagParams {
    pub fn new(
        scope: HashtagScope,
        issue_types: Vec<IssueType>,
        time_range: TimeRange,
        output_type: OutputType,
    ) -> Result<DataQualityHashtagParams, ValidationError> {
        if let HashtagScope::Hashtags(hashtags) = &scope {
            if hashtags.iter().any(|hashtag| hashtag.trim().is_empty()) {
                return Err(ValidationError::EmptyValue("hashtags"));
            }
        }
        Ok(DataQualityHashtagParams {
            scope,
            issue_types: non_empty_issues(issue_types, "issueType")?,
            time_range,
            output_type,
        })
    }

    pub fn scope(&self) -> &HashtagScope {
        &self.scope
    }

    pub fn issue_types(&self) -> &NonEmpty<IssueType> {
        &self.issue_types
    }

    pub fn time_range(&self) -> &TimeRange {
        &self.time_range
    }

    pub fn output_type(&self) -> OutputType {
        self.output_type
    }
}

impl TryFrom<RawDataQualityHashtagParams> for DataQualityHashtagParams {
    type Error = ValidationError;

    fn try_from(raw: RawDataQualityHashtagParams) -> Result<Self, Self::Error> {
        let time_range = TimeRange::parse(&raw.from_timestamp, &raw.to_timestamp)?;
        let hashtags = validate_hashtags(raw.hashtags)?;

        let scope = match (NonEmpty::from_vec(hashtags), raw.geometry) {
            (Some(_), Some(_)) => {
                return Err(ValidationError::ConflictingScope("hashtags and geometry"))
            }
            (None, None) => return Err(ValidationError::MissingScope("hashtags or geometry")),
            (Some(hashtags), None) => HashtagScope::Hashtags(hashtags),
            (None, Some(geometry)) => HashtagScope::Geometry(Polygon::try_from(geometry)?),
        };

        DataQualityHashtagParams::new(scope, raw.issue_type, time_range, raw.output_type)
    }
}

fn non_empty_issues(
    issue_types: Vec<IssueType>,
    field: &'static str,
) -> Result<NonEmpty<IssueType>, ValidationError> {
    NonEmpty::from_vec(issue_types).ok_or(ValidationError::EmptyList(field))
}
