//! Validation issue codes and report output formats.

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A validation status code as stored in the `status` array of the `validation` table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Sequence,
)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Badgeom,
    Badvalue,
    Notags,
    Complete,
    Incomplete,
    Orphan,
    Overlaping,
    Duplicate,
}

impl IssueType {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueType::Badgeom => "badgeom",
            IssueType::Badvalue => "badvalue",
            IssueType::Notags => "notags",
            IssueType::Complete => "complete",
            IssueType::Incomplete => "incomplete",
            IssueType::Orphan => "orphan",
            IssueType::Overlaping => "overlaping",
            IssueType::Duplicate => "duplicate",
        }
    }

    /// Every known code, in declaration order.
    pub fn codes() -> Vec<&'static str> {
        enum_iterator::all::<IssueType>()
            .map(IssueType::as_str)
            .collect()
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IssueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        enum_iterator::all::<IssueType>()
            .find(|issue| issue.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown issue type '{s}', expected one of: {}",
                    IssueType::codes().join(", ")
                )
            })
    }
}

/// The representation a report should be delivered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    #[default]
    Geojson,
    Csv,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_serde() {
        for code in IssueType::codes() {
            let issue: IssueType = serde_json::from_value(serde_json::json!(code)).unwrap();
            assert_eq!(issue.as_str(), code);
        }
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert!("badtags".parse::<IssueType>().is_err());
        assert_eq!("badgeom".parse::<IssueType>(), Ok(IssueType::Badgeom));
    }
}
