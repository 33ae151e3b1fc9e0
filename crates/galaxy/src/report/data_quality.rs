//! Data-quality issue reports.

use std::path::Path;

use serde_json::Value;

use query_engine_execution::ResultSet;
use query_engine_request::OutputType;

use super::PlanResults;
use crate::error::Error;

/// Issues found by the validation pipeline, in the output type of the request.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueReport {
    output_type: OutputType,
    x_column: &'static str,
    y_column: &'static str,
    result: ResultSet,
}

impl IssueReport {
    pub fn output_type(&self) -> OutputType {
        self.output_type
    }

    pub fn result(&self) -> &ResultSet {
        &self.result
    }

    /// A `FeatureCollection` with one point per issue.
    pub fn to_geojson(&self) -> Result<Value, Error> {
        Ok(self.result.to_geojson(self.x_column, self.y_column)?)
    }

    /// The JSON rendering of the requested output type. CSV reports become a list
    /// of records.
    pub fn to_json_value(&self) -> Result<Value, Error> {
        match self.output_type {
            OutputType::Geojson => self.to_geojson(),
            OutputType::Csv | OutputType::Json => Ok(self.to_records()),
        }
    }

    /// The issues as a list of records.
    pub fn to_records(&self) -> Value {
        Value::Array(
            self.result
                .to_records()
                .into_iter()
                .map(Value::Object)
                .collect(),
        )
    }

    /// Write the issues to `path`; returns whether the file holds data.
    pub fn write_csv(&self, path: &Path) -> Result<bool, Error> {
        Ok(self.result.write_csv(path)?)
    }
}

/// Issues of the project or username report, located by `lng` and `lat`.
pub fn issues(results: &PlanResults, output_type: OutputType) -> Result<IssueReport, Error> {
    Ok(IssueReport {
        output_type,
        x_column: "lng",
        y_column: "lat",
        result: results.get("issues")?.clone(),
    })
}

/// Issues of the hashtag report. Its `lat` column holds the x coordinate and `lon`
/// the y coordinate.
pub fn hashtag_issues(
    results: &PlanResults,
    output_type: OutputType,
) -> Result<IssueReport, Error> {
    Ok(IssueReport {
        output_type,
        x_column: "lat",
        y_column: "lon",
        result: results.get("issues")?.clone(),
    })
}
