//! Run report requests and shape their results.

pub mod data_quality;
pub mod mapathon;
pub mod user_stats;

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info_span, Instrument};

use query_engine_execution::{Database, ResultSet};
use query_engine_request::ReportRequest;
use query_engine_translation::translation::query::{translate, ExecutionPlan};

use crate::error::Error;

pub use data_quality::IssueReport;
pub use mapathon::{
    FeatureCount, MapathonDetail, MapathonSummary, UserContribution, UserFeatureCount,
};

/// The result sets of an executed plan, by statement name.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanResults {
    report: &'static str,
    results: Vec<(&'static str, ResultSet)>,
}

impl PlanResults {
    pub fn new(report: &'static str, results: Vec<(&'static str, ResultSet)>) -> PlanResults {
        PlanResults { report, results }
    }

    pub fn report(&self) -> &'static str {
        self.report
    }

    pub fn get(&self, statement: &'static str) -> Result<&ResultSet, Error> {
        self.results
            .iter()
            .find(|(name, _)| *name == statement)
            .map(|(_, result)| result)
            .ok_or_else(|| Error::UnexpectedResult {
                statement,
                message: format!("no such statement in {}", self.report),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ResultSet)> {
        self.results.iter().map(|(name, result)| (*name, result))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A finished report.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutput {
    MapathonSummary(MapathonSummary),
    MapathonDetail(MapathonDetail),
    UserStatistics(Vec<FeatureCount>),
    Issues(IssueReport),
}

impl ReportOutput {
    /// The report as a JSON document. Issue reports follow their requested output
    /// type, a GeoJSON `FeatureCollection` or a list of records.
    pub fn to_json_value(&self) -> Result<Value, Error> {
        let value = match self {
            ReportOutput::MapathonSummary(summary) => serde_json::to_value(summary),
            ReportOutput::MapathonDetail(detail) => serde_json::to_value(detail),
            ReportOutput::UserStatistics(statistics) => serde_json::to_value(statistics),
            ReportOutput::Issues(issues) => return issues.to_json_value(),
        };
        value.map_err(|err| Error::Execution(err.into()))
    }
}

/// Run the statements of a plan in order on one connection.
pub async fn execute_plan(
    database: &mut Database,
    plan: &ExecutionPlan,
) -> Result<PlanResults, Error> {
    let mut results = Vec::with_capacity(plan.statements.len());
    for statement in &plan.statements {
        let result = database
            .execute(&statement.sql)
            .instrument(info_span!("Run statement", statement = statement.name))
            .await?;
        tracing::debug!(
            statement = statement.name,
            rows = result.len(),
            "statement done"
        );
        results.push((statement.name, result));
    }
    Ok(PlanResults::new(plan.report, results))
}

/// Shape the results of an executed plan into the report the request asked for.
pub fn shape_report(request: &ReportRequest, results: &PlanResults) -> Result<ReportOutput, Error> {
    Ok(match request {
        ReportRequest::MapathonSummary(_) => {
            ReportOutput::MapathonSummary(mapathon::summary(results)?)
        }
        ReportRequest::MapathonDetail(_) => {
            ReportOutput::MapathonDetail(mapathon::detail(results)?)
        }
        ReportRequest::UserStatistics(_) => {
            ReportOutput::UserStatistics(user_stats::statistics(results)?)
        }
        ReportRequest::DataQuality(params) => {
            ReportOutput::Issues(data_quality::issues(results, params.output_type())?)
        }
        ReportRequest::DataQualityHashtags(params) => {
            ReportOutput::Issues(data_quality::hashtag_issues(results, params.output_type())?)
        }
    })
}

/// Translate, execute and shape a report request.
pub async fn run_report(
    database: &mut Database,
    request: &ReportRequest,
) -> Result<ReportOutput, Error> {
    let plan = async { translate(request) }
        .instrument(info_span!("Plan query", report = request.name()))
        .await?;
    let results = execute_plan(database, &plan).await?;
    shape_report(request, &results)
}

/// Where to write the CSV of one statement: `output` itself when the plan has a
/// single statement, otherwise `output` with the statement name appended to its
/// file stem.
pub fn statement_output_path(output: &Path, statement: &str, statements: usize) -> PathBuf {
    if statements <= 1 {
        return output.to_path_buf();
    }
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match output.extension() {
        Some(extension) => format!("{stem}_{statement}.{}", extension.to_string_lossy()),
        None => format!("{stem}_{statement}"),
    };
    output.with_file_name(file_name)
}
