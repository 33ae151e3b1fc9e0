//! Assemble complete statements for each report.

pub mod data_quality;
pub mod mapathon;
pub mod user_stats;

use query_engine_request::ReportRequest;

use super::error::Error;

/// One statement of a report, named after the result it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub name: &'static str,
    pub sql: String,
}

/// The statements to run, in order, to produce a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub report: &'static str,
    pub statements: Vec<Statement>,
}

/// Translate a report request into the statements that produce it.
pub fn translate(request: &ReportRequest) -> Result<ExecutionPlan, Error> {
    let statements = match request {
        ReportRequest::MapathonSummary(params) => {
            let changesets = mapathon::changeset_query(params);
            vec![
                Statement {
                    name: "summary",
                    sql: mapathon::osm_history_query(&changesets, false),
                },
                Statement {
                    name: "total_contributors",
                    sql: mapathon::total_contributors_query(&changesets),
                },
            ]
        }
        ReportRequest::MapathonDetail(params) => {
            let changesets = mapathon::changeset_query(params);
            vec![
                Statement {
                    name: "contributed_features",
                    sql: mapathon::osm_history_query(&changesets, true),
                },
                Statement {
                    name: "contributors",
                    sql: mapathon::users_contributions_query(params, &changesets),
                },
            ]
        }
        ReportRequest::UserStatistics(params) => vec![Statement {
            name: "user_statistics",
            sql: user_stats::user_statistics(params),
        }],
        ReportRequest::DataQuality(params) => vec![Statement {
            name: "issues",
            sql: data_quality::report_query(params),
        }],
        ReportRequest::DataQualityHashtags(params) => vec![Statement {
            name: "issues",
            sql: data_quality::hashtag_query(params)?,
        }],
    };

    tracing::debug!(
        report = request.name(),
        statements = statements.len(),
        "translated report request"
    );

    Ok(ExecutionPlan {
        report: request.name(),
        statements,
    })
}
