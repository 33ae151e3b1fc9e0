//! Galaxy: statistics reports over the OpenStreetMap history and changeset
//! database.
//!
//! A report request is validated into typed parameters, translated into an
//! [`ExecutionPlan`](query_engine_translation::translation::query::ExecutionPlan)
//! of SQL statements, run on one connection and shaped into a [`ReportOutput`].

pub mod error;
pub mod report;
pub mod state;

pub use error::Error;
pub use report::{
    execute_plan, run_report, shape_report, statement_output_path, PlanResults, ReportOutput,
};
