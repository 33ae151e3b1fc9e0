//! Errors for query execution.

/// A type for execution errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("unable to decode column '{column}' of type {type_name}: {source}")]
    Decode {
        column: String,
        type_name: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("column '{0}' is not part of the result")]
    MissingColumn(String),
    #[error("unable to convert rows: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unable to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to register metrics: {0}")]
    Metrics(#[from] prometheus::Error),
}
