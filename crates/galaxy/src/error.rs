//! Errors raised while producing a report.

use thiserror::Error;

use galaxy_configuration::ConfigurationError;
use query_engine_request::ValidationError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),
    #[error("unable to translate request: {0}")]
    Translation(#[from] query_engine_translation::translation::error::Error),
    #[error(transparent)]
    Execution(#[from] query_engine_execution::Error),
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("unexpected result for {statement}: {message}")]
    UnexpectedResult {
        statement: &'static str,
        message: String,
    },
}
