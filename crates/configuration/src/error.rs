//! Errors that can occur while resolving connection parameters.

use std::path::PathBuf;

use crate::environment;

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error(transparent)]
    Environment(#[from] environment::Error),

    #[error("invalid connection parameters in {variable}: {message}")]
    InvalidConnectionParams { variable: String, message: String },

    #[error("invalid value for {variable}: {message}")]
    InvalidValue { variable: String, message: String },

    #[error("unable to read {file_path}: {message}")]
    IoError { file_path: PathBuf, message: String },

    #[error("parse error in {file_path}: {message}")]
    ParseError { file_path: PathBuf, message: String },

    #[error(
        "no database connection parameters found: set POSTGRES_CONNECTION_PARAMS, \
         the five POSTGRES_* variables, or a [PG] section in the configuration file"
    )]
    NoConnectionParams,
}
