//! The TOML configuration file.

use std::path::Path;

use schemars::JsonSchema;
use serde::Deserialize;
use tokio::fs;

use crate::error::ConfigurationError;
use crate::values::{Port, Secret};

/// ```toml
/// [PG]
/// host = "localhost"
/// port = 5432
/// user = "postgres"
/// password = { variable = "PGPASSWORD" }
/// database = "insights"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct ConfigurationFile {
    #[serde(rename = "PG")]
    pub pg: Option<PgSection>,
}

/// The `[PG]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct PgSection {
    pub host: String,
    #[serde(default)]
    pub port: Port,
    #[serde(alias = "username")]
    pub user: String,
    pub password: Secret,
    #[serde(alias = "dbname")]
    pub database: String,
}

/// Read and parse a configuration file.
pub async fn parse_configuration_file(
    path: impl AsRef<Path>,
) -> Result<ConfigurationFile, ConfigurationError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .await
        .map_err(|err| ConfigurationError::IoError {
            file_path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    toml::from_str(&contents).map_err(|err| ConfigurationError::ParseError {
        file_path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// The JSON schema of the configuration file.
pub fn configuration_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(ConfigurationFile)
}
