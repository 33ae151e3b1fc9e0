//! Database connection parameters.

use schemars::JsonSchema;
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

use crate::values::Port;

/// Everything needed to open a connection to the statistics database.
#[derive(Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ConnectionParams {
    pub host: String,
    #[serde(default)]
    pub port: Port,
    #[serde(alias = "username")]
    pub user: String,
    pub password: String,
    #[serde(alias = "dbname")]
    pub database: String,
}

impl ConnectionParams {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port.0)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

impl std::fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("port", &self.port.0)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}
