//! Pick the connection parameters from the first source that provides all of them.
//!
//! Sources, in order:
//! 1. `POSTGRES_CONNECTION_PARAMS`, a JSON object of credentials;
//! 2. `POSTGRES_USER`, `POSTGRES_PASSWORD`, `POSTGRES_HOST`, `POSTGRES_PORT` and
//!    `POSTGRES_DATABASE`, all five of them;
//! 3. the `[PG]` section of the configuration file.

use std::path::Path;

use crate::connection::ConnectionParams;
use crate::environment::{Environment, Variable};
use crate::error::ConfigurationError;
use crate::file::{parse_configuration_file, PgSection};
use crate::values::Port;

pub const CONNECTION_PARAMS_VARIABLE: &str = "POSTGRES_CONNECTION_PARAMS";
pub const USER_VARIABLE: &str = "POSTGRES_USER";
pub const PASSWORD_VARIABLE: &str = "POSTGRES_PASSWORD";
pub const HOST_VARIABLE: &str = "POSTGRES_HOST";
pub const PORT_VARIABLE: &str = "POSTGRES_PORT";
pub const DATABASE_VARIABLE: &str = "POSTGRES_DATABASE";

/// Keys a managed database service adds to its credentials blob that are not
/// connection parameters.
const VENDOR_KEYS: [&str; 2] = ["dbinstanceidentifier", "engine"];

/// Resolve the connection parameters.
pub async fn resolve_connection_params(
    environment: impl Environment,
    configuration_file: Option<&Path>,
) -> Result<ConnectionParams, ConfigurationError> {
    if let Some(params) = from_json_variable(&environment)? {
        tracing::debug!(
            source = CONNECTION_PARAMS_VARIABLE,
            "using connection parameters"
        );
        return Ok(params);
    }

    if let Some(params) = from_discrete_variables(&environment)? {
        tracing::debug!(
            source = "POSTGRES_* variables",
            "using connection parameters"
        );
        return Ok(params);
    }

    if let Some(path) = configuration_file {
        let file = parse_configuration_file(path).await?;
        if let Some(section) = file.pg {
            tracing::debug!(source = %path.display(), "using connection parameters");
            return from_section(&section, &environment);
        }
    }

    Err(ConfigurationError::NoConnectionParams)
}

fn from_json_variable(
    environment: &impl Environment,
) -> Result<Option<ConnectionParams>, ConfigurationError> {
    let Some(text) = environment.read_optional(&Variable::from(CONNECTION_PARAMS_VARIABLE))?
    else {
        return Ok(None);
    };

    let invalid = |message: String| ConfigurationError::InvalidConnectionParams {
        variable: CONNECTION_PARAMS_VARIABLE.to_string(),
        message,
    };

    let mut value: serde_json::Value =
        serde_json::from_str(&text).map_err(|err| invalid(err.to_string()))?;
    let object = value
        .as_object_mut()
        .ok_or_else(|| invalid("expected a JSON object".to_string()))?;
    for key in VENDOR_KEYS {
        object.remove(key);
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|err| invalid(err.to_string()))
}

fn from_discrete_variables(
    environment: &impl Environment,
) -> Result<Option<ConnectionParams>, ConfigurationError> {
    let mut values = Vec::with_capacity(5);
    for name in [
        USER_VARIABLE,
        PASSWORD_VARIABLE,
        HOST_VARIABLE,
        PORT_VARIABLE,
        DATABASE_VARIABLE,
    ] {
        match environment.read_optional(&Variable::from(name))? {
            Some(value) => values.push(value),
            None => {
                if !values.is_empty() {
                    tracing::debug!(missing = name, "ignoring incomplete POSTGRES_* variables");
                }
                return Ok(None);
            }
        }
    }

    let [user, password, host, port, database]: [String; 5] = values
        .try_into()
        .map_err(|_| ConfigurationError::NoConnectionParams)?;
    let port = port
        .parse::<Port>()
        .map_err(|message| ConfigurationError::InvalidValue {
            variable: PORT_VARIABLE.to_string(),
            message,
        })?;

    Ok(Some(ConnectionParams {
        host,
        port,
        user,
        password,
        database,
    }))
}

fn from_section(
    section: &PgSection,
    environment: &impl Environment,
) -> Result<ConnectionParams, ConfigurationError> {
    Ok(ConnectionParams {
        host: section.host.clone(),
        port: section.port,
        user: section.user.clone(),
        password: section.password.resolve(environment)?,
        database: section.database.clone(),
    })
}
