//! Connection setup.

use tracing::{info_span, Instrument};

use galaxy_configuration::environment::Environment;
use galaxy_configuration::{resolve_connection_params, ConnectionParams};
use query_engine_execution::{metrics, Database};

use crate::error::Error;

/// Open a connection, recording query metrics in the registry when one is given.
pub async fn connect(
    params: &ConnectionParams,
    metrics_registry: Option<&mut prometheus::Registry>,
) -> Result<Database, Error> {
    let metrics = match metrics_registry {
        Some(registry) => Some(
            async { metrics::initialise_metrics(registry) }
                .instrument(info_span!("Setup metrics"))
                .await?,
        ),
        None => None,
    };

    let database = Database::connect(&params.connect_options()).await?;
    tracing::info!(host = %params.host, database = %params.database, "connected");

    Ok(match metrics {
        Some(metrics) => database.with_metrics(metrics),
        None => database,
    })
}

/// Resolve the connection parameters from the environment or the configuration
/// file, then open a connection.
pub async fn connect_from_environment(
    environment: impl Environment,
    configuration_file: Option<&std::path::Path>,
    metrics_registry: Option<&mut prometheus::Registry>,
) -> Result<Database, Error> {
    let params = resolve_connection_params(environment, configuration_file)
        .instrument(info_span!("Resolve connection parameters"))
        .await?;
    connect(&params, metrics_registry).await
}
