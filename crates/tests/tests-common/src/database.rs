//! Connect to the statistics database named by the environment.

use galaxy_configuration::environment::ProcessEnvironment;
use galaxy_configuration::resolve_connection_params;
use query_engine_execution::Database;

use crate::deployment::get_path_from_project_root;

/// Variable naming a configuration file, relative to the project root, to fall
/// back on when the environment holds no connection parameters.
pub const CONFIG_FILE_VARIABLE: &str = "GALAXY_CONFIG_FILE";

/// Open a connection with the parameters found in the environment.
///
/// Panics when no database is configured; tests calling this are `#[ignore]`d.
pub async fn connect() -> Database {
    let _ = env_logger::builder().is_test(true).try_init();

    let configuration_file = std::env::var(CONFIG_FILE_VARIABLE)
        .ok()
        .map(get_path_from_project_root);
    let params = resolve_connection_params(ProcessEnvironment, configuration_file.as_deref())
        .await
        .unwrap();

    Database::connect(&params.connect_options()).await.unwrap()
}
