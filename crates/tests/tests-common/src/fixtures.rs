//! SQL scripts that load known data into the test database.

use std::path::PathBuf;

use tokio::sync::{Mutex, MutexGuard};

use query_engine_execution::Database;

/// Tests that load fixtures replace the same tables, so they take turns.
static FIXTURE_LOCK: Mutex<()> = Mutex::const_new(());

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

/// Run the named script from the `fixtures` directory.
pub async fn load_fixture(database: &mut Database, name: &str) {
    let path = fixture_path(name);
    let script = std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("unable to read {}: {err}", path.display()));
    database.execute_batch(&script).await.unwrap();
}

/// Connect and load the named fixture. The guard keeps other fixture tests out
/// until it is dropped.
pub async fn connect_with_fixture(name: &str) -> (MutexGuard<'static, ()>, Database) {
    let guard = FIXTURE_LOCK.lock().await;
    let mut database = crate::database::connect().await;
    load_fixture(&mut database, name).await;
    (guard, database)
}
