//! Paths relative to the project root.

use std::path::PathBuf;

/// Find the project root via the crate root provided by `cargo test`.
/// This depends on the convention that all our crates live in `/crates/<group>/<name>`.
pub fn get_path_from_project_root(path: impl AsRef<std::path::Path>) -> PathBuf {
    let mut d = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    d.push("../../../");
    d.push(path);
    d
}
