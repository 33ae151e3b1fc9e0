use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;

fn golden_directory(testname: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/goldenfiles")
        .join(testname)
}

/// Read the request parameters of a golden test.
pub fn read_request<T: DeserializeOwned>(testname: &str) -> T {
    let path = golden_directory(testname).join("request.json");
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("unable to read {}: {err}", path.display()));
    serde_json::from_str(&text)
        .unwrap_or_else(|err| panic!("unable to parse {}: {err}", path.display()))
}

/// Read the statement a golden test expects, byte for byte.
pub fn expected_sql(testname: &str) -> String {
    let path = golden_directory(testname).join("expected.sql");
    fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("unable to read {}: {err}", path.display()))
}
