//! Run one statement and deliver its result in the requested representation.

use std::path::Path;

use serde_json::Value;

use crate::database::Database;
use crate::error::Error;
use crate::result::ResultSet;

/// A statement bound to the connection it runs on. Every conversion executes the
/// statement afresh.
pub struct Output<'a> {
    query: String,
    database: &'a mut Database,
}

impl<'a> Output<'a> {
    pub fn new(query: impl Into<String>, database: &'a mut Database) -> Output<'a> {
        Output {
            query: query.into(),
            database,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub async fn to_result_set(&mut self) -> Result<ResultSet, Error> {
        self.database.execute(&self.query).await
    }

    /// Rows as lists of values in selected column order.
    pub async fn to_list(&mut self) -> Result<Vec<Vec<Value>>, Error> {
        Ok(self.to_result_set().await?.into_rows())
    }

    pub async fn to_json(&mut self) -> Result<String, Error> {
        self.to_result_set().await?.to_json()
    }

    /// Write the rows to `path` as CSV; returns whether the file holds data.
    pub async fn to_csv(&mut self, path: &Path) -> Result<bool, Error> {
        self.to_result_set().await?.write_csv(path)
    }

    pub async fn to_geojson(&mut self, x_column: &str, y_column: &str) -> Result<Value, Error> {
        self.to_result_set().await?.to_geojson(x_column, y_column)
    }
}
