//! The rows fetched for one statement and the representations they can be shaped into.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::error::Error;

/// Column names and rows of a fetched statement, both in the order the database
/// returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> ResultSet {
        ResultSet { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// The raw rows, values in selected column order.
    pub fn into_rows(self) -> Vec<Vec<Value>> {
        self.rows
    }

    /// One object per row mapping column names to values, keys in column order.
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect::<Map<String, Value>>()
            })
            .collect()
    }

    /// The records as a compact JSON array: `[{"feature":"building","action":"create","count":78}]`.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(&self.to_records())?)
    }

    /// Deserialize every record into `T`.
    pub fn deserialize_rows<T: DeserializeOwned>(&self) -> Result<Vec<T>, Error> {
        self.to_records()
            .into_iter()
            .map(|record| Ok(serde_json::from_value(Value::Object(record))?))
            .collect()
    }

    /// Write a header line of column names followed by one line per row.
    ///
    /// Returns whether the file exists and holds data once written. Without column
    /// names there is nothing to write and no file is created.
    pub fn write_csv(&self, path: &Path) -> Result<bool, Error> {
        if self.columns.is_empty() {
            tracing::debug!(path = %path.display(), "no columns, CSV not written");
            return Ok(false);
        }

        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(csv_field))?;
        }
        writer.flush()?;

        let written = fs::metadata(path)
            .map(|metadata| metadata.is_file() && metadata.len() > 0)
            .unwrap_or(false);
        tracing::debug!(path = %path.display(), rows = self.rows.len(), written, "wrote CSV");
        Ok(written)
    }

    /// A GeoJSON `FeatureCollection` with one `Point` per row, located by the two
    /// coordinate columns; every other column becomes a property.
    ///
    /// Rows whose coordinates are not both numbers get a `null` geometry.
    pub fn to_geojson(&self, x_column: &str, y_column: &str) -> Result<Value, Error> {
        // Without rows the column names are unknown.
        if self.rows.is_empty() {
            return Ok(json!({
                "type": "FeatureCollection",
                "features": [],
            }));
        }

        let x_index = self
            .column_index(x_column)
            .ok_or_else(|| Error::MissingColumn(x_column.to_string()))?;
        let y_index = self
            .column_index(y_column)
            .ok_or_else(|| Error::MissingColumn(y_column.to_string()))?;

        let features = self
            .rows
            .iter()
            .map(|row| {
                let geometry = match (&row[x_index], &row[y_index]) {
                    (Value::Number(x), Value::Number(y)) => json!({
                        "type": "Point",
                        "coordinates": [x, y],
                    }),
                    _ => Value::Null,
                };
                let properties = self
                    .columns
                    .iter()
                    .zip(row)
                    .enumerate()
                    .filter(|(index, _)| *index != x_index && *index != y_index)
                    .map(|(_, (column, value))| (column.clone(), value.clone()))
                    .collect::<Map<String, Value>>();
                json!({
                    "type": "Feature",
                    "geometry": geometry,
                    "properties": properties,
                })
            })
            .collect::<Vec<_>>();

        Ok(json!({
            "type": "FeatureCollection",
            "features": features,
        }))
    }
}

fn csv_field(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
