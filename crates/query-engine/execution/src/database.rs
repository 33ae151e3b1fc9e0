//! A single connection to the statistics database.
//!
//! Statements are sent as plain text on the simple query protocol, one at a time;
//! rows therefore arrive in text format and are decoded by their column type.

use std::time::Instant;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgRow};
use sqlx::{Column, Connection, Executor, PgConnection, Row, TypeInfo};
use tracing::{info_span, Instrument};

use crate::error::Error;
use crate::metrics::Metrics;
use crate::result::ResultSet;

/// An open connection. Statements run sequentially; each call completes before the
/// next one starts.
#[derive(Debug)]
pub struct Database {
    connection: PgConnection,
    metrics: Option<Metrics>,
}

impl Database {
    /// Open a connection.
    pub async fn connect(options: &PgConnectOptions) -> Result<Database, Error> {
        let connection = PgConnection::connect_with(options)
            .instrument(info_span!("Connect to database"))
            .await?;
        Ok(Database {
            connection,
            metrics: None,
        })
    }

    /// Record execution metrics from now on.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Metrics) -> Database {
        self.metrics = Some(metrics);
        self
    }

    /// Execute one statement and fetch all of its rows.
    pub async fn execute(&mut self, sql: &str) -> Result<ResultSet, Error> {
        tracing::info!(generated_sql = sql, "executing query");

        let start = Instant::now();
        let rows = (&mut self.connection)
            .fetch_all(sql)
            .instrument(info_span!("Database request"))
            .await;
        if let Some(metrics) = &self.metrics {
            metrics.record_query(start.elapsed(), rows.is_ok());
        }

        let rows = rows.map_err(|err| {
            tracing::error!(error = %err, "query failed");
            Error::Database(err)
        })?;

        if rows.is_empty() {
            return Ok(ResultSet::new(self.describe_columns(sql).await, vec![]));
        }

        async { rows_to_result_set(&rows) }
            .instrument(info_span!("Decode rows", rows = rows.len()))
            .await
    }

    /// Column names of a statement, from its description. Used when there is no
    /// row to read them from.
    async fn describe_columns(&mut self, sql: &str) -> Vec<String> {
        match (&mut self.connection)
            .describe(sql)
            .instrument(info_span!("Describe statement"))
            .await
        {
            Ok(describe) => describe
                .columns()
                .iter()
                .map(|column| column.name().to_string())
                .collect(),
            Err(err) => {
                tracing::warn!(error = %err, "unable to describe statement");
                Vec::new()
            }
        }
    }

    /// Execute a script of one or more statements, discarding any rows.
    ///
    /// Returns the number of rows affected by all statements.
    pub async fn execute_batch(&mut self, sql: &str) -> Result<u64, Error> {
        let result = (&mut self.connection)
            .execute(sql)
            .instrument(info_span!("Execute script"))
            .await?;
        Ok(result.rows_affected())
    }

    /// Close the connection gracefully.
    pub async fn close(self) -> Result<(), Error> {
        self.connection.close().await?;
        Ok(())
    }
}

fn rows_to_result_set(rows: &[PgRow]) -> Result<ResultSet, Error> {
    let columns = rows
        .first()
        .map(|row| {
            row.columns()
                .iter()
                .map(|column| column.name().to_string())
                .collect()
        })
        .unwrap_or_default();

    let rows = rows
        .iter()
        .map(|row| {
            row.columns()
                .iter()
                .map(|column| decode_cell(row, column))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ResultSet::new(columns, rows))
}

/// ISO-8601 with fractional seconds only when there are any.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Convert a cell to JSON according to the type of its column. Unknown types are
/// read as their text representation.
fn decode_cell(row: &PgRow, column: &sqlx::postgres::PgColumn) -> Result<Value, Error> {
    let index = column.ordinal();
    let type_name = column.type_info().name();

    let decoded = match type_name {
        "INT2" => row.try_get::<Option<i16>, _>(index).map(|v| v.map(Value::from)),
        "INT4" => row.try_get::<Option<i32>, _>(index).map(|v| v.map(Value::from)),
        "INT8" => row.try_get::<Option<i64>, _>(index).map(|v| v.map(Value::from)),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)
            .map(|v| v.map(|float| float_value(f64::from(float)))),
        "FLOAT8" => row
            .try_get::<Option<f64>, _>(index)
            .map(|v| v.map(float_value)),
        "NUMERIC" => row
            .try_get::<Option<Decimal>, _>(index)
            .map(|v| v.map(decimal_value)),
        "BOOL" => row.try_get::<Option<bool>, _>(index).map(|v| v.map(Value::from)),
        "TIMESTAMP" => row
            .try_get::<Option<chrono::NaiveDateTime>, _>(index)
            .map(|v| {
                v.map(|timestamp| Value::from(timestamp.format(TIMESTAMP_FORMAT).to_string()))
            }),
        "TIMESTAMPTZ" => row
            .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(index)
            .map(|v| v.map(|timestamp| Value::from(timestamp.to_rfc3339()))),
        "DATE" => row
            .try_get::<Option<chrono::NaiveDate>, _>(index)
            .map(|v| v.map(|date| Value::from(date.to_string()))),
        "TEXT[]" | "VARCHAR[]" => row
            .try_get::<Option<Vec<String>>, _>(index)
            .map(|v| v.map(Value::from)),
        "JSON" | "JSONB" => row.try_get::<Option<Value>, _>(index),
        _ => row
            .try_get_unchecked::<Option<String>, _>(index)
            .map(|v| v.map(Value::from)),
    };

    decoded
        .map(|value| value.unwrap_or(Value::Null))
        .map_err(|source| Error::Decode {
            column: column.name().to_string(),
            type_name: type_name.to_string(),
            source,
        })
}

fn float_value(float: f64) -> Value {
    serde_json::Number::from_f64(float).map_or(Value::Null, Value::Number)
}

/// Whole numbers (such as `SUM` of integers) become JSON integers.
fn decimal_value(decimal: Decimal) -> Value {
    if decimal.scale() == 0 {
        if let Some(integer) = decimal.to_i64() {
            return Value::from(integer);
        }
    }
    decimal.to_f64().map_or(Value::Null, float_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_decimals_are_integers() {
        assert_eq!(decimal_value(Decimal::new(827, 0)), Value::from(827));
        assert_eq!(decimal_value(Decimal::new(15, 1)), serde_json::json!(1.5));
    }

    #[test]
    fn non_finite_floats_are_null() {
        assert_eq!(float_value(f64::NAN), Value::Null);
        assert_eq!(float_value(2.5), serde_json::json!(2.5));
    }
}
