//! Metrics setup and update for query execution.

use std::time::Duration;

use prometheus::core::{AtomicU64, GenericCounter};
use prometheus::Histogram;

use crate::error::Error;

#[derive(Debug, Clone)]
pub struct Metrics {
    pub query_total: GenericCounter<AtomicU64>,
    pub query_errors_total: GenericCounter<AtomicU64>,
    pub query_duration_seconds: Histogram,
}

impl Metrics {
    /// Record one statement execution.
    pub fn record_query(&self, duration: Duration, succeeded: bool) {
        self.query_duration_seconds.observe(duration.as_secs_f64());
        if succeeded {
            self.query_total.inc();
        } else {
            self.query_errors_total.inc();
        }
    }
}

/// Create a new int counter metric and register it with the provided Prometheus Registry
fn add_int_counter_metric(
    metrics_registry: &mut prometheus::Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<GenericCounter<AtomicU64>, Error> {
    let int_counter =
        prometheus::IntCounter::with_opts(prometheus::Opts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(int_counter.clone()))?;
    Ok(int_counter)
}

/// Create a new histogram metric and register it with the provided Prometheus Registry
fn add_histogram_metric(
    metrics_registry: &mut prometheus::Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<Histogram, Error> {
    let histogram = prometheus::Histogram::with_opts(prometheus::HistogramOpts::new(
        metric_name,
        metric_description,
    ))?;
    metrics_registry.register(Box::new(histogram.clone()))?;
    Ok(histogram)
}

/// Setup the counters and histogram used to produce Prometheus metrics
pub fn initialise_metrics(metrics_registry: &mut prometheus::Registry) -> Result<Metrics, Error> {
    let query_total = add_int_counter_metric(
        metrics_registry,
        "galaxy_query_total",
        "Total successful queries.",
    )?;

    let query_errors_total = add_int_counter_metric(
        metrics_registry,
        "galaxy_query_errors_total",
        "Total queries that failed.",
    )?;

    let query_duration_seconds = add_histogram_metric(
        metrics_registry,
        "galaxy_query_duration_seconds",
        "Time taken to execute a query and fetch its rows, in seconds.",
    )?;

    Ok(Metrics {
        query_total,
        query_errors_total,
        query_duration_seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_successes_and_failures() {
        let mut registry = prometheus::Registry::new();
        let metrics = initialise_metrics(&mut registry).unwrap();

        metrics.record_query(Duration::from_millis(5), true);
        metrics.record_query(Duration::from_millis(7), false);

        assert_eq!(metrics.query_total.get(), 1);
        assert_eq!(metrics.query_errors_total.get(), 1);
        assert_eq!(metrics.query_duration_seconds.get_sample_count(), 2);
    }

    #[test]
    fn metrics_register_once_per_registry() {
        let mut registry = prometheus::Registry::new();
        initialise_metrics(&mut registry).unwrap();
        assert!(matches!(initialise_metrics(&mut registry), Err(Error::Metrics(_))));
    }
}
