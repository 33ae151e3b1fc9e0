use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use galaxy::report::{execute_plan, shape_report, statement_output_path, ReportOutput};
use galaxy::state;
use galaxy_configuration::environment::ProcessEnvironment;
use query_engine_request::{OutputType, ReportRequest};
use query_engine_translation::translation::query::translate;

/// Statistics reports over the OpenStreetMap history and changeset database.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the SQL statements of a report request.
    Sql {
        /// JSON file holding the report request.
        #[arg(long)]
        request: PathBuf,
        /// Reformat the statements for reading.
        #[arg(long)]
        pretty: bool,
    },
    /// Run a report request against the database.
    Run {
        /// JSON file holding the report request.
        #[arg(long)]
        request: PathBuf,
        /// Output format. Data-quality reports default to the output type of the
        /// request, every other report to JSON.
        #[arg(long, value_enum)]
        format: Option<Format>,
        /// Write the report here instead of standard output. Required for CSV.
        #[arg(long)]
        output: Option<PathBuf>,
        /// TOML file with a `[PG]` section, used when the environment holds no
        /// connection parameters.
        #[arg(long, env = "GALAXY_CONFIG_FILE")]
        config_file: Option<PathBuf>,
        /// Print query metrics to standard error when done.
        #[arg(long)]
        metrics: bool,
    },
    /// Print the JSON schema of the configuration file.
    Schema {
        /// Print the schemas of the report parameters instead.
        #[arg(long)]
        requests: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Csv,
    Geojson,
}

#[tokio::main]
pub async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Sql { request, pretty } => print_sql(&request, pretty).await,
        Command::Run {
            request,
            format,
            output,
            config_file,
            metrics,
        } => {
            run_report(
                &request,
                format,
                output.as_deref(),
                config_file.as_deref(),
                metrics,
            )
            .await
        }
        Command::Schema { requests: false } => {
            let schema = galaxy_configuration::file::configuration_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
        Command::Schema { requests: true } => {
            let mut schemas = serde_json::Map::new();
            for (report, schema) in query_engine_request::report::parameter_schemas() {
                schemas.insert(report.to_string(), serde_json::to_value(schema)?);
            }
            println!("{}", serde_json::to_string_pretty(&schemas)?);
            Ok(())
        }
    }
}

async fn read_request(path: &Path) -> anyhow::Result<ReportRequest> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("unable to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("invalid request in {}", path.display()))
}

async fn print_sql(path: &Path, pretty: bool) -> anyhow::Result<()> {
    let request = read_request(path).await?;
    let plan = translate(&request)?;
    for statement in &plan.statements {
        println!("-- {}: {}", plan.report, statement.name);
        if pretty {
            let formatted = sqlformat::format(
                &statement.sql,
                &sqlformat::QueryParams::None,
                sqlformat::FormatOptions::default(),
            );
            println!("{formatted}");
        } else {
            println!("{}", statement.sql);
        }
    }
    Ok(())
}

fn default_format(request: &ReportRequest) -> Format {
    let output_type = match request {
        ReportRequest::DataQuality(params) => params.output_type(),
        ReportRequest::DataQualityHashtags(params) => params.output_type(),
        _ => return Format::Json,
    };
    match output_type {
        OutputType::Geojson => Format::Geojson,
        OutputType::Csv => Format::Csv,
        OutputType::Json => Format::Json,
    }
}

async fn run_report(
    path: &Path,
    format: Option<Format>,
    output: Option<&Path>,
    config_file: Option<&Path>,
    with_metrics: bool,
) -> anyhow::Result<()> {
    let request = read_request(path).await?;
    let format = format.unwrap_or_else(|| default_format(&request));
    let plan = translate(&request)?;

    let mut registry = prometheus::Registry::new();
    let mut database = state::connect_from_environment(
        ProcessEnvironment,
        config_file,
        with_metrics.then_some(&mut registry),
    )
    .await?;
    let results = execute_plan(&mut database, &plan).await?;
    database.close().await?;

    if format == Format::Csv {
        let output = output.context("CSV output needs --output")?;
        for (statement, result) in results.iter() {
            let path = statement_output_path(output, statement, results.len());
            if result.is_empty() {
                tracing::warn!(statement, path = %path.display(), "no rows to write");
            }
            if !result.write_csv(&path)? {
                tracing::warn!(statement, path = %path.display(), "CSV not written");
            }
        }
    } else {
        let report = shape_report(&request, &results)?;
        let value = match (format, &report) {
            (Format::Geojson, ReportOutput::Issues(issues)) => issues.to_geojson()?,
            (Format::Geojson, _) => {
                anyhow::bail!("GeoJSON output is only available for data-quality reports")
            }
            (_, ReportOutput::Issues(issues)) => issues.to_records(),
            _ => report.to_json_value()?,
        };
        write_json(&value, output).await?;
    }

    if with_metrics {
        let encoded = prometheus::TextEncoder::new().encode_to_string(&registry.gather())?;
        eprint!("{encoded}");
    }
    Ok(())
}

async fn write_json(value: &Value, output: Option<&Path>) -> anyhow::Result<()> {
    let text = serde_json::to_string(value)?;
    match output {
        Some(path) => tokio::fs::write(path, text)
            .await
            .with_context(|| format!("unable to write {}", path.display())),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}
