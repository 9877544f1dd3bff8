//! CLI entry point for the air-quality summary tool.
//!
//! Reads a JSON batch of sensor readings from a file, stdin, or the built-in
//! sample, then reports per-field averages and the highest pollutant per hour.

use air_quality_stats::{
    output::{Format, append_record, report_lines},
    stats::summarize,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::io::Read;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const SAMPLE_READINGS: &[u8] = include_bytes!("../tests/fixtures/sample_readings.json");

#[derive(Parser)]
#[command(name = "air_quality_stats")]
#[command(about = "Summarize a batch of air-quality sensor readings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print field averages and the highest pollutant per hour
    Summarize {
        /// Path to a JSON file, or `-` for stdin. Uses the built-in sample when omitted
        #[arg(value_name = "FILE")]
        source: Option<String>,

        /// Report format written to stdout
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Optional CSV file to append hourly results to
        #[arg(long)]
        csv_output: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/air_quality_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("air_quality_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize {
            source,
            format,
            csv_output,
        } => {
            let bytes = load(source.as_deref())?;

            let report = summarize(&bytes);
            for line in report_lines(&report, format)? {
                println!("{line}");
            }

            let summary = match report {
                Ok(summary) => summary,
                Err(e) => {
                    error!(error = %e, "Reading parse failed");
                    drop(file_guard);
                    std::process::exit(1);
                }
            };
            info!(readings = summary.reading_count, "Readings summarized");

            if let Some(path) = csv_output {
                append_record(&path, &summary)?;
                info!(path, "Hourly results appended");
            }
        }
    }

    Ok(())
}

/// Loads the payload from a file path, stdin (`-`), or the built-in sample.
#[tracing::instrument]
fn load(source: Option<&str>) -> Result<Vec<u8>> {
    let bytes = match source {
        None => SAMPLE_READINGS.to_vec(),
        Some("-") => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            buf
        }
        Some(path) => std::fs::read(path)?,
    };
    Ok(bytes)
}
