//! CLI entry point for the bike rental dashboard.
//!
//! Loads the cleaned daily dataset once, applies the selected date range,
//! and prints or exports the resulting summaries.

use anyhow::{Context, Result};
use bike_rental_dashboard::{
    DateRange, RentalTable,
    config::DashboardConfig,
    filter_by_date,
    output::{Report, export_summary, print_pretty, render_json},
    summarize,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bike_dashboard")]
#[command(about = "Summarize daily bike rental counts over a date range", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Dataset CSV (overrides config and DASHBOARD_DATA_PATH)
    #[arg(long, global = true, value_name = "FILE")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RangeArgs {
    /// First day to include (YYYY-MM-DD); defaults to the earliest date
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD); defaults to the latest date
    #[arg(long)]
    end: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print headline totals and every summary table
    Summary {
        #[command(flatten)]
        range: RangeArgs,

        /// Emit JSON instead of the text report
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write each summary table to its own CSV file
    Export {
        #[command(flatten)]
        range: RangeArgs,

        /// Directory to write CSV files into
        #[arg(short, long, default_value = "summaries")]
        output_dir: PathBuf,
    },
    /// Print the first and last date in the dataset
    Range,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bike_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bike_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

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

    let mut config = DashboardConfig::resolve(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }
    if !config.logo_path.exists() {
        warn!(path = %config.logo_path.display(), "Logo asset not found");
    }

    let table = RentalTable::from_path(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;

    match cli.command {
        Commands::Summary { range, json } => {
            let range = select_range(&table, &range);
            let summary = summarize(filter_by_date(&table, range));
            print_pretty(&summary);

            if json {
                println!("{}", render_json(&summary)?);
            } else {
                let report = Report {
                    summary: &summary,
                    range,
                    year_labels: &config.year_labels,
                };
                print!("{}", report);
            }
        }
        Commands::Export { range, output_dir } => {
            let range = select_range(&table, &range);
            let summary = summarize(filter_by_date(&table, range));
            if summary.is_empty() {
                warn!(%range, "No data in selected range, exporting empty tables");
            }

            for path in export_summary(&output_dir, &summary)? {
                println!("{}", path.display());
            }
        }
        Commands::Range => {
            println!("{} {}", table.min_date(), table.max_date());
        }
    }

    Ok(())
}

/// Resolves the requested range against the dataset: missing ends default
/// to the observed bounds, and out-of-range ends are clamped.
fn select_range(table: &RentalTable, args: &RangeArgs) -> DateRange {
    let requested = DateRange::new(
        args.start.unwrap_or(table.min_date()),
        args.end.unwrap_or(table.max_date()),
    );
    let range = table.clamp(requested);
    if range != requested {
        warn!(%requested, %range, "Date range clamped to dataset bounds");
    }
    info!(%range, "Date range selected");
    range
}
