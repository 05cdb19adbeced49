//! Output formatting and persistence for dashboard summaries.
//!
//! Supports a plain-text report, pretty/JSON rendering, and CSV export of
//! each summary table.

use anyhow::Result;
use csv::WriterBuilder;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::aggregate::DashboardSummary;
use crate::filter::DateRange;
use crate::record::YearIndicator;
use crate::summary::SummaryTable;

/// Logs a summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &DashboardSummary) {
    debug!("{:#?}", summary);
}

/// Renders a summary as pretty-printed JSON.
pub fn render_json(summary: &DashboardSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Text rendering of one summary: headline totals, then each table with
/// its busiest row called out.
pub struct Report<'a> {
    pub summary: &'a DashboardSummary,
    pub range: DateRange,
    pub year_labels: &'a [String; 2],
}

impl Report<'_> {
    fn label(&self, year: YearIndicator) -> &str {
        &self.year_labels[year.index()]
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rent Bike Analysis")?;
        writeln!(f, "Range: {} ({} days)", self.range, self.summary.rows)?;

        if self.summary.is_empty() {
            return writeln!(f, "\nNo data in selected range");
        }

        writeln!(f)?;
        for year in [YearIndicator::First, YearIndicator::Second] {
            writeln!(
                f,
                "Total orders {}: {}",
                self.label(year),
                self.summary.year_total(year)
            )?;
        }

        for year in [YearIndicator::First, YearIndicator::Second] {
            let title = format!("Customers by month in {}", self.label(year));
            write_table(f, &title, self.summary.year_by_month(year))?;
        }
        write_table(f, "Customers by month", &self.summary.by_month)?;
        write_table(f, "Customers by season", &self.summary.by_season)?;
        write_table(f, "Customers by weather", &self.summary.by_weather)
    }
}

fn write_table<K: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    table: &SummaryTable<K>,
) -> fmt::Result {
    writeln!(f, "\n{}", title)?;
    if table.is_empty() {
        return writeln!(f, "  (no data)");
    }

    let peak = table.max_index();
    for (i, row) in table.iter().enumerate() {
        let marker = if Some(i) == peak { " *" } else { "" };
        writeln!(f, "  {:>10}  {:>9}{}", row.key, row.cnt, marker)?;
    }
    Ok(())
}

/// Writes one summary table to `path` as a two-column CSV
/// (`key_column`, `cnt`), replacing any existing file.
pub fn write_summary_csv<K: fmt::Display>(
    path: &Path,
    key_column: &str,
    table: &SummaryTable<K>,
) -> Result<()> {
    debug!(path = %path.display(), rows = table.len(), "Writing summary CSV");

    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record([key_column, "cnt"])?;
    for row in table {
        writer.write_record([row.key.to_string(), row.cnt.to_string()])?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes every table of `summary` into `dir`, creating it if needed.
///
/// Returns the paths written, in a fixed order.
pub fn export_summary(dir: &Path, summary: &DashboardSummary) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    let month_tables = [
        ("by_month_first_year.csv", &summary.first_year_by_month),
        ("by_month_second_year.csv", &summary.second_year_by_month),
        ("by_month.csv", &summary.by_month),
    ];
    for (name, table) in month_tables {
        let path = dir.join(name);
        write_summary_csv(&path, "mnth", table)?;
        written.push(path);
    }

    let label_tables = [
        ("by_season.csv", "season", &summary.by_season),
        ("by_weather.csv", "weathersit", &summary.by_weather),
    ];
    for (name, column, table) in label_tables {
        let path = dir.join(name);
        write_summary_csv(&path, column, table)?;
        written.push(path);
    }

    info!(dir = %dir.display(), files = written.len(), "Summary exported");
    Ok(written)
}
