//! Loading the cleaned daily rental CSV into an immutable, date-sorted table.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::error::LoadError;
use crate::filter::DateRange;
use crate::record::{RentalRecord, YearIndicator};

/// Header names the loader refuses to run without.
pub const REQUIRED_COLUMNS: &[&str] = &["dteday", "yr", "mnth", "season", "weathersit", "cnt"];

/// A single row deserialized from the source CSV, before validation.
#[derive(Debug, Deserialize)]
struct RawRecord {
    dteday: String,
    yr: u8,
    mnth: u8,
    season: String,
    weathersit: String,
    cnt: u64,
}

/// The full dataset, sorted by date ascending.
///
/// Never mutated after construction, so one instance can back any number of
/// filter and aggregation calls.
#[derive(Debug, Clone)]
pub struct RentalTable {
    records: Vec<RentalRecord>,
}

impl RentalTable {
    /// Reads and validates the CSV at `path`.
    #[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }

        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::from_reader(file)?;
        info!(
            records = table.len(),
            min_date = %table.min_date(),
            max_date = %table.max_date(),
            "Dataset loaded"
        );
        Ok(table)
    }

    /// Reads and validates CSV data from any reader.
    ///
    /// Columns beyond [`REQUIRED_COLUMNS`] are ignored.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers = rdr.headers()?.clone();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !headers.iter().any(|h| h.trim() == **col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }

        let mut records = Vec::new();
        for result in rdr.records() {
            let row = result?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            let raw: RawRecord = row.deserialize(Some(&headers))?;
            records.push(validate(raw, line)?);
        }

        debug!(rows = records.len(), "Parsed CSV rows");
        Self::from_records(records)
    }

    /// Builds a table from already-parsed records, sorting them by date.
    ///
    /// The sort is stable: rows sharing a date keep their original order.
    pub fn from_records(mut records: Vec<RentalRecord>) -> Result<Self, LoadError> {
        if records.is_empty() {
            return Err(LoadError::NoRecords);
        }
        records.sort_by_key(|r| r.date);
        Ok(Self { records })
    }

    pub fn records(&self) -> &[RentalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    // Always false: construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn min_date(&self) -> NaiveDate {
        self.records[0].date
    }

    pub fn max_date(&self) -> NaiveDate {
        self.records[self.records.len() - 1].date
    }

    /// The `[min_date, max_date]` range; the default user selection.
    pub fn full_range(&self) -> DateRange {
        DateRange::new(self.min_date(), self.max_date())
    }

    /// Bounds `range` to the observed dates.
    ///
    /// A range lying wholly outside the data clamps to an empty range.
    pub fn clamp(&self, range: DateRange) -> DateRange {
        DateRange::new(
            range.start.max(self.min_date()),
            range.end.min(self.max_date()),
        )
    }

    /// Sum of `cnt` over every record.
    pub fn total_count(&self) -> u64 {
        self.records.iter().map(|r| r.cnt).sum()
    }
}

fn validate(raw: RawRecord, line: u64) -> Result<RentalRecord, LoadError> {
    let date = parse_date(&raw.dteday).ok_or_else(|| LoadError::InvalidDate {
        line,
        value: raw.dteday.clone(),
    })?;

    let year = YearIndicator::try_from(raw.yr).map_err(|v| LoadError::InvalidField {
        line,
        field: "yr",
        reason: format!("expected 0 or 1, got {}", v),
    })?;

    if !(1..=12).contains(&raw.mnth) {
        return Err(LoadError::InvalidField {
            line,
            field: "mnth",
            reason: format!("{} is not a month", raw.mnth),
        });
    }
    if u32::from(raw.mnth) != date.month() {
        return Err(LoadError::InvalidField {
            line,
            field: "mnth",
            reason: format!("{} does not match date {}", raw.mnth, date),
        });
    }

    Ok(RentalRecord {
        date,
        year,
        month: raw.mnth,
        season: raw.season.trim().to_string(),
        weather: raw.weathersit.trim().to_string(),
        cnt: raw.cnt,
    })
}

/// Parses `YYYY-MM-DD`, or a `YYYY-MM-DD HH:MM:SS` timestamp truncated to its date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok().or_else(|| {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|dt| dt.date())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    const HEADER: &str = "dteday,yr,mnth,season,weathersit,cnt\n";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn load(body: &str) -> Result<RentalTable, LoadError> {
        RentalTable::from_reader(format!("{}{}", HEADER, body).as_bytes())
    }

    #[test]
    fn test_sorts_rows_by_date() {
        let table = load(
            "2012-02-10,1,2,Spring,Clear,20\n\
             2011-01-06,0,1,Spring,Misty,5\n\
             2011-01-05,0,1,Spring,Clear,10\n",
        )
        .unwrap();

        let dates: Vec<_> = table.records().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(2011, 1, 5), date(2011, 1, 6), date(2012, 2, 10)]);
        assert_eq!(table.min_date(), date(2011, 1, 5));
        assert_eq!(table.max_date(), date(2012, 2, 10));
        assert_eq!(table.total_count(), 35);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let csv = "instant,dteday,yr,mnth,season,weathersit,temp,cnt\n\
                   1,2011-01-01,0,1,Spring,Misty,0.34,985\n";
        let table = RentalTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].cnt, 985);
        assert_eq!(table.records()[0].weather, "Misty");
    }

    #[test]
    fn test_accepts_timestamp_dates() {
        let table = load("2011-03-01 00:00:00,0,3,Spring,Clear,1\n").unwrap();
        assert_eq!(table.min_date(), date(2011, 3, 1));
    }

    #[test]
    fn test_missing_columns() {
        let csv = "dteday,yr,season,cnt\n2011-01-01,0,Spring,1\n";
        match RentalTable::from_reader(csv.as_bytes()) {
            Err(LoadError::MissingColumns(cols)) => {
                assert_eq!(cols, vec!["mnth".to_string(), "weathersit".to_string()]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_is_no_records() {
        assert!(matches!(load(""), Err(LoadError::NoRecords)));
    }

    #[test]
    fn test_invalid_date_reports_line() {
        match load("2011-01-01,0,1,Spring,Clear,1\nnot-a-date,0,1,Spring,Clear,1\n") {
            Err(LoadError::InvalidDate { line, value }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_out_of_domain_fields() {
        assert!(matches!(
            load("2011-01-01,2,1,Spring,Clear,1\n"),
            Err(LoadError::InvalidField { field: "yr", .. })
        ));
        assert!(matches!(
            load("2011-01-01,0,13,Spring,Clear,1\n"),
            Err(LoadError::InvalidField { field: "mnth", .. })
        ));
        assert!(matches!(
            load("2011-01-01,0,2,Spring,Clear,1\n"),
            Err(LoadError::InvalidField { field: "mnth", .. })
        ));
    }

    #[test]
    fn test_negative_count_is_malformed() {
        assert!(matches!(
            load("2011-01-01,0,1,Spring,Clear,-4\n"),
            Err(LoadError::Csv(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = env::temp_dir().join("bike_rental_dashboard_does_not_exist.csv");
        let _ = fs::remove_file(&path);
        assert!(matches!(
            RentalTable::from_path(&path),
            Err(LoadError::NotFound(_))
        ));
    }

    #[test]
    fn test_from_path_reads_file() {
        let path = env::temp_dir().join("bike_rental_dashboard_loader_test.csv");
        fs::write(&path, format!("{}2011-01-01,0,1,Spring,Clear,7\n", HEADER)).unwrap();

        let table = RentalTable::from_path(&path).unwrap();
        assert_eq!(table.len(), 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_clamp_bounds_to_observed_dates() {
        let table = load("2011-01-05,0,1,Spring,Clear,1\n2011-01-20,0,1,Spring,Clear,1\n").unwrap();

        let clamped = table.clamp(DateRange::new(date(2010, 1, 1), date(2011, 1, 10)));
        assert_eq!(clamped, DateRange::new(date(2011, 1, 5), date(2011, 1, 10)));

        let outside = table.clamp(DateRange::new(date(2013, 1, 1), date(2013, 2, 1)));
        assert!(outside.is_empty());

        assert_eq!(table.full_range(), DateRange::new(date(2011, 1, 5), date(2011, 1, 20)));
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date(" 2012-12-31 "), Some(date(2012, 12, 31)));
        assert_eq!(parse_date("2012-12-31 23:59:59"), Some(date(2012, 12, 31)));
        assert_eq!(parse_date("31/12/2012"), None);
    }
}
