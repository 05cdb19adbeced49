//! Group-and-sum aggregations over a filtered view of the rental table.
//!
//! Every function here is pure: it borrows a slice of records, allocates a
//! fresh [`SummaryTable`], and leaves the input untouched. Output is ordered
//! ascending by key, so the first-wins tie-break of
//! [`SummaryTable::max_row`] is reproducible.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::record::{RentalRecord, YearIndicator};
use crate::summary::SummaryTable;

fn group_sum<'a, K, I, F>(rows: I, key: F) -> SummaryTable<K>
where
    K: Ord,
    I: IntoIterator<Item = &'a RentalRecord>,
    F: Fn(&RentalRecord) -> K,
{
    let mut groups: BTreeMap<K, u64> = BTreeMap::new();
    for row in rows {
        *groups.entry(key(row)).or_default() += row.cnt;
    }
    groups.into()
}

/// Monthly totals for a single year, keyed by month (1-12).
///
/// Equivalent to grouping the rows of `year` by `(year, month)`; the year
/// part of the key is constant and therefore dropped.
pub fn by_year_month(rows: &[RentalRecord], year: YearIndicator) -> SummaryTable<u8> {
    group_sum(rows.iter().filter(|r| r.year == year), |r| r.month)
}

/// Monthly totals with both years folded together.
pub fn by_month_all_years(rows: &[RentalRecord]) -> SummaryTable<u8> {
    group_sum(rows, |r| r.month)
}

/// Totals per season label.
pub fn by_season(rows: &[RentalRecord]) -> SummaryTable<String> {
    group_sum(rows, |r| r.season.clone())
}

/// Totals per weather-situation label.
pub fn by_weather(rows: &[RentalRecord]) -> SummaryTable<String> {
    group_sum(rows, |r| r.weather.clone())
}

/// Sum of `cnt` over the rows belonging to `year`.
pub fn year_total(rows: &[RentalRecord], year: YearIndicator) -> u64 {
    rows.iter().filter(|r| r.year == year).map(|r| r.cnt).sum()
}

/// Everything the presentation layer needs for one date selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub rows: usize,
    pub first_year_total: u64,
    pub second_year_total: u64,
    pub first_year_by_month: SummaryTable<u8>,
    pub second_year_by_month: SummaryTable<u8>,
    pub by_month: SummaryTable<u8>,
    pub by_season: SummaryTable<String>,
    pub by_weather: SummaryTable<String>,
}

impl DashboardSummary {
    /// True when the selection matched no records ("no data in range").
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn year_by_month(&self, year: YearIndicator) -> &SummaryTable<u8> {
        match year {
            YearIndicator::First => &self.first_year_by_month,
            YearIndicator::Second => &self.second_year_by_month,
        }
    }

    pub fn year_total(&self, year: YearIndicator) -> u64 {
        match year {
            YearIndicator::First => self.first_year_total,
            YearIndicator::Second => self.second_year_total,
        }
    }
}

/// Runs all five aggregations and both year totals over `rows`.
pub fn summarize(rows: &[RentalRecord]) -> DashboardSummary {
    let first_year_by_month = by_year_month(rows, YearIndicator::First);
    let second_year_by_month = by_year_month(rows, YearIndicator::Second);

    let summary = DashboardSummary {
        rows: rows.len(),
        first_year_total: first_year_by_month.total(),
        second_year_total: second_year_by_month.total(),
        first_year_by_month,
        second_year_by_month,
        by_month: by_month_all_years(rows),
        by_season: by_season(rows),
        by_weather: by_weather(rows),
    };

    debug!(
        rows = summary.rows,
        first_year_total = summary.first_year_total,
        second_year_total = summary.second_year_total,
        seasons = summary.by_season.len(),
        weather_situations = summary.by_weather.len(),
        "Summary computed"
    );
    summary
}
