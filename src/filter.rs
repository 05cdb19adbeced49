//! Inclusive date-range selection over a [`RentalTable`].

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::loader::RentalTable;
use crate::record::RentalRecord;

/// An inclusive `[start, end]` window of calendar dates.
///
/// `start > end` is allowed and selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

/// Returns the rows of `table` dated within `range`, both ends included.
///
/// Relies on the table being sorted by date, so the result is a contiguous
/// slice located by binary search. An inverted range yields an empty slice.
pub fn filter_by_date(table: &RentalTable, range: DateRange) -> &[RentalRecord] {
    if range.is_empty() {
        debug!(%range, "Inverted date range, selecting nothing");
        return &[];
    }

    let records = table.records();
    let lo = records.partition_point(|r| r.date < range.start);
    let hi = records.partition_point(|r| r.date <= range.end);
    let selected = &records[lo..hi];

    debug!(%range, rows = selected.len(), "Filtered by date");
    selected
}
