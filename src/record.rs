//! The rental record and its year indicator.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Which of the two observed years a record belongs to.
///
/// Stored in the source as `yr` = 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum YearIndicator {
    First,
    Second,
}

impl YearIndicator {
    pub fn as_u8(self) -> u8 {
        match self {
            YearIndicator::First => 0,
            YearIndicator::Second => 1,
        }
    }

    /// Position of this year's label in a two-element label array.
    pub fn index(self) -> usize {
        self.as_u8() as usize
    }
}

impl TryFrom<u8> for YearIndicator {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(YearIndicator::First),
            1 => Ok(YearIndicator::Second),
            other => Err(other),
        }
    }
}

impl fmt::Display for YearIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// One day of observed rental activity.
///
/// `year` and `month` are derivable from `date` but kept alongside it so
/// grouping never has to recompute them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RentalRecord {
    pub date: NaiveDate,
    pub year: YearIndicator,
    pub month: u8,
    pub season: String,
    pub weather: String,
    pub cnt: u64,
}

impl RentalRecord {
    pub fn new(
        date: NaiveDate,
        year: YearIndicator,
        month: u8,
        season: impl Into<String>,
        weather: impl Into<String>,
        cnt: u64,
    ) -> Self {
        Self {
            date,
            year,
            month,
            season: season.into(),
            weather: weather.into(),
            cnt,
        }
    }
}
