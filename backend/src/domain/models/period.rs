//! A calendar month used as the filter for every read.
use chrono::{Datelike, Months, NaiveDate};
use std::fmt;

use crate::domain::errors::{ReportError, ReportResult};

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// A validated (month, year) pair with its inclusive date span
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl Period {
    /// Validate a month (1-12) and year (1-9999)
    pub fn new(month: u32, year: i32) -> ReportResult<Self> {
        let invalid = || ReportError::InvalidPeriod { month, year };

        if !(1..=12).contains(&month) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(invalid());
        }

        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let last_day = first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(invalid)?;

        Ok(Self { year, month, first_day, last_day })
    }

    /// The period a date falls in
    pub fn containing(date: NaiveDate) -> ReportResult<Self> {
        Self::new(date.month(), date.year())
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    /// Inclusive on both ends
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// "March 2024"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }
}

/// Formats as YYYY-MM
impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
