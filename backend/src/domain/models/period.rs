use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::error::ReportError;

/// Calendar month, declared in calendar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

/// The fixed month table; a month's position here is its index.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

impl Month {
    /// Zero-based position in [`MONTHS`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// One-based month number, as used by chrono and SQLite's `strftime('%m')`
    pub fn number(self) -> u32 {
        self.index() as u32 + 1
    }

    pub fn from_number(number: u32) -> Option<Self> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        MONTHS.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = ReportError;

    /// Accepts the canonical English names in any letter case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        MONTHS
            .iter()
            .copied()
            .find(|month| month.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ReportError::InvalidParameter {
                name: "month",
                value: s.to_string(),
            })
    }
}

impl PartialOrd for Month {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Month {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

/// One calendar month of one year.
///
/// Periods order chronologically: by year, then by month index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    pub month: Month,
    pub year: i32,
}

impl Period {
    pub fn new(month: Month, year: i32) -> Self {
        Self { month, year }
    }

    /// The period a calendar day falls in
    pub fn of_date(date: NaiveDate) -> Self {
        // chrono months are always 1..=12
        let month = Month::from_number(date.month()).unwrap_or(Month::January);
        Self::new(month, date.year())
    }

    /// Human-readable label, e.g. "March, 2024"
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.month, self.year)
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year
            .cmp(&other.year)
            .then_with(|| self.month.cmp(&other.month))
    }
}
