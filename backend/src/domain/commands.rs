//! Typed inputs of the report operations.
//!
//! The request layer parses path and query strings into these; the user id
//! stays raw so the services own its validation.

use chrono::{NaiveDate, NaiveDateTime};

use super::models::Period;

/// Daily spend between two days
#[derive(Debug, Clone)]
pub struct RangeReportQuery {
    pub user_id: String,
    /// Literal start instant; a date-only input means midnight
    pub start: Option<NaiveDateTime>,
    /// Last day included, covered up to 23:59:59.999
    pub end: Option<NaiveDate>,
}

/// Recurring bills of one closed month
#[derive(Debug, Clone)]
pub struct MonthlyReportQuery {
    pub user_id: String,
    pub period: Period,
}

/// Occasional expenses of one calendar year
#[derive(Debug, Clone)]
pub struct OccasionalReportQuery {
    pub user_id: String,
    pub year: i32,
}

/// Two months of bills to compare, in any order
#[derive(Debug, Clone)]
pub struct CompareQuery {
    pub user_id: String,
    pub first: Period,
    pub second: Period,
}
