use chrono::NaiveDateTime;
use std::fmt;
use uuid::Uuid;

use super::period::{Month, Period};
use crate::domain::error::ReportError;

/// Identifier of the user owning a record.
///
/// The record store keys users by UUID; anything else is rejected before a
/// query is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn parse(raw: &str) -> Result<Self, ReportError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| ReportError::InvalidIdentifier(raw.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A summable amount column of one of the record collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Food,
    Travel,
    Entertainment,
    Shopping,
    Others,
    Electricity,
    Water,
    Rent,
    Insurance,
    SchoolFee,
    Repair,
    Total,
}

impl Field {
    /// Column name in the record store
    pub fn column(self) -> &'static str {
        match self {
            Field::Food => "food",
            Field::Travel => "travel",
            Field::Entertainment => "entertainment",
            Field::Shopping => "shopping",
            Field::Others => "others",
            Field::Electricity => "electricity",
            Field::Water => "water",
            Field::Rent => "rent",
            Field::Insurance => "insurance",
            Field::SchoolFee => "school_fee",
            Field::Repair => "repair",
            Field::Total => "total",
        }
    }

    /// Display name used in report text
    pub fn label(self) -> &'static str {
        match self {
            Field::Food => "Food",
            Field::Travel => "Travel",
            Field::Entertainment => "Entertainment",
            Field::Shopping => "Shopping",
            Field::Others => "Others",
            Field::Electricity => "Electricity",
            Field::Water => "Water",
            Field::Rent => "Rent",
            Field::Insurance => "Insurance",
            Field::SchoolFee => "SchoolFee",
            Field::Repair => "Repair",
            Field::Total => "Total",
        }
    }
}

pub const DAILY_CATEGORIES: [Field; 5] = [
    Field::Food,
    Field::Travel,
    Field::Entertainment,
    Field::Shopping,
    Field::Others,
];

/// Bill categories, in the order used for comparison and spike tie-breaks
pub const MONTHLY_CATEGORIES: [Field; 4] =
    [Field::Electricity, Field::Water, Field::Rent, Field::Others];

pub const OCCASIONAL_CATEGORIES: [Field; 3] = [Field::Insurance, Field::SchoolFee, Field::Repair];

/// The three logical record collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Day-to-day discretionary spend
    Daily,
    /// Recurring bills keyed by month name and year
    Monthly,
    /// Irregular expenses such as insurance or school fees
    Occasional,
}

impl Collection {
    pub fn categories(self) -> &'static [Field] {
        match self {
            Collection::Daily => &DAILY_CATEGORIES,
            Collection::Monthly => &MONTHLY_CATEGORIES,
            Collection::Occasional => &OCCASIONAL_CATEGORIES,
        }
    }

    pub fn has_field(self, field: Field) -> bool {
        field == Field::Total || self.categories().contains(&field)
    }

    /// Whether records carry a date (as opposed to a stored month and year)
    pub fn is_dated(self) -> bool {
        !matches!(self, Collection::Monthly)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Daily => "daily",
            Collection::Monthly => "monthly",
            Collection::Occasional => "occasional",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyExpenseRecord {
    pub user_id: UserId,
    pub date: NaiveDateTime,
    pub food: f64,
    pub travel: f64,
    pub entertainment: f64,
    pub shopping: f64,
    pub others: f64,
    /// Expected to equal the sum of the categories; taken as recorded
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBillRecord {
    pub user_id: UserId,
    pub month: Month,
    pub year: i32,
    pub electricity: f64,
    pub water: f64,
    pub rent: f64,
    pub others: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OccasionalExpenseRecord {
    pub user_id: UserId,
    pub date: NaiveDateTime,
    pub insurance: f64,
    pub school_fee: f64,
    pub repair: f64,
    pub total: f64,
}

/// A record from any of the three collections
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseRecord {
    Daily(DailyExpenseRecord),
    Monthly(MonthlyBillRecord),
    Occasional(OccasionalExpenseRecord),
}

impl ExpenseRecord {
    pub fn collection(&self) -> Collection {
        match self {
            ExpenseRecord::Daily(_) => Collection::Daily,
            ExpenseRecord::Monthly(_) => Collection::Monthly,
            ExpenseRecord::Occasional(_) => Collection::Occasional,
        }
    }

    pub fn user_id(&self) -> &UserId {
        match self {
            ExpenseRecord::Daily(r) => &r.user_id,
            ExpenseRecord::Monthly(r) => &r.user_id,
            ExpenseRecord::Occasional(r) => &r.user_id,
        }
    }

    /// Recorded instant; monthly bills have none
    pub fn date(&self) -> Option<NaiveDateTime> {
        match self {
            ExpenseRecord::Daily(r) => Some(r.date),
            ExpenseRecord::Monthly(_) => None,
            ExpenseRecord::Occasional(r) => Some(r.date),
        }
    }

    /// Stored month/year for bills, otherwise derived from the date
    pub fn period(&self) -> Period {
        match self {
            ExpenseRecord::Monthly(r) => Period::new(r.month, r.year),
            ExpenseRecord::Daily(r) => Period::of_date(r.date.date()),
            ExpenseRecord::Occasional(r) => Period::of_date(r.date.date()),
        }
    }

    /// Amount stored in `field`, or `None` when the collection has no such column
    pub fn amount(&self, field: Field) -> Option<f64> {
        match (self, field) {
            (ExpenseRecord::Daily(r), Field::Food) => Some(r.food),
            (ExpenseRecord::Daily(r), Field::Travel) => Some(r.travel),
            (ExpenseRecord::Daily(r), Field::Entertainment) => Some(r.entertainment),
            (ExpenseRecord::Daily(r), Field::Shopping) => Some(r.shopping),
            (ExpenseRecord::Daily(r), Field::Others) => Some(r.others),
            (ExpenseRecord::Daily(r), Field::Total) => Some(r.total),
            (ExpenseRecord::Monthly(r), Field::Electricity) => Some(r.electricity),
            (ExpenseRecord::Monthly(r), Field::Water) => Some(r.water),
            (ExpenseRecord::Monthly(r), Field::Rent) => Some(r.rent),
            (ExpenseRecord::Monthly(r), Field::Others) => Some(r.others),
            (ExpenseRecord::Monthly(r), Field::Total) => Some(r.total),
            (ExpenseRecord::Occasional(r), Field::Insurance) => Some(r.insurance),
            (ExpenseRecord::Occasional(r), Field::SchoolFee) => Some(r.school_fee),
            (ExpenseRecord::Occasional(r), Field::Repair) => Some(r.repair),
            (ExpenseRecord::Occasional(r), Field::Total) => Some(r.total),
            _ => None,
        }
    }
}
