use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;

use super::expense::{ExpenseRecord, Field, UserId};
use super::period::Period;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Inclusive range of record instants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateRange {
    /// Range from the literal `start` instant to the last millisecond
    /// (23:59:59.999) of the `end` day, so date-only bounds cover whole days.
    pub fn whole_days(start: NaiveDateTime, end: NaiveDate) -> Self {
        let end = end.and_time(NaiveTime::MIN) + Duration::milliseconds(MILLIS_PER_DAY - 1);
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Time condition a record must satisfy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimePredicate {
    /// Record date within an inclusive range; never matches undated records
    DateRange(DateRange),
    /// Stored month name and year equal to any of the listed periods.
    /// Only monthly bills carry these fields.
    StoredPeriods(Vec<Period>),
    /// Month and year taken from the record date
    DerivedPeriod(Period),
    /// Calendar year taken from the record date, any month
    DerivedYear(i32),
}

impl TimePredicate {
    pub fn stored_period(period: Period) -> Self {
        TimePredicate::StoredPeriods(vec![period])
    }

    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        match self {
            TimePredicate::DateRange(range) => record.date().is_some_and(|d| range.contains(d)),
            TimePredicate::StoredPeriods(periods) => match record {
                ExpenseRecord::Monthly(bill) => periods
                    .iter()
                    .any(|p| p.month == bill.month && p.year == bill.year),
                _ => false,
            },
            TimePredicate::DerivedPeriod(period) => record
                .date()
                .is_some_and(|d| Period::of_date(d.date()) == *period),
            TimePredicate::DerivedYear(year) => record.date().is_some_and(|d| d.year() == *year),
        }
    }
}

/// User scope plus time condition for a store query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    pub user_id: UserId,
    pub time: TimePredicate,
}

impl RecordFilter {
    pub fn new(user_id: UserId, time: TimePredicate) -> Self {
        Self { user_id, time }
    }

    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        record.user_id() == &self.user_id && self.time.matches(record)
    }
}

/// How matching records are partitioned before summing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    /// A single group over every matching record
    All,
    /// One group per (month, year)
    Period,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    All,
    Period(Period),
}

impl GroupKey {
    pub fn of(group_by: GroupBy, record: &ExpenseRecord) -> Self {
        match group_by {
            GroupBy::All => GroupKey::All,
            GroupBy::Period => GroupKey::Period(record.period()),
        }
    }
}

/// Summed fields of one group. Groups only exist for at least one record.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSum {
    pub key: GroupKey,
    pub record_count: u64,
    pub sums: BTreeMap<Field, f64>,
}

impl GroupSum {
    pub fn new(key: GroupKey, fields: &[Field]) -> Self {
        Self {
            key,
            record_count: 0,
            sums: fields.iter().map(|f| (*f, 0.0)).collect(),
        }
    }

    pub fn add(&mut self, record: &ExpenseRecord) {
        for (field, sum) in self.sums.iter_mut() {
            *sum += record.amount(*field).unwrap_or(0.0);
        }
        self.record_count = self.record_count.saturating_add(1);
    }
}

/// Group and sum records in memory; groups come back in key order
pub fn sum_groups(records: &[ExpenseRecord], group_by: GroupBy, fields: &[Field]) -> Vec<GroupSum> {
    let mut groups: BTreeMap<GroupKey, GroupSum> = BTreeMap::new();

    for record in records {
        let key = GroupKey::of(group_by, record);
        groups
            .entry(key)
            .or_insert_with(|| GroupSum::new(key, fields))
            .add(record);
    }

    groups.into_values().collect()
}
