use std::collections::BTreeMap;

use super::expense::Field;
use super::filter::GroupSum;
use super::period::Period;

/// Summed amounts for one report, keyed by field.
///
/// Fields that were requested but matched no records read as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    sums: BTreeMap<Field, f64>,
    record_count: u64,
}

impl AggregateResult {
    /// Every requested field (and the total) at zero
    pub fn empty(fields: &[Field]) -> Self {
        let mut sums: BTreeMap<Field, f64> = fields.iter().map(|f| (*f, 0.0)).collect();
        sums.entry(Field::Total).or_insert(0.0);
        Self {
            sums,
            record_count: 0,
        }
    }

    pub fn from_group(group: GroupSum) -> Self {
        let mut sums = group.sums;
        sums.entry(Field::Total).or_insert(0.0);
        Self {
            sums,
            record_count: group.record_count,
        }
    }

    pub fn get(&self, field: Field) -> f64 {
        self.sums.get(&field).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.get(Field::Total)
    }

    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    pub fn fields(&self) -> impl Iterator<Item = (Field, f64)> + '_ {
        self.sums.iter().map(|(f, v)| (*f, *v))
    }
}

/// Aggregate of one (month, year) group
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodAggregate {
    pub period: Period,
    pub totals: AggregateResult,
}

/// Current-month totals across the three collections
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSummary {
    pub period: Period,
    pub daily_total: f64,
    pub monthly_total: f64,
    pub occasional_total: f64,
    pub grand_total: f64,
}

impl CurrentSummary {
    pub fn new(period: Period, daily_total: f64, monthly_total: f64, occasional_total: f64) -> Self {
        Self {
            period,
            daily_total,
            monthly_total,
            occasional_total,
            grand_total: daily_total + monthly_total + occasional_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::filter::GroupKey;
    use crate::domain::models::period::Month;

    #[test]
    fn test_empty_result_reads_zero() {
        let result = AggregateResult::empty(&[Field::Food, Field::Travel]);
        assert!(result.is_empty());
        assert_eq!(result.get(Field::Food), 0.0);
        assert_eq!(result.total(), 0.0);
        assert_eq!(result.get(Field::Rent), 0.0);
        assert_eq!(result.fields().count(), 3);
    }

    #[test]
    fn test_from_group_keeps_counts() {
        let mut group = GroupSum::new(GroupKey::All, &[Field::Rent, Field::Total]);
        group.sums.insert(Field::Rent, 800.0);
        group.sums.insert(Field::Total, 800.0);
        group.record_count = 2;

        let result = AggregateResult::from_group(group);
        assert_eq!(result.record_count(), 2);
        assert_eq!(result.get(Field::Rent), 800.0);
    }

    #[test]
    fn test_summary_grand_total() {
        let summary = CurrentSummary::new(Period::new(Month::May, 2024), 10.0, 1200.0, 0.0);
        assert_eq!(summary.grand_total, 1210.0);
    }
}
