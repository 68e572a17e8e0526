//! Period Comparator: month-over-month bill comparison.

use tracing::{info, warn};

use crate::domain::aggregator::Aggregator;
use crate::domain::commands::CompareQuery;
use crate::domain::error::{ReportError, ReportResult};
use crate::domain::models::{PeriodComparison, UserId};

#[derive(Clone)]
pub struct ComparisonService {
    aggregator: Aggregator,
}

impl ComparisonService {
    pub fn new(aggregator: Aggregator) -> Self {
        Self { aggregator }
    }

    /// Compare the bills of two months, given in any order.
    ///
    /// Both months must have at least one bill; the same month twice can
    /// only ever produce one group and is reported as insufficient data.
    pub async fn compare(&self, query: CompareQuery) -> ReportResult<PeriodComparison> {
        let user_id = UserId::parse(&query.user_id)?;
        info!(
            "Comparing bills for user {}: {} vs {}",
            user_id, query.first, query.second
        );

        let mut aggregates = self
            .aggregator
            .aggregate_by_period(&user_id, &[query.first, query.second])
            .await?;

        if aggregates.len() < 2 {
            warn!(
                "Only {} of 2 periods have bills for user {}",
                aggregates.len(),
                user_id
            );
            return Err(ReportError::InsufficientData {
                first: query.first,
                second: query.second,
            });
        }

        let second = aggregates.remove(1);
        let first = aggregates.remove(0);
        Ok(PeriodComparison::new(first, second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        ExpenseRecord, Field, Month, MonthlyBillRecord, MoreIn, Period, Spike,
    };
    use crate::storage::MemoryExpenseStore;
    use std::sync::Arc;

    const USER: &str = "4d1f7a2e-0c55-4b8e-8f3a-9e6d2b1c0a77";

    fn bill(month: Month, year: i32, electricity: f64, water: f64, rent: f64, others: f64) -> ExpenseRecord {
        ExpenseRecord::Monthly(MonthlyBillRecord {
            user_id: UserId::parse(USER).unwrap(),
            month,
            year,
            electricity,
            water,
            rent,
            others,
            total: electricity + water + rent + others,
        })
    }

    fn service(records: Vec<ExpenseRecord>) -> ComparisonService {
        let store = Arc::new(MemoryExpenseStore::with_records(records));
        ComparisonService::new(Aggregator::new(store))
    }

    fn query(first: Period, second: Period) -> CompareQuery {
        CompareQuery {
            user_id: USER.to_string(),
            first,
            second,
        }
    }

    fn january_and_march() -> ComparisonService {
        service(vec![
            bill(Month::January, 2024, 100.0, 50.0, 1000.0, 20.0),
            bill(Month::March, 2024, 150.0, 50.0, 1000.0, 20.0),
        ])
    }

    #[tokio::test]
    async fn test_compare_bill_months() {
        let comparison = january_and_march()
            .compare(query(
                Period::new(Month::January, 2024),
                Period::new(Month::March, 2024),
            ))
            .await
            .unwrap();

        assert_eq!(comparison.first.totals.total(), 1170.0);
        assert_eq!(comparison.second.totals.total(), 1220.0);

        let electricity = comparison.delta(Field::Electricity).unwrap();
        assert_eq!(electricity.difference, 50.0);
        assert_eq!(electricity.more_in, MoreIn::Second);
        assert_eq!(comparison.more_in_label(electricity), "March, 2024");
        assert_eq!(comparison.delta(Field::Water).unwrap().more_in, MoreIn::Equal);

        assert_eq!(comparison.total.difference, 50.0);
        assert_eq!(comparison.more_in_label(&comparison.total), "March, 2024");
        assert_eq!(comparison.spike, Spike::Category(Field::Electricity));
        assert_eq!(comparison.spike.reason(), "Major difference was in Electricity");
    }

    #[tokio::test]
    async fn test_compare_ignores_argument_order() {
        let service = january_and_march();
        let january = Period::new(Month::January, 2024);
        let march = Period::new(Month::March, 2024);

        let forward = service.compare(query(january, march)).await.unwrap();
        let backward = service.compare(query(march, january)).await.unwrap();

        assert_eq!(forward, backward);
        assert_eq!(backward.periods(), (january, march));
    }

    #[tokio::test]
    async fn test_compare_with_missing_period_is_insufficient() {
        let err = january_and_march()
            .compare(query(
                Period::new(Month::March, 2024),
                Period::new(Month::February, 2024),
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, ReportError::InsufficientData { .. }));
    }

    #[tokio::test]
    async fn test_compare_same_period_twice_is_insufficient() {
        let march = Period::new(Month::March, 2024);
        let err = january_and_march()
            .compare(query(march, march))
            .await
            .unwrap_err();

        assert!(matches!(err, ReportError::InsufficientData { .. }));
    }

    #[tokio::test]
    async fn test_spike_tie_reports_first_category() {
        let comparison = service(vec![
            bill(Month::May, 2024, 10.0, 40.0, 900.0, 0.0),
            bill(Month::June, 2024, 10.0, 0.0, 940.0, 0.0),
        ])
        .compare(query(
            Period::new(Month::June, 2024),
            Period::new(Month::May, 2024),
        ))
        .await
        .unwrap();

        assert_eq!(comparison.spike, Spike::Category(Field::Water));
        assert_eq!(comparison.total.more_in, MoreIn::Equal);
        assert_eq!(comparison.more_in_label(&comparison.total), "Equal");
    }

    #[tokio::test]
    async fn test_multiple_bills_in_one_month_are_combined() {
        let comparison = service(vec![
            bill(Month::January, 2024, 100.0, 0.0, 0.0, 0.0),
            bill(Month::January, 2024, 25.0, 0.0, 0.0, 0.0),
            bill(Month::February, 2024, 100.0, 0.0, 0.0, 0.0),
        ])
        .compare(query(
            Period::new(Month::January, 2024),
            Period::new(Month::February, 2024),
        ))
        .await
        .unwrap();

        assert_eq!(comparison.first.totals.get(Field::Electricity), 125.0);
        assert_eq!(comparison.delta(Field::Electricity).unwrap().more_in, MoreIn::First);
    }
}
