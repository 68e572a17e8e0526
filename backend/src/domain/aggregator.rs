//! Grouped summation over one record collection.
//!
//! Every report goes through here: the caller names the collection, the
//! user, a time predicate and the category fields, and gets summed amounts
//! back. Zero matching records is an ordinary all-zero result.

use std::sync::Arc;
use tracing::{debug, error};

use crate::domain::error::ReportResult;
use crate::domain::models::{
    AggregateResult, Collection, Field, GroupBy, GroupKey, Period, PeriodAggregate, RecordFilter,
    TimePredicate, UserId,
};
use crate::storage::ExpenseStore;

#[derive(Clone)]
pub struct Aggregator {
    store: Arc<dyn ExpenseStore>,
}

impl Aggregator {
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        Self { store }
    }

    /// Sum `fields` and the total over the user's matching records
    pub async fn aggregate(
        &self,
        collection: Collection,
        user_id: &UserId,
        time: TimePredicate,
        fields: &[Field],
    ) -> ReportResult<AggregateResult> {
        let fields = with_total(fields);
        let filter = RecordFilter::new(*user_id, time);
        debug!("Aggregating {} records for user {}: {:?}", collection, user_id, filter.time);

        let groups = self
            .store
            .aggregate_sum(collection, &filter, GroupBy::All, &fields)
            .await
            .map_err(|e| {
                error!("Failed to aggregate {} records for user {}: {:?}", collection, user_id, e);
                e
            })?;

        let result = groups
            .into_iter()
            .find(|group| group.key == GroupKey::All)
            .map(AggregateResult::from_group)
            .unwrap_or_else(|| AggregateResult::empty(&fields));

        debug!(
            "Aggregated {} {} records, total {:.2}",
            result.record_count(),
            collection,
            result.total()
        );
        Ok(result)
    }

    /// Bill totals for each of `periods` that has at least one record, in
    /// chronological order. Periods without bills are absent from the output.
    pub async fn aggregate_by_period(
        &self,
        user_id: &UserId,
        periods: &[Period],
    ) -> ReportResult<Vec<PeriodAggregate>> {
        let fields = with_total(Collection::Monthly.categories());
        let filter = RecordFilter::new(*user_id, TimePredicate::StoredPeriods(periods.to_vec()));

        let groups = self
            .store
            .aggregate_sum(Collection::Monthly, &filter, GroupBy::Period, &fields)
            .await
            .map_err(|e| {
                error!("Failed to group monthly bills for user {}: {:?}", user_id, e);
                e
            })?;

        let mut aggregates: Vec<PeriodAggregate> = groups
            .into_iter()
            .filter_map(|group| match group.key {
                GroupKey::Period(period) => Some(PeriodAggregate {
                    period,
                    totals: AggregateResult::from_group(group),
                }),
                GroupKey::All => None,
            })
            .collect();
        aggregates.sort_by_key(|aggregate| aggregate.period);

        Ok(aggregates)
    }
}

fn with_total(fields: &[Field]) -> Vec<Field> {
    let mut fields = fields.to_vec();
    if !fields.contains(&Field::Total) {
        fields.push(Field::Total);
    }
    fields
}
