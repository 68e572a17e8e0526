//! Summary Composer: current-month totals across all three collections.

use std::sync::Arc;
use tracing::{error, info};

use crate::domain::aggregator::Aggregator;
use crate::domain::calendar::Clock;
use crate::domain::error::ReportResult;
use crate::domain::models::{Collection, CurrentSummary, TimePredicate, UserId};

#[derive(Clone)]
pub struct SummaryService {
    aggregator: Aggregator,
    clock: Arc<dyn Clock>,
}

impl SummaryService {
    pub fn new(aggregator: Aggregator, clock: Arc<dyn Clock>) -> Self {
        Self { aggregator, clock }
    }

    /// Totals of the current month. The three sums run concurrently and the
    /// first failure fails the whole summary; the remaining futures are
    /// dropped, as they are when the caller itself is cancelled.
    pub async fn summarize(&self, user_id: &str) -> ReportResult<CurrentSummary> {
        let user_id = UserId::parse(user_id)?;
        let period = self.clock.current_period();
        info!("Summarizing {} for user {}", period, user_id);

        let daily = self.aggregator.aggregate(
            Collection::Daily,
            &user_id,
            TimePredicate::DerivedPeriod(period),
            &[],
        );
        let monthly = self.aggregator.aggregate(
            Collection::Monthly,
            &user_id,
            TimePredicate::stored_period(period),
            &[],
        );
        let occasional = self.aggregator.aggregate(
            Collection::Occasional,
            &user_id,
            TimePredicate::DerivedPeriod(period),
            &[],
        );

        let (daily, monthly, occasional) =
            tokio::try_join!(daily, monthly, occasional).map_err(|e| {
                error!("Summary for user {} failed: {}", user_id, e);
                e
            })?;

        Ok(CurrentSummary::new(
            period,
            daily.total(),
            monthly.total(),
            occasional.total(),
        ))
    }
}
