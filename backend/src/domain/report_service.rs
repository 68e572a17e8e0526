//! Range, monthly and occasional reports.
//!
//! Each report validates its inputs, picks the time predicate for its
//! collection and delegates the summing to the [`Aggregator`].

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::aggregator::Aggregator;
use crate::domain::calendar::Clock;
use crate::domain::commands::{MonthlyReportQuery, OccasionalReportQuery, RangeReportQuery};
use crate::domain::error::{ReportError, ReportResult};
use crate::domain::models::{
    AggregateResult, Collection, DateRange, Period, TimePredicate, UserId,
};

#[derive(Clone)]
pub struct ReportService {
    aggregator: Aggregator,
    clock: Arc<dyn Clock>,
}

impl ReportService {
    pub fn new(aggregator: Aggregator, clock: Arc<dyn Clock>) -> Self {
        Self { aggregator, clock }
    }

    /// Daily spend per category between two days, both days inclusive
    pub async fn range_report(&self, query: RangeReportQuery) -> ReportResult<AggregateResult> {
        // Reject before touching the store
        let start = query.start.ok_or(ReportError::MissingParameter("startDate"))?;
        let end = query.end.ok_or(ReportError::MissingParameter("endDate"))?;
        let user_id = UserId::parse(&query.user_id)?;

        info!("Range report for user {} from {} to {}", user_id, start, end);
        let range = DateRange::whole_days(start, end);

        self.aggregator
            .aggregate(
                Collection::Daily,
                &user_id,
                TimePredicate::DateRange(range),
                Collection::Daily.categories(),
            )
            .await
    }

    /// Bill totals of one month, refused while that month is still running
    pub async fn monthly_report(&self, query: MonthlyReportQuery) -> ReportResult<AggregateResult> {
        let user_id = UserId::parse(&query.user_id)?;
        self.ensure_period_closed(query.period)?;

        info!("Monthly report for user {} for {}", user_id, query.period);
        self.aggregator
            .aggregate(
                Collection::Monthly,
                &user_id,
                TimePredicate::stored_period(query.period),
                Collection::Monthly.categories(),
            )
            .await
    }

    /// Occasional expenses over a whole calendar year
    pub async fn occasional_report(
        &self,
        query: OccasionalReportQuery,
    ) -> ReportResult<AggregateResult> {
        let user_id = UserId::parse(&query.user_id)?;

        info!("Occasional report for user {} for {}", user_id, query.year);
        self.aggregator
            .aggregate(
                Collection::Occasional,
                &user_id,
                TimePredicate::DerivedYear(query.year),
                Collection::Occasional.categories(),
            )
            .await
    }

    /// The current month is still accruing bills, so its report is not
    /// generated yet. Past and future months pass.
    fn ensure_period_closed(&self, period: Period) -> ReportResult<()> {
        if period == self.clock.current_period() {
            warn!("Monthly report for {} requested before the month closed", period);
            return Err(ReportError::ReportNotReady(period));
        }
        Ok(())
    }
}
