//! # REST API for Expense Reports
//!
//! Range, monthly and occasional reports, the month-over-month comparison
//! and the current-month summary. Mounted under `/api/reports`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use shared::WeeklyReportRequest;
use tracing::info;

use crate::domain::commands::{
    CompareQuery, MonthlyReportQuery, OccasionalReportQuery, RangeReportQuery,
};
use crate::domain::ReportResult;
use crate::io::rest::mappers::ReportMapper;
use crate::AppState;

/// Create a router for report related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/weekly/:id", get(get_weekly_report))
        .route("/monthly/:id/:month/:year", get(get_monthly_report))
        .route("/occasional/:id/:year", get(get_occasional_report))
        .route(
            "/compare/:id/:month1/:year1/:month2/:year2",
            get(compare_months),
        )
        .route("/summary/:id", get(get_summary))
}

/// Daily spend between `startDate` and `endDate`, both days inclusive
pub async fn get_weekly_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(request): Query<WeeklyReportRequest>,
) -> Response {
    info!("GET /api/reports/weekly/{} - query: {:?}", id, request);

    let query = match parse_range_query(id, &request) {
        Ok(query) => query,
        Err(e) => return e.into_response(),
    };

    match state.report_service.range_report(query).await {
        Ok(result) => (StatusCode::OK, Json(ReportMapper::to_weekly_response(&result))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Bill totals of a closed month
pub async fn get_monthly_report(
    State(state): State<AppState>,
    Path((id, month, year)): Path<(String, String, String)>,
) -> Response {
    info!("GET /api/reports/monthly/{}/{}/{}", id, month, year);

    let period = match ReportMapper::parse_period("month", &month, "year", &year) {
        Ok(period) => period,
        Err(e) => return e.into_response(),
    };
    let query = MonthlyReportQuery {
        user_id: id,
        period,
    };

    match state.report_service.monthly_report(query).await {
        Ok(result) => (StatusCode::OK, Json(ReportMapper::to_monthly_response(&result))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Occasional expenses of a calendar year
pub async fn get_occasional_report(
    State(state): State<AppState>,
    Path((id, year)): Path<(String, String)>,
) -> Response {
    info!("GET /api/reports/occasional/{}/{}", id, year);

    let year = match ReportMapper::parse_year("year", &year) {
        Ok(year) => year,
        Err(e) => return e.into_response(),
    };
    let query = OccasionalReportQuery { user_id: id, year };

    match state.report_service.occasional_report(query).await {
        Ok(result) => {
            (StatusCode::OK, Json(ReportMapper::to_occasional_response(&result))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Compare the bills of two months
pub async fn compare_months(
    State(state): State<AppState>,
    Path((id, month1, year1, month2, year2)): Path<(String, String, String, String, String)>,
) -> Response {
    info!(
        "GET /api/reports/compare/{}/{}/{}/{}/{}",
        id, month1, year1, month2, year2
    );

    let periods = ReportMapper::parse_period("month1", &month1, "year1", &year1).and_then(|first| {
        ReportMapper::parse_period("month2", &month2, "year2", &year2).map(|second| (first, second))
    });
    let (first, second) = match periods {
        Ok(periods) => periods,
        Err(e) => return e.into_response(),
    };
    let query = CompareQuery {
        user_id: id,
        first,
        second,
    };

    match state.comparison_service.compare(query).await {
        Ok(comparison) => {
            (StatusCode::OK, Json(ReportMapper::to_comparison_response(&comparison))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Current-month totals across daily, monthly and occasional records
pub async fn get_summary(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    info!("GET /api/reports/summary/{}", id);

    match state.summary_service.summarize(&id).await {
        Ok(summary) => (StatusCode::OK, Json(ReportMapper::to_summary_response(&summary))).into_response(),
        Err(e) => e.into_response(),
    }
}

fn parse_range_query(id: String, request: &WeeklyReportRequest) -> ReportResult<RangeReportQuery> {
    // Both bounds must be present before either is parsed
    let start = ReportMapper::require("startDate", request.start_date.as_deref())?;
    let end = ReportMapper::require("endDate", request.end_date.as_deref())?;

    Ok(RangeReportQuery {
        user_id: id,
        start: ReportMapper::parse_start(Some(start))?,
        end: ReportMapper::parse_end(Some(end))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::FixedClock;
    use crate::domain::models::{
        Collection, DailyExpenseRecord, ExpenseRecord, Month, MonthlyBillRecord, RecordFilter,
        UserId,
    };
    use crate::storage::{ExpenseStore, MemoryExpenseStore};
    use crate::{build_state, create_router, Config};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use chrono::NaiveDate;
    use shared::{
        ComparisonResponse, ErrorResponse, MonthlyReport, ReportResponse, SummaryResponse,
        WeeklyReport,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    const USER: &str = "2c5d8e1f-3a4b-4c6d-9e8f-7a6b5c4d3e2f";

    struct UnavailableStore;

    #[async_trait]
    impl ExpenseStore for UnavailableStore {
        async fn query(
            &self,
            _collection: Collection,
            _filter: &RecordFilter,
        ) -> anyhow::Result<Vec<ExpenseRecord>> {
            Err(anyhow::anyhow!("connection refused"))
        }
    }

    fn records() -> Vec<ExpenseRecord> {
        let user_id = UserId::parse(USER).unwrap();
        let bill = |month: Month, electricity: f64| {
            ExpenseRecord::Monthly(MonthlyBillRecord {
                user_id,
                month,
                year: 2024,
                electricity,
                water: 50.0,
                rent: 1000.0,
                others: 20.0,
                total: electricity + 1070.0,
            })
        };
        vec![
            bill(Month::January, 100.0),
            bill(Month::March, 150.0),
            ExpenseRecord::Daily(DailyExpenseRecord {
                user_id,
                date: NaiveDate::from_ymd_opt(2024, 3, 7)
                    .unwrap()
                    .and_hms_milli_opt(23, 59, 59, 999)
                    .unwrap(),
                food: 30.0,
                travel: 12.0,
                entertainment: 0.0,
                shopping: 8.0,
                others: 0.0,
                total: 50.0,
            }),
        ]
    }

    fn app_with(store: Arc<dyn ExpenseStore>) -> Router {
        let clock = Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()));
        create_router(build_state(store, clock), &Config::default()).unwrap()
    }

    fn app() -> Router {
        app_with(Arc::new(MemoryExpenseStore::with_records(records())))
    }

    async fn fetch(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .method(Method::GET)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_weekly_report() {
        let (status, body) = fetch(
            app(),
            &format!("/api/reports/weekly/{}?startDate=2024-03-01&endDate=2024-03-07", USER),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let response: ReportResponse<WeeklyReport> = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.msg, "Weekly report");
        assert_eq!(response.data.total_food, 30.0);
        assert_eq!(response.data.total_amount, 50.0);
    }

    #[tokio::test]
    async fn test_weekly_report_without_dates() {
        let (status, body) = fetch(app(), &format!("/api/reports/weekly/{}?startDate=2024-03-01", USER)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "missing_parameter");
        assert_eq!(error.msg, "Start and end dates are required");
    }

    #[tokio::test]
    async fn test_weekly_report_missing_end_wins_over_malformed_start() {
        let (status, body) = fetch(app(), &format!("/api/reports/weekly/{}?startDate=garbage", USER)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "missing_parameter");
        assert_eq!(error.msg, "Start and end dates are required");
    }

    #[tokio::test]
    async fn test_weekly_report_blank_start_is_missing() {
        let (status, body) = fetch(
            app(),
            &format!("/api/reports/weekly/{}?startDate=&endDate=2024-03-07", USER),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "missing_parameter");
    }

    #[tokio::test]
    async fn test_weekly_report_with_malformed_date() {
        let (status, body) = fetch(
            app(),
            &format!("/api/reports/weekly/{}?startDate=yesterday&endDate=2024-03-07", USER),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "invalid_parameter");
    }

    #[tokio::test]
    async fn test_monthly_report() {
        let (status, body) = fetch(app(), &format!("/api/reports/monthly/{}/january/2024", USER)).await;

        assert_eq!(status, StatusCode::OK);
        let response: ReportResponse<MonthlyReport> = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.msg, "Monthly report");
        assert_eq!(response.data.total_electricity, 100.0);
        assert_eq!(response.data.total_monthly, 1170.0);
    }

    #[tokio::test]
    async fn test_monthly_report_for_current_month() {
        let (status, body) = fetch(app(), &format!("/api/reports/monthly/{}/March/2024", USER)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "report_not_ready");
        assert_eq!(error.msg, "Report not generated");
    }

    #[tokio::test]
    async fn test_invalid_user_id() {
        let (status, body) = fetch(app(), "/api/reports/occasional/abc123/2024").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "invalid_identifier");
    }

    #[tokio::test]
    async fn test_compare_months() {
        let (status, body) = fetch(
            app(),
            &format!("/api/reports/compare/{}/March/2024/January/2024", USER),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let response: ComparisonResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.total_comp.first.period, "January, 2024");
        assert_eq!(response.total_comp.difference, 50.0);
        assert_eq!(response.total_comp.more_in, "March, 2024");
        assert_eq!(response.total_comp.reason, "Major difference was in Electricity");
        assert_eq!(response.individual.electricity.more_in, "March, 2024");
        assert_eq!(response.individual.others.more_in, "Equal");

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json.get("totalComp").is_some());
    }

    #[tokio::test]
    async fn test_compare_with_missing_month() {
        let (status, body) = fetch(
            app(),
            &format!("/api/reports/compare/{}/January/2024/February/2024", USER),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "insufficient_data");
    }

    #[tokio::test]
    async fn test_summary() {
        let (status, body) = fetch(app(), &format!("/api/reports/summary/{}", USER)).await;

        assert_eq!(status, StatusCode::OK);
        let summary: SummaryResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(summary.month, "March");
        assert_eq!(summary.year, 2024);
        assert_eq!(summary.daily_sum, 50.0);
        assert_eq!(summary.monthly_sum, 1220.0);
        assert_eq!(summary.occasional_sum, 0.0);
        assert_eq!(summary.total, 1270.0);
    }

    #[tokio::test]
    async fn test_store_failure_is_service_unavailable() {
        let (status, body) = fetch(
            app_with(Arc::new(UnavailableStore)),
            &format!("/api/reports/summary/{}", USER),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "store_failure");
    }

    #[tokio::test]
    async fn test_health() {
        let (status, _) = fetch(app(), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
    }
}
