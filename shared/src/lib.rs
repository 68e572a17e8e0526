use serde::{Deserialize, Serialize};

/// Query string accepted by the weekly (date range) report endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReportRequest {
    /// Inclusive start, `YYYY-MM-DD` or a naive `YYYY-MM-DDTHH:MM:SS` instant
    pub start_date: Option<String>,
    /// Inclusive end day; the whole day is covered
    pub end_date: Option<String>,
}

/// Envelope used by the three single-report endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResponse<T> {
    pub msg: String,
    pub data: T,
}

/// Summed daily spend over a date range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    pub total_food: f64,
    pub total_travel: f64,
    pub total_entertainment: f64,
    pub total_shopping: f64,
    pub total_others: f64,
    pub total_amount: f64,
}

/// Summed recurring bills for one month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub total_electricity: f64,
    pub total_water: f64,
    pub total_rent: f64,
    pub total_others: f64,
    pub total_monthly: f64,
}

/// Summed occasional expenses for one calendar year
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccasionalReport {
    pub total_insurance: f64,
    pub total_school_fee: f64,
    pub total_repair: f64,
    pub total_occasional: f64,
}

/// One side of a comparison, labelled like "March, 2024"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodAmount {
    pub period: String,
    pub amount: f64,
}

/// Difference of a single bill category between two months.
///
/// `first` is always the chronologically earlier month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryComparison {
    pub first: PeriodAmount,
    pub second: PeriodAmount,
    pub difference: f64,
    /// Label of the period with the larger amount, or "Equal"
    pub more_in: String,
}

/// Difference of the bill totals, plus the spike explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalComparison {
    pub first: PeriodAmount,
    pub second: PeriodAmount,
    pub difference: f64,
    pub more_in: String,
    /// "Major difference was in <Category>" or "No significant spike"
    pub reason: String,
}

/// Per-category breakdown in fixed category order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualComparison {
    pub electricity: CategoryComparison,
    pub water: CategoryComparison,
    pub rent: CategoryComparison,
    pub others: CategoryComparison,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResponse {
    pub total_comp: TotalComparison,
    pub individual: IndividualComparison,
}

/// Current-month totals across all three expense sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub month: String,
    pub year: i32,
    pub daily_sum: f64,
    pub monthly_sum: f64,
    pub occasional_sum: f64,
    pub total: f64,
}

/// Body returned for every failed report request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable machine-readable kind, e.g. "report_not_ready"
    pub error: String,
    pub msg: String,
}
