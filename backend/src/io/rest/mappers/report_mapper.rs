//! Conversions between request strings, domain values and `shared` DTOs.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use shared::{
    CategoryComparison, ComparisonResponse, IndividualComparison, MonthlyReport,
    OccasionalReport, PeriodAmount, ReportResponse, SummaryResponse,
    TotalComparison, WeeklyReport,
};

use crate::domain::models::{
    AggregateResult, CurrentSummary, Delta, Field, Month, Period, PeriodComparison,
};
use crate::domain::{ReportError, ReportResult};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Stored dates compare as text, which is only chronological for
/// four-digit years
const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

pub struct ReportMapper;

impl ReportMapper {
    /// A required query value; blank counts as absent
    pub fn require<'a>(name: &'static str, raw: Option<&'a str>) -> ReportResult<&'a str> {
        non_blank(raw).ok_or(ReportError::MissingParameter(name))
    }

    /// Start bound: a date-only value means midnight of that day.
    /// Blank values count as absent.
    pub fn parse_start(raw: Option<&str>) -> ReportResult<Option<NaiveDateTime>> {
        match non_blank(raw) {
            None => Ok(None),
            Some(value) => parse_date_time(value)
                .map(Some)
                .ok_or_else(|| invalid("startDate", value)),
        }
    }

    /// End bound: only the day matters, the whole day is included
    pub fn parse_end(raw: Option<&str>) -> ReportResult<Option<NaiveDate>> {
        match non_blank(raw) {
            None => Ok(None),
            Some(value) => parse_date_time(value)
                .map(|instant| Some(instant.date()))
                .ok_or_else(|| invalid("endDate", value)),
        }
    }

    pub fn parse_year(name: &'static str, raw: &str) -> ReportResult<i32> {
        raw.trim().parse::<i32>().map_err(|_| invalid(name, raw))
    }

    pub fn parse_period(
        month_name: &'static str,
        month: &str,
        year_name: &'static str,
        year: &str,
    ) -> ReportResult<Period> {
        let month = month.parse::<Month>().map_err(|_| invalid(month_name, month))?;
        Ok(Period::new(month, Self::parse_year(year_name, year)?))
    }

    pub fn to_weekly_response(result: &AggregateResult) -> ReportResponse<WeeklyReport> {
        ReportResponse {
            msg: "Weekly report".to_string(),
            data: WeeklyReport {
                total_food: result.get(Field::Food),
                total_travel: result.get(Field::Travel),
                total_entertainment: result.get(Field::Entertainment),
                total_shopping: result.get(Field::Shopping),
                total_others: result.get(Field::Others),
                total_amount: result.total(),
            },
        }
    }

    pub fn to_monthly_response(result: &AggregateResult) -> ReportResponse<MonthlyReport> {
        ReportResponse {
            msg: "Monthly report".to_string(),
            data: MonthlyReport {
                total_electricity: result.get(Field::Electricity),
                total_water: result.get(Field::Water),
                total_rent: result.get(Field::Rent),
                total_others: result.get(Field::Others),
                total_monthly: result.total(),
            },
        }
    }

    pub fn to_occasional_response(result: &AggregateResult) -> ReportResponse<OccasionalReport> {
        ReportResponse {
            msg: "Occasional report".to_string(),
            data: OccasionalReport {
                total_insurance: result.get(Field::Insurance),
                total_school_fee: result.get(Field::SchoolFee),
                total_repair: result.get(Field::Repair),
                total_occasional: result.total(),
            },
        }
    }

    pub fn to_comparison_response(comparison: &PeriodComparison) -> ComparisonResponse {
        let category = |field: Field| {
            let delta = comparison
                .delta(field)
                .copied()
                .unwrap_or_else(|| Delta::between(0.0, 0.0));
            Self::to_category_comparison(comparison, &delta)
        };

        let total = Self::to_category_comparison(comparison, &comparison.total);
        ComparisonResponse {
            total_comp: TotalComparison {
                first: total.first,
                second: total.second,
                difference: total.difference,
                more_in: total.more_in,
                reason: comparison.spike.reason(),
            },
            individual: IndividualComparison {
                electricity: category(Field::Electricity),
                water: category(Field::Water),
                rent: category(Field::Rent),
                others: category(Field::Others),
            },
        }
    }

    pub fn to_summary_response(summary: &CurrentSummary) -> SummaryResponse {
        SummaryResponse {
            month: summary.period.month.name().to_string(),
            year: summary.period.year,
            daily_sum: summary.daily_total,
            monthly_sum: summary.monthly_total,
            occasional_sum: summary.occasional_total,
            total: summary.grand_total,
        }
    }

    fn to_category_comparison(comparison: &PeriodComparison, delta: &Delta) -> CategoryComparison {
        let (first, second) = comparison.periods();
        CategoryComparison {
            first: PeriodAmount {
                period: first.label(),
                amount: delta.first,
            },
            second: PeriodAmount {
                period: second.label(),
                amount: delta.second,
            },
            difference: delta.difference,
            more_in: comparison.more_in_label(delta),
        }
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    let instant = match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date.and_time(NaiveTime::MIN)),
        Err(_) => DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok()),
    };
    instant.filter(|instant| SUPPORTED_YEARS.contains(&instant.year()))
}

fn invalid(name: &'static str, value: &str) -> ReportError {
    ReportError::InvalidParameter {
        name,
        value: value.to_string(),
    }
}
