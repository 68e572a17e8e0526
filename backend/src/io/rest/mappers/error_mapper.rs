//! Translation of [`ReportError`] into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ErrorResponse;
use tracing::{error, warn};

use crate::domain::ReportError;

impl ReportError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ReportError::MissingParameter(_)
            | ReportError::InvalidIdentifier(_)
            | ReportError::InvalidParameter { .. }
            | ReportError::ReportNotReady(_) => StatusCode::BAD_REQUEST,
            ReportError::InsufficientData { .. } => StatusCode::NOT_FOUND,
            ReportError::StoreFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// User-facing message. Store failures are not echoed to the caller.
    pub fn user_message(&self) -> String {
        match self {
            ReportError::MissingParameter(_) => "Start and end dates are required".to_string(),
            ReportError::ReportNotReady(_) => "Report not generated".to_string(),
            ReportError::InsufficientData { .. } => "Insufficient data".to_string(),
            ReportError::StoreFailure(_) => "Record store unavailable".to_string(),
            other => other.to_string(),
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.kind().to_string(),
            msg: self.user_message(),
        }
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Report request failed: {:?}", self);
        } else {
            warn!("Report request rejected: {}", self);
        }
        (status, Json(self.to_error_response())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Month, Period};

    #[test]
    fn test_each_variant_has_distinct_signal() {
        let period = Period::new(Month::May, 2024);
        let errors = vec![
            ReportError::MissingParameter("startDate"),
            ReportError::InvalidIdentifier("x".to_string()),
            ReportError::InvalidParameter {
                name: "year",
                value: "20x4".to_string(),
            },
            ReportError::ReportNotReady(period),
            ReportError::InsufficientData {
                first: period,
                second: period,
            },
            ReportError::StoreFailure(anyhow::anyhow!("disk full")),
        ];

        let mut kinds: Vec<&str> = errors.iter().map(|e| e.kind()).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn test_status_codes() {
        let period = Period::new(Month::May, 2024);
        assert_eq!(
            ReportError::MissingParameter("endDate").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ReportError::ReportNotReady(period).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ReportError::InsufficientData {
                first: period,
                second: period
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ReportError::StoreFailure(anyhow::anyhow!("timeout")).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_store_failure_details_stay_internal() {
        let body = ReportError::StoreFailure(anyhow::anyhow!("password=hunter2")).to_error_response();
        assert_eq!(body.error, "store_failure");
        assert!(!body.msg.contains("hunter2"));
    }
}
