use thiserror::Error;

use super::models::Period;

/// Failures of the report operations.
///
/// Each variant is a distinct signal so the request layer can choose a status
/// and message; an empty match is never an error.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A required input was not supplied
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),

    /// User identifier is not in the store's id format
    #[error("invalid user identifier `{0}`")]
    InvalidIdentifier(String),

    /// An input was supplied but could not be parsed
    #[error("invalid value `{value}` for `{name}`")]
    InvalidParameter { name: &'static str, value: String },

    /// The requested month is still accruing records
    #[error("report for {0} not generated yet")]
    ReportNotReady(Period),

    /// At least one of the compared months has no bills
    #[error("insufficient data to compare {first} with {second}")]
    InsufficientData { first: Period, second: Period },

    /// The record store failed; surfaced as-is, never retried here
    #[error("record store failure: {0}")]
    StoreFailure(#[from] anyhow::Error),
}

impl ReportError {
    /// Stable machine-readable name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            ReportError::MissingParameter(_) => "missing_parameter",
            ReportError::InvalidIdentifier(_) => "invalid_identifier",
            ReportError::InvalidParameter { .. } => "invalid_parameter",
            ReportError::ReportNotReady(_) => "report_not_ready",
            ReportError::InsufficientData { .. } => "insufficient_data",
            ReportError::StoreFailure(_) => "store_failure",
        }
    }
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;
