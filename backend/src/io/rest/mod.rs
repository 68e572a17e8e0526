//! # REST API Interface Layer
//!
//! - **Endpoints**: `/api/reports/*` report routes and `/api/health`
//! - **Parsing**: month names, years and dates become typed inputs here
//! - **Error translation**: every [`ReportError`](crate::domain::ReportError)
//!   variant has its own status and a `{ error, msg }` body

pub mod health_apis;
pub mod mappers;
pub mod report_apis;
