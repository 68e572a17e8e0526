//! # Domain Module
//!
//! Business logic of the expense reports, independent of HTTP and storage.
//!
//! ## Services
//!
//! - [`Aggregator`]: grouped sums over one record collection
//! - [`ReportService`]: range, monthly and occasional reports
//! - [`ComparisonService`]: month-over-month bill comparison with spike detection
//! - [`SummaryService`]: concurrent current-month totals

pub mod aggregator;
pub mod calendar;
pub mod commands;
pub mod comparison_service;
pub mod error;
pub mod models;
pub mod report_service;
pub mod summary_service;

pub use aggregator::Aggregator;
pub use calendar::{Clock, FixedClock, SystemClock};
pub use comparison_service::ComparisonService;
pub use error::{ReportError, ReportResult};
pub use report_service::ReportService;
pub use summary_service::SummaryService;
