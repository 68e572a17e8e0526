//! # Expense Report Backend
//!
//! Aggregates recorded expenses into reports, compares months of bills and
//! composes current-month summaries.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (Aggregator, report/comparison/summary services)
//!     ↓
//! Storage Layer (ExpenseStore: SQLite or in-memory)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::Config;
use domain::{
    Aggregator, Clock, ComparisonService, ReportService, SummaryService, SystemClock,
};
use io::rest::{health_apis, report_apis};
use storage::{DbConnection, ExpenseRepository, ExpenseStore};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub report_service: ReportService,
    pub comparison_service: ComparisonService,
    pub summary_service: SummaryService,
}

/// Wire the services over any record store and clock
pub fn build_state(store: Arc<dyn ExpenseStore>, clock: Arc<dyn Clock>) -> AppState {
    let aggregator = Aggregator::new(store);

    AppState {
        report_service: ReportService::new(aggregator.clone(), clock.clone()),
        comparison_service: ComparisonService::new(aggregator.clone()),
        summary_service: SummaryService::new(aggregator, clock),
    }
}

/// Initialize the backend against the configured SQLite database
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url).await?;

    info!("Setting up domain model");
    let store = Arc::new(ExpenseRepository::new(db_conn));
    Ok(build_state(store, Arc::new(SystemClock)))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &Config) -> Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("invalid CORS origin `{}`", config.cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(health_apis::health))
        .nest("/reports", report_apis::router());

    // An expired timeout drops the handler future along with any pending store calls
    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}
