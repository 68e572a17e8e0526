//! # Storage Module
//!
//! The record store adapter. The domain only sees [`ExpenseStore`]; the
//! SQLite repository and the in-memory store are interchangeable behind it.
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: SQLite via SQLx, sums pushed down into `GROUP BY`
//! - **In-Memory Storage**: a vector of records, summed by the trait's fold

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod traits;

pub use connection::DbConnection;
pub use memory::MemoryExpenseStore;
pub use repositories::ExpenseRepository;
pub use traits::ExpenseStore;
