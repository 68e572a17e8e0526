//! Domain models for expense reporting.
//!
//! Records are read-only query results owned by the record store; everything
//! else here is computed per request and dropped with the response.

pub mod aggregate;
pub mod comparison;
pub mod expense;
pub mod filter;
pub mod period;

pub use aggregate::*;
pub use comparison::*;
pub use expense::*;
pub use filter::*;
pub use period::*;
