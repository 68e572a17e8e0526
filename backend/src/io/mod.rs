//! # IO Module
//!
//! Adapter between HTTP callers and the report services. Handlers parse path
//! and query strings into typed queries, call the domain, and map results and
//! errors onto the wire types of the `shared` crate.

pub mod rest;
