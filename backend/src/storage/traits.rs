//! # Storage Traits
//!
//! The read contract the report services need from a record store. Any backend
//! (SQLite, an in-memory list, a remote document store) can sit behind it.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{
    sum_groups, Collection, ExpenseRecord, Field, GroupBy, GroupSum, RecordFilter,
};

/// Read-only query interface over the daily, monthly and occasional records
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// All records of `collection` matching `filter`
    async fn query(&self, collection: Collection, filter: &RecordFilter) -> Result<Vec<ExpenseRecord>>;

    /// Grouped sums of `fields` over the records matching `filter`.
    ///
    /// Returns one entry per non-empty group, so zero matches yield an empty
    /// list. Group order is unspecified. The provided implementation folds the
    /// output of [`ExpenseStore::query`]; stores that can sum natively should
    /// override it.
    async fn aggregate_sum(
        &self,
        collection: Collection,
        filter: &RecordFilter,
        group_by: GroupBy,
        fields: &[Field],
    ) -> Result<Vec<GroupSum>> {
        let records = self.query(collection, filter).await?;
        Ok(sum_groups(&records, group_by, fields))
    }
}
