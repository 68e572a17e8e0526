use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use super::traits::ExpenseStore;
use crate::domain::models::{Collection, ExpenseRecord, RecordFilter};

/// Record store backed by a vector, for tests and local experiments.
///
/// Sums use the trait's provided fold over `query`.
#[derive(Clone, Default)]
pub struct MemoryExpenseStore {
    records: Arc<RwLock<Vec<ExpenseRecord>>>,
}

impl MemoryExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ExpenseRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    pub fn insert(&self, record: ExpenseRecord) -> Result<()> {
        self.records
            .write()
            .map_err(|_| anyhow!("memory store lock poisoned"))?
            .push(record);
        Ok(())
    }
}

#[async_trait]
impl ExpenseStore for MemoryExpenseStore {
    async fn query(&self, collection: Collection, filter: &RecordFilter) -> Result<Vec<ExpenseRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;

        Ok(records
            .iter()
            .filter(|r| r.collection() == collection && filter.matches(r))
            .cloned()
            .collect())
    }
}
