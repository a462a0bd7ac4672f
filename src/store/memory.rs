//! In-process record store.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::RecordStore;
use crate::errors::StoreError;
use crate::record::{NewRecord, Record};

/// Keeps records in a vector guarded by a write lock. Contents are lost on
/// restart.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<Vec<Record>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, record: NewRecord) -> Result<Record, StoreError> {
        let stored = Record::stamp(record);
        self.records.write().push(stored.clone());
        log::debug!("Stored record {} in memory", stored.id);
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Record>, StoreError> {
        let mut records: Vec<Record> = self.records.read().iter().rev().cloned().collect();
        // Stable sort keeps later inserts first when timestamps collide.
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
