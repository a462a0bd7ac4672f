//! Storage backends for saint records.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::record::{NewRecord, Record};

pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;

/// Persistence interface for records.
///
/// Backends assign the identifier and timestamps at insert time and return
/// records newest-first from [`RecordStore::list`]. Each insert is atomic on
/// its own; no multi-record transactions exist.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist an already-normalized record.
    async fn insert(&self, record: NewRecord) -> Result<Record, StoreError>;

    /// All stored records, most recently created first.
    async fn list(&self) -> Result<Vec<Record>, StoreError>;
}
