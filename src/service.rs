//! Record service: validation in front of a [`RecordStore`].

use std::sync::Arc;

use crate::errors::RecordError;
use crate::record::{NewRecord, Record};
use crate::store::RecordStore;

/// Validates, persists and lists records.
#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn RecordStore>,
}

impl RecordService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Normalize and store a submitted record.
    ///
    /// Fails with [`RecordError::Validation`] when `name` is missing or blank,
    /// or when a detail names an unselected category. The returned record
    /// carries the server-assigned id and creation timestamp.
    pub async fn create(&self, record: NewRecord) -> Result<Record, RecordError> {
        let record = record.normalized()?;
        let stored = self.store.insert(record).await?;
        tracing::info!(id = %stored.id, name = %stored.name(), "Record created");
        Ok(stored)
    }

    /// Every stored record, newest first.
    pub async fn list(&self) -> Result<Vec<Record>, RecordError> {
        let records = self.store.list().await?;
        tracing::debug!(count = records.len(), "Listed records");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use crate::record::PlaceCategory;
    use crate::store::MemoryRecordStore;

    fn service() -> (RecordService, Arc<MemoryRecordStore>) {
        let store = Arc::new(MemoryRecordStore::new());
        (RecordService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_create_rejects_missing_name() {
        let (service, store) = service();
        let err = service.create(NewRecord::default()).await.unwrap_err();

        assert!(matches!(
            err,
            RecordError::Validation(ValidationError::MissingName)
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_create_stores_normalized_record() {
        let (service, _store) = service();
        let mut record = NewRecord::named("Mirabai");
        record.influence = vec!["Kabir, Ravidas ,  Tulsidas".into()];
        record.place_associated = vec![PlaceCategory::Birth];
        record
            .place_associated_details
            .insert(PlaceCategory::Birth, "Merta".into());

        let stored = service.create(record).await.unwrap();
        assert_eq!(stored.fields.influence, vec!["Kabir", "Ravidas", "Tulsidas"]);
        assert_eq!(
            serde_json::to_value(&stored.fields.place_associated_details).unwrap(),
            serde_json::json!({"Birth": "Merta"})
        );
    }

    #[tokio::test]
    async fn test_list_after_two_creates_is_newest_first() {
        let (service, _store) = service();
        let first = service.create(NewRecord::named("Kabir")).await.unwrap();
        let second = service.create(NewRecord::named("Ravidas")).await.unwrap();

        let listed = service.list().await.unwrap();
        assert_eq!(listed, vec![second, first]);
    }
}
