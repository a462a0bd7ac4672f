//! SQLite storage for saint records.
//!
//! One row per record. List-valued fields and the detail map are stored as
//! JSON text. Every operation opens its own connection on a blocking task,
//! so concurrent inserts are serialized by SQLite's own locking.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::RecordStore;
use crate::errors::StoreError;
use crate::record::{NewRecord, Record};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed record store.
#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    /// Path to the SQLite database file.
    pub db_path: PathBuf,
}

/// Columns as read back from the `records` table, before decoding.
struct RawRow {
    id: String,
    name: String,
    tradition: Option<String>,
    period: Option<String>,
    tradition_type: Option<String>,
    gender: Option<String>,
    language: Option<String>,
    deity: Option<String>,
    philosophy: Option<String>,
    influence: String,
    texts: String,
    place_associated: String,
    place_associated_details: String,
    created_at: String,
    updated_at: String,
}

impl SqliteRecordStore {
    /// Open (creating if needed) the database at `db_path`.
    pub fn new(db_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let db_path = db_path.into();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let storage = Self { db_path };
        storage.initialize_db()?;
        Ok(storage)
    }

    /// Create the `records` table.
    fn initialize_db(&self) -> Result<(), StoreError> {
        let conn = open(&self.db_path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS records (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                tradition TEXT,
                period TEXT,
                tradition_type TEXT,
                gender TEXT,
                language TEXT,
                deity TEXT,
                philosophy TEXT,
                influence TEXT NOT NULL,
                texts TEXT NOT NULL,
                place_associated TEXT NOT NULL,
                place_associated_details TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        log::debug!("Initialized record table at {}", self.db_path.display());
        Ok(())
    }

    fn insert_blocking(db_path: &Path, record: &Record) -> Result<(), StoreError> {
        let fields = &record.fields;
        let influence = serde_json::to_string(&fields.influence)?;
        let texts = serde_json::to_string(&fields.texts)?;
        let places = serde_json::to_string(&fields.place_associated)?;
        let details = serde_json::to_string(&fields.place_associated_details)?;

        let conn = open(db_path)?;
        conn.execute(
            "INSERT INTO records
             (id, name, tradition, period, tradition_type, gender, language, deity,
              philosophy, influence, texts, place_associated, place_associated_details,
              created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                record.id.to_string(),
                fields.name,
                fields.tradition,
                fields.period,
                fields.tradition_type,
                fields.gender,
                fields.language,
                fields.deity,
                fields.philosophy,
                influence,
                texts,
                places,
                details,
                timestamp(&record.created_at),
                timestamp(&record.updated_at),
            ],
        )?;
        Ok(())
    }

    fn list_blocking(db_path: &Path) -> Result<Vec<Record>, StoreError> {
        let conn = open(db_path)?;
        let mut stmt = conn.prepare(
            "SELECT id, name, tradition, period, tradition_type, gender, language, deity,
                    philosophy, influence, texts, place_associated, place_associated_details,
                    created_at, updated_at
             FROM records
             ORDER BY created_at DESC, rowid DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(RawRow {
                id: row.get(0)?,
                name: row.get(1)?,
                tradition: row.get(2)?,
                period: row.get(3)?,
                tradition_type: row.get(4)?,
                gender: row.get(5)?,
                language: row.get(6)?,
                deity: row.get(7)?,
                philosophy: row.get(8)?,
                influence: row.get(9)?,
                texts: row.get(10)?,
                place_associated: row.get(11)?,
                place_associated_details: row.get(12)?,
                created_at: row.get(13)?,
                updated_at: row.get(14)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(decode(row?)?);
        }
        Ok(records)
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn insert(&self, record: NewRecord) -> Result<Record, StoreError> {
        let stored = Record::stamp(record);
        let db_path = self.db_path.clone();
        let row = stored.clone();

        tokio::task::spawn_blocking(move || Self::insert_blocking(&db_path, &row)).await??;

        log::debug!("Stored record {} ({})", stored.id, stored.name());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Record>, StoreError> {
        let db_path = self.db_path.clone();
        tokio::task::spawn_blocking(move || Self::list_blocking(&db_path)).await?
    }
}

fn open(db_path: &Path) -> Result<Connection, StoreError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(conn)
}

/// Fixed-width UTC timestamp so that text ordering matches time ordering.
fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(id: &str, value: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt {
            id: id.to_string(),
            message: format!("bad timestamp {value:?}: {e}"),
        })
}

fn decode(row: RawRow) -> Result<Record, StoreError> {
    let id = Uuid::parse_str(&row.id).map_err(|e| StoreError::Corrupt {
        id: row.id.clone(),
        message: e.to_string(),
    })?;
    let created_at = parse_timestamp(&row.id, &row.created_at)?;
    let updated_at = parse_timestamp(&row.id, &row.updated_at)?;

    Ok(Record {
        id,
        fields: NewRecord {
            name: row.name,
            tradition: row.tradition,
            period: row.period,
            tradition_type: row.tradition_type,
            gender: row.gender,
            language: row.language,
            deity: row.deity,
            philosophy: row.philosophy,
            influence: serde_json::from_str(&row.influence)?,
            texts: serde_json::from_str(&row.texts)?,
            place_associated: serde_json::from_str(&row.place_associated)?,
            place_associated_details: serde_json::from_str(&row.place_associated_details)?,
        },
        created_at,
        updated_at,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;
    use crate::record::PlaceCategory;

    fn store_in(dir: &tempfile::TempDir) -> SqliteRecordStore {
        SqliteRecordStore::new(dir.path().join("nested").join("saints.db")).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_list_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut record = NewRecord::named("Mirabai");
        record.tradition = Some("Vaishnava".into());
        record.texts = vec!["Padavali".into()];
        record.place_associated = vec![PlaceCategory::Birth, PlaceCategory::Samadhi];
        record
            .place_associated_details
            .insert(PlaceCategory::Birth, "Merta".into());

        let stored = store.insert(record.clone()).await.unwrap();
        let listed = store.list().await.unwrap();

        assert_eq!(listed, vec![stored.clone()]);
        assert_eq!(listed[0].fields, record);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.insert(NewRecord::named("Kabir")).await.unwrap();
        store.insert(NewRecord::named("Ravidas")).await.unwrap();

        let listed = store.list().await.unwrap();
        let names: Vec<&str> = listed.iter().map(Record::name).collect();
        assert_eq!(names, vec!["Ravidas", "Kabir"]);
        assert!(listed[0].created_at >= listed[1].created_at);
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let stored = store_in(&dir)
            .insert(NewRecord::named("Andal"))
            .await
            .unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.list().await.unwrap(), vec![stored]);
    }

    #[tokio::test]
    async fn test_corrupt_timestamp_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.insert(NewRecord::named("Basava")).await.unwrap();

        let conn = Connection::open(&store.db_path).unwrap();
        conn.execute("UPDATE records SET created_at = 'yesterday'", [])
            .unwrap();

        let err = store.list().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }), "{err}");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_inserts_are_all_kept() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(store_in(&dir));

        let tasks: Vec<_> = (0..64)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.insert(NewRecord::named(format!("Saint {i}"))).await })
            })
            .collect();
        let mut ids = HashSet::new();
        for task in tasks {
            ids.insert(task.await.unwrap().unwrap().id);
        }

        let listed = store.list().await.unwrap();
        let listed_ids: HashSet<Uuid> = listed.iter().map(|r| r.id).collect();
        assert_eq!(listed.len(), 64);
        assert_eq!(listed_ids, ids);
    }
}
