//! Song sheet store
//!
//! A single `songs` table with twelve TEXT columns keyed by `identifier`.
//! The table is dropped and recreated at the start of every run; rows are
//! only ever inserted, never updated.

use crate::models::SongMetadata;
use cantodb_common::db::init_database;
use sqlx::SqlitePool;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Row insertion errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Insert rejected (e.g. duplicate identifier)
    #[error("Insert of identifier '{identifier}' failed: {source}")]
    Insert {
        identifier: String,
        #[source]
        source: sqlx::Error,
    },
}

const DROP_SONGS_TABLE: &str = "DROP TABLE IF EXISTS songs";

// "key" and "group" are SQL keywords and stay quoted everywhere
const CREATE_SONGS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS songs (
        title TEXT,
        author TEXT,
        album TEXT,
        "key" TEXT,
        family TEXT,
        "group" TEXT,
        moments TEXT,
        identifier TEXT PRIMARY KEY,
        revision_date TEXT,
        transcriber TEXT,
        full_text TEXT,
        simplified_text TEXT
    )
"#;

const INSERT_SONG: &str = r#"
    INSERT INTO songs (
        title, author, album, "key", family, "group", moments,
        identifier, revision_date, transcriber, full_text, simplified_text
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

/// Handle to the song store for one run
pub struct SongStore {
    pool: SqlitePool,
}

impl SongStore {
    /// Open or create the database file
    pub async fn open(db_path: &Path) -> cantodb_common::Result<Self> {
        let pool = init_database(db_path).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Drop and recreate the `songs` table
    pub async fn reset_schema(&self) -> cantodb_common::Result<()> {
        sqlx::query(DROP_SONGS_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_SONGS_TABLE).execute(&self.pool).await?;

        info!("Song table reset");
        Ok(())
    }

    /// Insert one record
    pub async fn insert(&self, song: &SongMetadata) -> Result<(), StoreError> {
        sqlx::query(INSERT_SONG)
            .bind(&song.title)
            .bind(&song.author)
            .bind(&song.album)
            .bind(&song.key)
            .bind(&song.family)
            .bind(&song.group)
            .bind(&song.moments)
            .bind(&song.identifier)
            .bind(&song.revision_date)
            .bind(&song.transcriber)
            .bind(&song.full_text)
            .bind(&song.simplified_text)
            .execute(&self.pool)
            .await
            .map_err(|source| StoreError::Insert {
                identifier: song.identifier.clone(),
                source,
            })?;

        Ok(())
    }

    /// Number of stored rows
    pub async fn count(&self) -> cantodb_common::Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Close the underlying connection
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn open_store(dir: &TempDir) -> SongStore {
        let store = SongStore::open(&dir.path().join("songs.db")).await.unwrap();
        store.reset_schema().await.unwrap();
        store
    }

    fn song(identifier: &str, title: &str) -> SongMetadata {
        SongMetadata {
            identifier: identifier.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_schema_has_twelve_text_columns() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        let columns: Vec<(String, String, i64)> =
            sqlx::query_as("SELECT name, type, pk FROM pragma_table_info('songs') ORDER BY cid")
                .fetch_all(store.pool())
                .await
                .unwrap();

        let names: Vec<&str> = columns.iter().map(|(n, _, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "title",
                "author",
                "album",
                "key",
                "family",
                "group",
                "moments",
                "identifier",
                "revision_date",
                "transcriber",
                "full_text",
                "simplified_text"
            ]
        );
        assert!(columns.iter().all(|(_, ty, _)| ty == "TEXT"));

        let pk: Vec<&str> = columns
            .iter()
            .filter(|(_, _, pk)| *pk > 0)
            .map(|(n, _, _)| n.as_str())
            .collect();
        assert_eq!(pk, vec!["identifier"]);
    }

    #[tokio::test]
    async fn test_insert_stores_every_column() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        let record = SongMetadata {
            title: "T".into(),
            author: "A".into(),
            album: "Al".into(),
            key: "Do".into(),
            family: "F".into(),
            group: "G".into(),
            moments: "M".into(),
            identifier: "id-1".into(),
            revision_date: "2024".into(),
            transcriber: "Tr".into(),
            full_text: "full".into(),
            simplified_text: "simple".into(),
        };
        store.insert(&record).await.unwrap();

        let row: (String, String, String, String) = sqlx::query_as(
            r#"SELECT "key", "group", full_text, simplified_text FROM songs WHERE identifier = ?"#,
        )
        .bind("id-1")
        .fetch_one(store.pool())
        .await
        .unwrap();
        assert_eq!(row, ("Do".into(), "G".into(), "full".into(), "simple".into()));
    }

    #[tokio::test]
    async fn test_duplicate_identifier_fails_and_keeps_first_row() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        store.insert(&song("001", "Primo")).await.unwrap();
        let err = store.insert(&song("001", "Secondo")).await.unwrap_err();
        match err {
            StoreError::Insert { identifier, .. } => assert_eq!(identifier, "001"),
        }

        assert_eq!(store.count().await.unwrap(), 1);
        let title: String = sqlx::query_scalar("SELECT title FROM songs WHERE identifier = '001'")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(title, "Primo");
    }

    #[tokio::test]
    async fn test_reset_schema_drops_previous_rows() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;
        store.insert(&song("a", "x")).await.unwrap();
        store.insert(&song("b", "y")).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);

        store.reset_schema().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
