//! # mb-db-sqlite Implementation
//!
//! Stores each thread as one row and embeds its replies as a JSON document
//! column, so a thread is always read and written as a single unit.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mb_core::error::{AppError, Result};
use mb_core::models::{ListOrder, Reply, Thread};
use mb_core::traits::ThreadRepo;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

const CREATE_THREADS: &str = "CREATE TABLE IF NOT EXISTS threads (
    id BLOB PRIMARY KEY NOT NULL,
    board TEXT NOT NULL,
    text TEXT NOT NULL,
    created_on INTEGER NOT NULL,
    bumped_on INTEGER NOT NULL,
    reported INTEGER NOT NULL DEFAULT 0,
    delete_password TEXT NOT NULL,
    replies TEXT NOT NULL DEFAULT '[]'
)";

const CREATE_BOARD_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_threads_board_bumped ON threads (board, bumped_on)";

/// Pool tuning for the store.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub max_connections: u32,
    /// How long a request waits for a connection before failing with `StoreTimeout`.
    pub acquire_timeout: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

pub struct SqliteThreadRepo {
    pool: SqlitePool,
}

// Helper for UUID conversion
fn uuid_to_blob(id: Uuid) -> Vec<u8> {
    id.as_bytes().to_vec()
}

fn blob_to_uuid(blob: &[u8]) -> Result<Uuid> {
    Uuid::from_slice(blob).map_err(|e| AppError::StoreFailure(format!("corrupt thread id: {e}")))
}

fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

fn from_millis(ms: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| AppError::StoreFailure(format!("timestamp out of range: {ms}")))
}

fn store_err(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::PoolTimedOut => AppError::StoreTimeout("no connection available".to_string()),
        other => AppError::StoreFailure(other.to_string()),
    }
}

fn doc_err(err: serde_json::Error) -> AppError {
    AppError::StoreFailure(format!("reply document: {err}"))
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

impl SqliteThreadRepo {
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with(url, StoreOptions::default()).await
    }

    /// Opens the pool and creates the schema if it is missing.
    pub async fn connect_with(url: &str, options: StoreOptions) -> Result<Self> {
        let connect = SqliteConnectOptions::from_str(url)
            .map_err(store_err)?
            .create_if_missing(true);

        let mut pool = SqlitePoolOptions::new().acquire_timeout(options.acquire_timeout);
        // Every connection to `:memory:` is its own database, so keep exactly one alive.
        pool = if is_memory_url(url) {
            pool.max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool.max_connections(options.max_connections)
        };

        let pool = pool.connect_with(connect).await.map_err(store_err)?;
        let repo = Self { pool };
        repo.migrate().await?;
        log::info!("thread store ready at {}", url);
        Ok(repo)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(CREATE_THREADS)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        sqlx::query(CREATE_BOARD_INDEX)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    /// Waits for in-flight queries and closes every connection.
    pub async fn close(&self) {
        self.pool.close().await;
        log::info!("thread store closed");
    }

    fn row_to_thread(row: &SqliteRow) -> Result<Thread> {
        let replies: Vec<Reply> =
            serde_json::from_str(&row.try_get::<String, _>("replies").map_err(store_err)?)
                .map_err(doc_err)?;

        Ok(Thread {
            id: blob_to_uuid(row.try_get::<Vec<u8>, _>("id").map_err(store_err)?.as_slice())?,
            board: row.try_get("board").map_err(store_err)?,
            text: row.try_get("text").map_err(store_err)?,
            created_on: from_millis(row.try_get("created_on").map_err(store_err)?)?,
            bumped_on: from_millis(row.try_get("bumped_on").map_err(store_err)?)?,
            reported: row.try_get("reported").map_err(store_err)?,
            delete_password: row.try_get("delete_password").map_err(store_err)?,
            replies,
        })
    }
}

#[async_trait]
impl ThreadRepo for SqliteThreadRepo {
    async fn insert_thread(&self, thread: &Thread) -> Result<()> {
        let replies = serde_json::to_string(&thread.replies).map_err(doc_err)?;

        sqlx::query("INSERT INTO threads (id, board, text, created_on, bumped_on, reported, delete_password, replies) VALUES (?, ?, ?, ?, ?, ?, ?, ?)")
            .bind(uuid_to_blob(thread.id))
            .bind(&thread.board)
            .bind(&thread.text)
            .bind(to_millis(thread.created_on))
            .bind(to_millis(thread.bumped_on))
            .bind(thread.reported)
            .bind(&thread.delete_password)
            .bind(replies)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn find_thread(&self, board: &str, id: Uuid) -> Result<Option<Thread>> {
        let row = sqlx::query("SELECT * FROM threads WHERE board = ? AND id = ?")
            .bind(board)
            .bind(uuid_to_blob(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;

        row.as_ref().map(Self::row_to_thread).transpose()
    }

    async fn list_threads(&self, board: &str, order: ListOrder, limit: i64) -> Result<Vec<Thread>> {
        // rowid breaks ties between threads bumped in the same millisecond.
        let sql = match order {
            ListOrder::OldestBumpedFirst => {
                "SELECT * FROM threads WHERE board = ? ORDER BY bumped_on ASC, rowid ASC LIMIT ?"
            }
            ListOrder::LatestBumpedFirst => {
                "SELECT * FROM threads WHERE board = ? ORDER BY bumped_on DESC, rowid DESC LIMIT ?"
            }
        };

        sqlx::query(sql)
            .bind(board)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?
            .iter()
            .map(Self::row_to_thread)
            .collect()
    }

    /// Writes back the fields that may change after creation.
    async fn save_thread(&self, thread: &Thread) -> Result<bool> {
        let replies = serde_json::to_string(&thread.replies).map_err(doc_err)?;

        let done = sqlx::query("UPDATE threads SET bumped_on = ?, reported = ?, replies = ? WHERE id = ?")
            .bind(to_millis(thread.bumped_on))
            .bind(thread.reported)
            .bind(replies)
            .bind(uuid_to_blob(thread.id))
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(done.rows_affected() > 0)
    }

    async fn mark_thread_reported(&self, board: &str, id: Uuid) -> Result<bool> {
        let done = sqlx::query("UPDATE threads SET reported = 1 WHERE board = ? AND id = ?")
            .bind(board)
            .bind(uuid_to_blob(id))
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(done.rows_affected() > 0)
    }

    async fn delete_thread(&self, board: &str, id: Uuid) -> Result<bool> {
        let done = sqlx::query("DELETE FROM threads WHERE board = ? AND id = ?")
            .bind(board)
            .bind(uuid_to_blob(id))
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(done.rows_affected() > 0)
    }
}
