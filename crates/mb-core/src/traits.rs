//! # Core Traits (Ports)
//!
//! Any store plugin must implement these traits to be used by the binary.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{ListOrder, Thread};

/// Document persistence contract for threads and their embedded replies.
///
/// Every write replaces a single thread document; there is no cross-document
/// transaction and concurrent writers race with last-write-wins.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ThreadRepo: Send + Sync {
    async fn insert_thread(&self, thread: &Thread) -> Result<()>;

    /// Looks a thread up by `(board, id)`.
    async fn find_thread(&self, board: &str, id: Uuid) -> Result<Option<Thread>>;

    /// Threads on `board` ordered by `bumped_on`, at most `limit` of them.
    async fn list_threads(&self, board: &str, order: ListOrder, limit: i64) -> Result<Vec<Thread>>;

    /// Overwrites the stored document. Returns false if it no longer exists.
    async fn save_thread(&self, thread: &Thread) -> Result<bool>;

    /// Returns false if no thread matched.
    async fn mark_thread_reported(&self, board: &str, id: Uuid) -> Result<bool>;

    /// Returns false if no thread matched.
    async fn delete_thread(&self, board: &str, id: Uuid) -> Result<bool>;
}
