use std::sync::Arc;

use uuid::Uuid;

use super::BoardSettings;
use crate::error::{AppError, Result};
use crate::models::{
    now_millis, DeleteOutcome, Thread, ThreadSummary, REPLY_PREVIEW_LIMIT, THREAD_PAGE_SIZE,
};
use crate::traits::ThreadRepo;

/// Creates, lists, reports and deletes threads.
#[derive(Clone)]
pub struct ThreadService {
    repo: Arc<dyn ThreadRepo>,
    settings: BoardSettings,
}

impl ThreadService {
    pub fn new(repo: Arc<dyn ThreadRepo>, settings: BoardSettings) -> Self {
        Self { repo, settings }
    }

    /// Persists a fresh thread. Text and password are taken as given, empty included.
    pub async fn create_thread(
        &self,
        board: &str,
        text: String,
        delete_password: String,
    ) -> Result<Thread> {
        let thread = Thread::new(board, text, delete_password, now_millis());
        self.repo.insert_thread(&thread).await?;
        log::info!("created thread {} on /{}/", thread.id, board);
        Ok(thread)
    }

    /// The board's first page: at most ten threads, three reply previews each.
    pub async fn list_recent_threads(&self, board: &str) -> Result<Vec<ThreadSummary>> {
        let threads = self
            .repo
            .list_threads(board, self.settings.list_order, THREAD_PAGE_SIZE)
            .await?;

        Ok(threads
            .iter()
            .map(|thread| ThreadSummary::from_thread(thread, REPLY_PREVIEW_LIMIT))
            .collect())
    }

    pub async fn mark_thread_reported(&self, board: &str, thread_id: Uuid) -> Result<()> {
        if !self.repo.mark_thread_reported(board, thread_id).await? {
            log::debug!("report for unknown thread {} on /{}/", thread_id, board);
            return Err(AppError::thread_not_found(thread_id));
        }
        log::info!("thread {} on /{}/ reported", thread_id, board);
        Ok(())
    }

    /// Removes the thread if `delete_password` matches exactly.
    pub async fn delete_thread(
        &self,
        board: &str,
        thread_id: Uuid,
        delete_password: &str,
    ) -> Result<DeleteOutcome> {
        let thread = self
            .repo
            .find_thread(board, thread_id)
            .await?
            .ok_or_else(|| AppError::thread_not_found(thread_id))?;

        if thread.delete_password != delete_password {
            log::warn!("wrong delete password for thread {}", thread_id);
            return Ok(DeleteOutcome::WrongPassword);
        }

        // Someone else may have removed it between the lookup and now.
        if !self.repo.delete_thread(board, thread_id).await? {
            return Err(AppError::thread_not_found(thread_id));
        }

        log::info!("deleted thread {} from /{}/", thread_id, board);
        Ok(DeleteOutcome::Deleted)
    }
}
