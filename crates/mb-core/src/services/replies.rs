use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{now_millis, DeleteOutcome, Reply, Thread, ThreadDetail, DELETED_MARKER};
use crate::traits::ThreadRepo;

/// Appends, shows, reports and soft-deletes replies.
#[derive(Clone)]
pub struct ReplyService {
    repo: Arc<dyn ThreadRepo>,
}

impl ReplyService {
    pub fn new(repo: Arc<dyn ThreadRepo>) -> Self {
        Self { repo }
    }

    /// Appends a reply and bumps the thread to the same instant.
    pub async fn add_reply(
        &self,
        board: &str,
        thread_id: Uuid,
        text: String,
        delete_password: String,
    ) -> Result<Thread> {
        let mut thread = self.load(board, thread_id).await?;

        let now = now_millis();
        thread.bump(now);
        thread.replies.push(Reply::new(text, delete_password, now));

        self.persist(&thread).await?;
        log::info!("reply added to thread {} on /{}/", thread_id, board);
        Ok(thread)
    }

    pub async fn get_thread(&self, board: &str, thread_id: Uuid) -> Result<ThreadDetail> {
        let thread = self.load(board, thread_id).await?;
        Ok(ThreadDetail::from(&thread))
    }

    pub async fn mark_reply_reported(
        &self,
        board: &str,
        thread_id: Uuid,
        reply_id: Uuid,
    ) -> Result<()> {
        let mut thread = self.load(board, thread_id).await?;
        let reply = thread
            .find_reply_mut(reply_id)
            .ok_or_else(|| AppError::reply_not_found(reply_id))?;
        reply.reported = true;

        self.persist(&thread).await?;
        log::info!("reply {} in thread {} reported", reply_id, thread_id);
        Ok(())
    }

    /// Overwrites the reply text with the deletion marker if the password matches.
    /// The reply itself stays in the thread.
    pub async fn delete_reply(
        &self,
        board: &str,
        thread_id: Uuid,
        reply_id: Uuid,
        delete_password: &str,
    ) -> Result<DeleteOutcome> {
        let mut thread = self.load(board, thread_id).await?;
        let reply = thread
            .find_reply_mut(reply_id)
            .ok_or_else(|| AppError::reply_not_found(reply_id))?;

        if reply.delete_password != delete_password {
            log::warn!("wrong delete password for reply {}", reply_id);
            return Ok(DeleteOutcome::WrongPassword);
        }
        reply.text = DELETED_MARKER.to_string();

        self.persist(&thread).await?;
        log::info!("reply {} in thread {} deleted", reply_id, thread_id);
        Ok(DeleteOutcome::Deleted)
    }

    async fn load(&self, board: &str, thread_id: Uuid) -> Result<Thread> {
        self.repo
            .find_thread(board, thread_id)
            .await?
            .ok_or_else(|| AppError::thread_not_found(thread_id))
    }

    async fn persist(&self, thread: &Thread) -> Result<()> {
        if !self.repo.save_thread(thread).await? {
            return Err(AppError::thread_not_found(thread.id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockThreadRepo;
    use chrono::Duration;

    fn seeded_thread() -> Thread {
        let start = now_millis() - Duration::minutes(5);
        let mut thread = Thread::new("general", "op".into(), "pw".into(), start);
        thread
            .replies
            .push(Reply::new("first".into(), "r1".into(), start + Duration::seconds(1)));
        thread
            .replies
            .push(Reply::new("second".into(), "r2".into(), start + Duration::seconds(2)));
        thread.bump(start + Duration::seconds(2));
        thread
    }

    fn repo_serving(thread: Thread) -> MockThreadRepo {
        let mut repo = MockThreadRepo::new();
        repo.expect_find_thread()
            .returning(move |_, _| Ok(Some(thread.clone())));
        repo
    }

    #[tokio::test]
    async fn test_add_reply_bumps_and_appends() {
        let thread = seeded_thread();
        let before = thread.bumped_on;
        let mut repo = repo_serving(thread);
        repo.expect_save_thread()
            .withf(|t| t.replies.len() == 3)
            .times(1)
            .returning(|_| Ok(true));

        let updated = ReplyService::new(Arc::new(repo))
            .add_reply("general", Uuid::now_v7(), "third".into(), "r3".into())
            .await
            .unwrap();

        let added = updated.replies.last().unwrap();
        assert_eq!(added.text, "third");
        assert!(!added.reported);
        assert!(updated.bumped_on >= before);
        assert_eq!(updated.bumped_on, added.created_on);
    }

    #[tokio::test]
    async fn test_add_reply_to_missing_thread() {
        let mut repo = MockThreadRepo::new();
        repo.expect_find_thread().returning(|_, _| Ok(None));
        repo.expect_save_thread().never();

        let err = ReplyService::new(Arc::new(repo))
            .add_reply("general", Uuid::now_v7(), "x".into(), "y".into())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(..)));
    }

    #[tokio::test]
    async fn test_get_thread_returns_every_reply() {
        let detail = ReplyService::new(Arc::new(repo_serving(seeded_thread())))
            .get_thread("general", Uuid::now_v7())
            .await
            .unwrap();
        assert_eq!(detail.replies.len(), 2);
        assert_eq!(detail.replycount, 2);
    }

    #[tokio::test]
    async fn test_report_reply_persists_flag() {
        let thread = seeded_thread();
        let target = thread.replies[1].id;
        let mut repo = repo_serving(thread);
        repo.expect_save_thread()
            .withf(move |t| t.replies.iter().all(|r| r.reported == (r.id == target)))
            .times(1)
            .returning(|_| Ok(true));

        ReplyService::new(Arc::new(repo))
            .mark_reply_reported("general", Uuid::now_v7(), target)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_report_unknown_reply_is_not_found() {
        let mut repo = repo_serving(seeded_thread());
        repo.expect_save_thread().never();

        let err = ReplyService::new(Arc::new(repo))
            .mark_reply_reported("general", Uuid::now_v7(), Uuid::now_v7())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(kind, _) if kind == "reply"));
    }

    #[tokio::test]
    async fn test_delete_reply_wrong_password_leaves_text() {
        let thread = seeded_thread();
        let target = thread.replies[0].id;
        let mut repo = repo_serving(thread);
        repo.expect_save_thread().never();

        let outcome = ReplyService::new(Arc::new(repo))
            .delete_reply("general", Uuid::now_v7(), target, "r2")
            .await
            .unwrap();
        assert_eq!(outcome, DeleteOutcome::WrongPassword);
    }

    #[tokio::test]
    async fn test_delete_reply_overwrites_only_target() {
        let thread = seeded_thread();
        let target = thread.replies[0].id;
        let mut repo = repo_serving(thread);
        repo.expect_save_thread()
            .withf(|t| {
                t.replies.len() == 2
                    && t.replies[0].text == DELETED_MARKER
                    && t.replies[1].text == "second"
            })
            .times(1)
            .returning(|_| Ok(true));

        let outcome = ReplyService::new(Arc::new(repo))
            .delete_reply("general", Uuid::now_v7(), target, "r1")
            .await
            .unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
    }

    #[tokio::test]
    async fn test_save_timeout_surfaces() {
        let mut repo = repo_serving(seeded_thread());
        repo.expect_save_thread()
            .returning(|_| Err(AppError::StoreTimeout("pool".into())));

        let err = ReplyService::new(Arc::new(repo))
            .add_reply("general", Uuid::now_v7(), "x".into(), "y".into())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::StoreTimeout(_)));
    }
}
