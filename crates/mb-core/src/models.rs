//! # Domain Models
//!
//! Stored records (`Thread`, `Reply`) and the client views derived from them.
//! A Reply only ever lives embedded inside its Thread.
//!
//! Views are separate types on purpose: `reported` and `delete_password`
//! have no field to serialize into.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Text a reply is overwritten with once it has been deleted.
pub const DELETED_MARKER: &str = "[deleted]";

/// Maximum number of threads returned by a board listing.
pub const THREAD_PAGE_SIZE: i64 = 10;

/// Number of replies previewed per thread in a board listing.
pub const REPLY_PREVIEW_LIMIT: usize = 3;

/// Current time at the precision the store keeps (milliseconds).
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// A child post embedded in a thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub id: Uuid,
    pub text: String,
    pub created_on: DateTime<Utc>,
    pub delete_password: String,
    pub reported: bool,
}

impl Reply {
    pub fn new(text: String, delete_password: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            text,
            created_on: now,
            delete_password,
            reported: false,
        }
    }
}

/// A top-level post on a board, owning its replies.
#[derive(Debug, Clone, PartialEq)]
pub struct Thread {
    pub id: Uuid,
    pub board: String,
    pub text: String,
    pub created_on: DateTime<Utc>,
    /// Recency key for board listings; moves forward on every reply.
    pub bumped_on: DateTime<Utc>,
    pub reported: bool,
    pub delete_password: String,
    pub replies: Vec<Reply>,
}

impl Thread {
    pub fn new(board: &str, text: String, delete_password: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            board: board.to_string(),
            text,
            created_on: now,
            bumped_on: now,
            reported: false,
            delete_password,
            replies: Vec::new(),
        }
    }

    /// Moves `bumped_on` to `now`, never backwards.
    pub fn bump(&mut self, now: DateTime<Utc>) {
        if now > self.bumped_on {
            self.bumped_on = now;
        }
    }

    pub fn reply_count(&self) -> usize {
        self.replies.len()
    }

    pub fn find_reply_mut(&mut self, reply_id: Uuid) -> Option<&mut Reply> {
        self.replies.iter_mut().find(|r| r.id == reply_id)
    }

    /// Replies ordered oldest first. Stable, so equal timestamps keep insertion order.
    pub fn replies_by_creation(&self) -> Vec<&Reply> {
        let mut replies: Vec<&Reply> = self.replies.iter().collect();
        replies.sort_by_key(|r| r.created_on);
        replies
    }
}

/// Public shape of a reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub text: String,
    pub created_on: DateTime<Utc>,
}

impl From<&Reply> for ReplyView {
    fn from(reply: &Reply) -> Self {
        Self {
            id: reply.id,
            text: reply.text.clone(),
            created_on: reply.created_on,
        }
    }
}

/// A thread as it appears in a board listing: reply preview plus full count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub text: String,
    pub created_on: DateTime<Utc>,
    pub bumped_on: DateTime<Utc>,
    pub replies: Vec<ReplyView>,
    /// Total replies on the thread, not the length of the preview.
    pub replycount: usize,
}

impl ThreadSummary {
    pub fn from_thread(thread: &Thread, preview: usize) -> Self {
        Self {
            id: thread.id,
            text: thread.text.clone(),
            created_on: thread.created_on,
            bumped_on: thread.bumped_on,
            replies: thread
                .replies_by_creation()
                .into_iter()
                .take(preview)
                .map(ReplyView::from)
                .collect(),
            replycount: thread.reply_count(),
        }
    }
}

/// A single thread with every reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadDetail {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub board: String,
    pub text: String,
    pub created_on: DateTime<Utc>,
    pub bumped_on: DateTime<Utc>,
    pub replies: Vec<ReplyView>,
    pub replycount: usize,
}

impl From<&Thread> for ThreadDetail {
    fn from(thread: &Thread) -> Self {
        Self {
            id: thread.id,
            board: thread.board.clone(),
            text: thread.text.clone(),
            created_on: thread.created_on,
            bumped_on: thread.bumped_on,
            replies: thread
                .replies_by_creation()
                .into_iter()
                .map(ReplyView::from)
                .collect(),
            replycount: thread.reply_count(),
        }
    }
}

/// Order in which a board listing walks `bumped_on`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListOrder {
    /// Ascending: the least recently bumped threads come first.
    #[default]
    OldestBumpedFirst,
    /// Descending: the most recently active threads come first.
    LatestBumpedFirst,
}

/// Result of a password-gated delete. A wrong password is an answer, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    WrongPassword,
}

impl DeleteOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeleteOutcome::Deleted => "success",
            DeleteOutcome::WrongPassword => "incorrect password",
        }
    }
}

impl std::fmt::Display for DeleteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
