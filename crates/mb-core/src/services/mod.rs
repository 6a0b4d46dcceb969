//! # Services
//!
//! Request-level operations on threads and replies. Each one is a single
//! read-modify-persist against the injected `ThreadRepo`.

mod replies;
mod threads;

pub use replies::ReplyService;
pub use threads::ThreadService;

use crate::models::ListOrder;

/// Board behaviour that deployments may tune.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardSettings {
    pub list_order: ListOrder,
}
