#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use mb_api::AppState;
use mb_core::models::{ListOrder, Thread};
use mb_core::services::BoardSettings;
use mb_core::traits::ThreadRepo;
use mb_db_sqlite::SqliteThreadRepo;

pub const BOARD: &str = "general";

/// Builds the routed app around `$state` (a `web::Data<AppState>`).
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state.clone())
                .configure(mb_api::configure_routes),
        )
        .await
    };
}

pub async fn store() -> Arc<SqliteThreadRepo> {
    Arc::new(SqliteThreadRepo::connect("sqlite::memory:").await.unwrap())
}

pub fn state(repo: Arc<SqliteThreadRepo>, list_order: ListOrder) -> web::Data<AppState> {
    web::Data::new(AppState::new(repo, BoardSettings { list_order }))
}

/// Reads the stored document directly, hidden fields included.
pub async fn stored(repo: &SqliteThreadRepo, thread: &Thread) -> Option<Thread> {
    repo.find_thread(&thread.board, thread.id).await.unwrap()
}

/// Keeps consecutive writes in distinct milliseconds.
pub async fn tick() {
    actix_web::rt::time::sleep(Duration::from_millis(5)).await;
}
