//! # HTML Views
//!
//! Server-rendered pages behind the redirect targets of the posting endpoints.

use actix_web::{web, HttpResponse};
use askama::Template;
use mb_ui::{BoardTemplate, ThreadTemplate};
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::AppState;

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// Renders the Board Index (e.g., /b/general)
pub async fn board_view(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let board = path.into_inner();
    let threads = data.threads.list_recent_threads(&board).await?;

    let page = BoardTemplate {
        board: &board,
        threads: &threads,
    }
    .render()?;
    Ok(html(page))
}

/// Renders a specific Thread (e.g., /b/general/<uuid>)
pub async fn thread_view(
    data: web::Data<AppState>,
    path: web::Path<(String, Uuid)>,
) -> Result<HttpResponse, ApiError> {
    let (board, thread_id) = path.into_inner();
    let thread = data.replies.get_thread(&board, thread_id).await?;

    let page = ThreadTemplate {
        board: &board,
        thread: &thread,
    }
    .render()?;
    Ok(html(page))
}
