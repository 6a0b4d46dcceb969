//! # mb-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the core services.
//! Bodies are accepted as urlencoded forms or JSON.

use std::sync::Arc;

use actix_web::{web, Either, HttpResponse};
use mb_core::models::ThreadDetail;
use mb_core::services::{BoardSettings, ReplyService, ThreadService};
use mb_core::traits::ThreadRepo;
use mb_ui::path_segment;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

/// Path prefix of the HTML views that POSTs redirect to.
pub const VIEW_PREFIX: &str = "/b";

/// State shared across all Actix-web workers.
pub struct AppState {
    pub threads: ThreadService,
    pub replies: ReplyService,
}

impl AppState {
    pub fn new(repo: Arc<dyn ThreadRepo>, settings: BoardSettings) -> Self {
        Self {
            threads: ThreadService::new(repo.clone(), settings),
            replies: ReplyService::new(repo),
        }
    }
}

type Body<T> = Either<web::Form<T>, web::Json<T>>;

fn body<T>(payload: Body<T>) -> T {
    match payload {
        Either::Left(form) => form.into_inner(),
        Either::Right(json) => json.into_inner(),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NewThread {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub delete_password: String,
}

#[derive(Debug, Deserialize)]
pub struct ThreadRef {
    pub thread_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ThreadDeletion {
    pub thread_id: Uuid,
    #[serde(default)]
    pub delete_password: String,
}

#[derive(Debug, Deserialize)]
pub struct NewReply {
    pub thread_id: Uuid,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub delete_password: String,
}

#[derive(Debug, Deserialize)]
pub struct ReplyRef {
    pub thread_id: Uuid,
    pub reply_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ReplyDeletion {
    pub thread_id: Uuid,
    pub reply_id: Uuid,
    #[serde(default)]
    pub delete_password: String,
}

pub fn board_url(board: &str) -> String {
    format!("{}/{}", VIEW_PREFIX, path_segment(board))
}

pub fn thread_url(board: &str, thread_id: Uuid) -> String {
    format!("{}/{}/{}", VIEW_PREFIX, path_segment(board), thread_id)
}

fn see_other(location: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

fn plain(text: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(text)
}

/// POST /api/threads/{board}
///
/// A missing or unreadable body still creates a thread, with empty fields.
pub async fn create_thread(
    data: web::Data<AppState>,
    path: web::Path<String>,
    payload: Option<Body<NewThread>>,
) -> Result<HttpResponse, ApiError> {
    let board = path.into_inner();
    let NewThread { text, delete_password } = payload.map(body).unwrap_or_default();

    data.threads.create_thread(&board, text, delete_password).await?;
    Ok(see_other(board_url(&board)))
}

/// GET /api/threads/{board}
pub async fn list_threads(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let threads = data.threads.list_recent_threads(&path).await?;
    Ok(HttpResponse::Ok().json(threads))
}

/// PUT /api/threads/{board}
pub async fn report_thread(
    data: web::Data<AppState>,
    path: web::Path<String>,
    payload: Body<ThreadRef>,
) -> Result<HttpResponse, ApiError> {
    let ThreadRef { thread_id } = body(payload);
    data.threads.mark_thread_reported(&path, thread_id).await?;
    Ok(plain("success"))
}

/// DELETE /api/threads/{board}
pub async fn delete_thread(
    data: web::Data<AppState>,
    path: web::Path<String>,
    payload: Body<ThreadDeletion>,
) -> Result<HttpResponse, ApiError> {
    let ThreadDeletion { thread_id, delete_password } = body(payload);
    let outcome = data
        .threads
        .delete_thread(&path, thread_id, &delete_password)
        .await?;
    Ok(plain(outcome.as_str()))
}

/// POST /api/replies/{board}
pub async fn create_reply(
    data: web::Data<AppState>,
    path: web::Path<String>,
    payload: Body<NewReply>,
) -> Result<HttpResponse, ApiError> {
    let board = path.into_inner();
    let NewReply { thread_id, text, delete_password } = body(payload);

    data.replies
        .add_reply(&board, thread_id, text, delete_password)
        .await?;
    Ok(see_other(thread_url(&board, thread_id)))
}

/// GET /api/replies/{board}?thread_id=...
pub async fn show_thread(
    data: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ThreadRef>,
) -> Result<web::Json<ThreadDetail>, ApiError> {
    let thread = data.replies.get_thread(&path, query.thread_id).await?;
    Ok(web::Json(thread))
}

/// PUT /api/replies/{board}
pub async fn report_reply(
    data: web::Data<AppState>,
    path: web::Path<String>,
    payload: Body<ReplyRef>,
) -> Result<HttpResponse, ApiError> {
    let ReplyRef { thread_id, reply_id } = body(payload);
    data.replies
        .mark_reply_reported(&path, thread_id, reply_id)
        .await?;
    Ok(plain("success"))
}

/// DELETE /api/replies/{board}
pub async fn delete_reply(
    data: web::Data<AppState>,
    path: web::Path<String>,
    payload: Body<ReplyDeletion>,
) -> Result<HttpResponse, ApiError> {
    let ReplyDeletion { thread_id, reply_id, delete_password } = body(payload);
    let outcome = data
        .replies
        .delete_reply(&path, thread_id, reply_id, &delete_password)
        .await?;
    Ok(plain(outcome.as_str()))
}

/// A simple homepage handler for "/"
pub async fn index() -> HttpResponse {
    plain("msgboard is running. Try /b/general")
}
