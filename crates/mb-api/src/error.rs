//! # ApiError
//!
//! Turns domain and rendering failures into HTTP responses.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use mb_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::App(AppError::NotFound(..)) => StatusCode::NOT_FOUND,
            ApiError::App(AppError::StoreTimeout(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::App(AppError::StoreFailure(_)) | ApiError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        // Store internals stay in the log.
        let body = if status.is_server_error() {
            log::error!("{}", self);
            status.canonical_reason().unwrap_or("error").to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status)
            .content_type("text/plain; charset=utf-8")
            .body(body)
    }
}
