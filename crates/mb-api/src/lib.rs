//! # mb-api
//!
//! The web routing and orchestration layer for msgboard.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod views;

use actix_web::web;

pub use handlers::AppState;

/// Configures the JSON API under `/api` and the HTML views under `/b`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::resource("/threads/{board}")
                    .route(web::post().to(handlers::create_thread))
                    .route(web::get().to(handlers::list_threads))
                    .route(web::put().to(handlers::report_thread))
                    .route(web::delete().to(handlers::delete_thread)),
            )
            .service(
                web::resource("/replies/{board}")
                    .route(web::post().to(handlers::create_reply))
                    .route(web::get().to(handlers::show_thread))
                    .route(web::put().to(handlers::report_reply))
                    .route(web::delete().to(handlers::delete_reply)),
            ),
    )
    .route("/b/{board}", web::get().to(views::board_view))
    .route("/b/{board}/{thread_id}", web::get().to(views::thread_view))
    .route("/", web::get().to(handlers::index));
}
