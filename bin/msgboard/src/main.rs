//! # msgboard Binary
//!
//! The entry point that assembles the application based on compile-time features.

mod config;

use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use mb_api::{configure_routes, middleware, AppState};
use mb_core::services::BoardSettings;

// Feature-gated imports
#[cfg(feature = "db-sqlite")]
use mb_db_sqlite::{SqliteThreadRepo, StoreOptions};

#[cfg(not(feature = "db-sqlite"))]
compile_error!("msgboard needs a store plugin; enable the `db-sqlite` feature");

use crate::config::Settings;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::load().context("invalid MSGBOARD_* configuration")?;

    // 1. Initialize the thread store
    #[cfg(feature = "db-sqlite")]
    let repo = Arc::new(
        SqliteThreadRepo::connect_with(
            &settings.database_url,
            StoreOptions {
                max_connections: settings.max_connections,
                acquire_timeout: Duration::from_secs(settings.acquire_timeout_secs),
            },
        )
        .await
        .context("failed to open thread store")?,
    );

    // 2. Wrap the services in AppState
    let state = web::Data::new(AppState::new(
        repo.clone(),
        BoardSettings {
            list_order: settings.list_order,
        },
    ));

    log::info!(
        "msgboard starting on http://{}:{} (listing {:?})",
        settings.host,
        settings.port,
        settings.list_order
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::security_headers())
            .wrap(middleware::cors_policy())
            .wrap(middleware::standard_middleware())
            .app_data(state.clone())
            .configure(configure_routes)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await?;

    repo.close().await;
    Ok(())
}
