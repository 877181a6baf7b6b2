//! Risetrack HTTP server binary.

use actix_web::{middleware, web, App, HttpServer};
use risetrack_core::{Config, Database};
use risetrack_server::api::{self, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::load().map_err(into_io_error)?;
    let db = Database::open().map_err(into_io_error)?;
    let state = web::Data::new(AppState::new(db, config.clone()));

    info!(bind = %config.server.bind, "starting risetrack server");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(api::configure)
    })
    .bind(&config.server.bind)?
    .run()
    .await
}

fn into_io_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
}
