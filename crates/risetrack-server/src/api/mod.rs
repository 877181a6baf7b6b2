//! HTTP API: shared state, route registration.

pub mod error;
mod streak;
mod wakeups;

pub use error::ApiError;

use actix_web::web;
use risetrack_core::{Config, Database};
use std::sync::{Mutex, MutexGuard};
use tracing::error;

/// Shared application state: the record store behind a lock plus the
/// configuration holding streak defaults.
pub struct AppState {
    pub(crate) db: Mutex<Database>,
    pub(crate) config: Config,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> Self {
        Self {
            db: Mutex::new(db),
            config,
        }
    }
}

/// Register all API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(wakeups::list)
        .service(wakeups::create)
        .service(wakeups::get_by_day)
        .service(wakeups::update)
        .service(wakeups::delete)
        .service(streak::get_streak);
}

pub(crate) fn lock_db(state: &AppState) -> Result<MutexGuard<'_, Database>, ApiError> {
    state.db.lock().map_err(|_| {
        error!("database mutex poisoned");
        ApiError::Internal
    })
}
