//! Application state shared across handlers.

use std::sync::Arc;

use database::Database;
use scheduler::Engine;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Scheduling engine.
    pub engine: Arc<Engine>,
    /// Bearer token for cron routes.
    pub cron_secret: Option<String>,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, engine: Engine, cron_secret: Option<String>) -> Self {
        Self {
            db,
            engine: Arc::new(engine),
            cron_secret,
        }
    }
}
