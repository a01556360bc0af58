//! HTTP surface for the sacrament roster.
//!
//! Exposes the engine triggers for an external cron, the SMS webhook, and a
//! small JSON API over the participant directory and schedules.

pub mod config;
pub mod error;
pub mod routes;
pub mod sender;
pub mod state;

pub use config::{Config, ConfigError};
pub use error::WebError;
pub use routes::router;
pub use sender::SmsSender;
pub use state::AppState;
