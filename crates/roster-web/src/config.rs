//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use sms_gateway::{GatewayError, TwilioConfig};

/// Roster web server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Bearer token required on cron routes, if set.
    pub cron_secret: Option<String>,
    /// Twilio credentials. `None` runs in dry-run mode.
    pub twilio: Option<TwilioConfig>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `ROSTER_ADDR` | Server bind address | `127.0.0.1:8790` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:roster.db?mode=rwc` |
    /// | `CRON_SECRET` | Bearer token for cron routes | (none) |
    /// | `TWILIO_ACCOUNT_SID` | Enables SMS; see `TwilioConfig::from_env` | (none) |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("ROSTER_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8790".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = env::var("SQLITE_PATH")
            .unwrap_or_else(|_| "sqlite:roster.db?mode=rwc".to_string());

        let cron_secret = env::var("CRON_SECRET")
            .ok()
            .filter(|secret| !secret.trim().is_empty());

        let twilio = match env::var("TWILIO_ACCOUNT_SID") {
            Ok(_) => Some(TwilioConfig::from_env()?),
            Err(_) => None,
        };

        Ok(Self {
            addr,
            database_url,
            cron_secret,
            twilio,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid ROSTER_ADDR format")]
    InvalidAddr,

    #[error("Twilio configuration: {0}")]
    Twilio(#[from] GatewayError),
}
