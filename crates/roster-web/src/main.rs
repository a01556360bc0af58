//! Roster web server.
//!
//! Serves the cron triggers, the Twilio webhook and the directory API.

use std::sync::Arc;

use database::Database;
use roster_web::{AppState, Config, SmsSender};
use scheduler::{Engine, EngineConfig, LoggingSender, MessageSender};
use sms_gateway::SmsClient;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    let engine_config = EngineConfig::from_env()?;
    info!(
        addr = %config.addr,
        crew_size = engine_config.crew_size,
        window_hours = engine_config.response_window_hours(),
        "Starting roster web server"
    );

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let sender: Arc<dyn MessageSender> = match config.twilio {
        Some(twilio) => {
            let client = SmsClient::new(twilio)?;
            info!(from = client.from_number(), "SMS sending enabled");
            Arc::new(SmsSender::new(client))
        }
        None => {
            warn!("Twilio not configured, messages will only be logged");
            Arc::new(LoggingSender)
        }
    };

    if config.cron_secret.is_none() {
        warn!("CRON_SECRET not set, cron routes are open");
    }

    let engine = Engine::new(db.clone(), sender, engine_config);
    let state = AppState::new(db, engine, config.cron_secret);
    let app = roster_web::router().with_state(state);

    // Start server
    info!(addr = %config.addr, "Roster web server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
