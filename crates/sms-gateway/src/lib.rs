//! Twilio SMS client library.
//!
//! This crate provides a Rust client for sending SMS through the Twilio
//! Messages REST API, plus the types needed to answer Twilio's inbound
//! message webhook.
//!
//! There are no retries here. A failed send is reported to the caller once.
//!
//! # Example
//!
//! ```no_run
//! use sms_gateway::{SmsClient, TwilioConfig};
//!
//! # async fn example() -> Result<(), sms_gateway::GatewayError> {
//! let config = TwilioConfig::from_env()?;
//! let client = SmsClient::new(config)?;
//!
//! let result = client.send_text("+12345678901", "Hello!").await?;
//! println!("Queued as {}", result.sid);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::SmsClient;
pub use config::TwilioConfig;
pub use error::GatewayError;
pub use types::*;

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
