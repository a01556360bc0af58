//! Configuration types for sms-gateway.

use std::env;

use crate::error::GatewayError;

/// Default Twilio REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.twilio.com";

/// Configuration for the Twilio Messages API.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Base URL of the REST API (e.g., "https://api.twilio.com").
    pub api_url: String,
    /// Account SID, also the basic-auth username.
    pub account_sid: String,
    /// Auth token, the basic-auth password.
    pub auth_token: String,
    /// Sending phone number in E.164 format.
    pub from_number: String,
}

impl TwilioConfig {
    /// Create a new configuration against the public Twilio API.
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            from_number: from_number.into(),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `TWILIO_ACCOUNT_SID` - Account SID
    /// - `TWILIO_AUTH_TOKEN` - Auth token
    /// - `TWILIO_PHONE_NUMBER` - Sending number
    ///
    /// Optional environment variables:
    /// - `TWILIO_API_URL` - API URL (default: https://api.twilio.com)
    pub fn from_env() -> Result<Self, GatewayError> {
        let account_sid = required("TWILIO_ACCOUNT_SID")?;
        let auth_token = required("TWILIO_AUTH_TOKEN")?;
        let from_number = required("TWILIO_PHONE_NUMBER")?;

        let api_url = env::var("TWILIO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self {
            api_url,
            account_sid,
            auth_token,
            from_number,
        })
    }

    /// Set the API URL (useful for pointing at a local stub).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Get the Messages resource URL for this account.
    pub fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_url.trim_end_matches('/'),
            self.account_sid
        )
    }
}

fn required(name: &str) -> Result<String, GatewayError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(GatewayError::Config(format!("{} not set", name))),
    }
}
