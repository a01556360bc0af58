//! Twilio Messages API HTTP client.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, error, info};

use crate::config::TwilioConfig;
use crate::error::GatewayError;
use crate::types::{ApiErrorBody, SendParams, SendResult};

/// Client for sending SMS through Twilio.
#[derive(Clone)]
pub struct SmsClient {
    http: Client,
    config: TwilioConfig,
}

impl SmsClient {
    /// Create a client. No request is made until the first send.
    pub fn new(config: TwilioConfig) -> Result<Self, GatewayError> {
        if config.account_sid.is_empty() || config.auth_token.is_empty() {
            return Err(GatewayError::Config(
                "account SID and auth token are required".to_string(),
            ));
        }
        if config.from_number.is_empty() {
            return Err(GatewayError::Config("sending number is required".to_string()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(GatewayError::Http)?;

        Ok(Self { http, config })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::new(TwilioConfig::from_env()?)
    }

    /// The number messages are sent from.
    pub fn from_number(&self) -> &str {
        &self.config.from_number
    }

    /// Send a text message to a recipient.
    pub async fn send_text(&self, to: &str, body: &str) -> Result<SendResult, GatewayError> {
        let params = SendParams::text(to, &self.config.from_number, body);
        self.send(params).await
    }

    /// Send a message using the full SendParams structure.
    pub async fn send(&self, params: SendParams) -> Result<SendResult, GatewayError> {
        let url = self.config.messages_url();
        debug!("POST {} (to: {})", url, params.to);

        let resp = self
            .http
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!("SMS failed to {}: {}", params.to, e);
                GatewayError::Http(e)
            })?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let body: ApiErrorBody = serde_json::from_str(&text).unwrap_or(ApiErrorBody {
                code: 0,
                message: text.clone(),
                more_info: None,
            });
            error!(
                "SMS failed to {}: HTTP {} code {}: {}",
                params.to,
                status.as_u16(),
                body.code,
                body.message
            );
            return Err(GatewayError::Api {
                status: status.as_u16(),
                code: body.code,
                message: body.message,
            });
        }

        let result: SendResult = serde_json::from_str(&text)?;
        info!("SMS sent to {}: {}", params.to, result.sid);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_credentials() {
        let config = TwilioConfig::new("", "", "+15550001111");
        assert!(matches!(SmsClient::new(config), Err(GatewayError::Config(_))));

        let config = TwilioConfig::new("AC123", "token", "");
        assert!(matches!(SmsClient::new(config), Err(GatewayError::Config(_))));
    }

    #[test]
    fn test_new_with_credentials() {
        let config = TwilioConfig::new("AC123", "token", "+15550001111");
        let client = SmsClient::new(config).unwrap();
        assert_eq!(client.from_number(), "+15550001111");
    }
}
