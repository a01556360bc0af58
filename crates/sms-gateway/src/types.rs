//! Wire types for the Twilio Messages API and inbound webhook.

use serde::{Deserialize, Serialize};

/// Form parameters for creating a message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendParams {
    /// Recipient phone number.
    pub to: String,
    /// Sending phone number.
    pub from: String,
    /// Message text.
    pub body: String,
}

impl SendParams {
    /// Create new send params for a text message.
    pub fn text(
        to: impl Into<String>,
        from: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            from: from.into(),
            body: body.into(),
        }
    }
}

/// Message resource returned after a successful create.
#[derive(Debug, Clone, Deserialize)]
pub struct SendResult {
    /// Message SID (e.g., "SM...").
    pub sid: String,
    /// Delivery status at creation time, usually "queued".
    #[serde(default)]
    pub status: Option<String>,
    /// Recipient as normalised by the provider.
    #[serde(default)]
    pub to: Option<String>,
}

/// Error body returned by the REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Provider error code (e.g., 21211 for an invalid "To" number).
    #[serde(default)]
    pub code: i64,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Documentation link.
    #[serde(default)]
    pub more_info: Option<String>,
}

/// Inbound message webhook payload (form-encoded).
///
/// Only the fields the roster needs are decoded; the provider sends many more.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundSms {
    /// Sender phone number.
    #[serde(rename = "From")]
    pub from: String,
    /// Message text.
    #[serde(rename = "Body", default)]
    pub body: String,
    /// Provider message SID.
    #[serde(rename = "MessageSid", default)]
    pub message_sid: Option<String>,
}

/// Content type of a TwiML document.
pub const TWIML_CONTENT_TYPE: &str = "text/xml";

/// TwiML document that acknowledges a webhook without replying.
pub const EMPTY_TWIML: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Response></Response>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_send_result() {
        let json = r#"{
            "sid": "SM1234567890abcdef",
            "status": "queued",
            "to": "+15550001111",
            "from": "+15559990000",
            "body": "Hello"
        }"#;

        let result: SendResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.sid, "SM1234567890abcdef");
        assert_eq!(result.status.as_deref(), Some("queued"));
    }

    #[test]
    fn test_parse_api_error() {
        let json = r#"{
            "code": 21211,
            "message": "The 'To' number +1555 is not a valid phone number.",
            "more_info": "https://www.twilio.com/docs/errors/21211",
            "status": 400
        }"#;

        let err: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(err.code, 21211);
        assert!(err.message.contains("not a valid phone number"));
    }
}
