//! SMS transport for the engine.

use async_trait::async_trait;
use scheduler::{MessageSender, SchedulerError};
use sms_gateway::SmsClient;

/// Twilio-backed message sender.
#[derive(Clone)]
pub struct SmsSender {
    client: SmsClient,
}

impl SmsSender {
    /// Create a new SMS sender.
    pub fn new(client: SmsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MessageSender for SmsSender {
    async fn send_message(&self, recipient: &str, text: &str) -> Result<(), SchedulerError> {
        self.client
            .send_text(recipient, text)
            .await
            .map_err(|e| SchedulerError::SendFailed(e.to_string()))?;
        Ok(())
    }
}
