//! Message sender trait and implementations.

use async_trait::async_trait;

use crate::error::SchedulerError;

/// Trait for delivering a text message to a participant.
///
/// Abstracted to support different transports (SMS, tests, etc.)
/// Implementations make a single attempt and report the outcome.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Send a text message.
    ///
    /// # Arguments
    /// * `recipient` - Phone number in E.164 format
    /// * `text` - Message content
    async fn send_message(&self, recipient: &str, text: &str) -> Result<(), SchedulerError>;
}

/// A no-op message sender for testing that discards all messages.
#[derive(Debug, Clone, Default)]
pub struct NoOpSender;

#[async_trait]
impl MessageSender for NoOpSender {
    async fn send_message(&self, _recipient: &str, _text: &str) -> Result<(), SchedulerError> {
        Ok(())
    }
}

/// A logging message sender for dry runs that logs instead of sending.
#[derive(Debug, Clone, Default)]
pub struct LoggingSender;

#[async_trait]
impl MessageSender for LoggingSender {
    async fn send_message(&self, recipient: &str, text: &str) -> Result<(), SchedulerError> {
        tracing::info!("[dry-run] Sending message to {}: {}", recipient, text);
        Ok(())
    }
}
