//! Testing utilities
//!
//! Provides an in-memory transport that captures dispatched messages for
//! assertions instead of contacting a relay.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use crate::error::MailError;
use crate::transport::{OutgoingMessage, Transport};

/// In-memory transport for tests and development
///
/// Captures dispatched messages for assertions. Clones share the same
/// capture buffer, so a clone handed to the service can be inspected from
/// the test afterwards.
///
/// # Examples
///
/// ```rust
/// use maildrop::testing::MemoryTransport;
/// use maildrop::{Email, EmailService, SmtpConfig};
///
/// # async fn example() -> Result<(), maildrop::MailError> {
/// let transport = MemoryTransport::new();
///
/// let mut service = EmailService::new();
/// service.configure_with_transport(
///     SmtpConfig::new("smtp.example.com", 587, "sender@example.com", "secret"),
///     Box::new(transport.clone()),
/// )?;
///
/// // ... send emails ...
///
/// assert_eq!(transport.sent_count(), 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    sent: Arc<Mutex<Vec<OutgoingMessage>>>,
    failure: Option<String>,
}

impl MemoryTransport {
    /// Create a transport that accepts every message
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport that fails every dispatch with the given cause
    #[must_use]
    pub fn failing<T: Into<String>>(cause: T) -> Self {
        Self {
            sent: Arc::default(),
            failure: Some(cause.into()),
        }
    }

    /// Number of messages dispatched
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// All dispatched messages
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    #[must_use]
    pub fn sent_messages(&self) -> Vec<OutgoingMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// The most recently dispatched message
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    #[must_use]
    pub fn last_sent(&self) -> Option<OutgoingMessage> {
        self.sent.lock().unwrap().last().cloned()
    }

    /// Whether a message was dispatched to the given recipient field
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    #[must_use]
    pub fn was_sent_to(&self, address: &str) -> bool {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .any(|message| message.to.contains(address))
    }

    /// Clear the capture buffer
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn dispatch(&self, message: OutgoingMessage) -> Result<(), MailError> {
        if let Some(cause) = &self.failure {
            return Err(MailError::dispatch(cause.clone()));
        }

        debug!(to = %message.to, subject = %message.subject, "captured message");
        self.sent.lock().unwrap().push(message);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(to: &str) -> OutgoingMessage {
        OutgoingMessage {
            from: "sender@example.com".to_string(),
            to: to.to_string(),
            subject: "Test".to_string(),
            html: "<p>Hello</p>".to_string(),
            attachments: vec![],
        }
    }

    #[tokio::test]
    async fn test_captures_messages() {
        let transport = MemoryTransport::new();

        transport.dispatch(message("a@example.com")).await.unwrap();
        transport.dispatch(message("b@example.com")).await.unwrap();

        assert_eq!(transport.sent_count(), 2);
        assert!(transport.was_sent_to("a@example.com"));
        assert_eq!(transport.last_sent().unwrap().to, "b@example.com");
    }

    #[tokio::test]
    async fn test_clones_share_the_buffer() {
        let transport = MemoryTransport::new();
        let clone = transport.clone();

        clone.dispatch(message("a@example.com")).await.unwrap();

        assert_eq!(transport.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let transport = MemoryTransport::new();
        transport.dispatch(message("a@example.com")).await.unwrap();

        transport.clear();
        assert_eq!(transport.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_failing_transport() {
        let transport = MemoryTransport::failing("relay unavailable");

        let result = transport.dispatch(message("a@example.com")).await;
        match result {
            Err(MailError::Dispatch(cause)) => assert!(cause.contains("relay unavailable")),
            other => panic!("expected dispatch error, got {other:?}"),
        }
        assert_eq!(transport.sent_count(), 0);
    }
}
