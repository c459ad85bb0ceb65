//! Mail transports
//!
//! A transport receives a fully resolved outgoing message and hands it to a
//! mail relay. [`SmtpTransport`] is the production implementation; tests and
//! development use [`crate::testing::MemoryTransport`].

pub mod smtp;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::MailError;

pub use smtp::SmtpTransport;

/// An attachment in the shape handed to a transport
///
/// Content types are already resolved; the transport never infers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingAttachment {
    /// Filename shown to the recipient
    pub filename: String,

    /// Attachment bytes, if held in memory
    pub content: Option<Vec<u8>>,

    /// Path the transport reads the bytes from when no content is present
    pub source_path: Option<std::path::PathBuf>,

    /// Resolved content type
    pub content_type: String,
}

/// A fully resolved message ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    /// Sender address
    pub from: String,

    /// Recipient address, possibly comma-separated
    pub to: String,

    /// Subject line
    pub subject: String,

    /// Rendered HTML body
    pub html: String,

    /// Resolved attachments
    pub attachments: Vec<OutgoingAttachment>,
}

/// Trait for dispatching a composed message to a mail relay
///
/// A single dispatch attempt either succeeds or surfaces an error; no
/// transport retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Dispatch a message
    ///
    /// # Errors
    ///
    /// Returns `MailError::Dispatch` wrapping the underlying cause, or
    /// `MailError::InvalidAddress` if an address cannot be parsed
    async fn dispatch(&self, message: OutgoingMessage) -> Result<(), MailError>;
}
