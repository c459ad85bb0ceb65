//! Error types for the maildrop crate

use thiserror::Error;

/// Errors that can occur when configuring the service or sending mail
#[derive(Debug, Error)]
pub enum MailError {
    /// SMTP configuration failed validation
    #[error("invalid SMTP configuration: {0}")]
    Configuration(String),

    /// `send` was called before a successful `configure`
    #[error("SMTP transport not configured; call `configure` first")]
    NotConfigured,

    /// Email has no recipient
    #[error("email must have a recipient")]
    NoRecipient,

    /// Email has no subject
    #[error("email must have a subject")]
    NoSubject,

    /// Email has no HTML body
    #[error("email must have an HTML body")]
    NoBody,

    /// Recipient address does not match the expected shape
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    /// An attachment failed validation
    #[error("invalid attachment: {0}")]
    InvalidAttachment(String),

    /// The template file could not be read
    #[error("template file not found: {0}")]
    TemplateNotFound(String),

    /// Template compilation or rendering error
    #[error("failed to render email template: {0}")]
    Template(#[from] minijinja::Error),

    /// The transport failed to deliver the message
    #[error("failed to send email: {0}")]
    Dispatch(String),
}

impl MailError {
    /// Create a configuration error from a string message
    #[must_use]
    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an invalid-attachment error from a string message
    #[must_use]
    pub fn attachment<T: Into<String>>(msg: T) -> Self {
        Self::InvalidAttachment(msg.into())
    }

    /// Create a dispatch error from a string message
    #[must_use]
    pub fn dispatch<T: Into<String>>(msg: T) -> Self {
        Self::Dispatch(msg.into())
    }
}
