//! Email message with builder and validation
//!
//! An [`Email`] is built per send request, validated by the service, and
//! discarded after dispatch.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attachment::Attachment;
use crate::error::MailError;

/// Basic address shape: `local@domain.tld`, no embedded whitespace
static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("address regex is valid"));

/// An outgoing email message
///
/// Use the builder pattern to construct emails:
///
/// ```rust
/// use maildrop::Email;
///
/// let email = Email::new()
///     .to("user@example.com")
///     .subject("Welcome!")
///     .html("<h1>Welcome!</h1>")
///     .data("name", "Alice");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Email {
    /// Recipient address; may hold multiple comma-separated addresses
    pub to: String,

    /// Email subject
    pub subject: String,

    /// Literal HTML body
    ///
    /// Accepted as input but superseded by the rendered template output
    /// whenever a template renders successfully, which is every successful
    /// send.
    pub html: String,

    /// Values substituted into the template when rendering
    pub data: HashMap<String, Value>,

    /// Ordered list of attachments
    pub attachments: Vec<Attachment>,
}

impl Email {
    /// Create a new empty email
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the recipient; multiple addresses may be given comma-separated
    #[must_use]
    pub fn to<T: Into<String>>(mut self, to: T) -> Self {
        self.to = to.into();
        self
    }

    /// Set the subject
    #[must_use]
    pub fn subject<T: Into<String>>(mut self, subject: T) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the literal HTML body
    #[must_use]
    pub fn html<T: Into<String>>(mut self, html: T) -> Self {
        self.html = html.into();
        self
    }

    /// Add one template data value
    #[must_use]
    pub fn data<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Replace the template data mapping
    #[must_use]
    pub fn template_data(mut self, data: HashMap<String, Value>) -> Self {
        self.data = data;
        self
    }

    /// Add an attachment without validating it
    ///
    /// Validation happens in [`Email::validate`]. Use
    /// [`Email::add_attachment`] to validate at insertion time instead.
    #[must_use]
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Validate the email
    ///
    /// Checks, in order: recipient non-empty, subject non-empty, HTML body
    /// non-empty, the FIRST comma-separated recipient matches a basic
    /// address shape, and every attachment validates. Short-circuits on the
    /// first failing condition.
    ///
    /// # Errors
    ///
    /// Returns the first failing condition: `NoRecipient`, `NoSubject`,
    /// `NoBody`, `InvalidAddress`, or `InvalidAttachment`
    pub fn validate(&self) -> Result<(), MailError> {
        if self.to.trim().is_empty() {
            return Err(MailError::NoRecipient);
        }

        if self.subject.trim().is_empty() {
            return Err(MailError::NoSubject);
        }

        if self.html.trim().is_empty() {
            return Err(MailError::NoBody);
        }

        // Only the first address is checked; the rest are left to the
        // transport's mailbox parsing.
        let first = self.to.split(',').next().unwrap_or_default().trim();
        if !ADDRESS_RE.is_match(first) {
            return Err(MailError::InvalidAddress(first.to_string()));
        }

        for attachment in &self.attachments {
            attachment.validate()?;
        }

        Ok(())
    }

    /// Append an attachment if it is valid
    ///
    /// Invalid candidates are not appended. Returns whether the attachment
    /// was appended, so callers can detect rejection.
    pub fn add_attachment(&mut self, attachment: Attachment) -> bool {
        if attachment.validate().is_ok() {
            self.attachments.push(attachment);
            true
        } else {
            false
        }
    }

    /// Remove every attachment whose filename matches exactly
    ///
    /// Returns true iff at least one attachment was removed.
    pub fn remove_attachment(&mut self, filename: &str) -> bool {
        let initial = self.attachments.len();
        self.attachments.retain(|att| att.filename != filename);
        self.attachments.len() < initial
    }

    /// Number of attachments currently on the email
    #[must_use]
    pub fn attachment_count(&self) -> usize {
        self.attachments.len()
    }
}
