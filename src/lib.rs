//! maildrop: template-driven SMTP email delivery
//!
//! This crate provides a small email-sending service:
//! - SMTP configuration validation and transport setup (via `lettre`)
//! - Email payload validation (recipient, subject, body, attachments)
//! - Attachment content-type inference from filename extensions
//! - Runtime HTML templates with `{{ key }}` substitution (via `minijinja`)
//! - A pluggable [`Mailer`] trait for swapping the concrete implementation
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use maildrop::{Attachment, Email, EmailService, SmtpConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), maildrop::MailError> {
//!     let mut service = EmailService::new();
//!     service.configure(SmtpConfig::new(
//!         "smtp.example.com",
//!         587,
//!         "noreply@myapp.com",
//!         "secret",
//!     ))?;
//!
//!     let email = Email::new()
//!         .to("user@example.com")
//!         .subject("Welcome!")
//!         .html("<h1>Welcome!</h1>")
//!         .data("name", "Alice")
//!         .attachment(Attachment::from_path("guide.pdf", "/srv/docs/guide.pdf"));
//!
//!     service.send(&email, None).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Templates
//!
//! Every send renders a template file — the caller-supplied override or the
//! service's default — substituting the email's data mapping into `{{ key }}`
//! placeholders. The rendered output always becomes the outgoing HTML body;
//! the literal `html` field on [`Email`] is validated but superseded by it.
//!
//! # Transport selection
//!
//! Port 465 connects over implicit TLS; every other port uses opportunistic
//! STARTTLS. This is a fixed rule keyed on the port number alone.

pub mod attachment;
pub mod config;
pub mod error;
pub mod message;
pub mod sender;
pub mod service;
pub mod template;
pub mod testing;
pub mod transport;

pub use attachment::Attachment;
pub use config::SmtpConfig;
pub use error::MailError;
pub use message::Email;
pub use sender::Mailer;
pub use service::EmailService;
pub use transport::{OutgoingAttachment, OutgoingMessage, SmtpTransport, Transport};
