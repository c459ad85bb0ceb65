//! Mailer trait abstraction
//!
//! The pluggable port for the email component: configure once, then send.
//! [`EmailService`] is the concrete implementation; the trait adds no
//! behavior of its own.

use async_trait::async_trait;

use crate::config::SmtpConfig;
use crate::error::MailError;
use crate::message::Email;
use crate::service::EmailService;

/// Trait for components that can be configured with SMTP credentials and
/// send emails
///
/// # Examples
///
/// ```rust,no_run
/// use maildrop::{Email, EmailService, Mailer, SmtpConfig};
///
/// # async fn example() -> Result<(), maildrop::MailError> {
/// let mut mailer: Box<dyn Mailer> = Box::new(EmailService::new());
/// mailer.configure(SmtpConfig::from_env()?)?;
///
/// let email = Email::new()
///     .to("user@example.com")
///     .subject("Hello!")
///     .html("<p>Hello!</p>");
///
/// mailer.send(&email).await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Configure the SMTP transport
    ///
    /// # Errors
    ///
    /// Returns `MailError::Configuration` if the configuration is invalid
    fn configure(&mut self, config: SmtpConfig) -> Result<(), MailError>;

    /// Send an email using the default template
    ///
    /// # Errors
    ///
    /// Returns `MailError` if the service is unconfigured, the email is
    /// invalid, the template cannot be rendered, or dispatch fails
    async fn send(&self, email: &Email) -> Result<(), MailError>;

    /// Whether the mailer has been configured
    fn is_configured(&self) -> bool;
}

#[async_trait]
impl Mailer for EmailService {
    fn configure(&mut self, config: SmtpConfig) -> Result<(), MailError> {
        Self::configure(self, config)
    }

    async fn send(&self, email: &Email) -> Result<(), MailError> {
        Self::send(self, email, None).await
    }

    fn is_configured(&self) -> bool {
        Self::is_configured(self)
    }
}
