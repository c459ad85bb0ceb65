//! Email service orchestration
//!
//! [`EmailService`] ties the pieces together: it validates the SMTP
//! configuration, builds the transport, validates each outgoing email,
//! renders its template, and dispatches the result.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::SmtpConfig;
use crate::error::MailError;
use crate::message::Email;
use crate::template;
use crate::transport::{OutgoingAttachment, OutgoingMessage, SmtpTransport, Transport};

/// The default template shipped with the crate
fn builtin_template_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates/base.html")
}

/// Template-driven email sending over a configured SMTP transport
///
/// The service starts unconfigured; every send fails with
/// [`MailError::NotConfigured`] until [`EmailService::configure`] succeeds.
/// Configuration is expected to happen once, before sends begin, and not
/// concurrently with in-flight sends.
///
/// # Examples
///
/// ```rust,no_run
/// use maildrop::{Email, EmailService, SmtpConfig};
///
/// # async fn example() -> Result<(), maildrop::MailError> {
/// let mut service = EmailService::new();
/// service.configure(SmtpConfig::from_env()?)?;
///
/// let email = Email::new()
///     .to("user@example.com")
///     .subject("Welcome!")
///     .html("<h1>Welcome!</h1>")
///     .data("name", "Alice");
///
/// service.send(&email, None).await?;
/// # Ok(())
/// # }
/// ```
pub struct EmailService {
    transport: Option<Box<dyn Transport>>,
    config: Option<SmtpConfig>,
    default_template_path: PathBuf,
}

impl Default for EmailService {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailService {
    /// Create an unconfigured service
    #[must_use]
    pub fn new() -> Self {
        Self {
            transport: None,
            config: None,
            default_template_path: builtin_template_path(),
        }
    }

    /// Create a service and configure it immediately
    ///
    /// # Errors
    ///
    /// Returns `MailError::Configuration` if the configuration is invalid
    pub fn with_config(config: SmtpConfig) -> Result<Self, MailError> {
        let mut service = Self::new();
        service.configure(config)?;
        Ok(service)
    }

    /// Validate a configuration and build the SMTP transport from it
    ///
    /// Port 465 selects implicit TLS; every other port uses opportunistic
    /// STARTTLS.
    ///
    /// # Errors
    ///
    /// Returns `MailError::Configuration` if the configuration fails
    /// validation or the transport cannot be built
    pub fn configure(&mut self, config: SmtpConfig) -> Result<(), MailError> {
        config.validate()?;

        let transport = SmtpTransport::new(&config)?;
        self.transport = Some(Box::new(transport));
        self.config = Some(config);

        Ok(())
    }

    /// Validate a configuration and install a caller-supplied transport
    ///
    /// Useful for tests and alternative delivery backends.
    ///
    /// # Errors
    ///
    /// Returns `MailError::Configuration` if the configuration fails
    /// validation
    pub fn configure_with_transport(
        &mut self,
        config: SmtpConfig,
        transport: Box<dyn Transport>,
    ) -> Result<(), MailError> {
        config.validate()?;

        self.transport = Some(transport);
        self.config = Some(config);

        Ok(())
    }

    /// Whether the service has been configured
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.transport.is_some() && self.config.is_some()
    }

    /// Send an email
    ///
    /// Validates the email, renders the template at `template_path` (or the
    /// default template when `None`) with the email's data mapping, and
    /// dispatches the result with the configured user as the From address.
    /// The rendered template output always supersedes the literal `html`
    /// field on the email. A single dispatch attempt is made; there are no
    /// retries.
    ///
    /// # Errors
    ///
    /// - `MailError::NotConfigured` if called before a successful configure
    /// - a validation error (`NoRecipient`, `NoSubject`, `NoBody`,
    ///   `InvalidAddress`, `InvalidAttachment`) if the email is invalid
    /// - `MailError::TemplateNotFound` if the template file cannot be read;
    ///   the transport is never invoked in that case
    /// - `MailError::Template` if the template fails to compile or render
    /// - `MailError::Dispatch` wrapping the transport's error on delivery
    ///   failure
    pub async fn send(
        &self,
        email: &Email,
        template_path: Option<&Path>,
    ) -> Result<(), MailError> {
        let (Some(transport), Some(config)) = (&self.transport, &self.config) else {
            return Err(MailError::NotConfigured);
        };

        email.validate()?;

        let path = template_path.unwrap_or(&self.default_template_path);
        let html = template::render_file(path, &email.data).await?;

        let attachments = email
            .attachments
            .iter()
            .map(|attachment| OutgoingAttachment {
                filename: attachment.filename.clone(),
                content: attachment.content.clone(),
                source_path: attachment.source_path.clone(),
                content_type: attachment.resolve_content_type().to_string(),
            })
            .collect();

        let message = OutgoingMessage {
            from: config.user.clone(),
            to: email.to.clone(),
            subject: email.subject.clone(),
            html,
            attachments,
        };

        transport.dispatch(message).await?;

        info!(to = %email.to, subject = %email.subject, "email sent");
        Ok(())
    }

    /// The active SMTP configuration, if any
    #[must_use]
    pub fn smtp_config(&self) -> Option<&SmtpConfig> {
        self.config.as_ref()
    }

    /// Replace the default template path
    pub fn set_default_template_path<P: Into<PathBuf>>(&mut self, path: P) {
        self.default_template_path = path.into();
    }

    /// The current default template path
    #[must_use]
    pub fn default_template_path(&self) -> &Path {
        &self.default_template_path
    }
}
