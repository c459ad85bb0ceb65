//! SMTP transport
//!
//! Uses the `lettre` crate to hand composed messages to an SMTP relay.

use async_trait::async_trait;
use lettre::{
    message::{header, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

use crate::config::SmtpConfig;
use crate::error::MailError;
use crate::transport::{OutgoingAttachment, OutgoingMessage, Transport};

/// SMTP transport backed by `lettre`
///
/// Built from an already-validated [`SmtpConfig`]. Port 465 connects over
/// implicit TLS; every other port uses opportunistic STARTTLS. Construction
/// does not open a connection; the relay is contacted per dispatch.
pub struct SmtpTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpTransport {
    /// Create an SMTP transport from a configuration
    ///
    /// # Errors
    ///
    /// Returns `MailError::Configuration` if the TLS parameters cannot be
    /// built for the configured host
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let credentials = Credentials::new(config.user.clone(), config.pass.clone());

        let tls_parameters = TlsParameters::new(config.host.clone())
            .map_err(|e| MailError::config(format!("TLS parameters error: {e}")))?;

        let tls = if config.implicit_tls() {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .credentials(credentials)
            .port(config.port)
            .tls(tls)
            .build();

        Ok(Self { mailer })
    }

    fn mailbox(address: &str) -> Result<Mailbox, MailError> {
        let address = address.trim();
        address
            .parse()
            .map_err(|_| MailError::InvalidAddress(address.to_string()))
    }

    async fn load_content(attachment: &OutgoingAttachment) -> Result<Vec<u8>, MailError> {
        if let Some(content) = &attachment.content {
            return Ok(content.clone());
        }

        let path = attachment.source_path.as_ref().ok_or_else(|| {
            MailError::dispatch(format!(
                "attachment {} has neither content nor a source path",
                attachment.filename
            ))
        })?;

        tokio::fs::read(path).await.map_err(|e| {
            MailError::dispatch(format!(
                "failed to read attachment {}: {e}",
                path.display()
            ))
        })
    }

    /// Build a lettre [`Message`] from an outgoing message
    async fn assemble(message: &OutgoingMessage) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(Self::mailbox(&message.from)?)
            .subject(message.subject.as_str());

        for recipient in message.to.split(',') {
            if recipient.trim().is_empty() {
                continue;
            }
            builder = builder.to(Self::mailbox(recipient)?);
        }

        if message.attachments.is_empty() {
            return builder
                .header(header::ContentType::TEXT_HTML)
                .body(message.html.clone())
                .map_err(|e| MailError::dispatch(e.to_string()));
        }

        let html_part = SinglePart::builder()
            .header(header::ContentType::TEXT_HTML)
            .body(message.html.clone());

        let mut multipart = MultiPart::mixed().singlepart(html_part);

        for attachment in &message.attachments {
            let content = Self::load_content(attachment).await?;

            let content_type = header::ContentType::parse(&attachment.content_type)
                .map_err(|e| {
                    MailError::dispatch(format!(
                        "invalid content type {}: {e}",
                        attachment.content_type
                    ))
                })?;

            multipart = multipart
                .singlepart(Attachment::new(attachment.filename.clone()).body(content, content_type));
        }

        builder
            .multipart(multipart)
            .map_err(|e| MailError::dispatch(e.to_string()))
    }
}

#[async_trait]
impl Transport for SmtpTransport {
    async fn dispatch(&self, message: OutgoingMessage) -> Result<(), MailError> {
        let email = Self::assemble(&message).await?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| MailError::dispatch(e.to_string()))?;

        debug!(to = %message.to, "message handed to SMTP relay");
        Ok(())
    }
}
