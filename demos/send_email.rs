//! Manual send demo
//!
//! Reads SMTP credentials and message fields from the environment, picks up
//! `test-attachment.txt` from the working directory when present, and sends
//! one email through the configured relay.
//!
//! Run with: `cargo run --example send_email`
//!
//! Environment variables:
//! - `SMTP_HOST`, `SMTP_PORT` (default 587), `SMTP_USER`, `SMTP_PASS`
//! - `EMAIL_TO`, `EMAIL_SUBJECT` (optional)
//! - `EMAIL_NAME`, `EMAIL_MESSAGE`, `EMAIL_LINK` (optional template data)

use std::path::Path;

use maildrop::{Attachment, Email, EmailService, SmtpConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = SmtpConfig::from_env()?;
    println!("📧 Configuring email service...");
    println!("   Host: {}:{}", config.host, config.port);
    println!("   User: {}", config.user);

    let mut service = EmailService::new();
    service.configure(config)?;

    let to = std::env::var("EMAIL_TO").unwrap_or_else(|_| "recipient@example.com".to_string());
    let subject =
        std::env::var("EMAIL_SUBJECT").unwrap_or_else(|_| "Test email with attachment".to_string());

    let mut email = Email::new()
        .to(&to)
        .subject(subject)
        .html("<b>Test message sent by the maildrop demo</b>")
        .data(
            "name",
            std::env::var("EMAIL_NAME").unwrap_or_else(|_| "Recipient".to_string()),
        )
        .data(
            "message",
            std::env::var("EMAIL_MESSAGE").unwrap_or_else(|_| {
                "This is a test message sent by the maildrop demo. Check the attached file."
                    .to_string()
            }),
        )
        .data(
            "link",
            std::env::var("EMAIL_LINK").unwrap_or_else(|_| "https://example.com".to_string()),
        );

    let attachment_path = Path::new("test-attachment.txt");
    if attachment_path.exists() {
        println!("📎 Attachment found: {}", attachment_path.display());
        email.add_attachment(
            Attachment::from_path("test-attachment.txt", attachment_path).content_type("text/plain"),
        );
    } else {
        println!("⚠️  No attachment file found: {}", attachment_path.display());
    }

    println!("🚀 Sending email to {to}...");
    match service.send(&email, None).await {
        Ok(()) => {
            println!("✅ Email sent successfully!");
            Ok(())
        }
        Err(err) => {
            eprintln!("❌ Failed to send email: {err}");
            Err(err.into())
        }
    }
}
