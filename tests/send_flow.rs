//! Integration tests for the full configure-and-send flow
//!
//! Exercises the service end to end against the in-memory transport and
//! temporary template files.

use std::io::Write;
use std::path::Path;

use maildrop::testing::MemoryTransport;
use maildrop::{Attachment, Email, EmailService, MailError, SmtpConfig};
use tempfile::NamedTempFile;

fn test_config() -> SmtpConfig {
    SmtpConfig::new("smtp.test.com", 587, "u@test.com", "p")
}

fn configured_service(transport: MemoryTransport) -> EmailService {
    let mut service = EmailService::new();
    service
        .configure_with_transport(test_config(), Box::new(transport))
        .expect("test config is valid");
    service
}

fn template_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write template");
    file
}

#[tokio::test]
async fn send_renders_template_and_dispatches() {
    let template = template_file("Hi {{name}}");
    let transport = MemoryTransport::new();
    let service = configured_service(transport.clone());

    let email = Email::new()
        .to("r@test.com")
        .subject("S")
        .html("ignored")
        .data("name", "Ana");

    service.send(&email, Some(template.path())).await.unwrap();

    let sent = transport.last_sent().unwrap();
    assert_eq!(sent.from, "u@test.com");
    assert_eq!(sent.to, "r@test.com");
    assert_eq!(sent.subject, "S");
    assert_eq!(sent.html, "Hi Ana");
    assert!(sent.attachments.is_empty());
}

#[tokio::test]
async fn template_output_supersedes_literal_html() {
    let template = template_file("from the template");
    let transport = MemoryTransport::new();
    let service = configured_service(transport.clone());

    let email = Email::new()
        .to("r@test.com")
        .subject("S")
        .html("<b>the literal body</b>");

    service.send(&email, Some(template.path())).await.unwrap();

    let sent = transport.last_sent().unwrap();
    assert_eq!(sent.html, "from the template");
    assert!(!sent.html.contains("literal body"));
}

#[tokio::test]
async fn send_without_configure_is_rejected() {
    let service = EmailService::new();

    let email = Email::new().to("r@test.com").subject("S").html("<p>body</p>");

    let result = service.send(&email, None).await;
    assert!(matches!(result, Err(MailError::NotConfigured)));
}

#[tokio::test]
async fn missing_template_fails_without_dispatch() {
    let transport = MemoryTransport::new();
    let service = configured_service(transport.clone());

    let email = Email::new().to("r@test.com").subject("S").html("<p>body</p>");

    let result = service
        .send(&email, Some(Path::new("/nonexistent/template.html")))
        .await;

    assert!(matches!(result, Err(MailError::TemplateNotFound(_))));
    assert_eq!(transport.sent_count(), 0);
}

#[tokio::test]
async fn transport_failure_surfaces_dispatch_error_with_cause() {
    let template = template_file("body");
    let service = configured_service(MemoryTransport::failing("relay closed the connection"));

    let email = Email::new().to("r@test.com").subject("S").html("<p>body</p>");

    match service.send(&email, Some(template.path())).await {
        Err(MailError::Dispatch(cause)) => {
            assert!(cause.contains("relay closed the connection"));
        }
        other => panic!("expected dispatch error, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_email_fails_before_template_and_dispatch() {
    let transport = MemoryTransport::new();
    let service = configured_service(transport.clone());

    let email = Email::new().to("not-an-email").subject("S").html("<p>body</p>");

    let result = service.send(&email, None).await;
    assert!(matches!(result, Err(MailError::InvalidAddress(_))));
    assert_eq!(transport.sent_count(), 0);
}

#[tokio::test]
async fn comma_separated_recipients_are_accepted() {
    let template = template_file("body");
    let transport = MemoryTransport::new();
    let service = configured_service(transport.clone());

    let email = Email::new()
        .to("a@b.com, c@d.com")
        .subject("S")
        .html("<p>body</p>");

    service.send(&email, Some(template.path())).await.unwrap();
    assert!(transport.was_sent_to("a@b.com"));
    assert!(transport.was_sent_to("c@d.com"));
}

#[tokio::test]
async fn attachments_reach_the_transport_resolved() {
    let template = template_file("body");
    let transport = MemoryTransport::new();
    let service = configured_service(transport.clone());

    let mut email = Email::new()
        .to("r@test.com")
        .subject("S")
        .html("<p>body</p>");
    assert!(email.add_attachment(Attachment::from_content("report.pdf", b"%PDF-1.4".to_vec())));
    assert!(email.add_attachment(
        Attachment::from_path("data.bin", "/srv/data.bin").content_type("application/x-custom")
    ));

    service.send(&email, Some(template.path())).await.unwrap();

    let sent = transport.last_sent().unwrap();
    assert_eq!(sent.attachments.len(), 2);
    assert_eq!(sent.attachments[0].filename, "report.pdf");
    assert_eq!(sent.attachments[0].content_type, "application/pdf");
    assert_eq!(
        sent.attachments[0].content.as_deref(),
        Some(b"%PDF-1.4".as_slice())
    );
    assert_eq!(sent.attachments[1].content_type, "application/x-custom");
    assert_eq!(
        sent.attachments[1].source_path.as_deref(),
        Some(Path::new("/srv/data.bin"))
    );
}

#[tokio::test]
async fn default_template_is_used_when_no_override_is_given() {
    let template = template_file("Hello {{name}} from the default template");
    let transport = MemoryTransport::new();
    let mut service = configured_service(transport.clone());
    service.set_default_template_path(template.path());

    let email = Email::new()
        .to("r@test.com")
        .subject("S")
        .html("<p>body</p>")
        .data("name", "Ana");

    service.send(&email, None).await.unwrap();
    assert_eq!(
        transport.last_sent().unwrap().html,
        "Hello Ana from the default template"
    );
}

#[tokio::test]
async fn builtin_template_renders_with_guarded_blocks() {
    let transport = MemoryTransport::new();
    let service = configured_service(transport.clone());

    let email = Email::new()
        .to("r@test.com")
        .subject("S")
        .html("<p>body</p>")
        .data("name", "Ana")
        .data("message", "Welcome aboard");

    // No override: the crate's shipped templates/base.html is used.
    service.send(&email, None).await.unwrap();

    let sent = transport.last_sent().unwrap();
    assert!(sent.html.contains("Hello Ana,"));
    assert!(sent.html.contains("Welcome aboard"));
    // The link block is guarded and no link was provided.
    assert!(!sent.html.contains("View details"));
}
