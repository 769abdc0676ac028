//! Outbound email for pre-order notifications.
//!
//! Uses SMTP via lettre for delivery with Askama HTML and plain-text
//! templates. Delivery sits behind the `MailTransport` trait so handlers can
//! be exercised with injected fakes.

use std::sync::Arc;
use std::time::Duration;

use askama::Template;
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;
use crate::models::preorder::PreorderSubmission;

/// Fixed subject line for pre-order notifications.
const PREORDER_SUBJECT: &str = "New Pre-order Submission";

/// HTML template for the pre-order notification email.
#[derive(Template)]
#[template(path = "email/preorder_notification.html")]
struct PreorderEmailHtml<'a> {
    full_name: &'a str,
    email: &'a str,
    phone: &'a str,
    address: &'a str,
    usage: &'a str,
    quantity: &'a str,
    message: Option<&'a str>,
}

/// Plain text template for the pre-order notification email.
#[derive(Template)]
#[template(path = "email/preorder_notification.txt")]
struct PreorderEmailText<'a> {
    full_name: &'a str,
    email: &'a str,
    phone: &'a str,
    address: &'a str,
    usage: &'a str,
    quantity: &'a str,
    message: Option<&'a str>,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// The transport did not complete within the configured bound.
    #[error("Delivery timed out after {0:?}")]
    Timeout(Duration),
}

/// Seam between message construction and delivery.
///
/// Production uses [`SmtpMailer`]; tests inject recording fakes.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver one message.
    async fn send(&self, message: Message) -> Result<(), EmailError>;
}

/// SMTP delivery over STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Create an SMTP mailer from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay parameters are invalid.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self { transport })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, message: Message) -> Result<(), EmailError> {
        self.transport.send(message).await?;
        Ok(())
    }
}

/// Email service for pre-order notifications.
///
/// Each send opens a connection to the relay, delivers one message, and
/// releases the connection. Exactly one delivery attempt is made per call.
#[derive(Clone)]
pub struct EmailService {
    transport: Arc<dyn MailTransport>,
    from_address: String,
    notify_address: String,
    send_timeout: Duration,
}

impl EmailService {
    /// Create a new email service with the SMTP transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay parameters are invalid.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let transport = Arc::new(SmtpMailer::new(config)?);
        Ok(Self::with_transport(transport, config))
    }

    /// Create a service around an explicit transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn MailTransport>, config: &EmailConfig) -> Self {
        Self {
            transport,
            from_address: config.from_address.clone(),
            notify_address: config.notify_address.clone(),
            send_timeout: Duration::from_secs(config.send_timeout_secs),
        }
    }

    /// Send the operator notification for a validated submission.
    ///
    /// # Errors
    ///
    /// Returns error if the templates fail to render, the message cannot be
    /// built, or the transport fails or times out. A timeout counts as a
    /// delivery failure.
    pub async fn send_preorder_notification(
        &self,
        submission: &PreorderSubmission,
    ) -> Result<(), EmailError> {
        let full_name = submission.full_name();
        let message = submission.message.as_deref();

        let html = PreorderEmailHtml {
            full_name: &full_name,
            email: &submission.email,
            phone: &submission.phone,
            address: &submission.address,
            usage: submission.usage.as_str(),
            quantity: submission.quantity.as_str(),
            message,
        }
        .render()?;
        let text = PreorderEmailText {
            full_name: &full_name,
            email: &submission.email,
            phone: &submission.phone,
            address: &submission.address,
            usage: submission.usage.as_str(),
            quantity: submission.quantity.as_str(),
            message,
        }
        .render()?;

        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(self
                .notify_address
                .parse()
                .map_err(|_| EmailError::InvalidAddress(self.notify_address.clone()))?)
            .subject(PREORDER_SUBJECT)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html),
                    ),
            )?;

        match tokio::time::timeout(self.send_timeout, self.transport.send(email)).await {
            Ok(result) => result?,
            Err(_) => return Err(EmailError::Timeout(self.send_timeout)),
        }

        tracing::info!(to = %self.notify_address, "Pre-order notification sent");
        Ok(())
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use secrecy::SecretString;

    use super::testing::{FakeTransport, HangingTransport};
    use super::*;
    use crate::models::preorder::PreorderForm;

    fn test_config() -> EmailConfig {
        EmailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_username: "alerts@acutemeter.com".to_string(),
            smtp_password: SecretString::from("pass"),
            from_address: "alerts@acutemeter.com".to_string(),
            notify_address: "nathan@acutemeter.com".to_string(),
            send_timeout_secs: 10,
        }
    }

    fn submission(message: Option<&str>) -> PreorderSubmission {
        PreorderForm {
            first_name: "Jo".to_string(),
            last_name: "Doe".to_string(),
            email: "jo@x.com".to_string(),
            phone: "0551234567".to_string(),
            address: "12 Main Street, Accra".to_string(),
            usage: "home".to_string(),
            quantity: "1".to_string(),
            message: message.map(String::from),
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_html_body_embeds_all_fields() {
        let submission = submission(None);
        let html = PreorderEmailHtml {
            full_name: &submission.full_name(),
            email: &submission.email,
            phone: &submission.phone,
            address: &submission.address,
            usage: submission.usage.as_str(),
            quantity: submission.quantity.as_str(),
            message: submission.message.as_deref(),
        }
        .render()
        .unwrap();

        assert!(html.contains("Jo Doe"));
        assert!(html.contains("jo@x.com"));
        assert!(html.contains("0551234567"));
        assert!(html.contains("12 Main Street, Accra"));
        assert!(html.contains("home"));
        assert!(html.contains("Quantity:</strong> 1"));
    }

    #[test]
    fn test_message_section_omitted_when_absent() {
        let submission = submission(None);
        let html = PreorderEmailHtml {
            full_name: &submission.full_name(),
            email: &submission.email,
            phone: &submission.phone,
            address: &submission.address,
            usage: submission.usage.as_str(),
            quantity: submission.quantity.as_str(),
            message: submission.message.as_deref(),
        }
        .render()
        .unwrap();

        // No empty tags or placeholders for the optional section
        assert!(!html.contains("Message"));
    }

    #[test]
    fn test_message_section_rendered_when_present() {
        let submission = submission(Some("Deliver before Friday"));
        let html = PreorderEmailHtml {
            full_name: &submission.full_name(),
            email: &submission.email,
            phone: &submission.phone,
            address: &submission.address,
            usage: submission.usage.as_str(),
            quantity: submission.quantity.as_str(),
            message: submission.message.as_deref(),
        }
        .render()
        .unwrap();

        assert!(html.contains("Message:</strong> Deliver before Friday"));
    }

    #[test]
    fn test_html_body_escapes_markup() {
        let html = PreorderEmailHtml {
            full_name: "Jo <script>alert(1)</script>",
            email: "jo@x.com",
            phone: "0551234567",
            address: "12 Main Street, Accra",
            usage: "home",
            quantity: "1",
            message: None,
        }
        .render()
        .unwrap();

        assert!(!html.contains("<script>"));
    }

    #[tokio::test]
    async fn test_send_invokes_transport_exactly_once() {
        let transport = Arc::new(FakeTransport::succeeding());
        let service = EmailService::with_transport(Arc::clone(&transport) as _, &test_config());

        service
            .send_preorder_notification(&submission(None))
            .await
            .unwrap();

        assert_eq!(transport.sent_count(), 1);
        let mime = transport.captured().pop().unwrap();
        assert!(mime.contains("Subject: New Pre-order Submission"));
        assert!(mime.contains("jo@x.com"));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let transport = Arc::new(FakeTransport::failing());
        let service = EmailService::with_transport(Arc::clone(&transport) as _, &test_config());

        let result = service.send_preorder_notification(&submission(None)).await;

        assert!(result.is_err());
        // Still a single attempt - no retry on failure
        assert_eq!(transport.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_timeout_is_a_delivery_failure() {
        let config = EmailConfig {
            send_timeout_secs: 0,
            ..test_config()
        };
        let service = EmailService::with_transport(Arc::new(HangingTransport), &config);

        let result = service.send_preorder_notification(&submission(None)).await;

        assert!(matches!(result, Err(EmailError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_invalid_from_address_rejected() {
        let config = EmailConfig {
            from_address: "not an address".to_string(),
            ..test_config()
        };
        let transport = Arc::new(FakeTransport::succeeding());
        let service = EmailService::with_transport(Arc::clone(&transport) as _, &config);

        let result = service.send_preorder_notification(&submission(None)).await;

        assert!(matches!(result, Err(EmailError::InvalidAddress(_))));
        // The transport is never reached when the message cannot be built
        assert_eq!(transport.sent_count(), 0);
    }
}
