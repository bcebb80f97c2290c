//! Outgoing mail.
//!
//! Handlers never talk to SMTP directly; they hand an [`OutgoingEmail`] to a
//! [`Mailer`]. [`SmtpMailer`] delivers through lettre, [`RecordingMailer`]
//! keeps messages in memory for tests and local runs.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::config::EmailConfig;

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

    /// No mail transport is configured.
    #[error("mail transport is not configured")]
    NotConfigured,

    /// The transport refused the message.
    #[error("message rejected: {0}")]
    Rejected(String),
}

/// A fully rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Mail-sending capability.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message.
    ///
    /// # Errors
    ///
    /// Returns `EmailError` if the message cannot be built or delivered.
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailError>;
}

/// Resolve a well-known provider name to its SMTP relay host.
///
/// Unknown names are assumed to already be a host name.
#[must_use]
pub fn smtp_host_for_service(service: &str) -> String {
    match service.trim().to_ascii_lowercase().as_str() {
        "gmail" => "smtp.gmail.com".to_owned(),
        "outlook" | "hotmail" | "outlook365" => "smtp-mail.outlook.com".to_owned(),
        "yahoo" => "smtp.mail.yahoo.com".to_owned(),
        "icloud" => "smtp.mail.me.com".to_owned(),
        "zoho" => "smtp.zoho.com".to_owned(),
        _ => service.trim().to_owned(),
    }
}

/// SMTP delivery via lettre with STARTTLS.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Create a new SMTP mailer from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the relay host is invalid.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_owned(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self { transport })
    }
}

fn mailbox(address: &str) -> Result<Mailbox, EmailError> {
    address
        .parse()
        .map_err(|_| EmailError::InvalidAddress(address.to_owned()))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailError> {
        let message = Message::builder()
            .from(mailbox(&email.from)?)
            .to(mailbox(&email.to)?)
            .subject(email.subject.as_str())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text_body),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html_body),
                    ),
            )?;

        self.transport.send(message).await?;

        tracing::info!(to = %email.to, subject = %email.subject, "Email sent successfully");
        Ok(())
    }
}

/// Keeps every message in memory instead of delivering it.
///
/// Clones share the same outbox. A failing mailer rejects every message
/// without recording it.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    outbox: Arc<Mutex<Vec<OutgoingEmail>>>,
    fail: bool,
}

impl RecordingMailer {
    /// A mailer that accepts and records everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer that rejects every message.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Messages accepted so far, oldest first.
    pub async fn sent(&self) -> Vec<OutgoingEmail> {
        self.outbox.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailError> {
        if self.fail {
            return Err(EmailError::Rejected("recording mailer set to fail".to_owned()));
        }
        tracing::debug!(to = %email.to, subject = %email.subject, "Email recorded");
        self.outbox.lock().await.push(email);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            from: "site@example.com".to_owned(),
            to: "owner@example.com".to_owned(),
            subject: "Portfolio Contact: Hello".to_owned(),
            text_body: "text".to_owned(),
            html_body: "<p>html</p>".to_owned(),
        }
    }

    #[test]
    fn test_smtp_host_for_service() {
        assert_eq!(smtp_host_for_service("gmail"), "smtp.gmail.com");
        assert_eq!(smtp_host_for_service("Hotmail"), "smtp-mail.outlook.com");
        assert_eq!(smtp_host_for_service("mail.example.org"), "mail.example.org");
    }

    #[tokio::test]
    async fn test_recording_mailer_shares_outbox_between_clones() {
        let mailer = RecordingMailer::new();
        let handle = mailer.clone();

        mailer.send(email()).await.unwrap();

        assert_eq!(handle.sent().await, vec![email()]);
    }

    #[tokio::test]
    async fn test_failing_mailer_records_nothing() {
        let mailer = RecordingMailer::failing();
        assert!(matches!(
            mailer.send(email()).await,
            Err(EmailError::Rejected(_))
        ));
        assert!(mailer.sent().await.is_empty());
    }

    #[test]
    fn test_mailbox_rejects_garbage() {
        assert!(matches!(
            mailbox("not an address"),
            Err(EmailError::InvalidAddress(_))
        ));
        assert!(mailbox("owner@example.com").is_ok());
    }
}
