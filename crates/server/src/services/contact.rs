//! Contact form relay.
//!
//! A submission becomes one message from the configured sender to the site
//! owner. Field values go into the text body as typed and are HTML-escaped in
//! the HTML body by the template engine.

use std::sync::Arc;

use askama::Template;
use serde::Deserialize;

use super::email::{EmailError, Mailer, OutgoingEmail};
use crate::models::ValidationError;

/// HTML body of the contact notification.
#[derive(Template)]
#[template(path = "email/contact.html")]
struct ContactEmailHtml<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

/// Plain text body of the contact notification.
#[derive(Template)]
#[template(path = "email/contact.txt")]
struct ContactEmailText<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

/// Request body of `POST /api/contact`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// A complete contact submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactInput {
    /// Require all four fields.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingFields` naming each absent or blank field.
    pub fn validate(self) -> Result<ContactMessage, ValidationError> {
        let missing = crate::models::missing_required([
            ("name", self.name.as_deref()),
            ("email", self.email.as_deref()),
            ("subject", self.subject.as_deref()),
            ("message", self.message.as_deref()),
        ]);

        let (Some(name), Some(email), Some(subject), Some(message), true) = (
            self.name,
            self.email,
            self.subject,
            self.message,
            missing.is_empty(),
        ) else {
            return Err(ValidationError::MissingFields {
                entity: "Contact",
                fields: missing,
            });
        };

        Ok(ContactMessage {
            name,
            email,
            subject,
            message,
        })
    }
}

impl ContactMessage {
    /// Render the notification addressed from `sender` to `recipient`.
    ///
    /// # Errors
    ///
    /// Returns `EmailError::Template` if rendering fails.
    pub fn render(&self, sender: &str, recipient: &str) -> Result<OutgoingEmail, EmailError> {
        let html_body = ContactEmailHtml {
            name: &self.name,
            email: &self.email,
            subject: &self.subject,
            message: &self.message,
        }
        .render()?;
        let text_body = ContactEmailText {
            name: &self.name,
            email: &self.email,
            message: &self.message,
        }
        .render()?;

        Ok(OutgoingEmail {
            from: sender.to_owned(),
            to: recipient.to_owned(),
            subject: format!("Portfolio Contact: {}", self.subject),
            text_body,
            html_body,
        })
    }
}

/// Sends contact submissions to the site owner.
#[derive(Clone)]
pub struct ContactRelay {
    mailer: Arc<dyn Mailer>,
    sender: String,
    recipient: String,
}

impl ContactRelay {
    #[must_use]
    pub fn new(
        mailer: Arc<dyn Mailer>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            mailer,
            sender: sender.into(),
            recipient: recipient.into(),
        }
    }

    /// Render and deliver one submission.
    ///
    /// # Errors
    ///
    /// Returns `EmailError` if rendering or delivery fails.
    pub async fn submit(&self, contact: &ContactMessage) -> Result<(), EmailError> {
        let email = contact.render(&self.sender, &self.recipient)?;
        self.mailer.send(email).await
    }
}

impl std::fmt::Debug for ContactRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactRelay")
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .finish_non_exhaustive()
    }
}
