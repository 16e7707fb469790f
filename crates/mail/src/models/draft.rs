//! Outgoing draft held by the compose screen

use crate::api::wire::SendEmailPayload;
use crate::error::MailError;

use super::message::NO_SUBJECT;

/// Sender used when the session has no identity
pub const FALLBACK_SENDER: &str = "user@example.com";

/// Message shown when a draft has no recipient
pub const EMPTY_RECIPIENT: &str = "Please enter a recipient email address";

/// An unsent message
///
/// There is no sender field: the sender is always taken from the session at
/// submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutgoingDraft {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingDraft {
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            ..Self::default()
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Local checks that must pass before anything is sent
    pub fn validate(&self) -> Result<(), MailError> {
        if self.to.is_empty() {
            return Err(MailError::validation(EMPTY_RECIPIENT));
        }
        Ok(())
    }

    /// Build the request body with defaults applied
    pub fn to_payload(&self, sender: Option<&str>) -> SendEmailPayload {
        let subject = if self.subject.is_empty() {
            NO_SUBJECT.to_string()
        } else {
            self.subject.clone()
        };

        SendEmailPayload {
            from: sender.unwrap_or(FALLBACK_SENDER).to_string(),
            to: self.to.clone(),
            subject,
            body: self.body.clone(),
        }
    }
}
