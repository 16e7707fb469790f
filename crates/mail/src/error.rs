//! Error types surfaced by mailbox operations
//!
//! Every core operation reports failures through [`MailError`]. None of them
//! are fatal: the component that produced the error keeps its last good state
//! and the caller may retry by invoking the same operation again.

use thiserror::Error;

use crate::navigation::Screen;

/// Failure below the HTTP status level
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request did not complete within the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Host unreachable, connection reset, and similar
    #[error("{0}")]
    Failed(String),

    /// The service answered with a success status but the body was not
    /// the JSON shape we expected
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Error returned by session, mailbox, detail and compose operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailError {
    /// A local precondition failed. Never reaches the network.
    #[error("{0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Transport(#[from] TransportError),

    /// The service answered with a non-2xx status
    #[error("Service returned status {status}")]
    Service {
        status: u16,
        /// Server-provided `{"message": ...}` text, when present
        message: Option<String>,
    },

    /// An authenticated screen was requested while logged out
    #[error("Sign in to open {0}")]
    NotSignedIn(Screen),
}

impl MailError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Text suitable for showing to the user.
    ///
    /// Service errors prefer the server's own message and fall back to
    /// `fallback` when the server did not provide one.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            Self::Service {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Service { message: None, .. } => fallback.to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_message_preferred() {
        let err = MailError::Service {
            status: 500,
            message: Some("mailbox full".to_string()),
        };
        assert_eq!(err.display_message("Failed to send email"), "mailbox full");
    }

    #[test]
    fn test_service_fallback() {
        let err = MailError::Service {
            status: 502,
            message: None,
        };
        assert_eq!(err.display_message("Failed to send email"), "Failed to send email");
    }

    #[test]
    fn test_transport_display() {
        let err = MailError::from(TransportError::Timeout);
        assert_eq!(err.display_message("ignored"), "Network error: request timed out");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_not_signed_in_display() {
        let err = MailError::NotSignedIn(Screen::Inbox);
        assert_eq!(err.to_string(), "Sign in to open Inbox");
    }
}
