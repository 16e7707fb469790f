//! Mail service HTTP integration
//!
//! This module provides:
//! - The [`Transport`] seam and its `ureq` implementation
//! - A typed client for the mail service endpoints
//! - Wire types and their normalization to domain models

mod client;
mod normalize;
mod transport;

pub use client::MailApi;
pub use normalize::{detail_from_record, summary_from_record};
pub use transport::{HttpRequest, HttpResponse, Method, Transport, UreqTransport};

/// Mail service wire types
pub mod wire {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    /// Email record as returned by `GET /emails` and `GET /email/{id}`
    #[derive(Debug, Deserialize)]
    pub struct EmailRecord {
        pub id: RecordId,
        #[serde(default)]
        pub from: String,
        #[serde(default)]
        pub to: String,
        #[serde(default)]
        pub subject: String,
        #[serde(default)]
        pub body: String,
        pub timestamp: DateTime<Utc>,
        #[serde(rename = "isRead", default)]
        pub is_read: bool,
    }

    /// The service uses numeric ids; strings are accepted too
    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    pub enum RecordId {
        Number(u64),
        Text(String),
    }

    impl From<RecordId> for String {
        fn from(id: RecordId) -> Self {
            match id {
                RecordId::Number(n) => n.to_string(),
                RecordId::Text(s) => s,
            }
        }
    }

    /// Body of `POST /send-email`
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct SendEmailPayload {
        pub from: String,
        pub to: String,
        pub subject: String,
        pub body: String,
    }

    /// `{"message": ...}` carried by send responses and error bodies
    #[derive(Debug, Deserialize)]
    pub struct StatusMessage {
        pub message: Option<String>,
    }
}
