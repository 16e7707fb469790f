//! Mail service client
//!
//! Typed access to the four endpoints the client consumes:
//! - `GET /emails` (optionally `?from=` or `?subject=`)
//! - `GET /email/{id}`
//! - `POST /send-email`

use log::debug;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

use super::normalize::{detail_from_record, summary_from_record};
use super::transport::{HttpRequest, HttpResponse, Transport};
use super::wire::{EmailRecord, SendEmailPayload, StatusMessage};
use crate::error::{MailError, TransportError};
use crate::mailbox::SearchFilter;
use crate::models::{MessageDetail, MessageId, MessageSummary};

/// Client for the mail service
///
/// Stateless apart from its base address; every call is an independent
/// request and may be issued concurrently from several threads.
pub struct MailApi {
    transport: Arc<dyn Transport>,
    base_url: Url,
}

impl MailApi {
    /// Create a client rooted at `base_url`
    pub fn new(base_url: Url, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: with_trailing_slash(base_url),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// List message summaries, optionally filtered by sender or subject
    pub fn list_emails(&self, filter: &SearchFilter) -> Result<Vec<MessageSummary>, MailError> {
        let mut url = self.endpoint("emails")?;
        if let Some((key, value)) = filter.query_pair() {
            url.query_pairs_mut().append_pair(key, value);
        }

        let records: Vec<EmailRecord> = self.get_json(url)?;
        Ok(records.into_iter().map(summary_from_record).collect())
    }

    /// Fetch a single full message
    pub fn get_email(&self, id: &MessageId) -> Result<MessageDetail, MailError> {
        let url = self.endpoint(&format!("email/{}", urlencoding::encode(id.as_str())))?;
        let record: EmailRecord = self.get_json(url)?;
        Ok(detail_from_record(record))
    }

    /// Submit an outgoing message
    ///
    /// Returns the server's confirmation text, if it sent one.
    pub fn send_email(&self, payload: &SendEmailPayload) -> Result<Option<String>, MailError> {
        let url = self.endpoint("send-email")?;
        let body = serde_json::to_string(payload)
            .map_err(|e| TransportError::Failed(format!("Failed to encode request: {}", e)))?;

        let response = self.execute(HttpRequest::post_json(url.as_str(), body))?;
        Ok(status_message(&response.body))
    }

    fn endpoint(&self, path: &str) -> Result<Url, MailError> {
        self.base_url
            .join(path)
            .map_err(|e| TransportError::Failed(format!("Invalid request URL: {}", e)).into())
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, MailError> {
        let response = self.execute(HttpRequest::get(url.as_str()))?;
        serde_json::from_str(&response.body)
            .map_err(|e| TransportError::Malformed(e.to_string()).into())
    }

    /// Send a request and turn non-2xx statuses into [`MailError::Service`]
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, MailError> {
        debug!("{} {}", request.method, request.url);
        let response = self.transport.send(&request)?;

        if !response.is_success() {
            debug!("{} {} -> {}", request.method, request.url, response.status);
            return Err(MailError::Service {
                status: response.status,
                message: status_message(&response.body),
            });
        }

        Ok(response)
    }
}

/// Extract `{"message": ...}` from a body, if it has that shape
fn status_message(body: &str) -> Option<String> {
    serde_json::from_str::<StatusMessage>(body)
        .ok()
        .and_then(|m| m.message)
        .filter(|m| !m.is_empty())
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
