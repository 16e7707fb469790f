//! Message models: listing summaries and full details

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder shown (and sent) for an empty subject
pub const NO_SUBJECT: &str = "(No Subject)";

/// Number of characters of body markup shown in a listing preview
pub const PREVIEW_CHARS: usize = 50;

const SHORT_DATE_FORMAT: &str = "%b %-d";
const FULL_DATE_FORMAT: &str = "%b %-d, %Y %-I:%M %p";

/// Opaque, stable identifier assigned by the mail service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lightweight listing representation of a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSummary {
    pub id: MessageId,
    /// Sender address
    pub from: String,
    /// May be empty; see [`MessageSummary::display_subject`]
    pub subject: String,
    /// Body markup as received. Truncated only when displayed.
    pub body_preview: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

impl MessageSummary {
    pub fn display_subject(&self) -> &str {
        display_subject(&self.subject)
    }

    /// Body markup cut down to [`PREVIEW_CHARS`] characters
    pub fn preview(&self) -> String {
        truncate_preview(&self.body_preview, PREVIEW_CHARS)
    }

    /// Abbreviated month and day in local time, e.g. "Mar 4"
    pub fn short_date(&self) -> String {
        format_date(&self.timestamp.with_timezone(&Local), SHORT_DATE_FORMAT)
    }
}

/// Full representation of a single message
///
/// Fetched independently of any summary with the same id; the two are
/// never reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDetail {
    pub id: MessageId,
    pub from: String,
    pub to: String,
    pub subject: String,
    /// Full body markup
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

impl MessageDetail {
    pub fn display_subject(&self) -> &str {
        display_subject(&self.subject)
    }

    /// Full local date and time
    pub fn formatted_timestamp(&self) -> String {
        format_date(&self.timestamp.with_timezone(&Local), FULL_DATE_FORMAT)
    }
}

fn display_subject(subject: &str) -> &str {
    if subject.is_empty() { NO_SUBJECT } else { subject }
}

fn truncate_preview(markup: &str, max_chars: usize) -> String {
    match markup.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &markup[..cut]),
        None => markup.to_string(),
    }
}

fn format_date<Tz: TimeZone>(ts: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: fmt::Display,
{
    ts.format(format).to_string()
}
