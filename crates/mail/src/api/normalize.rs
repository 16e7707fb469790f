//! Wire record normalization
//!
//! Converts mail service records to domain models.

use super::wire::EmailRecord;
use crate::models::{MessageDetail, MessageId, MessageSummary};

/// Normalize a listing record to a summary
pub fn summary_from_record(record: EmailRecord) -> MessageSummary {
    MessageSummary {
        id: MessageId::new(record.id),
        from: record.from,
        subject: record.subject,
        body_preview: record.body,
        timestamp: record.timestamp,
        is_read: record.is_read,
    }
}

/// Normalize a single-message record to a detail
pub fn detail_from_record(record: EmailRecord) -> MessageDetail {
    MessageDetail {
        id: MessageId::new(record.id),
        from: record.from,
        to: record.to,
        subject: record.subject,
        body: record.body,
        timestamp: record.timestamp,
    }
}
