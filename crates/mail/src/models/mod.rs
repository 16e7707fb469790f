//! Domain models for mailbox entities

mod draft;
mod message;

pub use draft::{EMPTY_RECIPIENT, FALLBACK_SENDER, OutgoingDraft};
pub use message::{MessageDetail, MessageId, MessageSummary, NO_SUBJECT, PREVIEW_CHARS};
