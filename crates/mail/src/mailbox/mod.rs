//! Mailbox store
//!
//! Owns the in-memory list of message summaries shown by the inbox screen
//! and keeps it consistent with fetch, search and refresh responses.

mod filter;
mod sequencer;
mod store;

pub use filter::SearchFilter;
pub use sequencer::{RequestSequencer, RequestTicket, ResponseOrdering};
pub use store::MailboxStore;

/// Placeholder shown when a listing comes back empty
pub const NO_EMAILS: &str = "No emails found";
