//! Mail crate - Client core for the Postbox mailbox
//!
//! This crate provides the client-side mailbox state machine:
//! - Session gate deciding which screens exist
//! - Mailbox store (load, search, refresh, optimistic read marks)
//! - Message detail loader
//! - Compose submitter
//! - Mail service HTTP client behind a swappable transport
//! - Navigation boundary for whatever front end drives the screens
//!
//! This crate has zero UI dependencies. All operations are blocking and
//! take `&self`, so a front end may run them on whatever threads or
//! executor it likes.

pub mod api;
pub mod client;
pub mod compose;
pub mod config;
pub mod detail;
pub mod error;
pub mod mailbox;
pub mod models;
pub mod navigation;
pub mod session;

#[cfg(test)]
mod testing;

pub use api::{HttpRequest, HttpResponse, MailApi, Method, Transport, UreqTransport};
pub use client::MailClient;
pub use compose::{ComposeSubmitter, SubmitOutcome};
pub use config::{Environment, ServiceConfig};
pub use detail::DetailLoader;
pub use error::{MailError, TransportError};
pub use mailbox::{MailboxStore, NO_EMAILS, ResponseOrdering, SearchFilter};
pub use models::{MessageDetail, MessageId, MessageSummary, OutgoingDraft};
pub use navigation::{NavigationRequest, Navigator, RouteParams, Screen};
pub use session::{Session, SessionGate, SessionHandle, SessionObserver};
