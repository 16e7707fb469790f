//! Request sequencing for overlapping mailbox fetches
//!
//! Every listing request gets a ticket at issue time. When its response
//! arrives, the configured [`ResponseOrdering`] decides whether it may
//! replace the visible snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonically increasing request number, assigned at issue time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out tickets; safe to share between threads
#[derive(Debug)]
pub struct RequestSequencer {
    next: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for RequestSequencer {
    fn default() -> Self {
        Self::new()
    }
}

/// Which of two overlapping responses ends up visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOrdering {
    /// The most recently *issued* request wins. A response is dropped if a
    /// later-issued request has already completed, whether it succeeded or
    /// failed.
    #[default]
    LatestIssued,
    /// The most recently *arrived* response wins, whatever its issue order
    LastArrived,
}

impl ResponseOrdering {
    /// Whether a response for `ticket` may replace the snapshot, given the
    /// highest ticket that has completed so far
    pub fn accepts(self, ticket: RequestTicket, latest_completed: Option<RequestTicket>) -> bool {
        match self {
            ResponseOrdering::LastArrived => true,
            ResponseOrdering::LatestIssued => {
                latest_completed.is_none_or(|completed| ticket > completed)
            }
        }
    }
}
