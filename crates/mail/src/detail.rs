//! Message detail loader
//!
//! Fetches one full message for the detail screen. Nothing is cached: every
//! call goes to the service, and the loaded detail is never reconciled with
//! the summary it was opened from.

use log::{debug, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::api::MailApi;
use crate::error::MailError;
use crate::models::{MessageDetail, MessageId};

/// Message shown when the detail screen was opened without an id
pub const NO_MESSAGE_ID: &str = "No email ID provided";

/// Fallback text for a failed fetch without a server message
pub const DETAIL_FAILED: &str = "Failed to fetch email details";

#[derive(Default)]
struct DetailState {
    detail: Option<MessageDetail>,
    error: Option<MailError>,
    outstanding: usize,
    closed: bool,
}

/// Holds the message shown by one detail screen
pub struct DetailLoader {
    api: Arc<MailApi>,
    state: Mutex<DetailState>,
}

impl DetailLoader {
    pub fn new(api: Arc<MailApi>) -> Self {
        Self {
            api,
            state: Mutex::new(DetailState::default()),
        }
    }

    /// Fetch the message with the given id
    ///
    /// A missing id fails immediately without touching the network. On
    /// failure any previously loaded detail stays in place and the error is
    /// kept for display until the next successful load.
    pub fn load_detail(&self, id: Option<&MessageId>) -> Result<MessageDetail, MailError> {
        let Some(id) = id else {
            let err = MailError::validation(NO_MESSAGE_ID);
            self.lock().error = Some(err.clone());
            return Err(err);
        };

        self.lock().outstanding += 1;
        debug!("Loading message {}", id);
        let result = self.api.get_email(id);

        let mut state = self.lock();
        state.outstanding = state.outstanding.saturating_sub(1);
        if state.closed {
            debug!("Detail screen closed, dropping message {}", id);
            return result;
        }

        match &result {
            Ok(detail) => {
                state.detail = Some(detail.clone());
                state.error = None;
            }
            Err(e) => {
                warn!("Failed to load message {}: {}", id, e);
                state.error = Some(e.clone());
            }
        }
        result
    }

    /// The most recently loaded detail
    pub fn detail(&self) -> Option<MessageDetail> {
        self.lock().detail.clone()
    }

    /// The error from the most recent failed load, if it has not since succeeded
    pub fn error(&self) -> Option<MailError> {
        self.lock().error.clone()
    }

    /// User-facing text for the current error
    pub fn error_message(&self) -> Option<String> {
        self.error().map(|e| e.display_message(DETAIL_FAILED))
    }

    pub fn is_loading(&self) -> bool {
        self.lock().outstanding > 0
    }

    /// Detach from the screen; later responses are dropped
    pub fn close(&self) {
        self.lock().closed = true;
    }

    fn lock(&self) -> MutexGuard<'_, DetailState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
