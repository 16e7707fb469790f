//! Compose submitter
//!
//! Validates and sends an [`OutgoingDraft`]. A successful send routes back to
//! the inbox but does not touch the mailbox snapshot; the new message shows
//! up on the next load or refresh.

use log::{debug, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::api::MailApi;
use crate::error::MailError;
use crate::models::OutgoingDraft;
use crate::navigation::{NavigationRequest, Navigator, Screen};
use crate::session::SessionHandle;

/// Confirmation used when the service does not send its own
pub const SEND_SUCCEEDED: &str = "Email sent successfully";

/// Fallback text for a failed send without a server message
pub const SEND_FAILED: &str = "Failed to send email";

/// Result of a submission that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The service accepted the message
    Sent { message: String },
    /// Another submission was still in flight; nothing was sent
    Ignored,
}

/// Sends drafts for one compose screen
///
/// The draft itself stays with the caller, so after a failure it is still
/// there to retry without re-entering fields.
pub struct ComposeSubmitter {
    api: Arc<MailApi>,
    session: SessionHandle,
    navigator: Arc<dyn Navigator>,
    sending: AtomicBool,
    closed: AtomicBool,
}

impl ComposeSubmitter {
    pub fn new(api: Arc<MailApi>, session: SessionHandle, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            api,
            session,
            navigator,
            sending: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }

    /// Validate and send `draft`
    ///
    /// An empty recipient is rejected before any network call. While a
    /// previous submission is in flight, further submissions are ignored.
    pub fn submit(&self, draft: &OutgoingDraft) -> Result<SubmitOutcome, MailError> {
        draft.validate()?;

        if self
            .sending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Send already in flight, ignoring submission");
            return Ok(SubmitOutcome::Ignored);
        }

        let payload = draft.to_payload(self.session.user_identity().as_deref());
        let result = self.api.send_email(&payload);
        self.sending.store(false, Ordering::Release);

        match result {
            Ok(message) => {
                info!("Sent email to {}", payload.to);
                if self.closed.load(Ordering::Acquire) {
                    debug!("Compose screen closed, not routing after send");
                } else {
                    self.navigator.navigate(NavigationRequest::to(Screen::Inbox));
                }
                Ok(SubmitOutcome::Sent {
                    message: message.unwrap_or_else(|| SEND_SUCCEEDED.to_string()),
                })
            }
            Err(e) => {
                warn!("Failed to send email to {}: {}", payload.to, e);
                Err(e)
            }
        }
    }

    pub fn is_sending(&self) -> bool {
        self.sending.load(Ordering::Acquire)
    }

    /// User-facing text for a failed submission
    pub fn failure_message(err: &MailError) -> String {
        err.display_message(SEND_FAILED)
    }

    /// Detach from the screen; a send that completes later does not navigate
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}
