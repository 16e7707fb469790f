//! Mailbox store implementation

use log::{debug, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{RequestSequencer, RequestTicket, ResponseOrdering, SearchFilter};
use crate::api::MailApi;
use crate::error::MailError;
use crate::models::{MessageId, MessageSummary};
use crate::navigation::{NavigationRequest, Navigator};

#[derive(Default)]
struct MailboxState {
    snapshot: Vec<MessageSummary>,
    /// Highest ticket that has completed, successfully or not
    completed: Option<RequestTicket>,
    outstanding: usize,
    refreshing: usize,
    closed: bool,
}

/// Holds the summaries shown by the inbox screen
///
/// The snapshot is replaced wholesale by every successful fetch; there is no
/// merging. Failed fetches leave the previous snapshot visible. All methods
/// take `&self`, so a refresh may be issued from another thread while a load
/// or search is still outstanding.
pub struct MailboxStore {
    api: Arc<MailApi>,
    navigator: Arc<dyn Navigator>,
    ordering: ResponseOrdering,
    sequencer: RequestSequencer,
    state: Mutex<MailboxState>,
}

impl MailboxStore {
    pub fn new(api: Arc<MailApi>, navigator: Arc<dyn Navigator>, ordering: ResponseOrdering) -> Self {
        Self {
            api,
            navigator,
            ordering,
            sequencer: RequestSequencer::new(),
            state: Mutex::new(MailboxState::default()),
        }
    }

    /// Fetch the full, unfiltered mailbox
    ///
    /// Returns the visible snapshot once the response has been applied or dropped.
    pub fn load(&self) -> Result<Vec<MessageSummary>, MailError> {
        self.fetch(SearchFilter::All, false)
    }

    /// Fetch summaries matching `query`
    ///
    /// See [`SearchFilter::classify`]. An empty query behaves like
    /// [`MailboxStore::load`].
    pub fn search(&self, query: &str) -> Result<Vec<MessageSummary>, MailError> {
        self.fetch(SearchFilter::classify(query), false)
    }

    /// Same as [`MailboxStore::load`], flagged as a user-initiated refresh
    pub fn refresh(&self) -> Result<Vec<MessageSummary>, MailError> {
        self.fetch(SearchFilter::All, true)
    }

    /// Mark a summary as read in the local snapshot only
    ///
    /// Nothing is sent to the service. The next fetch overwrites the flag
    /// with whatever the service reports. Returns whether the id was found.
    pub fn mark_opened(&self, id: &MessageId) -> bool {
        let mut state = self.lock();
        match state.snapshot.iter_mut().find(|s| &s.id == id) {
            Some(summary) => {
                summary.is_read = true;
                true
            }
            None => false,
        }
    }

    /// Open a summary: mark it read locally and route to its detail screen
    ///
    /// Does nothing if the id is not in the current snapshot.
    pub fn select(&self, id: &MessageId) -> Option<MessageSummary> {
        let selected = {
            let mut state = self.lock();
            let summary = state.snapshot.iter_mut().find(|s| &s.id == id)?;
            summary.is_read = true;
            summary.clone()
        };

        self.navigator.navigate(NavigationRequest::email_detail(
            selected.id.clone(),
            selected.subject.clone(),
        ));
        Some(selected)
    }

    /// Current visible summaries, in server order
    pub fn snapshot(&self) -> Vec<MessageSummary> {
        self.lock().snapshot.clone()
    }

    /// Whether any request is outstanding
    pub fn is_loading(&self) -> bool {
        self.lock().outstanding > 0
    }

    /// Whether a refresh is outstanding
    pub fn is_refreshing(&self) -> bool {
        self.lock().refreshing > 0
    }

    /// Detach the store from its screen
    ///
    /// Responses that arrive afterwards are dropped without touching state;
    /// the fetch that receives one still returns the unchanged snapshot.
    pub fn close(&self) {
        self.lock().closed = true;
    }

    fn fetch(&self, filter: SearchFilter, refresh: bool) -> Result<Vec<MessageSummary>, MailError> {
        let ticket = self.sequencer.issue();
        {
            let mut state = self.lock();
            state.outstanding += 1;
            if refresh {
                state.refreshing += 1;
            }
        }
        debug!("Mailbox request {} issued ({:?})", ticket, filter);

        let result = self.api.list_emails(&filter);

        let mut state = self.lock();
        state.outstanding = state.outstanding.saturating_sub(1);
        if refresh {
            state.refreshing = state.refreshing.saturating_sub(1);
        }

        if state.closed {
            debug!("Mailbox closed, dropping response to {}", ticket);
            return result.map(|_| state.snapshot.clone());
        }

        let accepted = self.ordering.accepts(ticket, state.completed);
        state.completed = state.completed.max(Some(ticket));

        match result {
            Ok(summaries) => {
                if accepted {
                    debug!("Mailbox request {} applied ({} summaries)", ticket, summaries.len());
                    state.snapshot = summaries;
                } else {
                    debug!("Mailbox request {} superseded, response dropped", ticket);
                }
                Ok(state.snapshot.clone())
            }
            Err(e) => {
                warn!("Mailbox request {} failed: {}", ticket, e);
                Err(e)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, MailboxState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
