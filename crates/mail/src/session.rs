//! Session gate
//!
//! Holds whether an identity has been accepted for this process. The gate is
//! the only writer of session state; mailbox, detail and compose components
//! read it through a [`SessionHandle`].
//!
//! There is no real authentication here. Any non-empty identity is accepted
//! and the secret is ignored.

use log::{info, warn};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::MailError;

/// Message shown when no identity was entered
pub const EMPTY_IDENTITY: &str = "Please enter an email address";

/// Process-lifetime session state
///
/// The identity exists exactly when the session is authenticated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn { identity: String },
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::LoggedIn { .. })
    }

    pub fn user_identity(&self) -> Option<&str> {
        match self {
            Session::LoggedOut => None,
            Session::LoggedIn { identity } => Some(identity),
        }
    }
}

/// Receives every session transition, after it has been applied
pub trait SessionObserver: Send + Sync {
    fn on_transition(&self, previous: &Session, current: &Session);
}

/// Owner of the session state machine
#[derive(Default)]
pub struct SessionGate {
    session: RwLock<Session>,
    observers: RwLock<Vec<Arc<dyn SessionObserver>>>,
}

impl SessionGate {
    /// Create a gate in the logged-out state
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for future transitions
    pub fn subscribe(&self, observer: Arc<dyn SessionObserver>) {
        self.observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(observer);
    }

    /// Accept or reject a set of credentials
    ///
    /// An empty identity is rejected and the session is left as it was.
    /// Any other identity is accepted regardless of `secret`. No remote call
    /// is made.
    pub fn submit_credentials(
        &self,
        identity: &str,
        _secret: Option<&str>,
    ) -> Result<Session, MailError> {
        if identity.is_empty() {
            warn!("Rejected sign-in with empty identity");
            return Err(MailError::validation(EMPTY_IDENTITY));
        }

        let next = Session::LoggedIn {
            identity: identity.to_string(),
        };
        let previous = {
            let mut session = self.session.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *session, next.clone())
        };

        info!("Signed in as {}", identity);
        self.notify(&previous, &next);
        Ok(next)
    }

    /// Snapshot of the current session
    pub fn current(&self) -> Session {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Read-only accessor for other components
    pub fn handle(self: &Arc<Self>) -> SessionHandle {
        SessionHandle {
            gate: Arc::clone(self),
        }
    }

    fn notify(&self, previous: &Session, current: &Session) {
        // Clone the list so observers may subscribe others without deadlocking
        let observers = self
            .observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for observer in observers {
            observer.on_transition(previous, current);
        }
    }
}

/// Read-only view of the session gate
#[derive(Clone)]
pub struct SessionHandle {
    gate: Arc<SessionGate>,
}

impl SessionHandle {
    pub fn current(&self) -> Session {
        self.gate.current()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_authenticated()
    }

    pub fn user_identity(&self) -> Option<String> {
        self.current().user_identity().map(str::to_string)
    }
}
