//! Mail client facade
//!
//! Wires the session gate, the service client and the navigator together,
//! and only hands out components for screens that exist in the current
//! session state.

use log::debug;
use std::sync::Arc;

use crate::api::{MailApi, Transport, UreqTransport};
use crate::compose::ComposeSubmitter;
use crate::config::ServiceConfig;
use crate::detail::DetailLoader;
use crate::error::MailError;
use crate::mailbox::{MailboxStore, ResponseOrdering};
use crate::navigation::{NavigationRequest, Navigator, Screen, SessionRouter, reachable_screens};
use crate::session::{Session, SessionGate, SessionHandle};

/// Product name shown in the inbox title
const APP_NAME: &str = "Postbox";

/// Entry point for a front end
pub struct MailClient {
    api: Arc<MailApi>,
    gate: Arc<SessionGate>,
    navigator: Arc<dyn Navigator>,
    ordering: ResponseOrdering,
}

impl MailClient {
    /// Create a client that talks to the service over HTTP
    pub fn connect(config: &ServiceConfig, navigator: Arc<dyn Navigator>) -> Self {
        let transport = Arc::new(UreqTransport::new(config.timeout));
        Self::new(config, transport, navigator)
    }

    /// Create a client over an arbitrary transport
    pub fn new(
        config: &ServiceConfig,
        transport: Arc<dyn Transport>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let gate = Arc::new(SessionGate::new());
        gate.subscribe(Arc::new(SessionRouter::new(Arc::clone(&navigator))));

        Self {
            api: Arc::new(MailApi::new(config.base_url.clone(), transport)),
            gate,
            navigator,
            ordering: config.ordering,
        }
    }

    /// Submit login credentials. On success the navigator is routed to the inbox.
    pub fn login(&self, identity: &str, secret: Option<&str>) -> Result<Session, MailError> {
        self.gate.submit_credentials(identity, secret)
    }

    pub fn session(&self) -> SessionHandle {
        self.gate.handle()
    }

    /// Screens available in the current session state
    pub fn reachable_screens(&self) -> &'static [Screen] {
        reachable_screens(&self.gate.current())
    }

    /// Title for the inbox header, e.g. "Postbox (ann@example.com)"
    pub fn inbox_title(&self) -> String {
        match self.gate.current().user_identity() {
            Some(identity) => format!("{} ({})", APP_NAME, identity),
            None => APP_NAME.to_string(),
        }
    }

    /// Instantiate the mailbox store for the inbox screen
    pub fn open_inbox(&self) -> Result<MailboxStore, MailError> {
        self.require(Screen::Inbox)?;
        Ok(MailboxStore::new(
            Arc::clone(&self.api),
            Arc::clone(&self.navigator),
            self.ordering,
        ))
    }

    /// Instantiate a detail loader for the detail screen
    pub fn open_detail(&self) -> Result<DetailLoader, MailError> {
        self.require(Screen::EmailDetail)?;
        Ok(DetailLoader::new(Arc::clone(&self.api)))
    }

    /// Instantiate the submitter for the compose screen
    pub fn open_compose(&self) -> Result<ComposeSubmitter, MailError> {
        self.require(Screen::ComposeEmail)?;
        Ok(ComposeSubmitter::new(
            Arc::clone(&self.api),
            self.gate.handle(),
            Arc::clone(&self.navigator),
        ))
    }

    /// Route to the compose screen (the inbox "compose" action)
    pub fn request_compose(&self) -> Result<(), MailError> {
        self.require(Screen::ComposeEmail)?;
        self.navigator.navigate(NavigationRequest::to(Screen::ComposeEmail));
        Ok(())
    }

    fn require(&self, screen: Screen) -> Result<(), MailError> {
        if self.reachable_screens().contains(&screen) {
            Ok(())
        } else {
            debug!("{} is not reachable while logged out", screen);
            Err(MailError::NotSignedIn(screen))
        }
    }
}
