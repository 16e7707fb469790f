//! Navigation boundary
//!
//! The core never drives screens itself. It emits [`NavigationRequest`]s into
//! a [`Navigator`] sink and carries on; whoever implements the sink owns the
//! actual screen stack and may complete the transition whenever it likes.
//!
//! Requests are emitted on three occasions:
//! - the session gate accepts credentials (-> Inbox)
//! - a summary is selected in the mailbox (-> EmailDetail with id and subject)
//! - a compose submission succeeds (-> Inbox)

use log::info;
use std::fmt;
use std::sync::Arc;

use crate::models::MessageId;
use crate::session::{Session, SessionObserver};

/// Screens known to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Login,
    Inbox,
    EmailDetail,
    ComposeEmail,
}

impl Screen {
    /// Route name handed to the navigation layer
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Login => "Login",
            Screen::Inbox => "Inbox",
            Screen::EmailDetail => "EmailDetail",
            Screen::ComposeEmail => "ComposeEmail",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const LOGGED_OUT_SCREENS: &[Screen] = &[Screen::Login];
const LOGGED_IN_SCREENS: &[Screen] = &[Screen::Inbox, Screen::EmailDetail, Screen::ComposeEmail];

/// Screens that exist for the given session state
///
/// The two sets are disjoint: the login screen disappears once an identity
/// has been accepted.
pub fn reachable_screens(session: &Session) -> &'static [Screen] {
    match session {
        Session::LoggedOut => LOGGED_OUT_SCREENS,
        Session::LoggedIn { .. } => LOGGED_IN_SCREENS,
    }
}

/// Parameters carried along with a transition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    pub id: Option<MessageId>,
    pub subject: Option<String>,
}

/// A `{screen, params}` transition request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub screen: Screen,
    pub params: RouteParams,
}

impl NavigationRequest {
    /// Transition to a screen without parameters
    pub fn to(screen: Screen) -> Self {
        Self {
            screen,
            params: RouteParams::default(),
        }
    }

    /// Transition to the detail screen for a selected summary
    pub fn email_detail(id: MessageId, subject: impl Into<String>) -> Self {
        Self {
            screen: Screen::EmailDetail,
            params: RouteParams {
                id: Some(id),
                subject: Some(subject.into()),
            },
        }
    }
}

/// Sink for navigation requests
///
/// Implementations must not block on the transition completing. Nothing is
/// returned to the core.
pub trait Navigator: Send + Sync {
    fn navigate(&self, request: NavigationRequest);
}

/// Session observer that routes into the inbox when a user signs in
pub struct SessionRouter {
    navigator: Arc<dyn Navigator>,
}

impl SessionRouter {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self { navigator }
    }
}

impl SessionObserver for SessionRouter {
    fn on_transition(&self, previous: &Session, current: &Session) {
        if !previous.is_authenticated() && current.is_authenticated() {
            info!("Session established, routing to {}", Screen::Inbox);
            self.navigator.navigate(NavigationRequest::to(Screen::Inbox));
        }
    }
}
