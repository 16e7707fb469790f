//! Console implementation of the navigation sink

use mail::{NavigationRequest, Navigator, Screen};
use std::sync::{Mutex, PoisonError};

/// Tracks which screen the console should show
///
/// The core only posts requests here; [`crate::app::PostboxApp`] picks them
/// up after each command and swaps its active screen.
pub struct ConsoleNavigator {
    current: Mutex<NavigationRequest>,
}

impl ConsoleNavigator {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(NavigationRequest::to(Screen::Login)),
        }
    }

    pub fn current(&self) -> NavigationRequest {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Leave a detail or compose screen for the inbox
    pub fn back(&self) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if matches!(current.screen, Screen::EmailDetail | Screen::ComposeEmail) {
            *current = NavigationRequest::to(Screen::Inbox);
        }
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, request: NavigationRequest) {
        log::debug!("Navigating to {}", request.screen);
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = request;
    }
}
