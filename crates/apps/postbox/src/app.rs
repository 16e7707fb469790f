//! Console application state
//!
//! Owns the [`MailClient`] and whichever screen component is active. After
//! every command the app compares the navigator's current request with the
//! screen it is showing and swaps components when they differ.

use log::debug;
use mail::{
    ComposeSubmitter, DetailLoader, MailClient, MailError, MailboxStore, NavigationRequest,
    OutgoingDraft, Screen, ServiceConfig, SubmitOutcome,
};
use std::sync::Arc;

use crate::command::Command;
use crate::navigator::ConsoleNavigator;
use crate::render;

const LIST_FAILED: &str = "Failed to fetch emails";

enum ActiveScreen {
    Login,
    Inbox(MailboxStore),
    Detail(DetailLoader),
    Compose {
        submitter: ComposeSubmitter,
        draft: OutgoingDraft,
    },
}

pub struct PostboxApp {
    client: MailClient,
    navigator: Arc<ConsoleNavigator>,
    active: ActiveScreen,
    shown: NavigationRequest,
}

impl PostboxApp {
    /// Create the app against the configured HTTP service
    pub fn connect(config: &ServiceConfig) -> Self {
        let navigator = Arc::new(ConsoleNavigator::new());
        let client = MailClient::connect(config, navigator.clone());
        Self::new(client, navigator)
    }

    pub fn new(client: MailClient, navigator: Arc<ConsoleNavigator>) -> Self {
        Self {
            client,
            shown: navigator.current(),
            navigator,
            active: ActiveScreen::Login,
        }
    }

    pub fn prompt(&self) -> String {
        match &self.active {
            ActiveScreen::Login => "login".to_string(),
            ActiveScreen::Inbox(_) => self.client.inbox_title(),
            ActiveScreen::Detail(_) => "message".to_string(),
            ActiveScreen::Compose { .. } => "compose".to_string(),
        }
    }

    /// Run one command and return the lines to print
    pub fn handle(&mut self, command: Command) -> Vec<String> {
        let mut output = self.dispatch(command);
        output.extend(self.sync_screen());
        output
    }

    /// Detach the active component before exit
    pub fn shutdown(&mut self) {
        self.close_active();
    }

    fn dispatch(&mut self, command: Command) -> Vec<String> {
        match (command, &mut self.active) {
            (Command::Empty | Command::Quit, _) => vec![],
            (Command::Help, _) => vec![render::HELP.to_string()],
            (Command::Login { identity, secret }, _) => {
                match self.client.login(&identity, secret.as_deref()) {
                    Ok(_) => vec![],
                    Err(e) => vec![e.to_string()],
                }
            }
            (Command::List, ActiveScreen::Inbox(store)) => listing(store.load()),
            (Command::Refresh, ActiveScreen::Inbox(store)) => listing(store.refresh()),
            (Command::Search(query), ActiveScreen::Inbox(store)) => listing(store.search(&query)),
            (Command::Open(n), ActiveScreen::Inbox(store)) => {
                let target = n
                    .checked_sub(1)
                    .and_then(|i| store.snapshot().get(i).map(|s| s.id.clone()));
                match target.and_then(|id| store.select(&id)) {
                    Some(_) => vec![],
                    None => vec![format!("No message {}", n)],
                }
            }
            (Command::Compose, _) => match self.client.request_compose() {
                Ok(()) => vec![],
                Err(e) => vec![e.to_string()],
            },
            (Command::To(to), ActiveScreen::Compose { draft, .. }) => {
                draft.to = to;
                vec![]
            }
            (Command::Subject(subject), ActiveScreen::Compose { draft, .. }) => {
                draft.subject = subject;
                vec![]
            }
            (Command::Body(body), ActiveScreen::Compose { draft, .. }) => {
                draft.body = body;
                vec![]
            }
            (Command::Send, ActiveScreen::Compose { submitter, draft }) => {
                match submitter.submit(draft) {
                    Ok(SubmitOutcome::Sent { message }) => vec![message],
                    Ok(SubmitOutcome::Ignored) => vec!["Still sending the previous message".into()],
                    Err(e) if e.is_validation() => vec![e.to_string()],
                    Err(e) => vec![ComposeSubmitter::failure_message(&e)],
                }
            }
            (Command::Back, _) => {
                self.navigator.back();
                vec![]
            }
            (command, _) => vec![format!("{:?} is not available here", command)],
        }
    }

    /// Follow the navigator to whatever screen the core last requested
    fn sync_screen(&mut self) -> Vec<String> {
        let target = self.navigator.current();
        if target == self.shown {
            return vec![];
        }

        debug!("Switching screen from {} to {}", self.shown.screen, target.screen);
        self.close_active();
        self.shown = target.clone();

        match self.open(&target) {
            Ok(output) => output,
            Err(e) => {
                self.active = ActiveScreen::Login;
                vec![e.to_string()]
            }
        }
    }

    fn open(&mut self, target: &NavigationRequest) -> Result<Vec<String>, MailError> {
        let mut output = Vec::new();
        self.active = match target.screen {
            Screen::Login => ActiveScreen::Login,
            Screen::Inbox => {
                let store = self.client.open_inbox()?;
                output.push(self.client.inbox_title());
                output.extend(listing(store.load()));
                ActiveScreen::Inbox(store)
            }
            Screen::EmailDetail => {
                let loader = self.client.open_detail()?;
                match loader.load_detail(target.params.id.as_ref()) {
                    Ok(message) => output.push(render::detail(&message)),
                    Err(_) => output.extend(loader.error_message()),
                }
                ActiveScreen::Detail(loader)
            }
            Screen::ComposeEmail => ActiveScreen::Compose {
                submitter: self.client.open_compose()?,
                draft: OutgoingDraft::default(),
            },
        };
        Ok(output)
    }

    fn close_active(&mut self) {
        match &self.active {
            ActiveScreen::Login => {}
            ActiveScreen::Inbox(store) => store.close(),
            ActiveScreen::Detail(loader) => loader.close(),
            ActiveScreen::Compose { submitter, .. } => submitter.close(),
        }
    }
}

fn listing(result: Result<Vec<mail::MessageSummary>, MailError>) -> Vec<String> {
    match result {
        Ok(list) => vec![render::summaries(&list)],
        Err(e) => vec![e.display_message(LIST_FAILED)],
    }
}
