//! Test doubles shared by unit tests

use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, mpsc};
use url::Url;

use crate::api::{HttpRequest, HttpResponse, MailApi, Transport};
use crate::error::TransportError;
use crate::navigation::{NavigationRequest, Navigator};

/// Build a client against a fake base address
pub fn api(transport: Arc<dyn Transport>) -> MailApi {
    MailApi::new(Url::parse("http://mail.test:8080").unwrap(), transport)
}

/// A service-shaped email record
pub fn email_json(id: u64, from: &str, subject: &str, is_read: bool) -> Value {
    json!({
        "id": id,
        "from": from,
        "to": "me@example.com",
        "subject": subject,
        "body": format!("<p>Body of {}</p>", id),
        "timestamp": "2024-03-04T10:00:00Z",
        "isRead": is_read,
    })
}

pub fn list_body(records: &[Value]) -> String {
    Value::Array(records.to_vec()).to_string()
}

/// Transport that replays queued responses in order and records requests
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            body: body.into(),
        }));
    }

    pub fn fail(&self, err: TransportError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Failed("no scripted response".into())))
    }
}

/// A request parked inside [`GatedTransport`] until the test answers it
pub struct PendingCall {
    pub request: HttpRequest,
    reply: mpsc::Sender<Result<HttpResponse, TransportError>>,
}

impl PendingCall {
    pub fn respond(self, status: u16, body: impl Into<String>) {
        let _ = self.reply.send(Ok(HttpResponse {
            status,
            body: body.into(),
        }));
    }
}

/// Transport whose calls block until the test releases them
///
/// Each `send` shows up on the receiver returned by [`GatedTransport::new`],
/// so a test controls both the order requests are observed in and the order
/// their responses arrive in.
pub struct GatedTransport {
    issued: Mutex<mpsc::Sender<PendingCall>>,
}

impl GatedTransport {
    pub fn new() -> (Arc<Self>, mpsc::Receiver<PendingCall>) {
        let (tx, rx) = mpsc::channel();
        (
            Arc::new(Self {
                issued: Mutex::new(tx),
            }),
            rx,
        )
    }
}

impl Transport for GatedTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let (reply, response) = mpsc::channel();
        self.issued
            .lock()
            .unwrap()
            .send(PendingCall {
                request: request.clone(),
                reply,
            })
            .map_err(|_| TransportError::Failed("gate closed".into()))?;
        response
            .recv()
            .unwrap_or_else(|_| Err(TransportError::Failed("call abandoned".into())))
    }
}

/// Navigator that remembers every request
#[derive(Default)]
pub struct RecordingNavigator {
    requests: Mutex<Vec<NavigationRequest>>,
}

impl RecordingNavigator {
    pub fn requests(&self) -> Vec<NavigationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, request: NavigationRequest) {
        self.requests.lock().unwrap().push(request);
    }
}
