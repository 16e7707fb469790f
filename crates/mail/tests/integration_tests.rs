//! Integration tests for the mail crate
//!
//! These tests run the client against a small HTTP responder on a local
//! socket, covering the real `ureq` transport from login to send.

use mail::api::MailApi;
use mail::{
    MailClient, MailError, MessageId, NavigationRequest, Navigator, OutgoingDraft,
    ResponseOrdering, Screen, SearchFilter, ServiceConfig, SubmitOutcome, TransportError,
    UreqTransport,
};
use serde_json::Value;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const LIST_BODY: &str = r#"[
    {"id": 1, "from": "ann@example.com", "to": "me@example.com", "subject": "Lunch",
     "body": "<p>Noon?</p>", "timestamp": "2024-03-04T10:00:00Z", "isRead": false},
    {"id": 2, "from": "bob@example.com", "to": "me@example.com", "subject": "",
     "body": "", "timestamp": "2024-03-03T09:00:00Z", "isRead": true}
]"#;

const DETAIL_BODY: &str = r#"{"id": 1, "from": "ann@example.com", "to": "me@example.com",
    "subject": "Lunch", "body": "<p>Noon?</p>", "timestamp": "2024-03-04T10:00:00Z"}"#;

/// A request as seen by the responder
#[derive(Debug, Clone)]
struct Received {
    request_line: String,
    body: String,
}

/// Local HTTP responder
struct MockService {
    base_url: String,
    received: Arc<Mutex<Vec<Received>>>,
}

impl MockService {
    fn start<F>(handler: F) -> Self
    where
        F: Fn(&Received) -> (u16, String) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let received = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&received);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let Some(request) = read_request(&stream) else {
                    continue;
                };
                let (status, body) = handler(&request);
                log.lock().unwrap().push(request);
                let _ = write!(
                    stream,
                    "HTTP/1.1 {} Status\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
            }
        });

        Self { base_url, received }
    }

    fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    fn config(&self) -> ServiceConfig {
        ServiceConfig::resolve(Some(&self.base_url), None, None).unwrap()
    }

    fn api(&self) -> MailApi {
        api_for(&self.base_url, Duration::from_secs(5))
    }
}

fn api_for(base_url: &str, timeout: Duration) -> MailApi {
    MailApi::new(
        base_url.parse().unwrap(),
        Arc::new(UreqTransport::new(timeout)),
    )
}

fn read_request(stream: &TcpStream) -> Option<Received> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;

    let mut content_length = 0;
    loop {
        let mut header = String::new();
        reader.read_line(&mut header).ok()?;
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().ok()?;
            }
        }
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).ok()?;
    Some(Received {
        request_line: request_line.trim_end().to_string(),
        body: String::from_utf8(body).ok()?,
    })
}

/// Routes the three service endpoints
fn mail_service(request: &Received) -> (u16, String) {
    let line = &request.request_line;
    if line.starts_with("GET /emails") {
        (200, LIST_BODY.to_string())
    } else if line.starts_with("GET /email/1 ") {
        (200, DETAIL_BODY.to_string())
    } else if line.starts_with("GET /email/") {
        (404, "Email not found".to_string())
    } else if line.starts_with("POST /send-email") {
        (201, r#"{"message": "Email sent successfully"}"#.to_string())
    } else {
        (404, String::new())
    }
}

#[derive(Default)]
struct RecordingNavigator {
    requests: Mutex<Vec<NavigationRequest>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, request: NavigationRequest) {
        self.requests.lock().unwrap().push(request);
    }
}

#[test]
fn test_list_over_http() {
    let service = MockService::start(mail_service);

    let list = service.api().list_emails(&SearchFilter::All).unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, MessageId::new("1"));
    assert_eq!(list[0].body_preview, "<p>Noon?</p>");
    assert!(!list[0].is_read);
    assert_eq!(list[1].display_subject(), "(No Subject)");
    assert_eq!(service.received()[0].request_line, "GET /emails HTTP/1.1");
}

#[test]
fn test_search_sends_single_filter() {
    let service = MockService::start(mail_service);
    let api = service.api();

    api.list_emails(&SearchFilter::classify("ann@example.com")).unwrap();
    api.list_emails(&SearchFilter::classify("weekly report")).unwrap();

    let received = service.received();
    assert!(received[0].request_line.starts_with("GET /emails?from=ann%40example.com "));
    assert!(received[1].request_line.starts_with("GET /emails?subject=weekly+report "));
}

#[test]
fn test_not_found_is_service_error() {
    let service = MockService::start(mail_service);

    let err = service.api().get_email(&MessageId::new("999")).unwrap_err();

    assert_eq!(err, MailError::Service { status: 404, message: None });
}

#[test]
fn test_timeout_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    thread::spawn(move || {
        // Hold the connection open without answering
        if let Ok((_stream, _)) = listener.accept() {
            thread::sleep(Duration::from_secs(3));
        }
    });

    let err = api_for(&base_url, Duration::from_millis(200))
        .list_emails(&SearchFilter::All)
        .unwrap_err();

    assert_eq!(err, MailError::Transport(TransportError::Timeout));
}

#[test]
fn test_connection_refused_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = api_for(&base_url, Duration::from_secs(1))
        .list_emails(&SearchFilter::All)
        .unwrap_err();

    assert!(matches!(err, MailError::Transport(TransportError::Failed(_))));
}

#[test]
fn test_malformed_list_is_transport_error() {
    let service = MockService::start(|_| (200, "<html>oops</html>".to_string()));

    let err = service.api().list_emails(&SearchFilter::All).unwrap_err();

    assert!(matches!(err, MailError::Transport(TransportError::Malformed(_))));
}

#[test]
fn test_full_session_flow() {
    let service = MockService::start(mail_service);
    let navigator = Arc::new(RecordingNavigator::default());
    let mut config = service.config();
    config.ordering = ResponseOrdering::LatestIssued;
    let client = MailClient::connect(&config, navigator.clone());

    // Logged out: nothing but the login screen
    assert!(matches!(client.open_inbox(), Err(MailError::NotSignedIn(Screen::Inbox))));

    client.login("me@example.com", Some("anything")).unwrap();
    assert_eq!(
        navigator.requests.lock().unwrap().last(),
        Some(&NavigationRequest::to(Screen::Inbox))
    );

    // Inbox
    let store = client.open_inbox().unwrap();
    let list = store.load().unwrap();
    assert_eq!(list.len(), 2);
    let selected = store.select(&MessageId::new("1")).unwrap();
    assert!(store.snapshot()[0].is_read);
    assert_eq!(
        navigator.requests.lock().unwrap().last(),
        Some(&NavigationRequest::email_detail(MessageId::new("1"), "Lunch"))
    );

    // Detail
    let detail = client.open_detail().unwrap();
    let message = detail.load_detail(Some(&selected.id)).unwrap();
    assert_eq!(message.to, "me@example.com");
    assert_eq!(message.body, "<p>Noon?</p>");

    // Compose
    client.request_compose().unwrap();
    let compose = client.open_compose().unwrap();
    let outcome = compose
        .submit(&OutgoingDraft::new("bob@example.com").body("See you"))
        .unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Sent {
            message: "Email sent successfully".to_string()
        }
    );
    assert_eq!(
        navigator.requests.lock().unwrap().last(),
        Some(&NavigationRequest::to(Screen::Inbox))
    );

    let sent = service
        .received()
        .into_iter()
        .find(|r| r.request_line.starts_with("POST /send-email"))
        .unwrap();
    let payload: Value = serde_json::from_str(&sent.body).unwrap();
    assert_eq!(payload["from"], "me@example.com");
    assert_eq!(payload["to"], "bob@example.com");
    assert_eq!(payload["subject"], "(No Subject)");
    assert_eq!(payload["body"], "See you");

    // The read mark was local only; a reload restores the service's flag
    let reloaded = store.load().unwrap();
    assert!(!reloaded[0].is_read);
}
