//! Integration tests for `HttpLogFetcher` against a mock log store.

use logdeck::fetcher::{FetchError, HttpLogFetcher, LogFetcher};
use logdeck::model::{LogLevel, RecordId};
use logdeck::query::LogQuery;
use std::sync::mpsc;
use std::thread;
use tiny_http::{Header, Response, Server};

/// Serve exactly one request with the given status and body.
/// Returns the base URL and a receiver yielding the requested URL.
fn serve_once(status: u16, body: &'static str) -> (String, mpsc::Receiver<String>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        if let Ok(request) = server.recv() {
            tx.send(request.url().to_string()).unwrap();
            let header = Header::from_bytes("Content-Type", "application/json").unwrap();
            let response = Response::from_string(body)
                .with_status_code(status)
                .with_header(header);
            let _ = request.respond(response);
        }
    });

    (format!("http://{}", addr), rx)
}

#[test]
fn test_fetch_page_sends_filters_and_decodes() {
    let body = r#"{
        "items": [
            {"id": 7, "timestamp": "2024-05-01T08:30:00", "level": "ERROR",
             "message": "disk full", "source": "worker", "details": "trace",
             "extra": true},
            {"id": "b-2", "timestamp": null, "level": "INFO",
             "message": "started", "source": "api"}
        ],
        "total": 23
    }"#;
    let (base, urls) = serve_once(200, body);

    let fetcher = HttpLogFetcher::new(&base).unwrap();
    let query = LogQuery::build(10, 10, Some(LogLevel::Error), "disk full");
    let page = fetcher.fetch_page(&query).unwrap();

    let url = urls.recv().unwrap();
    assert!(url.starts_with("/logs?"));
    assert!(url.contains("skip=10"));
    assert!(url.contains("limit=10"));
    assert!(url.contains("level=ERROR"));
    assert!(url.contains("q=disk+full") || url.contains("q=disk%20full"));

    assert_eq!(page.total, 23);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].id, RecordId::Number(7));
    assert_eq!(page.items[0].details.as_deref(), Some("trace"));
    assert!(page.items[0].timestamp.is_some());
    assert_eq!(page.items[1].id, RecordId::Text("b-2".into()));
    assert!(page.items[1].timestamp.is_none());
}

#[test]
fn test_unset_filters_are_omitted() {
    let (base, urls) = serve_once(200, r#"{"items": [], "total": 0}"#);

    let fetcher = HttpLogFetcher::new(&base).unwrap();
    let page = fetcher.fetch_page(&LogQuery::build(0, 10, None, "")).unwrap();

    let url = urls.recv().unwrap();
    assert!(!url.contains("level="));
    assert!(!url.contains("q="));
    assert!(page.items.is_empty());
}

#[test]
fn test_non_success_status_is_reported() {
    let (base, _urls) = serve_once(503, r#"{"detail": "unavailable"}"#);

    let fetcher = HttpLogFetcher::new(&base).unwrap();
    let err = fetcher.fetch_page(&LogQuery::build(0, 10, None, "")).unwrap_err();

    assert_eq!(err, FetchError::Status(503));
}

#[test]
fn test_malformed_body_is_decode_error() {
    let (base, _urls) = serve_once(200, r#"{"items": "nope"}"#);

    let fetcher = HttpLogFetcher::new(&base).unwrap();
    let err = fetcher.fetch_page(&LogQuery::build(0, 10, None, "")).unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
}

#[test]
fn test_unreachable_store_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let fetcher = HttpLogFetcher::new(&format!("http://127.0.0.1:{}", port)).unwrap();
    let err = fetcher.fetch_page(&LogQuery::build(0, 10, None, "")).unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
}
