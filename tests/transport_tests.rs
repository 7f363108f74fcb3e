//! Tests for the progress-reporting transport.

use mergeup::http::{
    create_http_client, HttpClientConfig, MultipartPayload, ProgressTransport, DEFAULT_CONTENT_TYPE,
};
use mergeup::selection::{FileSelection, SelectedFile};
use mergeup::Error;
use reqwest::{StatusCode, Url};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::helpers::*;

fn create_test_transport(chunk_size: usize) -> ProgressTransport {
    let client = create_http_client(HttpClientConfig::default()).expect("Failed to build client");
    ProgressTransport::new(client, chunk_size)
}

fn merge_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}{}", server.uri(), MERGE_PATH)).unwrap()
}

#[tokio::test]
async fn test_progress_events_are_ordered_and_complete() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MERGE_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_raw(r#"{"url":"https://x/y.pdf"}"#, "application/json"))
        .mount(&server)
        .await;

    let selection = create_test_selection(&[("a.pdf", 120), ("b.pdf", 80)]);
    let payload = MultipartPayload::from_selection(&selection).await.unwrap();

    let mut events = Vec::new();
    let res = create_test_transport(50)
        .upload(&merge_url(&server), payload, |loaded, total| events.push((loaded, total)))
        .await
        .unwrap();

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body, r#"{"url":"https://x/y.pdf"}"#);
    assert!(events.iter().all(|(_, total)| *total == 200));
    let loaded = events.iter().map(|(l, _)| *l).collect::<Vec<_>>();
    assert_monotonic(&loaded);
    assert_eq!(loaded, vec![50, 100, 120, 170, 200]);
}

#[tokio::test]
async fn test_multipart_carries_every_file_under_files() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MERGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let selection = create_test_selection(&[("first.pdf", 16), ("second.png", 8)]);
    let payload = MultipartPayload::from_selection(&selection).await.unwrap();
    create_test_transport(1024)
        .upload(&merge_url(&server), payload, |_, _| {})
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).into_owned();
    assert!(body.contains(r#"name="files"; filename="first.pdf""#));
    assert!(body.contains(r#"name="files"; filename="second.png""#));
    assert!(body.contains("Content-Type: image/png"));
    let content_type = requests[0].headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
}

#[tokio::test]
async fn test_http_errors_are_not_transport_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MERGE_PATH))
        .respond_with(
            ResponseTemplate::new(500).set_body_raw(r#"{"detail":"merge failed"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let payload = MultipartPayload::from_selection(&create_test_selection(&[("a.pdf", 10)]))
        .await
        .unwrap();
    let res = create_test_transport(1024)
        .upload(&merge_url(&server), payload, |_, _| {})
        .await
        .unwrap();

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.status_text, "Internal Server Error");
    assert!(!res.is_success());
}

#[tokio::test]
async fn test_missing_content_type_defaults_to_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MERGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"{}".to_vec()))
        .mount(&server)
        .await;

    let payload = MultipartPayload::from_selection(&create_test_selection(&[("a.pdf", 10)]))
        .await
        .unwrap();
    let res = create_test_transport(1024)
        .upload(&merge_url(&server), payload, |_, _| {})
        .await
        .unwrap();

    assert_eq!(res.content_type, DEFAULT_CONTENT_TYPE);
}

#[tokio::test]
async fn test_empty_files_report_no_progress() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let payload = MultipartPayload::from_selection(&create_test_selection(&[("empty.pdf", 0)]))
        .await
        .unwrap();
    let mut calls = 0;
    create_test_transport(1024)
        .upload(&merge_url(&server), payload, |_, _| calls += 1)
        .await
        .unwrap();

    assert_eq!(calls, 0);
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let url = Url::parse(&format!("{}{}", create_unreachable_base_url(), MERGE_PATH)).unwrap();
    let payload = MultipartPayload::from_selection(&create_test_selection(&[("a.pdf", 10)]))
        .await
        .unwrap();

    let err = create_test_transport(1024)
        .upload(&url, payload, |_, _| {})
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Network { .. }));
    assert_eq!(err.to_string(), "Network error");
}

#[tokio::test]
async fn test_chunked_parts_arrive_intact() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MERGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let selection = FileSelection::new(vec![SelectedFile::from_bytes(
        "notes.txt",
        b"pages one through nine".to_vec(),
    )]);
    let payload = MultipartPayload::from_selection(&selection).await.unwrap();
    let mut loaded = Vec::new();
    create_test_transport(4)
        .upload(&merge_url(&server), payload, |l, _| loaded.push(l))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).into_owned();
    assert!(body.contains("pages one through nine"));
    assert_eq!(loaded, vec![4, 8, 12, 16, 20, 22]);
}

#[tokio::test]
async fn test_server_reason_phrase_is_kept() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        let mut buf = [0u8; 1024];
        // The multipart body ends with the closing boundary.
        while !received.ends_with(b"--\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(
                b"HTTP/1.1 502 Merge Backend Asleep\r\n\
                  Content-Type: application/json\r\n\
                  Content-Length: 2\r\n\
                  Connection: close\r\n\r\n{}",
            )
            .await
            .unwrap();
    });

    let url = Url::parse(&format!("http://{}{}", addr, MERGE_PATH)).unwrap();
    let payload = MultipartPayload::from_selection(&create_test_selection(&[("a.pdf", 10)]))
        .await
        .unwrap();
    let res = create_test_transport(1024)
        .upload(&url, payload, |_, _| {})
        .await
        .unwrap();

    assert_eq!(res.status, StatusCode::BAD_GATEWAY);
    assert_eq!(res.status_text, "Merge Backend Asleep");
}
