use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde_json::json;

use crate::error::CatalogError;
use crate::trigger::{
    dispatch_request, trigger_capture, trigger_capture_with, TriggerConfig, WorkflowDispatch,
    API_VERSION_HEADER,
};

fn test_client() -> Client {
    Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

/// Accept a single connection, answer with `status_line`, return the raw request
fn serve_once(status_line: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        let response = format!(
            "{}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            status_line
        );
        stream.write_all(response.as_bytes()).unwrap();
        request
    });

    (format!("http://{}/actions/workflows/capture.yml/dispatches", addr), handle)
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[test]
fn test_dispatch_payload_shape() {
    let payload = WorkflowDispatch::new("main", "https://example.com", "example-site");
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({
            "ref": "main",
            "inputs": {
                "url": "https://example.com",
                "output_filename": "example-site"
            }
        })
    );
}

#[test]
fn test_dispatch_request_headers() {
    let config = TriggerConfig::new("https://api.example.com/dispatches", "s3cret");
    let payload = WorkflowDispatch::new(&config.git_ref, "https://example.com", "example-site");

    let request = dispatch_request(&test_client(), &config, &payload).unwrap();

    assert_eq!(request.method(), &reqwest::Method::POST);
    assert_eq!(request.url().as_str(), "https://api.example.com/dispatches");
    assert_eq!(request.headers()[ACCEPT], "application/vnd.github+json");
    assert_eq!(request.headers()[AUTHORIZATION], "Bearer s3cret");
    assert_eq!(request.headers()[API_VERSION_HEADER], "2022-11-28");

    let body = request.body().and_then(|b| b.as_bytes()).unwrap();
    let sent: WorkflowDispatch = serde_json::from_slice(body).unwrap();
    assert_eq!(sent, payload);
}

#[test]
fn test_config_debug_hides_token() {
    let config = TriggerConfig::new("https://api.example.com/dispatches", "s3cret")
        .with_ref("release")
        .with_timeout(Some(Duration::from_secs(10)));

    let debug = format!("{:?}", config);
    assert!(!debug.contains("s3cret"));
    assert!(debug.contains("release"));
}

#[test]
fn test_trigger_returns_status() {
    let (endpoint, server) = serve_once("HTTP/1.1 204 No Content");
    let config = TriggerConfig::new(endpoint, "s3cret").with_ref("main");

    let status =
        trigger_capture_with(&test_client(), &config, "https://example.com", "example-site")
            .unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);

    let request = server.join().unwrap();
    let lowered = request.to_lowercase();
    assert!(request.starts_with("POST /actions/workflows/capture.yml/dispatches "));
    assert!(lowered.contains("authorization: bearer s3cret"));
    assert!(lowered.contains("x-github-api-version: 2022-11-28"));
    assert!(request.contains(r#""output_filename":"example-site""#));
}

#[test]
fn test_error_status_is_not_an_error() {
    let (endpoint, server) = serve_once("HTTP/1.1 422 Unprocessable Entity");
    let config = TriggerConfig::new(endpoint, "s3cret");

    let status =
        trigger_capture_with(&test_client(), &config, "https://example.com", "example-site")
            .unwrap();
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    server.join().unwrap();
}

#[test]
fn test_unreachable_endpoint_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = TriggerConfig::new(format!("http://{}/dispatches", addr), "s3cret");
    let err = trigger_capture_with(&test_client(), &config, "https://example.com", "example-site")
        .unwrap_err();
    assert!(matches!(err, CatalogError::Network(_)));
}

#[test]
fn test_configured_timeout_applies() {
    // Connections complete in the backlog but nothing ever answers
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let config = TriggerConfig::new(format!("http://{}/dispatches", addr), "s3cret")
        .with_timeout(Some(Duration::from_millis(500)));

    let started = Instant::now();
    let err = trigger_capture(&config, "https://example.com", "example-site").unwrap_err();
    let elapsed = started.elapsed();

    assert!(matches!(err, CatalogError::Network(_)));
    assert!(
        elapsed < Duration::from_secs(5),
        "timed out after {:?}",
        elapsed
    );
    drop(listener);
}
