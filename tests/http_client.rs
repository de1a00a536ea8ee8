// SPDX-License-Identifier: MPL-2.0
//! `HttpClient` against a one-shot local HTTP server.

use drive_lens::application::port::{ListingOutcome, ListingSource};
use drive_lens::error::Error;
use drive_lens::infrastructure::HttpClient;
use std::time::Duration;
use tempfile::tempdir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serves one canned response and reports the request line it received.
async fn serve_once(
    status: &'static str,
    content_type: &'static str,
    body: Vec<u8>,
) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let request_line = String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string();
        let _ = tx.send(request_line);

        let head = format!(
            "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        let _ = socket.write_all(head.as_bytes()).await;
        let _ = socket.write_all(&body).await;
        let _ = socket.shutdown().await;
    });

    (format!("http://{addr}"), rx)
}

fn client(base: &str) -> HttpClient {
    HttpClient::new(base, Duration::from_secs(5)).expect("valid base URL")
}

#[tokio::test]
async fn lists_folder_children() {
    let body = br#"{"parentId":"album-1","folders":[],"files":[
        {"id":"p1","name":"beach.jpg","mimeType":"image/jpeg"},
        {"id":"d1","name":"notes.txt","mimeType":"text/plain"}
    ]}"#;
    let (base, request) = serve_once("200 OK", "application/json", body.to_vec()).await;

    let outcome = client(&base).children(Some("album-1")).await.expect("listing");
    let ListingOutcome::Listing(listing) = outcome else {
        panic!("expected a listing, not an auth redirect");
    };
    assert_eq!(listing.parent_id.as_deref(), Some("album-1"));
    assert_eq!(listing.items.len(), 1);
    assert_eq!(listing.items[0].name, "beach.jpg");

    let request_line = request.await.expect("request seen");
    assert!(request_line.starts_with("GET /drive/children?parentId=album-1 "));
}

#[tokio::test]
async fn unauthorized_resolves_sign_in_url() {
    let body = br#"{"needsAuth":true,"authUrl":"/auth/start"}"#;
    let (base, _request) = serve_once("401 Unauthorized", "application/json", body.to_vec()).await;

    let outcome = client(&base).children(None).await.expect("auth outcome");
    assert_eq!(
        outcome,
        ListingOutcome::NeedsAuth {
            auth_url: format!("{base}/auth/start"),
        }
    );
}

#[tokio::test]
async fn unauthorized_without_body_uses_default_path() {
    let (base, _request) = serve_once("401 Unauthorized", "text/plain", b"nope".to_vec()).await;

    let outcome = client(&base).children(None).await.expect("auth outcome");
    assert_eq!(
        outcome,
        ListingOutcome::NeedsAuth {
            auth_url: format!("{base}/auth/login"),
        }
    );
}

#[tokio::test]
async fn server_error_is_reported_with_status() {
    let (base, _request) = serve_once("503 Service Unavailable", "text/plain", b"down".to_vec()).await;

    let error = client(&base).children(None).await.expect_err("must fail");
    assert_eq!(error, Error::Http { status: 503 });
    assert!(error.is_transient());
}

#[tokio::test]
async fn download_streams_to_file() {
    let payload: Vec<u8> = (0..=255u8).cycle().take(70_000).collect();
    let (base, request) = serve_once("200 OK", "image/jpeg", payload.clone()).await;
    let dir = tempdir().expect("Failed to create temporary directory");
    let target = dir.path().join("beach.jpg");

    let http = client(&base);
    let url = http.urls().download("p1");
    let written = http.download_to(url, &target).await.expect("download");

    assert_eq!(written, payload.len() as u64);
    assert_eq!(std::fs::read(&target).expect("file written"), payload);
    assert!(request.await.expect("request seen").starts_with("GET /drive/file/p1/download "));
}

#[tokio::test]
async fn failed_download_leaves_no_file() {
    let (base, _request) = serve_once("404 Not Found", "text/plain", b"missing".to_vec()).await;
    let dir = tempdir().expect("Failed to create temporary directory");
    let target = dir.path().join("gone.jpg");

    let http = client(&base);
    let url = http.urls().download("gone");
    let error = http.download_to(url, &target).await.expect_err("must fail");

    assert_eq!(error, Error::Http { status: 404 });
    assert!(!target.exists());
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let error = client(&format!("http://{addr}"))
        .children(None)
        .await
        .expect_err("must fail");
    assert!(matches!(error, Error::Network(_)));
}
