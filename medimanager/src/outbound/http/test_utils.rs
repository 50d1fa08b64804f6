//! Scripted HTTP/1.1 listener for exercising the REST adapters end to end.
//!
//! Each scripted reply is served on its own connection with
//! `Connection: close`, so requests and replies pair up in order.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use super::client::{ApiBaseUrl, ApiClient};

/// One request as the listener saw it.
#[derive(Debug, Clone)]
pub(super) struct RecordedRequest {
    /// Method and path, e.g. `PUT /api/doctors/7`.
    pub(super) target: String,
    headers: Vec<(String, String)>,
    pub(super) body: String,
}

impl RecordedRequest {
    pub(super) fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub(super) fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

pub(super) struct ScriptedServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    task: JoinHandle<()>,
}

impl ScriptedServer {
    /// Serve `replies` as `(status, body)` pairs, one per request.
    pub(super) async fn start(replies: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind scripted server");
        let addr = listener.local_addr().expect("scripted server address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let task = tokio::spawn(async move {
            for (status, body) in replies {
                let (mut stream, _) = listener.accept().await.expect("accept connection");
                let request = read_request(&mut stream).await;
                recorded.lock().expect("requests lock").push(request);
                write_reply(&mut stream, status, body).await;
            }
        });
        Self {
            base_url: format!("http://{addr}/api"),
            requests,
            task,
        }
    }

    /// API client aimed at this server, bypassing any ambient proxy.
    pub(super) fn client(&self) -> ApiClient {
        let base = ApiBaseUrl::parse(&self.base_url).expect("scripted base url");
        let http = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("reqwest client");
        ApiClient::with_http_client(http, base)
    }

    /// Wait for every scripted reply to be served and return the requests.
    pub(super) async fn finish(self) -> Vec<RecordedRequest> {
        self.task.await.expect("scripted server task");
        self.requests.lock().expect("requests lock").clone()
    }
}

async fn read_request(stream: &mut TcpStream) -> RecordedRequest {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 1024];
    let head_end = loop {
        if let Some(position) = find_head_end(&buffer) {
            break position;
        }
        let read = stream.read(&mut chunk).await.expect("read request head");
        assert!(read > 0, "client closed before finishing the request head");
        buffer.extend_from_slice(&chunk[..read]);
    };

    let head = String::from_utf8_lossy(&buffer[..head_end]).into_owned();
    let mut lines = head.split("\r\n");
    let target = lines
        .next()
        .unwrap_or_default()
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ");
    let headers: Vec<(String, String)> = lines.filter_map(parse_header).collect();
    let content_length = headers
        .iter()
        .find(|(key, _)| key == "content-length")
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buffer[head_end + 4..].to_vec();
    while body.len() < content_length {
        let read = stream.read(&mut chunk).await.expect("read request body");
        assert!(read > 0, "client closed before finishing the request body");
        body.extend_from_slice(&chunk[..read]);
    }

    RecordedRequest {
        target,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    }
}

fn find_head_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|window| window == b"\r\n\r\n")
}

fn parse_header(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim().to_ascii_lowercase(), value.trim().to_owned()))
}

async fn write_reply(stream: &mut TcpStream, status: u16, body: &str) {
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown");
    let reply = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream
        .write_all(reply.as_bytes())
        .await
        .expect("write reply");
    let _ = stream.shutdown().await;
}
