//! Stub Claims Service
//!
//! An in-process axum server that speaks the claims service's HTTP surface
//! well enough for end-to-end tests:
//!
//! - `POST /api/claims` records every multipart part and answers per `StubReply`
//! - `GET /api/claims/:id` returns the stored record
//! - `GET /api/claims/:id/pdf` returns a placeholder document
//! - `GET /api/health` reports ok
//!
//! Each server binds its own ephemeral port and shuts down when dropped.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Body served for every stored claim's PDF
pub const STUB_PDF: &[u8] = b"%PDF-1.4\n% stub claim document\n%%EOF\n";

/// How the stub answers `POST /api/claims`
#[derive(Debug, Clone, PartialEq)]
pub enum StubReply {
    /// Store the claim and answer 200 with a receipt, as the real service does
    Accept,
    /// Answer with a fixed status and raw body
    Status { status: u16, body: String },
}

impl StubReply {
    pub fn status(status: u16) -> Self {
        StubReply::Status {
            status,
            body: json!({ "detail": "rejected by stub" }).to_string(),
        }
    }
}

/// One part of a recorded multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl RecordedPart {
    /// Body as text, for non-file parts
    pub fn text(&self) -> Option<&str> {
        match self.file_name {
            Some(_) => None,
            None => std::str::from_utf8(&self.data).ok(),
        }
    }

    pub fn is_file(&self) -> bool {
        self.file_name.is_some()
    }
}

/// A submission as the stub received it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedRequest {
    /// `Content-Type` header of the request
    pub content_type: Option<String>,
    /// Parts in wire order
    pub parts: Vec<RecordedPart>,
}

impl RecordedRequest {
    /// Text value of the first part named `name`
    pub fn text(&self, name: &str) -> Option<&str> {
        self.parts
            .iter()
            .find(|p| p.name == name && !p.is_file())
            .and_then(RecordedPart::text)
    }

    /// Number of parts named `name`
    pub fn count(&self, name: &str) -> usize {
        self.parts.iter().filter(|p| p.name == name).count()
    }

    /// File parts in wire order
    pub fn files(&self) -> Vec<&RecordedPart> {
        self.parts.iter().filter(|p| p.is_file()).collect()
    }

    /// Part names in wire order
    pub fn part_names(&self) -> Vec<&str> {
        self.parts.iter().map(|p| p.name.as_str()).collect()
    }
}

#[derive(Debug)]
struct StubState {
    reply: Mutex<StubReply>,
    delay: Mutex<Option<Duration>>,
    requests: Mutex<Vec<RecordedRequest>>,
    claims: Mutex<HashMap<String, Value>>,
    next_id: AtomicUsize,
}

/// Running stub claims service
#[derive(Debug)]
pub struct StubClaimsServer {
    addr: SocketAddr,
    state: Arc<StubState>,
    handle: JoinHandle<()>,
}

impl StubClaimsServer {
    /// Starts a stub that accepts every well-formed claim
    pub async fn start() -> Self {
        Self::start_with(StubReply::Accept).await
    }

    /// Starts a stub with the given reply
    pub async fn start_with(reply: StubReply) -> Self {
        let state = Arc::new(StubState {
            reply: Mutex::new(reply),
            delay: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
            claims: Mutex::new(HashMap::new()),
            next_id: AtomicUsize::new(1),
        });

        let app = Router::new()
            .route("/api/claims", post(submit_claim))
            .route("/api/claims/:claim_id", get(get_claim))
            .route("/api/claims/:claim_id/pdf", get(get_pdf))
            .route("/api/health", get(health))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub claims server");
        let addr = listener.local_addr().expect("Stub server has no local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Stub claims server failed");
        });

        Self { addr, state, handle }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL to point a client at
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn set_reply(&self, reply: StubReply) {
        *self.state.reply.lock().await = reply;
    }

    /// Delays every claim submission response
    pub async fn set_delay(&self, delay: Duration) {
        *self.state.delay.lock().await = Some(delay);
    }

    /// Submissions received so far
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().await.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.state.requests.lock().await.len()
    }

    /// Stores a claim record directly, bypassing submission
    pub async fn insert_claim(&self, claim_id: &str, data: Value) {
        self.state.claims.lock().await.insert(claim_id.to_string(), data);
    }
}

impl Drop for StubClaimsServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Address that refuses connections
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to reserve a port");
    let addr = listener.local_addr().expect("Listener has no local address");
    drop(listener);
    format!("http://{addr}")
}

/// Address of a server that answers every request with `status` and a body
/// cut short of its announced `Content-Length`
pub async fn truncated_body_base_url(status: u16) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind truncating server");
    let addr = listener.local_addr().expect("Listener has no local address");

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                if read_request(&mut socket).await.is_err() {
                    return;
                }
                let head = format!(
                    "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\n\
                     Content-Length: 512\r\nConnection: close\r\n\r\n{{\"detail\":"
                );
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}

/// Reads one HTTP/1.1 request, headers and body, off the socket
async fn read_request(socket: &mut TcpStream) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok());

    loop {
        let complete = match content_length {
            Some(len) => buf.len() >= header_end + len,
            None => buf.ends_with(b"0\r\n\r\n"),
        };
        if complete {
            return Ok(());
        }
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

async fn submit_claim(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut request = RecordedRequest {
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        parts: Vec::new(),
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return detail(StatusCode::BAD_REQUEST, &e.to_string()),
        };
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = match field.bytes().await {
            Ok(data) => data.to_vec(),
            Err(e) => return detail(StatusCode::BAD_REQUEST, &e.to_string()),
        };
        request.parts.push(RecordedPart {
            name,
            file_name,
            content_type,
            data,
        });
    }

    state.requests.lock().await.push(request.clone());

    if let Some(delay) = *state.delay.lock().await {
        tokio::time::sleep(delay).await;
    }

    let reply = state.reply.lock().await.clone();
    match reply {
        StubReply::Status { status, body } => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
        }
        StubReply::Accept => accept(&state, &request).await,
    }
}

async fn accept(state: &StubState, request: &RecordedRequest) -> Response {
    let location = request.text("farmLocation").unwrap_or_default();
    let parsed = location
        .split_once(',')
        .map(|(lat, lon)| lat.trim().parse::<f64>().is_ok() && lon.trim().parse::<f64>().is_ok())
        .unwrap_or(false);
    if !parsed {
        return detail(StatusCode::BAD_REQUEST, "Invalid farmLocation. Use 'lat, lon'");
    }

    let claim_id = format!("stub-{:04}", state.next_id.fetch_add(1, Ordering::SeqCst));

    let mut data = Map::new();
    data.insert("id".to_string(), json!(claim_id));
    for part in request.parts.iter().filter(|p| !p.is_file() && p.name != "declaration") {
        if let Some(text) = part.text() {
            data.insert(part.name.clone(), json!(text));
        }
    }
    data.insert("weather_summary".to_string(), json!({ "error": "weather lookup disabled" }));

    let saved_images: Vec<String> = request
        .files()
        .iter()
        .enumerate()
        .map(|(i, f)| format!("storage/images/{claim_id}_{i}_{}", f.file_name.as_deref().unwrap_or("upload")))
        .collect();

    state.claims.lock().await.insert(claim_id.clone(), Value::Object(data));

    Json(json!({
        "claim_id": claim_id,
        "pdf": format!("/api/claims/{claim_id}/pdf"),
        "pdf_hash": "0".repeat(64),
        "saved_images": saved_images,
        "weather_summary": { "error": "weather lookup disabled" },
    }))
    .into_response()
}

async fn get_claim(State(state): State<Arc<StubState>>, Path(claim_id): Path<String>) -> Response {
    match state.claims.lock().await.get(&claim_id) {
        Some(data) => Json(json!({
            "data": data,
            "pdf_path": format!("storage/pdfs/{claim_id}.pdf"),
            "pdf_hash": "0".repeat(64),
            "created_at": chrono::Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        }))
        .into_response(),
        None => detail(StatusCode::NOT_FOUND, "Claim not found"),
    }
}

async fn get_pdf(State(state): State<Arc<StubState>>, Path(claim_id): Path<String>) -> Response {
    if state.claims.lock().await.contains_key(&claim_id) {
        ([(header::CONTENT_TYPE, "application/pdf")], STUB_PDF).into_response()
    } else {
        detail(StatusCode::NOT_FOUND, "Claim not found")
    }
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "time": chrono::Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
    }))
}
