//! # HTTP/JSON API
//!
//! A small `tiny_http` server over [`SniApi`]. Each request is handled on its
//! own thread; all threads share one `Arc<SniApi<S>>`, and mutations are
//! serialized by the store's transaction lock.
//!
//! | Method | Path                    | Result                          |
//! |--------|-------------------------|---------------------------------|
//! | GET    | `/api/snippets[?q=kw]`  | 200, JSON array                 |
//! | POST   | `/api/snippets`         | 201, `{"message"}`              |
//! | GET    | `/api/snippets/{name}`  | 200, snippet / 404              |
//! | PUT    | `/api/snippets/{name}`  | 200, `{"message"}` / 404 / 400  |
//! | DELETE | `/api/snippets/{name}`  | 200, `{"message"}` / 404        |
//! | OPTIONS| any                     | 200, CORS headers only          |
//!
//! Errors are `{"error": "..."}`. Every response carries permissive CORS
//! headers. Paths outside `/api/` get a static landing page, or a redirect to
//! the frontend dev server in dev mode.
//!
//! Routing is a pure function, [`route`], so it can be tested without sockets.

use crate::api::SniApi;
use crate::error::{Result, SniError};
use crate::model::SnippetUpdate;
use crate::store::SnippetStore;
use log::{debug, error, info, warn};
use serde::Deserialize;
use serde_json::json;
use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;
use tiny_http::{Header, Request, Response, Server};

pub const API_PREFIX: &str = "/api/snippets";
pub const DEV_FRONTEND_URL: &str = "http://localhost:5173";

const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Snippet Manager</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; }
        .container { max-width: 600px; margin: 0 auto; }
        .status { background: #f0f0f0; padding: 20px; border-radius: 8px; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Snippet Manager</h1>
        <div class="status">
            <p><strong>Status:</strong> Server is running!</p>
            <p><strong>API Endpoints:</strong></p>
            <ul>
                <li>GET /api/snippets - List all snippets (?q= to search)</li>
                <li>POST /api/snippets - Create new snippet</li>
                <li>GET /api/snippets/{name} - Get specific snippet</li>
                <li>PUT /api/snippets/{name} - Update snippet</li>
                <li>DELETE /api/snippets/{name} - Delete snippet</li>
            </ul>
        </div>
    </div>
</body>
</html>
"#;

/// A response before it is handed to tiny_http.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    pub location: Option<String>,
}

impl HttpReply {
    fn json(status: u16, value: serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: value.to_string(),
            location: None,
        }
    }

    fn message(status: u16, message: &str) -> Self {
        Self::json(status, json!({ "message": message }))
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self::json(status, json!({ "error": message.into() }))
    }

    fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: String::new(),
            location: None,
        }
    }

    fn html(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body: body.to_string(),
            location: None,
        }
    }

    fn redirect(location: String) -> Self {
        Self {
            location: Some(location),
            ..Self::empty(302)
        }
    }
}

impl From<SniError> for HttpReply {
    fn from(err: SniError) -> Self {
        let status = match &err {
            SniError::NotFound(_) => 404,
            SniError::AlreadyExists(_) | SniError::InvalidInput(_) | SniError::Serialization(_) => {
                400
            }
            _ => 500,
        };
        if status == 500 {
            error!("request failed: {}", err);
        }
        HttpReply::error(status, err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct CreateRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    command: String,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

/// Maps one request to a reply.
pub fn route<S: SnippetStore>(
    api: &SniApi<S>,
    method: &str,
    url: &str,
    body: &str,
    dev: bool,
) -> HttpReply {
    let (path, query) = match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    };

    if method == "OPTIONS" {
        return HttpReply::empty(200);
    }

    if path == API_PREFIX || path == "/api/snippets/" {
        return match method {
            "GET" => list(api, query).unwrap_or_else(HttpReply::from),
            "POST" => create(api, body).unwrap_or_else(HttpReply::from),
            _ => HttpReply::error(405, "method not allowed"),
        };
    }

    if let Some(rest) = path.strip_prefix("/api/snippets/") {
        let segment = rest.split('/').next().unwrap_or_default();
        let name = match percent_decode(segment) {
            Ok(name) if !name.is_empty() => name,
            Ok(_) => return HttpReply::error(400, "snippet name required"),
            Err(err) => return err.into(),
        };
        let reply = match method {
            "GET" => api
                .get_snippet(&name)
                .and_then(|snippet| Ok(HttpReply::json(200, serde_json::to_value(snippet)?))),
            "PUT" => update(api, &name, body),
            "DELETE" => api
                .delete_snippet(&name)
                .map(|_| HttpReply::message(200, "Snippet deleted successfully")),
            _ => return HttpReply::error(405, "method not allowed"),
        };
        return reply.unwrap_or_else(HttpReply::from);
    }

    if path.starts_with("/api/") {
        return HttpReply::error(404, "not found");
    }

    if dev {
        return HttpReply::redirect(format!("{}{}", DEV_FRONTEND_URL, url));
    }
    match (method, path) {
        ("GET", "/") | ("GET", "/index.html") => HttpReply::html(LANDING_PAGE),
        ("GET", _) => HttpReply::error(404, "not found"),
        _ => HttpReply::error(405, "method not allowed"),
    }
}

fn list<S: SnippetStore>(api: &SniApi<S>, query: Option<&str>) -> Result<HttpReply> {
    let keyword = match query.and_then(|q| query_param(q, "q")) {
        Some(raw) => Some(percent_decode(&raw.replace('+', " "))?),
        None => None,
    };
    let snippets = match keyword {
        Some(keyword) => api.search_snippets(&keyword)?,
        None => api.list_snippets()?,
    };
    Ok(HttpReply::json(200, serde_json::to_value(snippets)?))
}

fn create<S: SnippetStore>(api: &SniApi<S>, body: &str) -> Result<HttpReply> {
    let request: CreateRequest = serde_json::from_str(body)?;
    if request.name.is_empty() {
        return Err(SniError::InvalidInput("name is required".to_string()));
    }
    api.create_snippet(
        request.name,
        request.description,
        request.command,
        request.tags.unwrap_or_default(),
    )?;
    Ok(HttpReply::message(201, "Snippet created successfully"))
}

fn update<S: SnippetStore>(api: &SniApi<S>, name: &str, body: &str) -> Result<HttpReply> {
    let request: SnippetUpdate = serde_json::from_str(body)?;
    api.update_snippet(name, request)?;
    Ok(HttpReply::message(200, "Snippet updated successfully"))
}

fn query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query.split('&').find_map(|pair| match pair.split_once('=') {
        Some((k, v)) if k == key => Some(v),
        None if pair == key => Some(""),
        _ => None,
    })
}

/// Decodes `%XX` escapes. Malformed escapes are kept literally.
pub fn percent_decode(input: &str) -> Result<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out)
        .map_err(|_| SniError::InvalidInput(format!("invalid utf-8 in '{}'", input)))
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}

/// A bound listener, ready to serve.
pub struct HttpServer {
    server: Server,
    dev: bool,
}

impl HttpServer {
    pub fn bind(addr: &str, dev: bool) -> Result<Self> {
        let server = Server::http(addr)
            .map_err(|e| SniError::Server(format!("bind http at {}: {}", addr, e)))?;
        info!("listening on {}", addr);
        Ok(Self { server, dev })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Serves forever, one thread per request.
    pub fn serve<S>(self, api: Arc<SniApi<S>>) -> Result<()>
    where
        S: SnippetStore + Send + Sync + 'static,
    {
        loop {
            let request = match self.server.recv() {
                Ok(request) => request,
                Err(e) => {
                    warn!("http recv error: {}", e);
                    continue;
                }
            };
            let api = Arc::clone(&api);
            let dev = self.dev;
            thread::spawn(move || handle(&api, request, dev));
        }
    }
}

fn handle<S: SnippetStore>(api: &SniApi<S>, mut request: Request, dev: bool) {
    let method = request.method().as_str().to_string();
    let url = request.url().to_string();

    let mut body = String::new();
    let reply = match request.as_reader().read_to_string(&mut body) {
        Ok(_) => route(api, &method, &url, &body, dev),
        Err(e) => HttpReply::error(400, format!("unreadable body: {}", e)),
    };
    debug!("{} {} -> {}", method, url, reply.status);

    if let Err(e) = request.respond(into_response(reply)) {
        warn!("failed to respond to {} {}: {}", method, url, e);
    }
}

fn into_response(reply: HttpReply) -> Response<std::io::Cursor<Vec<u8>>> {
    let mut response = Response::from_string(reply.body).with_status_code(reply.status);
    let mut headers: Vec<(&str, &str)> = CORS_HEADERS.to_vec();
    headers.push(("Content-Type", reply.content_type));
    if let Some(location) = reply.location.as_deref() {
        headers.push(("Location", location));
    }
    for (name, value) in headers {
        if let Ok(header) = Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            response.add_header(header);
        }
    }
    response
}
