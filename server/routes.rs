use std::io::{Cursor, Read};

use tiny_http::{Header, Method, Request, Response, StatusCode};
use tracing::{debug, warn};

use digit_ocr::service::{OcrService, Reply, RequestError};

const INDEX_HTML: &str = include_str!("assets/index.html");
const OCR_JS: &str = include_str!("assets/ocr.js");

/// Shared by every request thread.
pub struct AppState {
    pub service: OcrService,
    pub max_body_bytes: usize,
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn headers(pairs: &[(&str, &str)]) -> Vec<Header> {
    pairs.iter()
        .chain(&[("Access-Control-Allow-Origin", "*")])
        .filter_map(|(k, v)| Header::from_bytes(k.as_bytes(), v.as_bytes()).ok())
        .collect()
}

fn body_response(status: u16, content_type: &str, body: Vec<u8>) -> Response<Cursor<Vec<u8>>> {
    let len = body.len();
    Response::new(
        StatusCode(status),
        headers(&[("Content-Type", content_type)]),
        Cursor::new(body),
        Some(len),
        None,
    )
}

pub fn json_response(reply: &Reply) -> Response<Cursor<Vec<u8>>> {
    body_response(reply.status, "application/json", reply.body.to_string().into_bytes())
}

pub fn preflight() -> Response<Cursor<Vec<u8>>> {
    Response::new(
        StatusCode(204),
        headers(&[
            ("Access-Control-Allow-Methods", "POST, OPTIONS"),
            ("Access-Control-Allow-Headers", "Content-Type"),
        ]),
        Cursor::new(Vec::new()),
        Some(0),
        None,
    )
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    body_response(404, "text/plain", b"404 Not Found".to_vec())
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Routes one request and writes its response.
pub fn dispatch(mut request: Request, state: &AppState) {
    let method = request.method().clone();
    let url    = request.url().to_owned();
    let path   = url.split('?').next().unwrap_or("").to_owned();
    debug!(%method, %path, "request");

    let response = match (method, path.as_str()) {
        (Method::Get,     "/" | "/index.html") => body_response(200, "text/html; charset=utf-8", INDEX_HTML.as_bytes().to_vec()),
        (Method::Get,     "/ocr.js")           => body_response(200, "application/javascript", OCR_JS.as_bytes().to_vec()),
        (Method::Options, "/ocr")              => preflight(),
        (Method::Post,    "/ocr")              => {
            let reply = match read_body(&mut request, state.max_body_bytes) {
                Ok(body) => state.service.handle(&body),
                Err(e)   => Reply::from_request_error(&e),
            };
            json_response(&reply)
        }
        _ => not_found(),
    };

    if let Err(e) = request.respond(response) {
        warn!(error = %e, "failed to write response");
    }
}

/// Reads the request body, refusing anything over `limit` bytes.
fn read_body(request: &mut Request, limit: usize) -> Result<Vec<u8>, RequestError> {
    if request.body_length().is_some_and(|len| len > limit) {
        return Err(RequestError::BodyTooLarge { limit });
    }
    let mut body = Vec::new();
    request.as_reader().take(limit as u64 + 1).read_to_end(&mut body)?;
    if body.len() > limit {
        return Err(RequestError::BodyTooLarge { limit });
    }
    Ok(body)
}
