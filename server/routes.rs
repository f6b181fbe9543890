use std::io::Cursor;
use std::sync::Arc;

use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use crate::state::SharedState;
use crate::handlers;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// A JSON reply before it is turned into a tiny_http response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ApiResponse {
    pub fn json<T: Serialize>(status: u16, body: &T) -> ApiResponse {
        match serde_json::to_value(body) {
            Ok(body) => ApiResponse { status, body },
            Err(e) => {
                log::error!("could not serialize response: {}", e);
                ApiResponse::error(500, "Internal server error.")
            }
        }
    }

    pub fn error(status: u16, message: &str) -> ApiResponse {
        ApiResponse {
            status,
            body: serde_json::json!({ "error": message }),
        }
    }

    pub fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let bytes = self.body.to_string().into_bytes();
        let len = bytes.len();
        Response::new(
            StatusCode(self.status),
            vec![header("Content-Type", "application/json")],
            Cursor::new(bytes),
            Some(len),
            None,
        )
    }
}

pub fn html_response(body: &str) -> Response<Cursor<Vec<u8>>> {
    let bytes = body.as_bytes().to_vec();
    let len = bytes.len();
    Response::new(
        StatusCode(200),
        vec![header("Content-Type", "text/html; charset=utf-8")],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

/// Builds a header from static ASCII, which tiny_http always accepts.
fn header(field: &'static str, value: &'static str) -> Header {
    Header::from_bytes(field.as_bytes(), value.as_bytes()).expect("static header is valid ASCII")
}

/// Value of the first request header named `field` (case-insensitive).
pub fn request_header(request: &Request, field: &'static str) -> Option<String> {
    request.headers().iter()
        .find(|h| h.field.equiv(field))
        .map(|h| h.value.as_str().to_owned())
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Routes one request and sends the response.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url    = request.url().to_owned();
    let path   = url.split('?').next().unwrap_or("").to_owned();

    let response = match (&method, path.as_str()) {
        (Method::Get,  "/")        => html_response(handlers::index::PAGE),
        (Method::Post, "/predict") => handlers::predict::handle_request(&mut request, &state).into_response(),
        (_, "/") | (_, "/predict") => ApiResponse::error(405, "Method not allowed.").into_response(),
        _                          => ApiResponse::error(404, "Not found.").into_response(),
    };

    log::info!("{} {} -> {}", method, path, response.status_code().0);
    if let Err(e) = request.respond(response) {
        log::warn!("could not send response for {} {}: {}", method, path, e);
    }
}

/// Accepts requests forever, handling each on its own thread.
///
/// Handlers share `state` read-only, so no request ever waits on another.
pub fn serve(server: Server, state: SharedState) {
    for request in server.incoming_requests() {
        let state = Arc::clone(&state);
        std::thread::spawn(move || dispatch(request, state));
    }
}
