use std::io::Cursor;

use tiny_http::{Header, Method, Request, Response, StatusCode};
use tracing::debug;

use crate::handlers;
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn respond(status: u16, content_type: &str, bytes: Vec<u8>) -> Response<Cursor<Vec<u8>>> {
    let len = bytes.len();
    let headers = Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes())
        .into_iter()
        .collect();
    Response::new(StatusCode(status), headers, Cursor::new(bytes), Some(len), None)
}

pub fn html_response(body: String) -> Response<Cursor<Vec<u8>>> {
    respond(200, "text/html; charset=utf-8", body.into_bytes())
}

pub fn json_response(body: String) -> Response<Cursor<Vec<u8>>> {
    respond(200, "application/json", body.into_bytes())
}

pub fn png_response(bytes: Vec<u8>) -> Response<Cursor<Vec<u8>>> {
    respond(200, "image/png", bytes)
}

pub fn bad_request(reason: &str) -> Response<Cursor<Vec<u8>>> {
    respond(400, "text/plain; charset=utf-8", format!("400 Bad Request: {}", reason).into_bytes())
}

pub fn server_error(reason: &str) -> Response<Cursor<Vec<u8>>> {
    respond(500, "text/plain; charset=utf-8", format!("500 Internal Server Error: {}", reason).into_bytes())
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    respond(404, "text/plain", b"404 Not Found".to_vec())
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests to the appropriate handler.
///
/// All handlers (except SSE) receive a `&mut Request` or just the state so
/// the dispatcher keeps ownership and responds at the end. The SSE handler
/// takes ownership to stream on the raw socket.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url    = request.url().to_owned();
    let path   = url.split('?').next().unwrap_or("").to_owned();

    debug!(%method, %path, "request");

    // SSE is long-lived; handler takes ownership and drives the stream loop.
    if method == Method::Get && path == "/events" {
        handlers::events::handle(request, state);
        return;
    }

    let response = match (method, path.as_str()) {
        // ── Page ─────────────────────────────────────────────────────────
        (Method::Get, "/")            => handlers::page::handle_get(state),
        (Method::Get, "/layout.json") => handlers::page::handle_layout(state),

        // ── Drawing ──────────────────────────────────────────────────────
        (Method::Post, "/draw/press")   => handlers::draw::handle_press(&mut request, state),
        (Method::Post, "/draw/move")    => handlers::draw::handle_move(&mut request, state),
        (Method::Post, "/draw/release") => handlers::draw::handle_release(state),
        (Method::Post, "/draw/leave")   => handlers::draw::handle_leave(state),
        (Method::Post, "/reset")        => handlers::draw::handle_reset(state),

        // ── Export ───────────────────────────────────────────────────────
        (Method::Get, "/state")    => handlers::export::handle_state(state),
        (Method::Get, "/grid.png") => handlers::export::handle_png(state),

        // ── 404 ──────────────────────────────────────────────────────────
        _ => not_found(),
    };

    let _ = request.respond(response);
}
