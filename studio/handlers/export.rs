use std::io::Cursor;

use tiny_http::Response;
use tracing::error;

use crate::routes::{json_response, png_response, server_error};
use crate::state::{lock, SharedState};

/// `GET /grid.png`: the drawing as the service sees it, 8-bit grayscale.
pub fn handle_png(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let grid = lock(&state).session.grid().clone();
    match grid.to_png() {
        Ok(bytes) => png_response(bytes),
        Err(e) => {
            error!(error = %e, "png export failed");
            server_error("could not encode grid")
        }
    }
}

/// `GET /state`: current snapshot as JSON.
pub fn handle_state(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let json = lock(&state).snapshot().to_json();
    json_response(json)
}
