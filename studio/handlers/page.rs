use std::io::Cursor;

use serde::Serialize;
use tiny_http::Response;

use digit_viz::layout::Segment;
use digit_viz::{Connection, LayoutPass};

use crate::render::render_page;
use crate::routes::{html_response, json_response};
use crate::state::{lock, SharedState};

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub fn handle_get(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = lock(&state);
    let page = render_page(&mut st);
    drop(st);
    html_response(page)
}

// ---------------------------------------------------------------------------
// GET /layout.json
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct LayoutDoc {
    pass: LayoutPass,
    rows: [usize; 3],
    connections: Vec<Connection>,
    segments: Vec<Segment>,
}

/// The connection layout currently drawn, with pixel endpoints.
pub fn handle_layout(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = lock(&state);
    let rows = st.config.layers.render_rows();
    let pass = st.config.layout.pass();
    let connections = st.layout.get_or_compute(pass, &rows).as_ref().clone();
    let segments = st.segments();
    drop(st);

    let doc = LayoutDoc { pass, rows, connections, segments };
    json_response(serde_json::to_string(&doc).unwrap_or_else(|_| "{}".to_owned()))
}
