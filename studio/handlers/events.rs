use std::io::Write;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use tiny_http::Request;
use tracing::debug;

use crate::state::{lock, SharedState};
use crate::util::sse::{format_sse_event, format_sse_keepalive, write_sse, SSE_RESPONSE_HEAD};

/// `GET /events`: Server-Sent Events handler.
///
/// Takes ownership of `request` to stream on the raw socket, then:
/// 1. sends the current snapshot as a `layers` event,
/// 2. forwards every snapshot broadcast after a prediction lands or a reset,
/// 3. writes a `: ping` comment whenever 500 ms pass without one.
///
/// The loop ends when the browser goes away. `EventSource` reconnects on
/// its own.
pub fn handle(request: Request, state: SharedState) {
    let mut writer = request.into_writer();
    if !write_sse(&mut writer, SSE_RESPONSE_HEAD) {
        return;
    }

    let (rx, initial) = {
        let mut st = lock(&state);
        (st.subscribe(), st.snapshot().to_json())
    };
    if !write_sse(&mut writer, &format_sse_event("layers", &initial)) {
        return;
    }
    debug!("event stream opened");

    loop {
        let frame = match rx.recv_timeout(Duration::from_millis(500)) {
            Ok(json)                             => format_sse_event("layers", &json),
            Err(RecvTimeoutError::Timeout)       => format_sse_keepalive().to_owned(),
            Err(RecvTimeoutError::Disconnected)  => break,
        };
        if !write_sse(&mut writer, &frame) {
            break;
        }
    }

    let _ = writer.flush();
    debug!("event stream closed");
}
