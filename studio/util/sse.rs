use std::io::Write;

// ---------------------------------------------------------------------------
// SSE framing helpers
// ---------------------------------------------------------------------------

/// Status line and headers for a raw SSE stream written via `into_writer()`.
pub const SSE_RESPONSE_HEAD: &str = "HTTP/1.1 200 OK\r\n\
                                     Content-Type: text/event-stream\r\n\
                                     Cache-Control: no-cache\r\n\
                                     Connection: keep-alive\r\n\
                                     X-Accel-Buffering: no\r\n\
                                     \r\n";

/// Formats a named SSE event with a JSON data payload.
///
/// Output format:
/// ```text
/// event: <name>\n
/// data: <json>\n
/// \n
/// ```
pub fn format_sse_event(event_name: &str, json_data: &str) -> String {
    format!("event: {}\ndata: {}\n\n", event_name, json_data)
}

/// Keep-alive comment; `EventSource` ignores lines starting with `:`.
pub fn format_sse_keepalive() -> &'static str {
    ": ping\n\n"
}

/// Writes one frame and flushes. Returns `false` once the client is gone.
pub fn write_sse<W: Write>(writer: &mut W, msg: &str) -> bool {
    writer.write_all(msg.as_bytes()).is_ok() && writer.flush().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_frame_layout() {
        assert_eq!(format_sse_event("layers", r#"{"a":1}"#), "event: layers\ndata: {\"a\":1}\n\n");
    }

    #[test]
    fn write_reports_success() {
        let mut buf: Vec<u8> = Vec::new();
        assert!(write_sse(&mut buf, format_sse_keepalive()));
        assert_eq!(buf, b": ping\n\n");
    }
}
