//! Page renderer for the drawing studio.
//!
//! The studio uses a single HTML template (`studio/assets/index.html`) with
//! placeholder tokens like `{{TOKEN}}`.  The template is embedded at compile
//! time so the binary runs from any working directory.

use digit_viz::view::{render_grid, render_network};

use crate::state::StudioState;

const TEMPLATE: &str = include_str!("assets/index.html");

/// Renders the full page from the current state.
pub fn render_page(st: &mut StudioState) -> String {
    let segments = st.segments();
    let geometry = st.config.layout.geometry;
    let network  = render_network(st.session.layers(), &segments, &geometry);
    let grid     = render_grid(st.session.grid(), st.config.server.cell_px);
    let snapshot = st.snapshot().to_json();

    let html = TEMPLATE
        .replace("{{NETWORK_SVG}}",   &network)
        .replace("{{GRID}}",          &grid)
        .replace("{{SNAPSHOT_JSON}}", &snapshot);

    blank_remaining(html)
}

/// Replaces any `{{TOKEN}}` left in the page with an empty string.
fn blank_remaining(mut html: String) -> String {
    while let Some(start) = html.find("{{") {
        match html[start..].find("}}") {
            Some(end) => html.replace_range(start..start + end + 2, ""),
            None      => break,
        }
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leftover_tokens_are_blanked() {
        assert_eq!(blank_remaining("a{{X}}b{{Y}}c".into()), "abc");
        assert_eq!(blank_remaining("open {{ only".into()), "open {{ only");
    }

    #[test]
    fn page_orders_gesture_requests() {
        // One promise chain for every POST, and snapshots older than the
        // last one painted are skipped.
        assert_eq!(TEMPLATE.matches("fetch(").count(), 1);
        assert!(TEMPLATE.contains("queue = queue.then("));
        assert!(TEMPLATE.contains("if (s.revision < drawn) return;"));
        assert!(TEMPLATE.contains("if (at === lastCell) return;"));
    }
}
