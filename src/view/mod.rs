//! Pure rendering of a session to HTML/SVG fragments and JSON snapshots.

pub mod palette;
pub mod render;
pub mod snapshot;

pub use render::{render_connections, render_grid, render_layer_row, render_network, RENDER_ORDER};
pub use snapshot::Snapshot;
