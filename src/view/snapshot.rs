use serde::{Deserialize, Serialize};

use crate::layers::LayerKind;
use crate::session::Session;

/// Everything the browser needs to repaint: cell intensities (row-major, in
/// {0, 0.5, 1}) and the three activation vectors.
///
/// `revision` orders snapshots of one session; a client keeps the highest
/// it has seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub revision: u64,
    pub size: usize,
    pub grid: Vec<f64>,
    pub hidden1: Vec<f64>,
    pub hidden2: Vec<f64>,
    pub output: Vec<f64>,
    pub drawing: bool,
}

impl Snapshot {
    pub fn capture(session: &Session) -> Self {
        let layers = session.layers();
        Snapshot {
            revision: session.revision(),
            size: session.grid().size(),
            grid: session.grid().cells().iter().map(|c| c.value()).collect(),
            hidden1: layers.get(LayerKind::Hidden1).to_vec(),
            hidden2: layers.get(LayerKind::Hidden2).to_vec(),
            output: layers.get(LayerKind::Output).to_vec(),
            drawing: session.is_drawing(),
        }
    }

    pub fn to_json(&self) -> String {
        // Only numbers, bools and vectors: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_owned())
    }
}
