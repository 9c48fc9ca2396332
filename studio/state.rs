use std::sync::{mpsc, Arc, Mutex, MutexGuard};

use tracing::debug;

use digit_viz::layout::Segment;
use digit_viz::{LayoutCache, Predictor, Session, Snapshot, VizConfig};

// ---------------------------------------------------------------------------
// Main state struct
// ---------------------------------------------------------------------------

pub struct StudioState {
    /// Grid, layers and gesture of the one drawing session.
    pub session:    Session,
    /// Effective configuration the server was started with.
    pub config:     VizConfig,
    /// Prediction backend; cloned into each worker thread.
    pub predictor:  Arc<dyn Predictor>,
    /// Connection layouts already computed for this process.
    pub layout:     LayoutCache,
    /// Open SSE streams, each fed serialized snapshots.
    subscribers:    Vec<mpsc::Sender<String>>,
}

impl StudioState {
    pub fn new(config: VizConfig, predictor: Arc<dyn Predictor>) -> Self {
        let session = Session::new(config.grid.size, config.layers, config.predict.ordering);
        StudioState {
            session,
            config,
            predictor,
            layout:      LayoutCache::new(),
            subscribers: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.session)
    }

    /// Registers a new SSE stream.
    pub fn subscribe(&mut self) -> mpsc::Receiver<String> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Pushes the current snapshot to every stream, dropping closed ones.
    pub fn broadcast(&mut self) {
        let json = self.snapshot().to_json();
        self.subscribers.retain(|tx| tx.send(json.clone()).is_ok());
        debug!(subscribers = self.subscribers.len(), "broadcast snapshot");
    }

    /// Connection lines for the configured seed and layer sizes.
    pub fn segments(&mut self) -> Vec<Segment> {
        let rows = self.config.layers.render_rows();
        let pass = self.config.layout.pass();
        let conns = self.layout.get_or_compute(pass, &rows);
        self.config.layout.geometry.segments(&conns, &rows)
    }
}

/// Shared state type: an `Arc<Mutex<StudioState>>` passed to every handler.
pub type SharedState = Arc<Mutex<StudioState>>;

/// Locks the state, recovering it if a handler thread panicked mid-update.
/// Every mutation leaves the session consistent, so the inner value is safe
/// to keep using.
pub fn lock(state: &SharedState) -> MutexGuard<'_, StudioState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
