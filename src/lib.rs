pub mod config;
pub mod grid;
pub mod layers;
pub mod layout;
pub mod predict;
pub mod session;
pub mod view;

// Convenience re-exports
pub use crate::config::VizConfig;
pub use grid::{Gesture, Grid, Intensity};
pub use layers::{ActivationTriple, LayerKind, LayerSizes, LayerState};
pub use layout::{Connection, Geometry, GeneratorKind, LayoutCache, LayoutPass, SeedPolicy, Segment};
pub use predict::{dispatch, HttpPredictor, PredictError, PredictRequest, PredictResponse, PredictionTicket, Predictor};
pub use session::{ApplyOutcome, OrderingPolicy, Session};
pub use view::Snapshot;
