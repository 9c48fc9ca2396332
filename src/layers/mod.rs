pub mod layer_state;

pub use layer_state::{ActivationTriple, LayerKind, LayerSizes, LayerState};
