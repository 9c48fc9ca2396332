pub mod gesture;
pub mod grid;

pub use gesture::Gesture;
pub use grid::{Grid, Intensity};
