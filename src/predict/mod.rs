pub mod client;
pub mod dispatch;
pub mod error;
pub mod wire;

pub use client::{HttpPredictor, Predictor};
pub use dispatch::{dispatch, PredictionTicket};
pub use error::PredictError;
pub use wire::{PredictRequest, PredictResponse};
