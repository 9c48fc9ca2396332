use thiserror::Error;

/// Why a prediction call produced no activations.
///
/// None of these are fatal: the caller logs them and keeps the previous
/// layer state on screen.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PredictError {
    /// Connection refused, DNS, timeout, broken stream.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-2xx status.
    #[error("prediction service returned HTTP {0}")]
    Status(u16),

    /// The body was not the expected JSON shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}
