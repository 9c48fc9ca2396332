use std::time::Duration;

use tracing::debug;

use crate::layers::{ActivationTriple, LayerSizes};
use crate::predict::error::PredictError;
use crate::predict::wire::{PredictRequest, PredictResponse};

/// Something that turns a quantized grid into layer activations.
///
/// Implementations are called from worker threads, hence `Send + Sync`.
pub trait Predictor: Send + Sync {
    fn predict(&self, request: &PredictRequest) -> Result<ActivationTriple, PredictError>;
}

/// Blocking JSON-over-HTTP client for the external prediction service.
pub struct HttpPredictor {
    agent: ureq::Agent,
    endpoint: String,
    sizes: LayerSizes,
}

impl HttpPredictor {
    /// `timeout` of `None` waits forever, like a browser `fetch` would.
    pub fn new(endpoint: impl Into<String>, sizes: LayerSizes, timeout: Option<Duration>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .build();
        HttpPredictor {
            agent: ureq::Agent::new_with_config(config),
            endpoint: endpoint.into(),
            sizes,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Predictor for HttpPredictor {
    fn predict(&self, request: &PredictRequest) -> Result<ActivationTriple, PredictError> {
        debug!(endpoint = %self.endpoint, pixels = request.input.len(), "posting prediction request");

        let mut response = self
            .agent
            .post(&self.endpoint)
            .send_json(request)
            .map_err(|e| match e {
                ureq::Error::StatusCode(code) => PredictError::Status(code),
                other => PredictError::Transport(other.to_string()),
            })?;

        let body: PredictResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| PredictError::Malformed(e.to_string()))?;

        body.into_triple(&self.sizes)
    }
}
