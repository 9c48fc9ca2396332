use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::layers::ActivationTriple;
use crate::predict::client::Predictor;
use crate::predict::error::PredictError;
use crate::predict::wire::PredictRequest;

/// One prediction to run, tagged with the sequence number it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionTicket {
    pub seq: u64,
    pub request: PredictRequest,
}

/// Runs `ticket` on a fresh thread and hands the result to `on_complete`.
///
/// Fire-and-forget: the caller never waits, nothing cancels the call, and
/// overlapping calls may complete in any order. The handle is returned only
/// so tests can join it.
pub fn dispatch<F>(predictor: Arc<dyn Predictor>, ticket: PredictionTicket, on_complete: F) -> JoinHandle<()>
where
    F: FnOnce(u64, Result<ActivationTriple, PredictError>) + Send + 'static,
{
    thread::spawn(move || {
        let result = predictor.predict(&ticket.request);
        match &result {
            Ok(_)  => debug!(seq = ticket.seq, "prediction completed"),
            Err(e) => warn!(seq = ticket.seq, error = %e, "prediction failed"),
        }
        on_complete(ticket.seq, result);
    })
}
