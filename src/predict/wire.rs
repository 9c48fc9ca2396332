use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::layers::{ActivationTriple, LayerKind, LayerSizes};
use crate::predict::error::PredictError;

/// Request body: `{"input": [..]}`, the grid flattened row-major with
/// pixel values in {0, 128, 255}.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub input: Vec<u8>,
}

impl PredictRequest {
    pub fn from_grid(grid: &Grid) -> Self {
        PredictRequest { input: grid.quantize() }
    }
}

/// Response body: `{"dense_layer_outputs": [m1, m2, m3]}` where each `m`
/// is a batch matrix and its first row holds one layer's activations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub dense_layer_outputs: Vec<Vec<Vec<f64>>>,
}

impl PredictResponse {
    /// Builds a single-row response from a triple. Handy for fake services.
    pub fn from_triple(triple: &ActivationTriple) -> Self {
        PredictResponse {
            dense_layer_outputs: vec![
                vec![triple.hidden1.clone()],
                vec![triple.hidden2.clone()],
                vec![triple.output.clone()],
            ],
        }
    }

    /// Parses a raw body and checks it against the configured layer sizes.
    pub fn parse(body: &[u8], sizes: &LayerSizes) -> Result<ActivationTriple, PredictError> {
        let response: PredictResponse = serde_json::from_slice(body)
            .map_err(|e| PredictError::Malformed(e.to_string()))?;
        response.into_triple(sizes)
    }

    /// Takes the first row of the first three matrices as
    /// `[hidden1, hidden2, output]`.
    pub fn into_triple(self, sizes: &LayerSizes) -> Result<ActivationTriple, PredictError> {
        if self.dense_layer_outputs.len() < 3 {
            return Err(PredictError::Malformed(format!(
                "expected 3 layer outputs, got {}",
                self.dense_layer_outputs.len()
            )));
        }

        let rows = self
            .dense_layer_outputs
            .into_iter()
            .zip(LayerKind::ALL)
            .map(|(matrix, kind)| {
                let row = matrix.into_iter().next().ok_or_else(|| {
                    PredictError::Malformed(format!("{} output has no rows", kind.name()))
                })?;
                if row.len() != sizes.of(kind) {
                    return Err(PredictError::Malformed(format!(
                        "{} has {} values, expected {}",
                        kind.name(),
                        row.len(),
                        sizes.of(kind)
                    )));
                }
                Ok(row)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let [hidden1, hidden2, output]: [Vec<f64>; 3] = rows
            .try_into()
            .map_err(|_| PredictError::Malformed("expected 3 layer outputs".into()))?;
        Ok(ActivationTriple { hidden1, hidden2, output })
    }
}
